//! Artifact service - uploaded file metadata and grading
//!
//! Only metadata lives in the table. The object path is derived here; moving
//! the bytes to and from object storage is the caller's job.

use std::sync::Arc;

use tracker_types::Artifact;

use crate::{
    ServiceContext, ServiceError, ServiceResult,
    validation::{require_non_empty, validate_rating},
};

/// Service for submission artifacts
pub struct ArtifactService {
    context: Arc<ServiceContext>,
}

impl ArtifactService {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    /// Record an uploaded file under `<prefix>/<submission>/<millis>_<name>`.
    #[tracing::instrument(skip(self))]
    pub async fn record_upload(
        &self,
        submission_id: &str,
        original_name: &str,
    ) -> ServiceResult<Artifact> {
        require_non_empty("submission_id", submission_id)?;
        require_non_empty("file name", original_name)?;

        let storage = &self.context.storage;
        let file_path = format!(
            "{}/{}/{}_{}",
            self.context.settings.artifact_prefix,
            submission_id,
            storage.ids().next_millis(),
            original_name
        );

        let saved =
            storage.artifacts().save(Artifact::new(submission_id, file_path, original_name)).await?;
        tracing::info!(id = %saved.id, path = %saved.file_path, "Artifact recorded");
        Ok(saved)
    }

    pub async fn list(&self, submission_id: &str) -> ServiceResult<Vec<Artifact>> {
        Ok(self.context.storage.artifacts().list_for_submission(submission_id).await?)
    }

    /// Set an artifact's rating and feedback.
    #[tracing::instrument(skip(self, feedback))]
    pub async fn grade(
        &self,
        submission_id: &str,
        id: &str,
        rating: f64,
        feedback: String,
    ) -> ServiceResult<Artifact> {
        validate_rating(rating)?;
        let mut artifact = self.load(submission_id, id).await?;
        artifact.rating = rating;
        artifact.feedback = feedback;
        Ok(self.context.storage.artifacts().save(artifact).await?)
    }

    /// Delete an artifact's metadata, returning it so the caller can remove the object.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, submission_id: &str, id: &str) -> ServiceResult<Artifact> {
        let artifact = self.load(submission_id, id).await?;
        self.context.storage.artifacts().delete(submission_id, id).await?;
        Ok(artifact)
    }

    async fn load(&self, submission_id: &str, id: &str) -> ServiceResult<Artifact> {
        self.context
            .storage
            .artifacts()
            .get(submission_id, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Artifact", id))
    }
}
