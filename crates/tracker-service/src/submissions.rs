//! Submission service - project entries, progress history and cascades

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracker_repository::TrackerStorage;
use tracker_types::{ProgressRecord, Submission};

use crate::{
    ServiceContext, ServiceError, ServiceResult,
    validation::{merge_text, require_non_empty, validate_percentage},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSubmission {
    pub event_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to `Idea`
    #[serde(default)]
    pub status: Option<String>,
    /// Defaults to 0
    #[serde(default)]
    pub progress_percentage: Option<u32>,
}

/// Submission changes; absent or empty fields keep their stored values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress_percentage: Option<u32>,
}

/// Items removed by a cascading delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeSummary {
    pub events: usize,
    pub submissions: usize,
    pub artifacts: usize,
    pub progress_records: usize,
}

impl CascadeSummary {
    pub(crate) fn absorb(&mut self, other: CascadeSummary) {
        self.events += other.events;
        self.submissions += other.submissions;
        self.artifacts += other.artifacts;
        self.progress_records += other.progress_records;
    }
}

/// Delete a submission together with its artifacts and progress records.
///
/// Children are removed before the submission item itself.
pub(crate) async fn purge_submission(
    storage: &TrackerStorage,
    event_id: &str,
    submission_id: &str,
) -> ServiceResult<CascadeSummary> {
    let mut summary = CascadeSummary::default();

    for artifact in storage.artifacts().list_for_submission(submission_id).await? {
        storage.artifacts().delete(submission_id, &artifact.id).await?;
        summary.artifacts += 1;
    }
    summary.progress_records = storage.progress().purge(submission_id).await?;

    storage.submissions().delete(event_id, submission_id).await?;
    summary.submissions += 1;

    tracing::debug!(
        submission = %submission_id,
        artifacts = summary.artifacts,
        progress_records = summary.progress_records,
        "Submission purged"
    );
    Ok(summary)
}

/// Service for submissions to events
pub struct SubmissionService {
    context: Arc<ServiceContext>,
}

impl SubmissionService {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    /// Create a submission owned by the team registered under `team_email`.
    #[tracing::instrument(skip(self, request), fields(event = %request.event_id))]
    pub async fn create(
        &self,
        team_email: &str,
        request: NewSubmission,
    ) -> ServiceResult<Submission> {
        require_non_empty("event_id", &request.event_id)?;
        require_non_empty("title", &request.title)?;
        if let Some(progress) = request.progress_percentage {
            validate_percentage(progress)?;
        }

        let storage = &self.context.storage;
        let team = storage
            .accounts()
            .get(team_email)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", team_email))?;

        let mut submission = Submission::new(request.event_id, request.title);
        submission.team_id = team.id;
        submission.description = request.description;
        if let Some(initial) = request.status.filter(|s| !s.trim().is_empty()) {
            submission.status = initial;
        }
        submission.progress_percentage = request.progress_percentage.unwrap_or(0);

        let saved = storage.submissions().save(submission).await?;
        tracing::info!(id = %saved.id, "Submission created");
        Ok(saved)
    }

    pub async fn list_for_event(&self, event_id: &str) -> ServiceResult<Vec<Submission>> {
        Ok(self.context.storage.submissions().list_for_event(event_id).await?)
    }

    /// Merge `update` into the stored submission.
    ///
    /// A status or progress change appends a progress record
    /// `Update: <status> | <progress>%` carrying the signed progress delta.
    #[tracing::instrument(skip(self, update))]
    pub async fn update(
        &self,
        event_id: &str,
        id: &str,
        update: SubmissionUpdate,
    ) -> ServiceResult<Submission> {
        if let Some(progress) = update.progress_percentage {
            validate_percentage(progress)?;
        }

        let storage = &self.context.storage;
        let mut submission = self.load(event_id, id).await?;
        let old_status = submission.status.clone();
        let old_progress = submission.progress_percentage;

        submission.title = merge_text(submission.title, update.title);
        submission.description = merge_text(submission.description, update.description);
        submission.status = merge_text(submission.status, update.status);
        if let Some(progress) = update.progress_percentage {
            submission.progress_percentage = progress;
        }

        let saved = storage.submissions().save(submission).await?;

        if saved.status != old_status || saved.progress_percentage != old_progress {
            let delta = i64::from(saved.progress_percentage) - i64::from(old_progress);
            let text = format!("Update: {} | {}%", saved.status, saved.progress_percentage);
            storage.progress().append(&saved.id, &text, delta).await?;
            tracing::debug!(%text, delta, "Progress recorded");
        }

        Ok(saved)
    }

    /// Delete a submission with its artifacts and progress records.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, event_id: &str, id: &str) -> ServiceResult<CascadeSummary> {
        self.load(event_id, id).await?;
        purge_submission(&self.context.storage, event_id, id).await
    }

    /// Progress history, earliest first
    pub async fn history(&self, submission_id: &str) -> ServiceResult<Vec<ProgressRecord>> {
        Ok(self.context.storage.progress().history(submission_id).await?)
    }

    async fn load(&self, event_id: &str, id: &str) -> ServiceResult<Submission> {
        self.context
            .storage
            .submissions()
            .get(event_id, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Submission", id))
    }
}
