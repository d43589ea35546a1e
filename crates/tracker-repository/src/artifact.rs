//! Repository for Artifact entities.
//!
//! # Key Schema
//!
//! - `SUBMISSION#{submission_id}` / `ARTIFACT#{id}` → Artifact attributes

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracker_types::{Artifact, EntityType};

use crate::{
    Entity, IdGenerator, Table,
    error::RepositoryResult,
    ids::kind,
    keys,
};

impl Entity for Artifact {
    const ENTITY_TYPE: EntityType = EntityType::Artifact;

    fn partition_key(&self) -> String {
        keys::submission::partition(&self.submission_id)
    }

    fn sort_key(&self) -> String {
        keys::artifact::sort(&self.id)
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

/// Repository for uploaded artifact metadata.
#[derive(Clone)]
pub struct ArtifactRepository {
    table: Table,
    ids: Arc<IdGenerator>,
}

impl ArtifactRepository {
    pub fn new(table: Table, ids: Arc<IdGenerator>) -> Self {
        Self { table, ids }
    }

    pub async fn get(&self, submission_id: &str, id: &str) -> RepositoryResult<Option<Artifact>> {
        self.table
            .get_entity(&keys::submission::partition(submission_id), &keys::artifact::sort(id))
            .await
    }

    /// Artifacts of one submission. Progress records in the same partition are excluded.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn list_for_submission(
        &self,
        submission_id: &str,
    ) -> RepositoryResult<Vec<Artifact>> {
        self.table
            .query_entities(&keys::submission::partition(submission_id), keys::artifact::PREFIX)
            .await
    }

    #[tracing::instrument(
        skip(self, artifact),
        fields(submission = %artifact.submission_id),
        level = "debug"
    )]
    pub async fn save(&self, mut artifact: Artifact) -> RepositoryResult<Artifact> {
        if artifact.id.is_empty() {
            artifact.id = self.ids.next_id(kind::ARTIFACT);
        }
        self.table.put_entity(artifact).await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn delete(&self, submission_id: &str, id: &str) -> RepositoryResult<()> {
        self.table
            .delete_by_key(&keys::submission::partition(submission_id), &keys::artifact::sort(id))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use tracker_store::MemoryBackend;

    use super::*;
    use crate::ProgressRepository;

    #[tokio::test]
    async fn test_artifacts_exclude_progress_records() {
        let table = Table::new(Arc::new(MemoryBackend::new()));
        let ids = Arc::new(IdGenerator::new());
        let artifacts = ArtifactRepository::new(table.clone(), ids.clone());
        let progress = ProgressRepository::new(table, ids);

        let saved = artifacts
            .save(Artifact::new("sub_1", "artifacts/sub_1/1_report.pdf", "report.pdf"))
            .await
            .unwrap();
        progress.append("sub_1", "Update: Testing | 50%", 50).await.unwrap();

        let listed = artifacts.list_for_submission("sub_1").await.unwrap();
        assert_eq!(listed, vec![saved.clone()]);
        assert!(saved.id.starts_with("art_"));
        assert!(!saved.is_graded());
    }

    #[tokio::test]
    async fn test_grade_and_delete() {
        let artifacts = ArtifactRepository::new(
            Table::new(Arc::new(MemoryBackend::new())),
            Arc::new(IdGenerator::new()),
        );
        let mut artifact =
            artifacts.save(Artifact::new("sub_1", "artifacts/sub_1/1_a.zip", "a.zip")).await.unwrap();

        artifact.rating = 4.5;
        artifact.feedback = "Solid".to_string();
        artifacts.save(artifact.clone()).await.unwrap();
        let fetched = artifacts.get("sub_1", &artifact.id).await.unwrap().unwrap();
        assert!(fetched.is_graded());
        assert_eq!(fetched.feedback, "Solid");

        artifacts.delete("sub_1", &artifact.id).await.unwrap();
        assert!(artifacts.list_for_submission("sub_1").await.unwrap().is_empty());
    }
}
