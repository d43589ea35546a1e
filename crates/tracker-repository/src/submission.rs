//! Repository for Submission entities.
//!
//! # Key Schema
//!
//! - `EVENT#{event_id}` / `SUBMISSION#{id}` → Submission attributes

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracker_types::{EntityType, Submission};

use crate::{
    Entity, IdGenerator, Table,
    error::RepositoryResult,
    ids::kind,
    keys,
};

impl Entity for Submission {
    const ENTITY_TYPE: EntityType = EntityType::Submission;

    fn partition_key(&self) -> String {
        keys::event::partition(&self.event_id)
    }

    fn sort_key(&self) -> String {
        keys::submission::sort(&self.id)
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

/// Repository for project submissions, partitioned by event.
#[derive(Clone)]
pub struct SubmissionRepository {
    table: Table,
    ids: Arc<IdGenerator>,
}

impl SubmissionRepository {
    pub fn new(table: Table, ids: Arc<IdGenerator>) -> Self {
        Self { table, ids }
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get(&self, event_id: &str, id: &str) -> RepositoryResult<Option<Submission>> {
        self.table
            .get_entity(&keys::event::partition(event_id), &keys::submission::sort(id))
            .await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn list_for_event(&self, event_id: &str) -> RepositoryResult<Vec<Submission>> {
        self.table
            .query_entities(&keys::event::partition(event_id), keys::submission::PREFIX)
            .await
    }

    /// Every submission across all events. Full scan.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn list(&self) -> RepositoryResult<Vec<Submission>> {
        self.table.scan_entities().await
    }

    #[tracing::instrument(
        skip(self, submission),
        fields(event = %submission.event_id),
        level = "debug"
    )]
    pub async fn save(&self, mut submission: Submission) -> RepositoryResult<Submission> {
        if submission.id.is_empty() {
            submission.id = self.ids.next_id(kind::SUBMISSION);
        }
        self.table.put_entity(submission).await
    }

    /// Delete the submission item. Artifacts and progress records are not touched.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn delete(&self, event_id: &str, id: &str) -> RepositoryResult<()> {
        self.table
            .delete_by_key(&keys::event::partition(event_id), &keys::submission::sort(id))
            .await
    }
}
