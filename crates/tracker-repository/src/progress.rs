//! Repository for progress records.
//!
//! # Key Schema
//!
//! - `SUBMISSION#{submission_id}` / `LOG#{iso_timestamp}` → ProgressRecord attributes
//!
//! Timestamps come from the shared [`IdGenerator`], so two records appended
//! in the same millisecond by one process do not overwrite each other.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracker_types::{EntityType, ProgressRecord};

use crate::{Entity, IdGenerator, Table, error::RepositoryResult, keys};

impl Entity for ProgressRecord {
    const ENTITY_TYPE: EntityType = EntityType::ProgressLog;

    fn partition_key(&self) -> String {
        keys::submission::partition(&self.submission_id)
    }

    fn sort_key(&self) -> String {
        keys::progress::sort(&self.timestamp)
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

/// Append-only history of submission progress changes.
#[derive(Clone)]
pub struct ProgressRepository {
    table: Table,
    ids: Arc<IdGenerator>,
}

impl ProgressRepository {
    pub fn new(table: Table, ids: Arc<IdGenerator>) -> Self {
        Self { table, ids }
    }

    /// Record a progress change at the current time.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn append(
        &self,
        submission_id: &str,
        update_text: &str,
        delta_percentage: i64,
    ) -> RepositoryResult<ProgressRecord> {
        let mut record = ProgressRecord::new(submission_id, update_text, delta_percentage);
        record.timestamp = self.ids.next_timestamp();
        self.table.put_entity(record).await
    }

    /// History of one submission, earliest first
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn history(&self, submission_id: &str) -> RepositoryResult<Vec<ProgressRecord>> {
        self.table
            .query_entities(&keys::submission::partition(submission_id), keys::progress::PREFIX)
            .await
    }

    /// Delete one record, identified by its ISO-8601 timestamp key.
    pub async fn delete(&self, submission_id: &str, timestamp: &str) -> RepositoryResult<()> {
        self.table
            .delete_by_key(
                &keys::submission::partition(submission_id),
                &format!("{}{}", keys::progress::PREFIX, timestamp),
            )
            .await
    }

    /// Delete every record of a submission, returning how many were removed.
    ///
    /// Items are removed by the sort key they were stored under, whatever
    /// their `timestamp` attribute says.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn purge(&self, submission_id: &str) -> RepositoryResult<usize> {
        let partition = keys::submission::partition(submission_id);
        let items = self.table.query_children(&partition, keys::progress::PREFIX).await?;
        for item in &items {
            self.table.delete_by_key(&partition, &item.sort_key).await?;
        }
        Ok(items.len())
    }
}
