//! Unified storage facade for tracker operations.
//!
//! [`TrackerStorage`] is constructed once per process from a shared store
//! handle and passed to every consumer; there is no global client.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     TrackerStorage                      │
//! ├──────────┬────────┬─────────────┬───────────┬───────────┤
//! │ Accounts │ Events │ Submissions │ Artifacts │ Progress  │
//! │          │ Issues │             │           │           │
//! └──────────┴────────┴─────────────┴───────────┴───────────┘
//!                            │
//!                            ▼
//!                    Table (SharedStore)
//! ```

use std::sync::Arc;

use tracker_store::{MetricsSnapshot, SharedStore};

use crate::{
    AccountRepository, ArtifactRepository, EventRepository, IdGenerator, IssueRepository,
    ProgressRepository, SubmissionRepository, Table,
};

/// Facade bundling every repository over one shared table.
///
/// # Example
///
/// ```ignore
/// use tracker_store::StorageFactory;
/// use tracker_repository::TrackerStorage;
///
/// let storage = TrackerStorage::builder().store(StorageFactory::memory()).build();
/// let teams = storage.accounts().list().await?;
/// ```
#[derive(Clone)]
pub struct TrackerStorage {
    table: Table,
    ids: Arc<IdGenerator>,
    accounts: AccountRepository,
    events: EventRepository,
    submissions: SubmissionRepository,
    artifacts: ArtifactRepository,
    progress: ProgressRepository,
    issues: IssueRepository,
}

#[bon::bon]
impl TrackerStorage {
    /// Create a storage facade over `store`.
    ///
    /// Every repository shares the same table and identifier generator.
    #[builder]
    pub fn new(store: SharedStore, ids: Option<Arc<IdGenerator>>) -> Self {
        let table = Table::new(store);
        let ids = ids.unwrap_or_default();
        Self {
            accounts: AccountRepository::new(table.clone(), ids.clone()),
            events: EventRepository::new(table.clone(), ids.clone()),
            submissions: SubmissionRepository::new(table.clone(), ids.clone()),
            artifacts: ArtifactRepository::new(table.clone(), ids.clone()),
            progress: ProgressRepository::new(table.clone(), ids.clone()),
            issues: IssueRepository::new(table.clone(), ids.clone()),
            table,
            ids,
        }
    }
}

impl TrackerStorage {
    pub fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    pub fn events(&self) -> &EventRepository {
        &self.events
    }

    pub fn submissions(&self) -> &SubmissionRepository {
        &self.submissions
    }

    pub fn artifacts(&self) -> &ArtifactRepository {
        &self.artifacts
    }

    pub fn progress(&self) -> &ProgressRepository {
        &self.progress
    }

    pub fn issues(&self) -> &IssueRepository {
        &self.issues
    }

    /// Raw access layer, for callers that work with untyped items
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn ids(&self) -> &Arc<IdGenerator> {
        &self.ids
    }

    /// Backend metrics, if the backend records them
    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        self.table.store().metrics()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use tracker_store::StorageFactory;
    use tracker_types::{Account, EntityType, Event, Role, Submission};

    use super::*;

    #[tokio::test]
    async fn test_repositories_share_one_table() {
        let storage = TrackerStorage::builder().store(StorageFactory::memory()).build();

        storage.accounts().save(Account::new("a@x.com", "Crabs", Role::Team)).await.unwrap();
        let event = storage.events().save(Event::new("a@x.com", "Jam")).await.unwrap();
        storage.submissions().save(Submission::new(&event.id, "Bot")).await.unwrap();

        let items = storage.table().scan_all().await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(storage.table().scan_type(EntityType::Event).await.unwrap().len(), 1);

        let metrics = storage.metrics().unwrap();
        assert_eq!(metrics.put.count, 3);
        assert_eq!(metrics.total_items, 3);
    }

    #[tokio::test]
    async fn test_shared_id_generator() {
        let ids = Arc::new(IdGenerator::new());
        let storage =
            TrackerStorage::builder().store(StorageFactory::memory()).ids(ids.clone()).build();

        let event = storage.events().save(Event::new("a@x.com", "Jam")).await.unwrap();
        let next = ids.next_millis();
        let millis: i64 = event.id.trim_start_matches("event_").parse().unwrap();
        assert!(next > millis);
    }
}
