//! Repository for Event entities.
//!
//! # Key Schema
//!
//! - `ACCOUNT#{owner_email}` / `EVENT#{id}` → Event attributes

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracker_types::{EntityType, Event};

use crate::{
    Entity, IdGenerator, Table,
    error::RepositoryResult,
    ids::kind,
    keys,
};

impl Entity for Event {
    const ENTITY_TYPE: EntityType = EntityType::Event;

    fn partition_key(&self) -> String {
        keys::account::partition(&self.owner_email)
    }

    fn sort_key(&self) -> String {
        keys::event::sort(&self.id)
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

/// Repository for hackathon events, stored under their owner's partition.
#[derive(Clone)]
pub struct EventRepository {
    table: Table,
    ids: Arc<IdGenerator>,
}

impl EventRepository {
    pub fn new(table: Table, ids: Arc<IdGenerator>) -> Self {
        Self { table, ids }
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get(&self, owner_email: &str, id: &str) -> RepositoryResult<Option<Event>> {
        self.table
            .get_entity(&keys::account::partition(owner_email), &keys::event::sort(id))
            .await
    }

    /// Events owned by one account, ordered by id
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn list_for_account(&self, owner_email: &str) -> RepositoryResult<Vec<Event>> {
        self.table
            .query_entities(&keys::account::partition(owner_email), keys::event::PREFIX)
            .await
    }

    /// Every event in the table. Full scan.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn list(&self) -> RepositoryResult<Vec<Event>> {
        self.table.scan_entities().await
    }

    /// Find an event by id without knowing its owner. Full scan.
    pub async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Event>> {
        Ok(self.list().await?.into_iter().find(|event| event.id == id))
    }

    /// Create or overwrite an event, assigning an id when missing
    #[tracing::instrument(skip(self, event), fields(owner = %event.owner_email), level = "debug")]
    pub async fn save(&self, mut event: Event) -> RepositoryResult<Event> {
        event.owner_email = event.owner_email.to_lowercase();
        if event.id.is_empty() {
            event.id = self.ids.next_id(kind::EVENT);
        }
        self.table.put_entity(event).await
    }

    /// Delete the event item. Its submissions are not touched.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn delete(&self, owner_email: &str, id: &str) -> RepositoryResult<()> {
        self.table
            .delete_by_key(&keys::account::partition(owner_email), &keys::event::sort(id))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use tracker_store::MemoryBackend;
    use tracker_types::{Account, Role};

    use super::*;
    use crate::AccountRepository;

    fn table() -> (Table, Arc<IdGenerator>) {
        (Table::new(Arc::new(MemoryBackend::new())), Arc::new(IdGenerator::new()))
    }

    #[tokio::test]
    async fn test_events_share_owner_partition_with_account() {
        let (table, ids) = table();
        let accounts = AccountRepository::new(table.clone(), ids.clone());
        let events = EventRepository::new(table, ids);

        accounts.save(Account::new("a@x.com", "Crabs", Role::Team)).await.unwrap();
        let first = events.save(Event::new("a@x.com", "RustConf Hack")).await.unwrap();
        let second = events.save(Event::new("A@X.com", "Winter Jam")).await.unwrap();

        let listed = events.list_for_account("a@x.com").await.unwrap();
        assert_eq!(listed, vec![first.clone(), second]);

        // The account metadata is not an event
        assert_eq!(events.list().await.unwrap().len(), 2);
        assert_eq!(events.find_by_id(&first.id).await.unwrap().unwrap().name, "RustConf Hack");
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let (table, ids) = table();
        let events = EventRepository::new(table, ids);
        let event = events.save(Event::new("a@x.com", "Jam")).await.unwrap();

        assert_eq!(events.get("a@x.com", &event.id).await.unwrap(), Some(event.clone()));
        events.delete("a@x.com", &event.id).await.unwrap();
        assert!(events.get("a@x.com", &event.id).await.unwrap().is_none());
    }
}
