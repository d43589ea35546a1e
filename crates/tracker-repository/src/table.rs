//! The hierarchical key-value access layer.
//!
//! [`Table`] exposes the five access-layer operations over raw [`Item`]s and
//! typed variants over any [`Entity`]:
//!
//! | Operation | Store primitive |
//! |---|---|
//! | `get_by_key` | point get |
//! | `query_children` | prefix query within one partition |
//! | `scan_all` / `scan_type` | full scan, filtered client-side |
//! | `put` | unconditional overwrite, stamps `updated_at` |
//! | `delete_by_key` | unconditional, idempotent delete |
//!
//! Scans cost time proportional to the whole table regardless of how many
//! items match.

use chrono::Utc;
use tracker_store::SharedStore;
use tracker_types::{EntityType, Item};

use crate::{
    Entity,
    error::{RepositoryError, RepositoryResult},
};

/// Access layer over one shared table
#[derive(Clone)]
pub struct Table {
    store: SharedStore,
}

impl Table {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Point lookup; a missing item is `None`
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_by_key(&self, partition: &str, sort: &str) -> RepositoryResult<Option<Item>> {
        Ok(self.store.get(partition, sort).await?)
    }

    /// Items in `partition` whose sort key starts with `sort_prefix`, in sort-key order
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn query_children(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> RepositoryResult<Vec<Item>> {
        Ok(self.store.query_prefix(partition, sort_prefix).await?)
    }

    /// Every item in the table
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn scan_all(&self) -> RepositoryResult<Vec<Item>> {
        Ok(self.store.scan().await?)
    }

    /// Every item carrying the type tag `kind`
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn scan_type(&self, kind: EntityType) -> RepositoryResult<Vec<Item>> {
        let mut items = self.scan_all().await?;
        items.retain(|item| item.entity_type == kind);
        Ok(items)
    }

    /// Stamp `updated_at` and overwrite whatever is stored under the item's key.
    ///
    /// Attributes named `pk`, `sk` or `type` are rejected.
    #[tracing::instrument(
        skip(self, item),
        fields(pk = %item.partition_key, sk = %item.sort_key),
        level = "debug"
    )]
    pub async fn put(&self, mut item: Item) -> RepositoryResult<Item> {
        item.check_attributes().map_err(|e| RepositoryError::Validation(e.to_string()))?;
        item.touch(Utc::now());
        self.store.put(item.clone()).await?;
        Ok(item)
    }

    /// Delete the item at the key; deleting an absent key succeeds
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn delete_by_key(&self, partition: &str, sort: &str) -> RepositoryResult<()> {
        Ok(self.store.delete(partition, sort).await?)
    }

    // =========================================================================
    // Typed access
    // =========================================================================

    pub async fn get_entity<E: Entity>(
        &self,
        partition: &str,
        sort: &str,
    ) -> RepositoryResult<Option<E>> {
        self.get_by_key(partition, sort).await?.map(E::from_item).transpose()
    }

    pub async fn query_entities<E: Entity>(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> RepositoryResult<Vec<E>> {
        self.query_children(partition, sort_prefix)
            .await?
            .into_iter()
            .map(E::from_item)
            .collect()
    }

    /// All entities of type `E`, across every partition
    pub async fn scan_entities<E: Entity>(&self) -> RepositoryResult<Vec<E>> {
        self.scan_type(E::ENTITY_TYPE).await?.into_iter().map(E::from_item).collect()
    }

    /// Compute the entity's key, stamp `updated_at` and write it.
    ///
    /// Returns the entity as stored, so its `updated_at` has millisecond precision.
    pub async fn put_entity<E: Entity>(&self, mut entity: E) -> RepositoryResult<E> {
        let now = Utc::now();
        entity.set_updated_at(now);
        let mut item = entity.to_item()?;
        item.touch(now);

        let kind = E::ENTITY_TYPE;
        tracing::debug!(pk = %item.partition_key, sk = %item.sort_key, %kind, "Put entity");
        self.store.put(item.clone()).await?;
        E::from_item(item)
    }

    /// Access the underlying store.
    #[inline]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::Arc;

    use tracker_store::{ItemStore, MemoryBackend};
    use tracker_test_fixtures::{FailingStore, test_issue};
    use tracker_types::{Issue, StoreError, item::UPDATED_AT};

    use super::*;

    fn table() -> Table {
        Table::new(Arc::new(MemoryBackend::new()))
    }

    fn without_stamp(mut item: Item) -> Item {
        item.attributes.remove(UPDATED_AT);
        item
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips_attributes() {
        let table = table();
        let item = Item::new("ACCOUNT#a@x.com", "METADATA", EntityType::Account)
            .with_attribute("team_name", "Crabs")
            .with_attribute("skills", vec!["rust", "sql"]);

        let stored = table.put(item.clone()).await.unwrap();
        assert!(stored.updated_at().is_some());

        let fetched = table.get_by_key("ACCOUNT#a@x.com", "METADATA").await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(without_stamp(fetched), item);
    }

    #[tokio::test]
    async fn test_query_children_returns_events_but_not_metadata() {
        let table = table();
        table.put(Item::new("ACCOUNT#a@x.com", "METADATA", EntityType::Account)).await.unwrap();
        table.put(Item::new("ACCOUNT#a@x.com", "EVENT#1", EntityType::Event)).await.unwrap();
        table.put(Item::new("ACCOUNT#a@x.com", "EVENT#2", EntityType::Event)).await.unwrap();

        let children = table.query_children("ACCOUNT#a@x.com", "EVENT#").await.unwrap();
        let sorts: Vec<_> = children.iter().map(|i| i.sort_key.as_str()).collect();
        assert_eq!(sorts, vec!["EVENT#1", "EVENT#2"]);
        assert!(children.iter().all(|i| i.entity_type == EntityType::Event));
    }

    #[tokio::test]
    async fn test_progress_records_come_back_earliest_first() {
        let table = table();
        // Written out of order on purpose
        for sort in ["LOG#2024-01-02T00:00:00.000Z", "LOG#2024-01-01T00:00:00.000Z"] {
            table.put(Item::new("SUBMISSION#s1", sort, EntityType::ProgressLog)).await.unwrap();
        }

        let logs = table.query_children("SUBMISSION#s1", "LOG#").await.unwrap();
        let sorts: Vec<_> = logs.iter().map(|i| i.sort_key.as_str()).collect();
        assert_eq!(sorts, vec!["LOG#2024-01-01T00:00:00.000Z", "LOG#2024-01-02T00:00:00.000Z"]);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_absent_and_delete_is_idempotent() {
        let table = table();
        table.put(Item::new("EVENT#e1", "SUBMISSION#s1", EntityType::Submission)).await.unwrap();

        table.delete_by_key("EVENT#e1", "SUBMISSION#s1").await.unwrap();
        assert!(table.get_by_key("EVENT#e1", "SUBMISSION#s1").await.unwrap().is_none());

        table.delete_by_key("EVENT#e1", "SUBMISSION#s1").await.unwrap();
        table.delete_by_key("EVENT#nope", "SUBMISSION#nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_scan_type_filters_across_partitions() {
        let table = table();
        table.put(Item::new("ACCOUNT#a@x.com", "METADATA", EntityType::Account)).await.unwrap();
        table.put(Item::new("ACCOUNT#b@x.com", "METADATA", EntityType::Account)).await.unwrap();
        table.put(Item::new("ACCOUNT#a@x.com", "EVENT#1", EntityType::Event)).await.unwrap();
        table.put(Item::new("EVENT#1", "SUBMISSION#1", EntityType::Submission)).await.unwrap();
        table.delete_by_key("ACCOUNT#b@x.com", "METADATA").await.unwrap();

        let accounts = table.scan_type(EntityType::Account).await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].partition_key, "ACCOUNT#a@x.com");

        assert_eq!(table.scan_type(EntityType::Submission).await.unwrap().len(), 1);
        assert!(table.scan_type(EntityType::Issue).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let table = table();
        for title in ["first", "second"] {
            let item = Item::new("p", "s", EntityType::Issue).with_attribute("title", title);
            table.put(item).await.unwrap();
        }

        let fetched = table.get_by_key("p", "s").await.unwrap().unwrap();
        assert_eq!(fetched.str_attribute("title"), Some("second"));
    }

    #[tokio::test]
    async fn test_store_faults_propagate_unchanged() {
        let table = Table::new(Arc::new(FailingStore::new("connection reset")));

        let err = table.get_by_key("p", "s").await.unwrap_err();
        match err {
            RepositoryError::Storage(StoreError::Database(msg)) => {
                assert_eq!(msg, "connection reset")
            },
            other => panic!("Expected Storage(Database), got {:?}", other),
        }
        assert!(table.scan_type(EntityType::Account).await.is_err());
        assert!(table.put(Item::new("p", "s", EntityType::Issue)).await.is_err());
        assert!(table.delete_by_key("p", "s").await.is_err());
    }

    #[tokio::test]
    async fn test_typed_read_rejects_foreign_type_tag() {
        let store = Arc::new(MemoryBackend::new());
        store.put(Item::new("ACCOUNT#a@x.com", "EVENT#1", EntityType::Issue)).await.unwrap();
        let table = Table::new(store);

        let result = table.get_entity::<tracker_types::Event>("ACCOUNT#a@x.com", "EVENT#1").await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_put_rejects_reserved_attribute_names() {
        let table = table();

        for name in ["pk", "sk", "type"] {
            let item =
                Item::new("ISSUE#1", "METADATA", EntityType::Issue).with_attribute(name, "x");
            let result = table.put(item).await;
            assert!(matches!(result, Err(RepositoryError::Validation(_))), "{name} accepted");
        }
        assert!(table.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_raw_and_typed_writes_stamp_the_same_format() {
        let table = table();
        let raw = table.put(Item::new("p", "s", EntityType::Event)).await.unwrap();

        let issue = table.put_entity(test_issue("team@x.com", "Wifi down")).await.unwrap();
        let stored = table
            .get_by_key(&issue.partition_key(), &issue.sort_key())
            .await
            .unwrap()
            .unwrap();

        for stamp in [raw.str_attribute(UPDATED_AT), stored.str_attribute(UPDATED_AT)] {
            let stamp = stamp.unwrap();
            assert!(stamp.ends_with('Z'), "{stamp}");
            assert_eq!(stamp.len(), "2024-01-01T00:00:00.000Z".len(), "{stamp}");
        }

        let fetched: Issue =
            table.get_entity(&issue.partition_key(), &issue.sort_key()).await.unwrap().unwrap();
        assert_eq!(fetched, issue);
    }
}
