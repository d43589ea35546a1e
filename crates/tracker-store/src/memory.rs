//! In-memory storage backend for testing and development

use std::{
    collections::BTreeMap,
    ops::Bound,
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracker_types::Item;

use crate::{
    ItemStore, Result,
    metrics::{MetricsSnapshot, OpTimer, Operation, StoreMetrics},
};

/// Sort key -> item, ordered lexicographically
type Partition = BTreeMap<String, Item>;

/// In-memory item store
///
/// Each partition is a sorted map, so prefix queries are a range walk and
/// come back in sort-key order. Cloning the backend shares the underlying
/// data.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    data: Arc<RwLock<MemoryTable>>,
    metrics: Arc<StoreMetrics>,
}

#[derive(Default)]
struct MemoryTable {
    partitions: BTreeMap<String, Partition>,
    item_count: u64,
    byte_count: u64,
}

impl MemoryTable {
    fn insert(&mut self, item: Item) {
        let size = item.approximate_size() as u64;
        let previous = self
            .partitions
            .entry(item.partition_key.clone())
            .or_default()
            .insert(item.sort_key.clone(), item);

        match previous {
            Some(old) => {
                self.byte_count =
                    self.byte_count.saturating_sub(old.approximate_size() as u64) + size;
            },
            None => {
                self.item_count += 1;
                self.byte_count += size;
            },
        }
    }

    fn remove(&mut self, partition: &str, sort: &str) -> Option<Item> {
        let items = self.partitions.get_mut(partition)?;
        let removed = items.remove(sort)?;
        if items.is_empty() {
            self.partitions.remove(partition);
        }
        self.item_count -= 1;
        self.byte_count = self.byte_count.saturating_sub(removed.approximate_size() as u64);
        Some(removed)
    }

    fn all_items(&self) -> Vec<Item> {
        self.partitions.values().flat_map(|items| items.values().cloned()).collect()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with `items`.
    ///
    /// Later items overwrite earlier ones with the same key.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut table = MemoryTable::default();
        for item in items {
            table.insert(item);
        }
        let metrics = StoreMetrics::new();
        metrics.update_key_space(table.item_count, table.byte_count);

        Self { data: Arc::new(RwLock::new(table)), metrics: Arc::new(metrics) }
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.data.read().await.item_count as usize
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Copy of every item, without touching scan metrics
    pub(crate) async fn items(&self) -> Vec<Item> {
        self.data.read().await.all_items()
    }

    /// Count a mutation that failed outside this backend
    pub(crate) fn record_failure(&self, op: Operation, duration: Duration) {
        self.metrics.record(op, duration, true);
    }
}

#[async_trait]
impl ItemStore for MemoryBackend {
    async fn get(&self, partition: &str, sort: &str) -> Result<Option<Item>> {
        let timer = OpTimer::new();
        let table = self.data.read().await;

        let item = table.partitions.get(partition).and_then(|items| items.get(sort)).cloned();

        self.metrics.record(Operation::Get, timer.elapsed(), false);
        Ok(item)
    }

    async fn query_prefix(&self, partition: &str, sort_prefix: &str) -> Result<Vec<Item>> {
        let timer = OpTimer::new();
        let table = self.data.read().await;

        let items = match table.partitions.get(partition) {
            Some(items) => items
                .range::<str, _>((Bound::Included(sort_prefix), Bound::Unbounded))
                .take_while(|(sort, _)| sort.starts_with(sort_prefix))
                .map(|(_, item)| item.clone())
                .collect(),
            None => Vec::new(),
        };

        self.metrics.record(Operation::Query, timer.elapsed(), false);
        Ok(items)
    }

    async fn scan(&self) -> Result<Vec<Item>> {
        let timer = OpTimer::new();
        let items = self.data.read().await.all_items();

        tracing::debug!(item_count = items.len(), "Full table scan");
        self.metrics.record(Operation::Scan, timer.elapsed(), false);
        Ok(items)
    }

    async fn put(&self, item: Item) -> Result<()> {
        let timer = OpTimer::new();
        if let Err(e) = item.check_attributes() {
            self.metrics.record(Operation::Put, timer.elapsed(), true);
            return Err(e);
        }
        let mut table = self.data.write().await;

        tracing::debug!(pk = %item.partition_key, sk = %item.sort_key, "Put item");
        table.insert(item);

        self.metrics.update_key_space(table.item_count, table.byte_count);
        self.metrics.record(Operation::Put, timer.elapsed(), false);
        Ok(())
    }

    async fn delete(&self, partition: &str, sort: &str) -> Result<()> {
        let timer = OpTimer::new();
        let mut table = self.data.write().await;

        let removed = table.remove(partition, sort).is_some();
        tracing::debug!(pk = %partition, sk = %sort, removed, "Delete item");

        self.metrics.update_key_space(table.item_count, table.byte_count);
        self.metrics.record(Operation::Delete, timer.elapsed(), false);
        Ok(())
    }

    fn metrics(&self) -> Option<MetricsSnapshot> {
        Some(self.metrics.snapshot())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use tracker_types::{EntityType, StoreError};

    use super::*;

    fn item(pk: &str, sk: &str, kind: EntityType) -> Item {
        Item::new(pk, sk, kind)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryBackend::new();
        let account = item("ACCOUNT#a@x.com", "METADATA", EntityType::Account)
            .with_attribute("team_name", "Crabs");

        store.put(account.clone()).await.unwrap();

        let fetched = store.get("ACCOUNT#a@x.com", "METADATA").await.unwrap();
        assert_eq!(fetched, Some(account));
        assert!(store.get("ACCOUNT#a@x.com", "EVENT#1").await.unwrap().is_none());
        assert!(store.get("ACCOUNT#b@x.com", "METADATA").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_whole_item() {
        let store = MemoryBackend::new();
        let original = item("p", "s", EntityType::Event)
            .with_attribute("name", "old")
            .with_attribute("extra", 1);
        store.put(original).await.unwrap();
        store.put(item("p", "s", EntityType::Event).with_attribute("name", "new")).await.unwrap();

        let fetched = store.get("p", "s").await.unwrap().unwrap();
        assert_eq!(fetched.str_attribute("name"), Some("new"));
        assert!(fetched.attribute("extra").is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_query_prefix_excludes_other_prefixes_and_partitions() {
        let store = MemoryBackend::new();
        store.put(item("ACCOUNT#a@x.com", "METADATA", EntityType::Account)).await.unwrap();
        store.put(item("ACCOUNT#a@x.com", "EVENT#2", EntityType::Event)).await.unwrap();
        store.put(item("ACCOUNT#a@x.com", "EVENT#1", EntityType::Event)).await.unwrap();
        store.put(item("ACCOUNT#a@x.com", "ISSUE#1", EntityType::Issue)).await.unwrap();
        store.put(item("ACCOUNT#b@x.com", "EVENT#3", EntityType::Event)).await.unwrap();

        let events = store.query_prefix("ACCOUNT#a@x.com", "EVENT#").await.unwrap();
        let sorts: Vec<_> = events.iter().map(|i| i.sort_key.as_str()).collect();
        assert_eq!(sorts, vec!["EVENT#1", "EVENT#2"]);

        assert!(store.query_prefix("ACCOUNT#c@x.com", "EVENT#").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryBackend::new();
        store.put(item("p", "s", EntityType::Issue)).await.unwrap();

        store.delete("p", "s").await.unwrap();
        store.delete("p", "s").await.unwrap();
        store.delete("missing", "s").await.unwrap();

        assert!(store.get("p", "s").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_scan_spans_partitions() {
        let store = MemoryBackend::from_items(vec![
            item("A", "1", EntityType::Account),
            item("B", "1", EntityType::Event),
            item("C", "1", EntityType::Submission),
        ]);

        assert_eq!(store.scan().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryBackend::new();
        let clone = store.clone();
        clone.put(item("p", "s", EntityType::Artifact)).await.unwrap();

        assert!(store.get("p", "s").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reserved_attribute_is_rejected_and_counted() {
        let store = MemoryBackend::new();
        let bad = item("ISSUE#1", "METADATA", EntityType::Issue).with_attribute("type", "bug");

        let result = store.put(bad).await;
        assert!(matches!(result, Err(StoreError::InvalidItem(_))));
        assert!(store.is_empty().await);

        let snapshot = store.metrics().unwrap();
        assert_eq!(snapshot.put.count, 1);
        assert_eq!(snapshot.put.errors, 1);
    }

    #[tokio::test]
    async fn test_metrics_track_operations_and_key_space() {
        let store = MemoryBackend::new();
        store.put(item("p", "a", EntityType::Event)).await.unwrap();
        store.put(item("p", "b", EntityType::Event)).await.unwrap();
        store.get("p", "a").await.unwrap();
        store.query_prefix("p", "").await.unwrap();
        store.delete("p", "a").await.unwrap();

        let snapshot = store.metrics().unwrap();
        assert_eq!(snapshot.put.count, 2);
        assert_eq!(snapshot.get.count, 1);
        assert_eq!(snapshot.query.count, 1);
        assert_eq!(snapshot.delete.count, 1);
        assert_eq!(snapshot.total_items, 1);
        assert!(snapshot.total_bytes > 0);
    }
}
