//! A store whose every operation fails

use async_trait::async_trait;
use tracker_store::ItemStore;
use tracker_types::{Item, StoreError, StoreResult};

/// Returns `StoreError::Database` from every call, for fault-propagation tests.
#[derive(Debug, Clone)]
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    fn fail<T>(&self) -> StoreResult<T> {
        Err(StoreError::Database(self.message.clone()))
    }
}

impl Default for FailingStore {
    fn default() -> Self {
        Self::new("store unavailable")
    }
}

#[async_trait]
impl ItemStore for FailingStore {
    async fn get(&self, _partition: &str, _sort: &str) -> StoreResult<Option<Item>> {
        self.fail()
    }

    async fn query_prefix(&self, _partition: &str, _sort_prefix: &str) -> StoreResult<Vec<Item>> {
        self.fail()
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        self.fail()
    }

    async fn put(&self, _item: Item) -> StoreResult<()> {
        self.fail()
    }

    async fn delete(&self, _partition: &str, _sort: &str) -> StoreResult<()> {
        self.fail()
    }
}
