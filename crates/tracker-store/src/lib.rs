//! # Tracker Store - Key-Value Store Primitives
//!
//! Provides the three primitives the access layer is built on (point get,
//! prefix query within a partition, unfiltered scan) plus unconditional put
//! and delete.
//!
//! ## Backends
//!
//! - [`MemoryBackend`] - in-process sorted maps, for tests and development
//! - [`FileBackend`] - a memory backend persisted to a JSON snapshot file
//!
//! Use [`StorageFactory`] to build a backend from configuration.

#![deny(unsafe_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tracker_types::{Item, StoreResult};

pub mod factory;
pub mod file;
pub mod memory;
pub mod metrics;

pub use factory::{BackendType, StorageConfig, StorageFactory};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use metrics::{MetricsSnapshot, OpTimer, StoreMetrics};

type Result<T> = StoreResult<T>;

/// Shared handle to a store, passed by reference into the access layer
pub type SharedStore = Arc<dyn ItemStore>;

/// The abstract key-value store interface
///
/// Items are addressed by (partition key, sort key). There are no
/// transactions, no conditional writes and no pagination: every operation
/// either succeeds or returns a [`tracker_types::StoreError`].
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Point lookup. A missing item is `Ok(None)`, not an error.
    async fn get(&self, partition: &str, sort: &str) -> Result<Option<Item>>;

    /// All items in `partition` whose sort key starts with `sort_prefix`,
    /// in ascending lexicographic sort-key order
    async fn query_prefix(&self, partition: &str, sort_prefix: &str) -> Result<Vec<Item>>;

    /// Every item in the table, across all partitions
    async fn scan(&self) -> Result<Vec<Item>>;

    /// Unconditional full-item overwrite; last writer wins
    async fn put(&self, item: Item) -> Result<()>;

    /// Unconditional delete. Deleting an absent key succeeds.
    async fn delete(&self, partition: &str, sort: &str) -> Result<()>;

    /// Get metrics snapshot (optional, returns None if not supported)
    fn metrics(&self) -> Option<MetricsSnapshot> {
        None
    }
}
