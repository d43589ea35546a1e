//! JSON-file storage backend
//!
//! Keeps the table in a [`MemoryBackend`] and rewrites a snapshot file after
//! every mutation. Intended for single-process local use; there is no file
//! locking between processes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracker_types::Item;

use crate::{
    ItemStore, MemoryBackend, Result,
    metrics::{MetricsSnapshot, OpTimer, Operation},
};

/// A write waiting to be persisted
enum Mutation {
    Put(Item),
    Delete { partition: String, sort: String },
}

impl Mutation {
    fn operation(&self) -> Operation {
        match self {
            Mutation::Put(_) => Operation::Put,
            Mutation::Delete { .. } => Operation::Delete,
        }
    }

    async fn apply_to(&self, table: &MemoryBackend) -> Result<()> {
        match self {
            Mutation::Put(item) => table.put(item.clone()).await,
            Mutation::Delete { partition, sort } => table.delete(partition, sort).await,
        }
    }
}

/// Item store persisted as a JSON array of items
pub struct FileBackend {
    path: PathBuf,
    inner: MemoryBackend,
    /// Serializes mutations, so each snapshot is built from the latest state
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open the snapshot at `path`, starting empty if the file does not exist
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let inner = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => MemoryBackend::new(),
            Ok(bytes) => {
                let items: Vec<Item> = serde_json::from_slice(&bytes)?;
                tracing::info!(path = %path.display(), item_count = items.len(), "Loaded snapshot");
                MemoryBackend::from_items(items)
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Snapshot not found, starting empty");
                MemoryBackend::new()
            },
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, inner, write_lock: Mutex::new(()) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutation` to a staged copy, persist the copy, then apply it to
    /// the live table. A failed write leaves both the file and the table as
    /// they were.
    async fn commit(&self, mutation: Mutation) -> Result<()> {
        let timer = OpTimer::new();
        let _guard = self.write_lock.lock().await;

        let staged = MemoryBackend::from_items(self.inner.items().await);
        let persisted = match mutation.apply_to(&staged).await {
            Ok(()) => self.write_snapshot(&staged.items().await).await,
            Err(e) => Err(e),
        };

        if let Err(e) = persisted {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Write rejected, table unchanged"
            );
            self.inner.record_failure(mutation.operation(), timer.elapsed());
            return Err(e);
        }
        mutation.apply_to(&self.inner).await
    }

    async fn write_snapshot(&self, items: &[Item]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(items)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ItemStore for FileBackend {
    async fn get(&self, partition: &str, sort: &str) -> Result<Option<Item>> {
        self.inner.get(partition, sort).await
    }

    async fn query_prefix(&self, partition: &str, sort_prefix: &str) -> Result<Vec<Item>> {
        self.inner.query_prefix(partition, sort_prefix).await
    }

    async fn scan(&self) -> Result<Vec<Item>> {
        self.inner.scan().await
    }

    async fn put(&self, item: Item) -> Result<()> {
        self.commit(Mutation::Put(item)).await
    }

    async fn delete(&self, partition: &str, sort: &str) -> Result<()> {
        self.commit(Mutation::Delete { partition: partition.to_string(), sort: sort.to_string() })
            .await
    }

    fn metrics(&self) -> Option<MetricsSnapshot> {
        self.inner.metrics()
    }
}
