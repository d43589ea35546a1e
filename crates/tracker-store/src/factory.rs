//! Storage factory for creating backend instances
//!
//! Provides a flexible way to instantiate different storage backends
//! without exposing implementation details to consumers.

use std::{path::PathBuf, str::FromStr, sync::Arc};

use tracker_types::StoreError;

use crate::{FileBackend, MemoryBackend, Result, SharedStore};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// In-memory storage (for testing and development)
    Memory,
    /// JSON snapshot file (for local single-process use)
    File,
}

impl FromStr for BackendType {
    type Err = StoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(BackendType::Memory),
            "file" | "json" => Ok(BackendType::File),
            _ => Err(StoreError::Internal(format!("Unknown backend type: {}", s))),
        }
    }
}

impl BackendType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Memory => "memory",
            BackendType::File => "file",
        }
    }
}

/// Configuration for storage backend
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Backend type to use
    pub backend: BackendType,
    /// Snapshot location (file backend only)
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::memory()
    }
}

impl StorageConfig {
    /// Create config for memory backend
    pub fn memory() -> Self {
        Self { backend: BackendType::Memory, path: None }
    }

    /// Create config for file backend
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { backend: BackendType::File, path: Some(path.into()) }
    }
}

/// Storage factory for creating backend instances
pub struct StorageFactory;

impl StorageFactory {
    /// Create a storage backend from configuration
    pub async fn create(config: StorageConfig) -> Result<SharedStore> {
        match config.backend {
            BackendType::Memory => Ok(Self::memory()),
            BackendType::File => {
                let path = config.path.ok_or_else(|| {
                    StoreError::Internal("File backend requires a snapshot path".to_string())
                })?;
                Ok(Arc::new(FileBackend::open(path).await?) as SharedStore)
            },
        }
    }

    /// Create a storage backend from string configuration
    pub async fn from_str(backend_str: &str, path: Option<PathBuf>) -> Result<SharedStore> {
        let backend = BackendType::from_str(backend_str)?;
        Self::create(StorageConfig { backend, path }).await
    }

    /// Create default memory backend
    pub fn memory() -> SharedStore {
        Arc::new(MemoryBackend::new()) as SharedStore
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use tracker_types::{EntityType, Item};

    use super::*;

    #[test]
    fn test_backend_type_from_str() {
        assert_eq!(BackendType::from_str("memory").unwrap(), BackendType::Memory);
        assert_eq!(BackendType::from_str("MEMORY").unwrap(), BackendType::Memory);
        assert_eq!(BackendType::from_str("File").unwrap(), BackendType::File);
        assert_eq!(BackendType::from_str("json").unwrap(), BackendType::File);
        assert!(BackendType::from_str("dynamodb").is_err());
    }

    #[test]
    fn test_backend_type_as_str() {
        assert_eq!(BackendType::Memory.as_str(), "memory");
        assert_eq!(BackendType::File.as_str(), "file");
    }

    #[tokio::test]
    async fn test_factory_create_memory() {
        let store = StorageFactory::create(StorageConfig::memory()).await.unwrap();
        store.put(Item::new("p", "s", EntityType::Account)).await.unwrap();
        assert!(store.get("p", "s").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_factory_file_requires_path() {
        let config = StorageConfig { backend: BackendType::File, path: None };
        assert!(StorageFactory::create(config).await.is_err());
    }

    #[tokio::test]
    async fn test_factory_from_str_file() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            StorageFactory::from_str("file", Some(dir.path().join("t.json"))).await.unwrap();
        assert!(store.scan().await.unwrap().is_empty());
    }
}
