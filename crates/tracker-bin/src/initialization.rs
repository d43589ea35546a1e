//! Wiring from configuration to services

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use tracker_config::Config;
use tracker_observe::{LogConfig, LogFormat};
use tracker_repository::TrackerStorage;
use tracker_service::{AppServices, ServiceContext, ServiceSettings};
use tracker_store::StorageFactory;

/// Logging setup derived from the observability section
pub fn log_config(config: &Config) -> Result<LogConfig> {
    let format: LogFormat = config.observability.log_format.parse()?;
    Ok(LogConfig { format, ..LogConfig::default() }.with_level(&config.observability.log_level))
}

pub fn service_settings(config: &Config) -> ServiceSettings {
    ServiceSettings {
        max_admins: config.limits.max_admins,
        artifact_prefix: config.uploads.artifact_prefix.clone(),
        issue_prefix: config.uploads.issue_prefix.clone(),
    }
}

/// Open the configured table backend.
pub async fn open_storage(config: &Config) -> Result<Arc<TrackerStorage>> {
    let path = config.store.path.as_ref().map(PathBuf::from);
    let store = StorageFactory::from_str(&config.store.backend, path)
        .await
        .with_context(|| format!("Failed to open {} store", config.store.backend))?;

    tracing::info!(backend = %config.store.backend, path = ?config.store.path, "Store opened");
    Ok(Arc::new(TrackerStorage::builder().store(store).build()))
}

/// Build every service over the configured store.
pub async fn build_services(config: &Config) -> Result<(Arc<TrackerStorage>, AppServices)> {
    let storage = open_storage(config).await?;
    let context = Arc::new(
        ServiceContext::builder()
            .storage(Arc::clone(&storage))
            .settings(service_settings(config))
            .build(),
    );
    Ok((storage, AppServices::new(context)))
}
