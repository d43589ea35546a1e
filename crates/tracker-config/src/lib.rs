//! # Tracker Config - Configuration Management
//!
//! Loads configuration from an optional file and environment variables:
//!
//! ```yaml
//! store:
//!   backend: "file"
//!   path: "./tracker.json"
//! observability:
//!   log_level: "info"
//!   log_format: "compact"
//! limits:
//!   max_admins: 5
//! uploads:
//!   artifact_prefix: "artifacts"
//!   issue_prefix: "issues"
//! ```

pub mod validation;

use std::path::Path;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
}

/// Which table backend to open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// `memory` or `file`
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Snapshot file for the `file` backend
    #[serde(default = "default_store_path")]
    pub path: Option<String>,
}

impl StoreConfig {
    /// Volatile table, discarded when the process exits
    pub fn memory() -> Self {
        Self { backend: "memory".to_string(), path: None }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { backend: default_backend(), path: default_store_path() }
    }
}

// Each CLI invocation is its own process, so the default table lives on disk.
fn default_backend() -> String {
    "file".to_string()
}

fn default_store_path() -> Option<String> {
    Some("tracker.json".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: default_log_level(), log_format: default_log_format() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of admin accounts
    #[serde(default = "default_max_admins")]
    pub max_admins: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_admins: default_max_admins() }
    }
}

fn default_max_admins() -> usize {
    5
}

/// Object-path prefixes for uploaded files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadsConfig {
    #[serde(default = "default_artifact_prefix")]
    pub artifact_prefix: String,

    #[serde(default = "default_issue_prefix")]
    pub issue_prefix: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self { artifact_prefix: default_artifact_prefix(), issue_prefix: default_issue_prefix() }
    }
}

fn default_artifact_prefix() -> String {
    "artifacts".to_string()
}

fn default_issue_prefix() -> String {
    "issues".to_string()
}

impl Config {
    /// Check every section, reporting all problems at once
    pub fn validate(&self) -> validation::Result<()> {
        validation::validate(self)
    }
}

/// Load configuration with layered precedence: defaults → file → env vars
///
/// Each layer only overrides properties it sets. Environment variables use
/// the `TRACKER__` prefix with `__` between levels:
/// - `TRACKER__STORE__BACKEND=file`
/// - `TRACKER__STORE__PATH=/var/lib/tracker/table.json`
/// - `TRACKER__LIMITS__MAX_ADMINS=3`
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let builder = ConfigBuilder::builder().add_source(File::from(path.as_ref()).required(false));
    let builder =
        builder.add_source(Environment::with_prefix("TRACKER").separator("__").try_parsing(true));

    builder.build()?.try_deserialize()
}

/// Load configuration, falling back to defaults on any error
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Config {
    match load(path.as_ref()) {
        Ok(config) => {
            tracing::info!("Configuration loaded from {:?}", path.as_ref());
            config
        },
        Err(e) => {
            tracing::warn!(
                "Failed to load config from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Config::default()
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.backend, "file");
        assert_eq!(config.store.path.as_deref(), Some("tracker.json"));
        assert!(config.validate().is_ok());
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.limits.max_admins, 5);
        assert_eq!(config.uploads.artifact_prefix, "artifacts");
        assert_eq!(config.uploads.issue_prefix, "issues");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.limits, LimitsConfig::default());
    }

    #[test]
    fn test_file_overrides_only_what_it_sets() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "store:\n  backend: file\n  path: /tmp/table.json\nlimits:\n  max_admins: 2")
            .unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.store.backend, "file");
        assert_eq!(config.store.path.as_deref(), Some("/tmp/table.json"));
        assert_eq!(config.limits.max_admins, 2);
        assert_eq!(config.observability, ObservabilityConfig::default());
    }

    #[test]
    fn test_backend_alone_keeps_default_path() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "store:\n  backend: file").unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.store.path.as_deref(), Some("tracker.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        std::env::set_var("TRACKER__UPLOADS__ARTIFACT_PREFIX", "team-artifacts");
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path().join("absent.toml")).unwrap();
        std::env::remove_var("TRACKER__UPLOADS__ARTIFACT_PREFIX");

        assert_eq!(config.uploads.artifact_prefix, "team-artifacts");
    }

    #[test]
    fn test_load_or_default_on_malformed_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{ not json").unwrap();

        let config = load_or_default(file.path());
        assert_eq!(config.store, StoreConfig::default());
    }
}
