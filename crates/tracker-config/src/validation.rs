//! Configuration validation

use thiserror::Error;

use crate::{Config, LimitsConfig, ObservabilityConfig, StoreConfig, UploadsConfig};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid backend: {0} (must be one of: memory, file)")]
    InvalidBackend(String),

    #[error("Missing snapshot path for backend: {0}")]
    MissingPath(String),

    #[error("Invalid log level: {0} (must be one of: trace, debug, info, warn, error)")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0} (must be one of: pretty, compact, json)")]
    InvalidLogFormat(String),

    #[error("Invalid admin limit: {0} (must be > 0)")]
    InvalidAdminLimit(usize),

    #[error("Invalid upload prefix '{0}': {1}")]
    InvalidPrefix(String, String),

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validate complete configuration
pub fn validate(config: &Config) -> Result<()> {
    let mut errors = Vec::new();

    if let Err(e) = validate_store(&config.store) {
        errors.push(e);
    }

    if let Err(e) = validate_observability(&config.observability) {
        errors.push(e);
    }

    if let Err(e) = validate_limits(&config.limits) {
        errors.push(e);
    }

    if let Err(e) = validate_uploads(&config.uploads) {
        errors.push(e);
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

pub fn validate_store(config: &StoreConfig) -> Result<()> {
    match config.backend.to_lowercase().as_str() {
        "memory" => Ok(()),
        "file" | "json" => {
            match config.path.as_deref() {
                Some(path) if !path.trim().is_empty() => Ok(()),
                _ => Err(ValidationError::MissingPath(config.backend.clone())),
            }
        },
        _ => Err(ValidationError::InvalidBackend(config.backend.clone())),
    }
}

pub fn validate_observability(config: &ObservabilityConfig) -> Result<()> {
    match config.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {},
        _ => return Err(ValidationError::InvalidLogLevel(config.log_level.clone())),
    }
    match config.log_format.to_lowercase().as_str() {
        "pretty" | "compact" | "json" => Ok(()),
        _ => Err(ValidationError::InvalidLogFormat(config.log_format.clone())),
    }
}

pub fn validate_limits(config: &LimitsConfig) -> Result<()> {
    if config.max_admins == 0 {
        return Err(ValidationError::InvalidAdminLimit(config.max_admins));
    }
    Ok(())
}

pub fn validate_uploads(config: &UploadsConfig) -> Result<()> {
    for prefix in [&config.artifact_prefix, &config.issue_prefix] {
        if prefix.trim().is_empty() {
            return Err(ValidationError::InvalidPrefix(prefix.clone(), "empty".to_string()));
        }
        if prefix.starts_with('/') || prefix.ends_with('/') {
            return Err(ValidationError::InvalidPrefix(
                prefix.clone(),
                "leading or trailing slash".to_string(),
            ));
        }
    }
    Ok(())
}
