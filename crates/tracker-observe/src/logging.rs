//! Structured logging utilities
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use std::str::FromStr;

use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Filter used when neither the config nor `RUST_LOG` provides one
pub const DEFAULT_FILTER: &str = "info,tracker=debug";

/// Log output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format (for development)
    Pretty,
    /// Single-line format
    #[default]
    Compact,
    /// JSON lines (for log shipping)
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unknown log format: {}", other)),
        }
    }
}

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Whether to include file/line numbers
    pub include_location: bool,
    /// Whether to include target module
    pub include_target: bool,
    /// Whether to log span close events with timings
    pub log_spans: bool,
    /// Environment filter (e.g., "info,tracker=debug")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            include_location: cfg!(debug_assertions),
            include_target: true,
            log_spans: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Build a filter directive from a bare level such as `warn`
    pub fn with_level(mut self, level: &str) -> Self {
        self.filter = Some(format!("{},tracker={}", level, level));
        self
    }

    fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        // RUST_LOG wins over configured levels
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        match &self.filter {
            Some(filter) => Ok(EnvFilter::try_new(filter)?),
            None => Ok(EnvFilter::new(DEFAULT_FILTER)),
        }
    }
}

/// Initialize the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: LogConfig) -> anyhow::Result<()> {
    let env_filter = config.env_filter()?;

    let fmt_span = if config.log_spans { FmtSpan::CLOSE } else { FmtSpan::NONE };

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(config.include_target)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(fmt_span);

    match config.format {
        LogFormat::Pretty => {
            subscriber
                .pretty()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize pretty logger: {}", e))?;
        },
        LogFormat::Compact => {
            subscriber
                .compact()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize compact logger: {}", e))?;
        },
        LogFormat::Json => {
            subscriber
                .json()
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize JSON logger: {}", e))?;
        },
    }

    tracing::debug!(
        format = ?config.format,
        location = config.include_location,
        "Logging initialized"
    );
    Ok(())
}

/// Span wrapping one CLI command
pub fn command_span(command: &str) -> Span {
    tracing::info_span!(
        "command",
        command = command,
        outcome = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record a command's outcome on its span
pub fn record_command_result(span: &Span, ok: bool, duration_ms: u128) {
    span.record("outcome", if ok { "ok" } else { "error" });
    span.record("duration_ms", duration_ms);
}

/// Warn when an operation exceeds `threshold_ms`
pub fn log_slow_operation(operation: &str, duration_ms: u128, threshold_ms: u128) {
    if duration_ms > threshold_ms {
        tracing::warn!(
            operation = operation,
            duration_ms = duration_ms,
            threshold_ms = threshold_ms,
            "Slow operation detected"
        );
    }
}
