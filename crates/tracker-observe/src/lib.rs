//! # Tracker Observe - Observability Layer
//!
//! Structured logging setup and span helpers shared by the binaries.

pub mod logging;

pub use logging::{
    LogConfig, LogFormat, command_span, init_logging, log_slow_operation, record_command_result,
};
