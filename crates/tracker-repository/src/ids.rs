//! Timestamp-derived identifier generation
//!
//! Identifiers have the form `{kind}_{unix_millis}`. Within one generator the
//! millisecond component is strictly increasing, so two creates in the same
//! millisecond get distinct values. Separate processes share no state and
//! can still collide.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Identifier kinds
pub mod kind {
    pub const ACCOUNT: &str = "user";
    pub const EVENT: &str = "event";
    pub const SUBMISSION: &str = "sub";
    pub const ARTIFACT: &str = "art";
    pub const ISSUE: &str = "issue";
}

/// Issues strictly increasing millisecond values
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds, bumped past the previous value if needed
    pub fn next_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now.max(last + 1);
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }

    /// Next identifier for `kind`, e.g. `event_1704067200000`
    pub fn next_id(&self, kind: &str) -> String {
        format!("{}_{}", kind, self.next_millis())
    }

    /// Next timestamp, unique within this generator at millisecond resolution
    pub fn next_timestamp(&self) -> DateTime<Utc> {
        let millis = self.next_millis();
        DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
    }
}
