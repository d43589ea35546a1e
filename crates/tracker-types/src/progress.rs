//! Progress record type

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a submission's progress history.
///
/// Records are keyed by their timestamp, so a submission's history reads
/// back in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub submission_id: String,

    pub timestamp: DateTime<Utc>,

    pub update_text: String,

    /// Signed change in progress percentage
    #[serde(default)]
    pub delta_percentage: i64,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    pub fn new(
        submission_id: impl Into<String>,
        update_text: impl Into<String>,
        delta_percentage: i64,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            timestamp: Utc::now(),
            update_text: update_text.into(),
            delta_percentage,
            updated_at: None,
        }
    }

    /// ISO-8601 rendering with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`
    pub fn timestamp_key(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

/// Millisecond ISO-8601 rendering used in progress sort keys
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_timestamp_key_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&at), "2024-01-01T00:00:00.000Z");
    }
}
