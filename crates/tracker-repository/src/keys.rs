//! Key encoding for the shared table.
//!
//! Every item is addressed by a (partition, sort) pair:
//!
//! - `ACCOUNT#{email}` / `METADATA` - Account
//! - `ACCOUNT#{email}` / `EVENT#{event_id}` - Event owned by the account
//! - `ACCOUNT#{email}` / `ISSUE#{issue_id}` - Issue reported by the account
//! - `EVENT#{event_id}` / `SUBMISSION#{submission_id}` - Submission to the event
//! - `SUBMISSION#{submission_id}` / `ARTIFACT#{artifact_id}` - Uploaded artifact
//! - `SUBMISSION#{submission_id}` / `LOG#{iso_timestamp}` - Progress record
//!
//! Emails are lower-cased before they become part of a key.

/// Sort key of an account's own item
pub const METADATA: &str = "METADATA";

/// Key builders for Account entities.
pub mod account {
    pub const PREFIX: &str = "ACCOUNT#";

    /// Schema: `ACCOUNT#{email}`
    #[inline]
    pub fn partition(email: &str) -> String {
        format!("{}{}", PREFIX, email.to_lowercase())
    }
}

/// Key builders for Event entities.
pub mod event {
    pub const PREFIX: &str = "EVENT#";

    /// Sort key under the owning account. Schema: `EVENT#{id}`
    #[inline]
    pub fn sort(id: &str) -> String {
        format!("{}{}", PREFIX, id)
    }

    /// Partition holding the event's submissions. Schema: `EVENT#{id}`
    #[inline]
    pub fn partition(id: &str) -> String {
        sort(id)
    }
}

/// Key builders for Submission entities.
pub mod submission {
    pub const PREFIX: &str = "SUBMISSION#";

    /// Schema: `SUBMISSION#{id}`
    #[inline]
    pub fn sort(id: &str) -> String {
        format!("{}{}", PREFIX, id)
    }

    /// Partition holding artifacts and progress records. Schema: `SUBMISSION#{id}`
    #[inline]
    pub fn partition(id: &str) -> String {
        sort(id)
    }
}

/// Key builders for Artifact entities.
pub mod artifact {
    pub const PREFIX: &str = "ARTIFACT#";

    /// Schema: `ARTIFACT#{id}`
    #[inline]
    pub fn sort(id: &str) -> String {
        format!("{}{}", PREFIX, id)
    }
}

/// Key builders for progress records.
pub mod progress {
    use chrono::{DateTime, Utc};
    use tracker_types::progress::format_timestamp;

    pub const PREFIX: &str = "LOG#";

    /// Schema: `LOG#{iso_timestamp}`, e.g. `LOG#2024-01-01T00:00:00.000Z`
    #[inline]
    pub fn sort(timestamp: &DateTime<Utc>) -> String {
        format!("{}{}", PREFIX, format_timestamp(timestamp))
    }
}

/// Key builders for Issue entities.
pub mod issue {
    pub const PREFIX: &str = "ISSUE#";

    /// Schema: `ISSUE#{id}`
    #[inline]
    pub fn sort(id: &str) -> String {
        format!("{}{}", PREFIX, id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_account_partition_lowercases_email() {
        assert_eq!(account::partition("A@X.com"), "ACCOUNT#a@x.com");
    }

    #[test]
    fn test_parent_sort_key_equals_child_partition() {
        assert_eq!(event::sort("event_1"), event::partition("event_1"));
        assert_eq!(submission::sort("sub_1"), submission::partition("sub_1"));
    }

    #[test]
    fn test_progress_keys_order_chronologically() {
        let earlier = progress::sort(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let later = progress::sort(&Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());

        assert_eq!(earlier, "LOG#2024-01-01T00:00:00.000Z");
        assert!(earlier < later);
    }

    #[test]
    fn test_prefixes_are_distinct_under_shared_partition() {
        // Events and issues share the account partition
        assert!(!event::PREFIX.starts_with(issue::PREFIX));
        assert!(!issue::PREFIX.starts_with(event::PREFIX));
        assert!(!METADATA.starts_with(event::PREFIX));
        // Artifacts and progress records share the submission partition
        assert!(!artifact::PREFIX.starts_with(progress::PREFIX));
    }
}
