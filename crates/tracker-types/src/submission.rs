//! Submission type
//!
//! A project entered into an event. The status is stored opaquely; the
//! constants in [`status`] name the conventional lifecycle values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conventional submission status values
pub mod status {
    pub const IDEA: &str = "Idea";
    pub const DEVELOPMENT: &str = "Development";
    pub const TESTING: &str = "Testing";
    pub const COMPLETED: &str = "Completed";
}

/// A project submitted to an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub id: String,

    /// Owning event; the submission lives in that event's partition
    pub event_id: String,

    #[serde(default)]
    pub team_id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Free-form status, any string is accepted
    pub status: String,

    #[serde(default)]
    pub progress_percentage: u32,

    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub is_rated: bool,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(event_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            title: title.into(),
            status: status::IDEA.to_string(),
            ..Default::default()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == status::COMPLETED
    }

    /// Neither completed nor still at the idea stage
    pub fn is_active(&self) -> bool {
        self.status != status::COMPLETED && self.status != status::IDEA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_classification() {
        let mut submission = Submission::new("event_1", "Borrow Checker Bot");
        assert!(!submission.is_active());
        assert!(!submission.is_completed());

        submission.status = status::TESTING.to_string();
        assert!(submission.is_active());

        submission.status = status::COMPLETED.to_string();
        assert!(submission.is_completed());
        assert!(!submission.is_active());

        submission.status = "Paused".to_string();
        assert!(submission.is_active());
    }
}
