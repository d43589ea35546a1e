//! Issue type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to freshly reported issues
pub const STATUS_OPEN: &str = "Open";

/// A problem reported by a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub id: String,

    /// Reporting account; the issue lives in that account's partition
    pub owner_email: String,

    #[serde(default)]
    pub team_id: String,

    #[serde(default)]
    pub submission_id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Object-storage path of an attached screenshot
    #[serde(default)]
    pub image_path: Option<String>,

    pub status: String,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Issue {
    pub fn new(owner_email: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            owner_email: owner_email.into().to_lowercase(),
            title: title.into(),
            status: STATUS_OPEN.to_string(),
            ..Default::default()
        }
    }
}
