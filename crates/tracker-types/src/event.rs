//! Event type
//!
//! A hackathon entry created by a team account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hackathon the owning account takes part in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,

    /// Email of the owning account; the event lives in that account's partition
    pub owner_email: String,

    pub name: String,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,

    /// Identifier of the owning account
    #[serde(default)]
    pub team_id: String,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn new(owner_email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner_email: owner_email.into().to_lowercase(),
            name: name.into(),
            ..Default::default()
        }
    }
}
