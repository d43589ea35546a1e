//! Artifact type
//!
//! An uploaded report. The blob lives in object storage; the item only
//! records its path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub id: String,

    pub submission_id: String,

    /// Object-storage path of the uploaded file
    pub file_path: String,

    #[serde(default)]
    pub original_name: String,

    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub feedback: String,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Artifact {
    pub fn new(
        submission_id: impl Into<String>,
        file_path: impl Into<String>,
        original_name: impl Into<String>,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            file_path: file_path.into(),
            original_name: original_name.into(),
            ..Default::default()
        }
    }

    pub fn is_graded(&self) -> bool {
        self.rating > 0.0
    }
}
