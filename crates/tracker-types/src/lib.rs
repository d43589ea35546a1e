//! # Tracker Types
//!
//! Shared type definitions for the hackathon tracker.
//!
//! This crate holds the entity kinds stored in the shared table, the raw
//! [`Item`] representation used by storage backends, and the error types
//! every layer converts from.

#![deny(unsafe_code)]

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod account;
pub mod artifact;
pub mod event;
pub mod issue;
pub mod item;
pub mod progress;
pub mod submission;

pub use account::{Account, AccountProfile, Member, Role};
pub use artifact::Artifact;
pub use event::Event;
pub use issue::Issue;
pub use item::{Attributes, Item, ItemKey};
pub use progress::ProgressRecord;
pub use submission::Submission;

// ============================================================================
// Entity Kinds
// ============================================================================

/// Type tag carried by every stored item.
///
/// Scans across partitions filter on this tag to obtain a homogeneous set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Account,
    Event,
    Submission,
    Artifact,
    ProgressLog,
    Issue,
}

impl EntityType {
    /// All entity kinds, in hierarchy order.
    pub const ALL: [EntityType; 6] = [
        EntityType::Account,
        EntityType::Event,
        EntityType::Submission,
        EntityType::Artifact,
        EntityType::ProgressLog,
        EntityType::Issue,
    ];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Account => "ACCOUNT",
            EntityType::Event => "EVENT",
            EntityType::Submission => "SUBMISSION",
            EntityType::Artifact => "ARTIFACT",
            EntityType::ProgressLog => "PROGRESS_LOG",
            EntityType::Issue => "ISSUE",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase().replace('-', "_");
        EntityType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| StoreError::Internal(format!("Unknown entity type: {}", s)))
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Faults raised by a storage backend.
///
/// Absence of an item is never an error; lookups return `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
