//! Repository layer for hackathon tracker storage.
//!
//! This crate maps six related entity kinds onto one shared key-value table
//! using composite (partition, sort) keys.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  Service Layer                   │
//! │        (registration, cascades, analytics)       │
//! ├──────────────────────────────────────────────────┤
//! │                Repository Layer                  │
//! │  AccountRepository  │  EventRepository  │  ...   │
//! │        Table (typed + raw access layer)          │
//! ├──────────────────────────────────────────────────┤
//! │                  tracker-store                   │
//! │                ItemStore trait                   │
//! │   (get, query_prefix, scan, put, delete)         │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! # Key Encoding
//!
//! Children are partitioned under their parent's natural identifier; the
//! [`keys`] module builds every key and prefix.
//!
//! # Example
//!
//! ```ignore
//! use tracker_store::StorageFactory;
//! use tracker_repository::TrackerStorage;
//!
//! let storage = TrackerStorage::builder().store(StorageFactory::memory()).build();
//! let account = storage.accounts().get("team@example.com").await?;
//! ```

#![deny(unsafe_code)]

pub mod account;
pub mod artifact;
pub mod entity;
pub mod error;
pub mod event;
pub mod ids;
pub mod issue;
pub mod keys;
pub mod progress;
pub mod storage;
pub mod submission;
pub mod table;

pub use account::AccountRepository;
pub use artifact::ArtifactRepository;
pub use entity::Entity;
pub use error::{RepositoryError, RepositoryResult};
pub use event::EventRepository;
pub use ids::IdGenerator;
pub use issue::IssueRepository;
pub use progress::ProgressRepository;
pub use storage::TrackerStorage;
pub use submission::SubmissionRepository;
pub use table::Table;
