//! Test fixtures for hackathon tracker test suites
//!
//! Shared entity builders, a store that fails every call, and the proptest
//! configuration used by every property test in the workspace.

#![deny(unsafe_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod entities;
pub mod failing;
pub mod proptest_config;

pub use entities::{
    test_account, test_admin, test_artifact, test_event, test_issue, test_submission,
};
pub use failing::FailingStore;
