//! Service layer for the hackathon tracker
//!
//! Services hold the business rules that sit between an outer surface (the
//! CLI today) and the repositories:
//!
//! - Registration rules (duplicate emails, the admin limit)
//! - Merge-style updates that keep unspecified fields
//! - Cascading deletes across partitions
//! - Progress history on submission changes
//! - Cross-entity joins for analytics and the leaderboard
//!
//! Every service shares one [`ServiceContext`]; [`AppServices`] bundles them.
//! Authentication and authorization are left to the caller.

use std::sync::Arc;

use tracker_repository::{RepositoryError, TrackerStorage};

pub mod accounts;
pub mod admin;
pub mod artifacts;
pub mod events;
pub mod issues;
pub mod leaderboard;
pub mod submissions;
pub mod validation;

pub use accounts::{AccountService, LoginIdentity, ProfileUpdate, RegisterRequest, SkillsInput};
pub use admin::{AdminService, Analytics, TeamDetail};
pub use artifacts::ArtifactService;
pub use events::{EventService, EventUpdate, NewEvent};
pub use issues::{IssueService, NewIssue};
pub use leaderboard::{LeaderboardEntry, LeaderboardService};
pub use submissions::{CascadeSummary, NewSubmission, SubmissionService, SubmissionUpdate};

/// Default cap on administrator accounts
pub const DEFAULT_MAX_ADMINS: usize = 5;

/// Errors returned by service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Limit reached: {0}")]
    LimitReached(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn not_found(what: &str, id: &str) -> Self {
        ServiceError::NotFound(format!("{} {} not found", what, id))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Tunables shared by every service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Maximum number of admin accounts
    pub max_admins: usize,
    /// Object-path prefix for submission artifacts
    pub artifact_prefix: String,
    /// Object-path prefix for issue images
    pub issue_prefix: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            max_admins: DEFAULT_MAX_ADMINS,
            artifact_prefix: "artifacts".to_string(),
            issue_prefix: "issues".to_string(),
        }
    }
}

/// Shared context for all services
///
/// ```ignore
/// let context = Arc::new(ServiceContext::builder()
///     .storage(Arc::new(TrackerStorage::builder().store(store).build()))
///     .build());
/// let services = AppServices::new(context);
/// ```
#[derive(bon::Builder)]
pub struct ServiceContext {
    pub storage: Arc<TrackerStorage>,
    #[builder(default)]
    pub settings: ServiceSettings,
}

/// Every service, built over one shared context
#[derive(Clone)]
pub struct AppServices {
    pub accounts: Arc<AccountService>,
    pub events: Arc<EventService>,
    pub submissions: Arc<SubmissionService>,
    pub artifacts: Arc<ArtifactService>,
    pub issues: Arc<IssueService>,
    pub admin: Arc<AdminService>,
    pub leaderboard: Arc<LeaderboardService>,
}

impl AppServices {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(Arc::clone(&context))),
            events: Arc::new(EventService::new(Arc::clone(&context))),
            submissions: Arc::new(SubmissionService::new(Arc::clone(&context))),
            artifacts: Arc::new(ArtifactService::new(Arc::clone(&context))),
            issues: Arc::new(IssueService::new(Arc::clone(&context))),
            admin: Arc::new(AdminService::new(Arc::clone(&context))),
            leaderboard: Arc::new(LeaderboardService::new(context)),
        }
    }
}
