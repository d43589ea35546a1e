//! Admin service - analytics, team oversight and ratings
//!
//! Every "all X" read here is a full table scan.

use std::{collections::BTreeMap, sync::Arc};

use serde::Serialize;
use tracker_types::{Account, AccountProfile, Artifact, Event, Role, Submission};

use crate::{ServiceContext, ServiceError, ServiceResult, validation::validate_rating};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_teams: usize,
    pub total_events: usize,
    pub active_submissions: usize,
    pub completed_submissions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamProgress {
    pub team_name: String,
    /// Mean progress of the team's submissions, rounded; 0 with no submissions
    pub avg_progress: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventParticipation {
    pub name: String,
    pub submissions: usize,
}

/// Global dashboard figures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analytics {
    pub overview: Overview,
    pub status_distribution: Vec<StatusCount>,
    pub team_average_progress: Vec<TeamProgress>,
    pub event_participation: Vec<EventParticipation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: Submission,
    pub artifacts: Vec<Artifact>,
}

/// A team with everything it owns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDetail {
    #[serde(flatten)]
    pub profile: AccountProfile,
    pub events: Vec<Event>,
    pub submissions: Vec<SubmissionDetail>,
}

/// Service for administrator operations
pub struct AdminService {
    context: Arc<ServiceContext>,
}

impl AdminService {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    #[tracing::instrument(skip(self))]
    pub async fn analytics(&self) -> ServiceResult<Analytics> {
        let storage = &self.context.storage;
        let teams = self.team_accounts().await?;
        let events = storage.events().list().await?;
        let submissions = storage.submissions().list().await?;

        let overview = Overview {
            total_teams: teams.len(),
            total_events: events.len(),
            active_submissions: submissions.iter().filter(|s| s.is_active()).count(),
            completed_submissions: submissions.iter().filter(|s| s.is_completed()).count(),
        };

        let mut by_status: BTreeMap<&str, usize> = BTreeMap::new();
        for submission in &submissions {
            *by_status.entry(submission.status.as_str()).or_default() += 1;
        }
        let status_distribution = by_status
            .into_iter()
            .map(|(status, count)| StatusCount { status: status.to_string(), count })
            .collect();

        let team_average_progress = teams
            .iter()
            .map(|team| {
                let progress: Vec<u32> = submissions
                    .iter()
                    .filter(|s| s.team_id == team.id)
                    .map(|s| s.progress_percentage)
                    .collect();
                TeamProgress {
                    team_name: team.team_name.clone(),
                    avg_progress: rounded_mean(&progress),
                }
            })
            .collect();

        let event_participation = events
            .iter()
            .map(|event| EventParticipation {
                name: event.name.clone(),
                submissions: submissions.iter().filter(|s| s.event_id == event.id).count(),
            })
            .collect();

        tracing::debug!(
            teams = overview.total_teams,
            events = overview.total_events,
            submissions = submissions.len(),
            "Analytics computed"
        );
        Ok(Analytics { overview, status_distribution, team_average_progress, event_participation })
    }

    /// All team accounts, admins excluded
    pub async fn teams(&self) -> ServiceResult<Vec<AccountProfile>> {
        Ok(self.team_accounts().await?.into_iter().map(AccountProfile::from).collect())
    }

    /// A team's profile, events and submissions with their artifacts.
    #[tracing::instrument(skip(self))]
    pub async fn team_detail(&self, id: &str) -> ServiceResult<TeamDetail> {
        let storage = &self.context.storage;
        let team = self.find_account(id).await?;

        let events = storage.events().list_for_account(&team.email).await?;
        let mut submissions = Vec::new();
        for submission in storage.submissions().list().await? {
            if submission.team_id != team.id {
                continue;
            }
            let artifacts = storage.artifacts().list_for_submission(&submission.id).await?;
            submissions.push(SubmissionDetail { submission, artifacts });
        }

        Ok(TeamDetail { profile: team.into(), events, submissions })
    }

    /// Remove a team's account item.
    ///
    /// Events, issues and submissions owned by the team stay in the table.
    #[tracing::instrument(skip(self))]
    pub async fn delete_team(&self, id: &str) -> ServiceResult<AccountProfile> {
        let team = self.find_account(id).await?;
        self.context.storage.accounts().delete(&team.email).await?;
        tracing::info!(email = %team.email, "Team removed");
        Ok(team.into())
    }

    /// Set a submission's rating and mark it rated.
    #[tracing::instrument(skip(self))]
    pub async fn rate_submission(
        &self,
        event_id: &str,
        id: &str,
        rating: f64,
    ) -> ServiceResult<Submission> {
        validate_rating(rating)?;

        let submissions = self.context.storage.submissions();
        let mut submission = submissions
            .get(event_id, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Submission", id))?;
        submission.rating = rating;
        submission.is_rated = true;
        Ok(submissions.save(submission).await?)
    }

    async fn team_accounts(&self) -> ServiceResult<Vec<Account>> {
        let accounts = self.context.storage.accounts().list().await?;
        Ok(accounts.into_iter().filter(|account| account.role == Role::Team).collect())
    }

    async fn find_account(&self, id: &str) -> ServiceResult<Account> {
        self.context
            .storage
            .accounts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Team", id))
    }
}

fn rounded_mean(values: &[u32]) -> u32 {
    if values.is_empty() {
        return 0;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let count = values.len() as u64;
    ((sum + count / 2) / count) as u32
}
