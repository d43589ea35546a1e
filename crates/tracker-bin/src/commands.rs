//! CLI commands and their dispatch onto services

use std::str::FromStr;

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tracker_repository::TrackerStorage;
use tracker_service::{
    AppServices, EventUpdate, NewEvent, NewIssue, NewSubmission, ProfileUpdate, RegisterRequest,
    SkillsInput, SubmissionUpdate,
};
use tracker_types::{EntityType, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Team,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Team => Role::Team,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a team or admin account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        team_name: String,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        #[arg(long)]
        college: Option<String>,
        /// Comma-separated list
        #[arg(long)]
        skills: Option<String>,
        #[arg(long)]
        password_hash: Option<String>,
    },
    /// Resolve a login email (account or team member) to its account
    Login {
        #[arg(long)]
        email: String,
    },
    Profile {
        #[arg(long)]
        email: String,
    },
    UpdateProfile {
        #[arg(long)]
        email: String,
        #[arg(long)]
        team_name: Option<String>,
        #[arg(long)]
        college: Option<String>,
        /// Comma-separated list
        #[arg(long)]
        skills: Option<String>,
    },
    /// List team accounts
    Teams,
    /// Show a team with its events, submissions and artifacts
    Team {
        #[arg(long)]
        id: String,
    },
    /// Delete a team's account item
    DeleteTeam {
        #[arg(long)]
        id: String,
    },
    Analytics,
    Leaderboard,
    /// List events owned by an account
    Events {
        #[arg(long)]
        email: String,
    },
    CreateEvent {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    UpdateEvent {
        #[arg(long)]
        email: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Delete an event and everything submitted to it
    DeleteEvent {
        #[arg(long)]
        email: String,
        #[arg(long)]
        id: String,
    },
    /// List submissions to an event
    Submissions {
        #[arg(long)]
        event_id: String,
    },
    CreateSubmission {
        /// Email of the submitting team
        #[arg(long)]
        email: String,
        #[arg(long)]
        event_id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        progress: Option<u32>,
    },
    UpdateSubmission {
        #[arg(long)]
        event_id: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        progress: Option<u32>,
    },
    DeleteSubmission {
        #[arg(long)]
        event_id: String,
        #[arg(long)]
        id: String,
    },
    /// Progress history of a submission
    History {
        #[arg(long)]
        submission_id: String,
    },
    /// Record an uploaded artifact
    Upload {
        #[arg(long)]
        submission_id: String,
        #[arg(long)]
        file_name: String,
    },
    Artifacts {
        #[arg(long)]
        submission_id: String,
    },
    Grade {
        #[arg(long)]
        submission_id: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        rating: f64,
        #[arg(long, default_value = "")]
        feedback: String,
    },
    DeleteArtifact {
        #[arg(long)]
        submission_id: String,
        #[arg(long)]
        id: String,
    },
    ReportIssue {
        #[arg(long)]
        email: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        submission_id: Option<String>,
        #[arg(long)]
        image_name: Option<String>,
    },
    Issues {
        #[arg(long)]
        email: String,
    },
    /// Rate a submission
    Rate {
        #[arg(long)]
        event_id: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        rating: f64,
    },
    /// Dump raw table items, optionally of one type
    Scan {
        #[arg(long = "type")]
        entity_type: Option<String>,
    },
}

impl Command {
    /// Kebab-case command name, used for the command span
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register { .. } => "register",
            Command::Login { .. } => "login",
            Command::Profile { .. } => "profile",
            Command::UpdateProfile { .. } => "update-profile",
            Command::Teams => "teams",
            Command::Team { .. } => "team",
            Command::DeleteTeam { .. } => "delete-team",
            Command::Analytics => "analytics",
            Command::Leaderboard => "leaderboard",
            Command::Events { .. } => "events",
            Command::CreateEvent { .. } => "create-event",
            Command::UpdateEvent { .. } => "update-event",
            Command::DeleteEvent { .. } => "delete-event",
            Command::Submissions { .. } => "submissions",
            Command::CreateSubmission { .. } => "create-submission",
            Command::UpdateSubmission { .. } => "update-submission",
            Command::DeleteSubmission { .. } => "delete-submission",
            Command::History { .. } => "history",
            Command::Upload { .. } => "upload",
            Command::Artifacts { .. } => "artifacts",
            Command::Grade { .. } => "grade",
            Command::DeleteArtifact { .. } => "delete-artifact",
            Command::ReportIssue { .. } => "report-issue",
            Command::Issues { .. } => "issues",
            Command::Rate { .. } => "rate",
            Command::Scan { .. } => "scan",
        }
    }
}

fn json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn skills(raw: Option<String>) -> Option<Vec<String>> {
    raw.map(|text| SkillsInput::Text(text).into_list())
}

/// Run one command, returning its JSON output.
pub async fn execute(
    command: Command,
    services: &AppServices,
    storage: &TrackerStorage,
) -> Result<Value> {
    match command {
        Command::Register { email, team_name, role, college, skills, password_hash } => {
            let request = RegisterRequest {
                team_name,
                email,
                password_hash,
                role: role.map(Role::from),
                college,
                skills: skills.map(SkillsInput::Text),
            };
            json(services.accounts.register(request).await?)
        },
        Command::Login { email } => json(services.accounts.resolve_login(&email).await?),
        Command::Profile { email } => json(services.accounts.profile(&email).await?),
        Command::UpdateProfile { email, team_name, college, skills: raw_skills } => {
            let update =
                ProfileUpdate { team_name, college, skills: skills(raw_skills), members: None };
            json(services.accounts.update_profile(&email, update).await?)
        },
        Command::Teams => json(services.admin.teams().await?),
        Command::Team { id } => json(services.admin.team_detail(&id).await?),
        Command::DeleteTeam { id } => json(services.admin.delete_team(&id).await?),
        Command::Analytics => json(services.admin.analytics().await?),
        Command::Leaderboard => json(services.leaderboard.leaderboard().await?),
        Command::Events { email } => json(services.events.list(&email).await?),
        Command::CreateEvent { email, name, start_date, end_date } => {
            let request = NewEvent { name, start_date, end_date };
            json(services.events.create(&email, request).await?)
        },
        Command::UpdateEvent { email, id, name, start_date, end_date } => {
            let update = EventUpdate { name, start_date, end_date };
            json(services.events.update(&email, &id, update).await?)
        },
        Command::DeleteEvent { email, id } => json(services.events.delete(&email, &id).await?),
        Command::Submissions { event_id } => {
            json(services.submissions.list_for_event(&event_id).await?)
        },
        Command::CreateSubmission { email, event_id, title, description, status, progress } => {
            let request = NewSubmission {
                event_id,
                title,
                description,
                status,
                progress_percentage: progress,
            };
            json(services.submissions.create(&email, request).await?)
        },
        Command::UpdateSubmission { event_id, id, title, description, status, progress } => {
            let update =
                SubmissionUpdate { title, description, status, progress_percentage: progress };
            json(services.submissions.update(&event_id, &id, update).await?)
        },
        Command::DeleteSubmission { event_id, id } => {
            json(services.submissions.delete(&event_id, &id).await?)
        },
        Command::History { submission_id } => {
            json(services.submissions.history(&submission_id).await?)
        },
        Command::Upload { submission_id, file_name } => {
            json(services.artifacts.record_upload(&submission_id, &file_name).await?)
        },
        Command::Artifacts { submission_id } => {
            json(services.artifacts.list(&submission_id).await?)
        },
        Command::Grade { submission_id, id, rating, feedback } => {
            json(services.artifacts.grade(&submission_id, &id, rating, feedback).await?)
        },
        Command::DeleteArtifact { submission_id, id } => {
            json(services.artifacts.delete(&submission_id, &id).await?)
        },
        Command::ReportIssue { email, title, description, submission_id, image_name } => {
            let request = NewIssue { title, description, submission_id, image_name };
            json(services.issues.report(&email, request).await?)
        },
        Command::Issues { email } => json(services.issues.list(&email).await?),
        Command::Rate { event_id, id, rating } => {
            json(services.admin.rate_submission(&event_id, &id, rating).await?)
        },
        Command::Scan { entity_type } => {
            let items = match entity_type {
                Some(raw) => storage.table().scan_type(EntityType::from_str(&raw)?).await?,
                None => storage.table().scan_all().await?,
            };
            json(items)
        },
    }
}
