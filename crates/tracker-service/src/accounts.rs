//! Account service - registration, login resolution and team profiles

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracker_types::{Account, AccountProfile, Member, Role};

use crate::{
    ServiceContext, ServiceError, ServiceResult,
    validation::{merge_optional_text, merge_text, require_non_empty, validate_email},
};

/// Skills as submitted: a list, or one comma-separated string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

impl SkillsInput {
    /// Trimmed, non-empty skill names
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            SkillsInput::List(list) => list,
            SkillsInput::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub team_name: String,
    pub email: String,
    /// Already-hashed credential; stored as-is
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub skills: Option<SkillsInput>,
}

/// Profile changes; absent or empty fields keep their stored values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub members: Option<Vec<Member>>,
}

/// The account a login email resolves to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginIdentity {
    pub account: AccountProfile,
    /// The email the caller logged in with; a member email for member logins
    pub login_email: String,
    /// Stored credential hash for the caller to verify
    #[serde(skip)]
    pub password_hash: Option<String>,
}

/// Service for team and admin accounts
pub struct AccountService {
    context: Arc<ServiceContext>,
}

impl AccountService {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    /// Register a new account.
    ///
    /// # Errors
    /// Returns `ServiceError::AlreadyExists` if the email is taken.
    /// Returns `ServiceError::LimitReached` if an admin registration would
    /// exceed the configured admin limit.
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AccountProfile> {
        validate_email(&request.email)?;
        require_non_empty("team_name", &request.team_name)?;

        let accounts = self.context.storage.accounts();
        if accounts.get(&request.email).await?.is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "Account {} already exists",
                request.email.to_lowercase()
            )));
        }

        let role = request.role.unwrap_or_default();
        if role == Role::Admin {
            let max_admins = self.context.settings.max_admins;
            let admin_count =
                accounts.list().await?.iter().filter(|account| account.is_admin()).count();
            if admin_count >= max_admins {
                tracing::warn!(admin_count, max_admins, "Admin registration rejected");
                return Err(ServiceError::LimitReached(format!(
                    "Admin limit reached (max {})",
                    max_admins
                )));
            }
        }

        let mut account = Account::new(request.email, request.team_name, role);
        account.password_hash = request.password_hash;
        account.college = request.college.filter(|college| !college.trim().is_empty());
        account.skills = request.skills.map(SkillsInput::into_list).unwrap_or_default();

        let saved = accounts.save(account).await?;
        tracing::info!(id = %saved.id, role = ?saved.role, "Account registered");
        Ok(saved.into())
    }

    /// Resolve a login email to its account.
    ///
    /// An account registered under the email wins; otherwise the first team
    /// listing the email as a member is returned.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_login(&self, email: &str) -> ServiceResult<LoginIdentity> {
        let accounts = self.context.storage.accounts();
        let account = match accounts.get(email).await? {
            Some(account) => Some(account),
            None => accounts.find_by_member(email).await?,
        };

        let account = account.ok_or_else(|| ServiceError::not_found("Account", email))?;
        tracing::debug!(id = %account.id, "Login resolved");
        Ok(LoginIdentity {
            password_hash: account.password_hash.clone(),
            account: account.into(),
            login_email: email.to_string(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn profile(&self, email: &str) -> ServiceResult<AccountProfile> {
        Ok(self.load(email).await?.into())
    }

    /// Merge `update` into the stored profile.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        email: &str,
        update: ProfileUpdate,
    ) -> ServiceResult<AccountProfile> {
        let mut account = self.load(email).await?;

        account.team_name = merge_text(account.team_name, update.team_name);
        account.college = merge_optional_text(account.college, update.college);
        if let Some(skills) = update.skills.filter(|skills| !skills.is_empty()) {
            account.skills = skills;
        }
        if let Some(members) = update.members.filter(|members| !members.is_empty()) {
            account.members = members
                .into_iter()
                .map(|member| Member { email: member.email.to_lowercase(), ..member })
                .collect();
        }

        let saved = self.context.storage.accounts().save(account).await?;
        Ok(saved.into())
    }

    async fn load(&self, email: &str) -> ServiceResult<Account> {
        self.context
            .storage
            .accounts()
            .get(email)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", email))
    }
}
