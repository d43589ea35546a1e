//! Account type
//!
//! Represents a team or an administrator. Accounts are addressed by their
//! (lower-cased) email and own events and issues.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Team,
    Admin,
}

/// A member of a team account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roll_no: String,
}

/// A registered team or administrator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Generated identifier (`user_<ms>`); empty until first save
    #[serde(default)]
    pub id: String,

    /// Natural key; stored lower-cased
    pub email: String,

    pub team_name: String,

    /// Opaque credential hash, never interpreted by this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub college: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub members: Vec<Member>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(email: impl Into<String>, team_name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into().to_lowercase(),
            team_name: team_name.into(),
            role,
            ..Default::default()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether `email` is one of this team's members
    pub fn has_member(&self, email: &str) -> bool {
        self.members.iter().any(|m| m.email.eq_ignore_ascii_case(email))
    }
}

/// Account view without credential material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub email: String,
    pub team_name: String,
    pub role: Role,
    pub college: Option<String>,
    pub skills: Vec<String>,
    pub members: Vec<Member>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            team_name: account.team_name,
            role: account.role,
            college: account.college,
            skills: account.skills,
            members: account.members,
            updated_at: account.updated_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_account_new_lowercases_email() {
        let account = Account::new("Team@Example.COM", "Crabs", Role::Team);
        assert_eq!(account.email, "team@example.com");
        assert!(!account.is_admin());
        assert!(account.id.is_empty());
    }

    #[test]
    fn test_has_member_ignores_case() {
        let mut account = Account::new("lead@example.com", "Crabs", Role::Team);
        account.members.push(Member {
            name: "Ferris".to_string(),
            email: "Ferris@Example.com".to_string(),
            roll_no: "42".to_string(),
        });
        assert!(account.has_member("ferris@example.com"));
        assert!(!account.has_member("other@example.com"));
    }

    #[test]
    fn test_profile_drops_password_hash() {
        let mut account = Account::new("lead@example.com", "Crabs", Role::Admin);
        account.password_hash = Some("$2b$10$hash".to_string());

        let profile = AccountProfile::from(account);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("password"));
        assert_eq!(profile.role, Role::Admin);
    }
}
