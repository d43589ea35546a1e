//! Entity builders with realistic defaults

use tracker_types::{Account, Artifact, Event, Issue, Member, Role, Submission};

/// A team account with one listed member.
pub fn test_account(email: &str, team_name: &str) -> Account {
    let mut account = Account::new(email, team_name, Role::Team);
    account.college = Some("Ferris University".to_string());
    account.skills = vec!["rust".to_string(), "tokio".to_string()];
    account.members = vec![Member {
        name: format!("{} lead", team_name),
        email: format!("lead.{}", email.to_lowercase()),
        roll_no: "R-001".to_string(),
    }];
    account
}

pub fn test_admin(email: &str) -> Account {
    Account::new(email, "Organizers", Role::Admin)
}

pub fn test_event(owner_email: &str, name: &str) -> Event {
    let mut event = Event::new(owner_email, name);
    event.start_date = Some("2024-03-01".to_string());
    event.end_date = Some("2024-03-03".to_string());
    event
}

pub fn test_submission(event_id: &str, team_id: &str, title: &str) -> Submission {
    let mut submission = Submission::new(event_id, title);
    submission.team_id = team_id.to_string();
    submission.description = format!("{} description", title);
    submission
}

pub fn test_artifact(submission_id: &str, name: &str) -> Artifact {
    Artifact::new(submission_id, format!("artifacts/{}/0_{}", submission_id, name), name)
}

pub fn test_issue(owner_email: &str, title: &str) -> Issue {
    let mut issue = Issue::new(owner_email, title);
    issue.description = format!("{} details", title);
    issue
}
