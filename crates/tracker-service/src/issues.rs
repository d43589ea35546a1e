//! Issue service - problems reported by teams

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracker_types::Issue;

use crate::{ServiceContext, ServiceError, ServiceResult, validation::require_non_empty};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub submission_id: Option<String>,
    /// Original name of an attached image, if any
    #[serde(default)]
    pub image_name: Option<String>,
}

/// Service for reported issues
pub struct IssueService {
    context: Arc<ServiceContext>,
}

impl IssueService {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    /// Record an issue with status `Open`.
    ///
    /// An attached image is given the object path
    /// `<prefix>/<team id>/<millis>_<name>`.
    #[tracing::instrument(skip(self, request))]
    pub async fn report(&self, owner_email: &str, request: NewIssue) -> ServiceResult<Issue> {
        require_non_empty("title", &request.title)?;

        let storage = &self.context.storage;
        let team = storage
            .accounts()
            .get(owner_email)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", owner_email))?;

        let image_path = request.image_name.filter(|name| !name.trim().is_empty()).map(|name| {
            format!(
                "{}/{}/{}_{}",
                self.context.settings.issue_prefix,
                team.id,
                storage.ids().next_millis(),
                name
            )
        });

        let mut issue = Issue::new(owner_email, request.title);
        issue.team_id = team.id;
        issue.description = request.description;
        issue.submission_id = request.submission_id.filter(|id| !id.is_empty());
        issue.image_path = image_path;

        let saved = storage.issues().save(issue).await?;
        tracing::info!(id = %saved.id, "Issue reported");
        Ok(saved)
    }

    pub async fn list(&self, owner_email: &str) -> ServiceResult<Vec<Issue>> {
        Ok(self.context.storage.issues().list_for_account(owner_email).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use tracker_test_fixtures::test_account;
    use tracker_types::issue::STATUS_OPEN;

    use super::*;
    use crate::test_support::context;

    #[tokio::test]
    async fn test_report_and_list() {
        let context = context();
        let team = context.storage.accounts().save(test_account("team@x.com", "Crabs")).await.unwrap();
        let service = IssueService::new(context);

        let issue = service
            .report(
                "team@x.com",
                NewIssue {
                    title: "Judging portal down".to_string(),
                    description: "502 on submit".to_string(),
                    submission_id: Some("sub_1".to_string()),
                    image_name: Some("screen.png".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(issue.status, STATUS_OPEN);
        assert_eq!(issue.team_id, team.id);
        let path = issue.image_path.clone().unwrap();
        assert!(path.starts_with(&format!("issues/{}/", team.id)));
        assert!(path.ends_with("_screen.png"));

        let plain = service
            .report("team@x.com", NewIssue { title: "Wifi".to_string(), ..Default::default() })
            .await
            .unwrap();
        assert!(plain.image_path.is_none());
        assert!(plain.submission_id.is_none());

        assert_eq!(service.list("team@x.com").await.unwrap(), vec![issue, plain]);
    }

    #[tokio::test]
    async fn test_report_requires_account_and_title() {
        let service = IssueService::new(context());
        assert!(matches!(
            service.report("ghost@x.com", NewIssue { title: "x".into(), ..Default::default() }).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.report("ghost@x.com", NewIssue::default()).await,
            Err(ServiceError::InvalidRequest(_))
        ));
    }
}
