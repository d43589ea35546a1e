//! Event service - hackathon entries owned by a team

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracker_types::Event;

use crate::{
    ServiceContext, ServiceError, ServiceResult,
    submissions::{CascadeSummary, purge_submission},
    validation::{merge_optional_text, merge_text, require_non_empty},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Event changes; absent or empty fields keep their stored values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Service for events
pub struct EventService {
    context: Arc<ServiceContext>,
}

impl EventService {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    /// Create an event in the owner's partition.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(&self, owner_email: &str, request: NewEvent) -> ServiceResult<Event> {
        require_non_empty("name", &request.name)?;

        let storage = &self.context.storage;
        let owner = storage
            .accounts()
            .get(owner_email)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", owner_email))?;

        let mut event = Event::new(owner_email, request.name);
        event.start_date = request.start_date;
        event.end_date = request.end_date;
        event.team_id = owner.id;

        let saved = storage.events().save(event).await?;
        tracing::info!(id = %saved.id, "Event created");
        Ok(saved)
    }

    pub async fn list(&self, owner_email: &str) -> ServiceResult<Vec<Event>> {
        Ok(self.context.storage.events().list_for_account(owner_email).await?)
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update(
        &self,
        owner_email: &str,
        id: &str,
        update: EventUpdate,
    ) -> ServiceResult<Event> {
        let mut event = self.load(owner_email, id).await?;

        event.name = merge_text(event.name, update.name);
        event.start_date = merge_optional_text(event.start_date, update.start_date);
        event.end_date = merge_optional_text(event.end_date, update.end_date);

        Ok(self.context.storage.events().save(event).await?)
    }

    /// Delete an event with every submission, artifact and progress record under it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, owner_email: &str, id: &str) -> ServiceResult<CascadeSummary> {
        let event = self.load(owner_email, id).await?;
        let storage = &self.context.storage;

        let mut summary = CascadeSummary::default();
        for submission in storage.submissions().list_for_event(&event.id).await? {
            summary.absorb(purge_submission(storage, &event.id, &submission.id).await?);
        }
        storage.events().delete(owner_email, &event.id).await?;
        summary.events += 1;

        tracing::info!(
            submissions = summary.submissions,
            artifacts = summary.artifacts,
            progress_records = summary.progress_records,
            "Event deleted"
        );
        Ok(summary)
    }

    async fn load(&self, owner_email: &str, id: &str) -> ServiceResult<Event> {
        self.context
            .storage
            .events()
            .get(owner_email, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use tracker_test_fixtures::{test_account, test_artifact, test_submission};
    use tracker_types::EntityType;

    use super::*;
    use crate::test_support::{context, failing_context};

    async fn setup() -> (EventService, Arc<ServiceContext>) {
        let context = context();
        context.storage.accounts().save(test_account("team@x.com", "Crabs")).await.unwrap();
        (EventService::new(Arc::clone(&context)), context)
    }

    fn new_event(name: &str) -> NewEvent {
        NewEvent { name: name.to_string(), start_date: Some("2024-03-01".to_string()), end_date: None }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (service, context) = setup().await;
        let team = context.storage.accounts().get("team@x.com").await.unwrap().unwrap();

        let event = service.create("Team@X.com", new_event("Jam")).await.unwrap();
        assert_eq!(event.owner_email, "team@x.com");
        assert_eq!(event.team_id, team.id);
        assert!(event.id.starts_with("event_"));

        assert_eq!(service.list("team@x.com").await.unwrap(), vec![event]);
        assert!(matches!(
            service.create("ghost@x.com", new_event("Jam")).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_merges() {
        let (service, _) = setup().await;
        let event = service.create("team@x.com", new_event("Jam")).await.unwrap();

        let updated = service
            .update(
                "team@x.com",
                &event.id,
                EventUpdate { end_date: Some("2024-03-03".to_string()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Jam");
        assert_eq!(updated.start_date.as_deref(), Some("2024-03-01"));
        assert_eq!(updated.end_date.as_deref(), Some("2024-03-03"));

        assert!(matches!(
            service.update("team@x.com", "event_0", EventUpdate::default()).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_through_submissions() {
        let (service, context) = setup().await;
        let storage = &context.storage;
        let event = service.create("team@x.com", new_event("Jam")).await.unwrap();
        let other = service.create("team@x.com", new_event("Other")).await.unwrap();

        for title in ["A", "B"] {
            let sub =
                storage.submissions().save(test_submission(&event.id, "user_1", title)).await.unwrap();
            storage.artifacts().save(test_artifact(&sub.id, "deck.pdf")).await.unwrap();
            storage.progress().append(&sub.id, "Update: Idea | 0%", 0).await.unwrap();
        }
        let kept = storage.submissions().save(test_submission(&other.id, "user_1", "C")).await.unwrap();

        let summary = service.delete("team@x.com", &event.id).await.unwrap();
        assert_eq!(
            summary,
            CascadeSummary { events: 1, submissions: 2, artifacts: 2, progress_records: 2 }
        );

        let table = storage.table();
        assert!(table.scan_type(EntityType::Artifact).await.unwrap().is_empty());
        assert!(table.scan_type(EntityType::ProgressLog).await.unwrap().is_empty());
        assert_eq!(storage.submissions().list().await.unwrap(), vec![kept]);
        assert_eq!(service.list("team@x.com").await.unwrap(), vec![other]);
    }

    #[tokio::test]
    async fn test_store_faults_propagate() {
        let service = EventService::new(failing_context());
        assert!(matches!(service.list("team@x.com").await, Err(ServiceError::Repository(_))));
        assert!(matches!(
            service.delete("team@x.com", "event_1").await,
            Err(ServiceError::Repository(_))
        ));
    }
}
