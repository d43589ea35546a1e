//! Repository for Issue entities.
//!
//! # Key Schema
//!
//! - `ACCOUNT#{owner_email}` / `ISSUE#{id}` → Issue attributes

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracker_types::{EntityType, Issue};

use crate::{
    Entity, IdGenerator, Table,
    error::RepositoryResult,
    ids::kind,
    keys,
};

impl Entity for Issue {
    const ENTITY_TYPE: EntityType = EntityType::Issue;

    fn partition_key(&self) -> String {
        keys::account::partition(&self.owner_email)
    }

    fn sort_key(&self) -> String {
        keys::issue::sort(&self.id)
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

/// Repository for issues reported by teams.
#[derive(Clone)]
pub struct IssueRepository {
    table: Table,
    ids: Arc<IdGenerator>,
}

impl IssueRepository {
    pub fn new(table: Table, ids: Arc<IdGenerator>) -> Self {
        Self { table, ids }
    }

    pub async fn get(&self, owner_email: &str, id: &str) -> RepositoryResult<Option<Issue>> {
        self.table
            .get_entity(&keys::account::partition(owner_email), &keys::issue::sort(id))
            .await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn list_for_account(&self, owner_email: &str) -> RepositoryResult<Vec<Issue>> {
        self.table
            .query_entities(&keys::account::partition(owner_email), keys::issue::PREFIX)
            .await
    }

    #[tracing::instrument(skip(self, issue), fields(owner = %issue.owner_email), level = "debug")]
    pub async fn save(&self, mut issue: Issue) -> RepositoryResult<Issue> {
        issue.owner_email = issue.owner_email.to_lowercase();
        if issue.id.is_empty() {
            issue.id = self.ids.next_id(kind::ISSUE);
        }
        self.table.put_entity(issue).await
    }

    pub async fn delete(&self, owner_email: &str, id: &str) -> RepositoryResult<()> {
        self.table
            .delete_by_key(&keys::account::partition(owner_email), &keys::issue::sort(id))
            .await
    }
}
