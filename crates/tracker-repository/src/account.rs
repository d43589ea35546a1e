//! Repository for Account entities.
//!
//! # Key Schema
//!
//! - `ACCOUNT#{email}` / `METADATA` → Account attributes

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracker_types::{Account, EntityType};

use crate::{
    Entity, IdGenerator, Table,
    error::RepositoryResult,
    ids::kind,
    keys,
};

impl Entity for Account {
    const ENTITY_TYPE: EntityType = EntityType::Account;

    fn partition_key(&self) -> String {
        keys::account::partition(&self.email)
    }

    fn sort_key(&self) -> String {
        keys::METADATA.to_string()
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

/// Repository for team and admin accounts.
///
/// Accounts are addressed by email. Child items (events, issues) live in the
/// same partition but are never touched here; deleting an account leaves
/// them orphaned.
#[derive(Clone)]
pub struct AccountRepository {
    table: Table,
    ids: Arc<IdGenerator>,
}

impl AccountRepository {
    pub fn new(table: Table, ids: Arc<IdGenerator>) -> Self {
        Self { table, ids }
    }

    /// Get an account by email. Lookup is case-insensitive.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get(&self, email: &str) -> RepositoryResult<Option<Account>> {
        self.table.get_entity(&keys::account::partition(email), keys::METADATA).await
    }

    /// Write an account, overwriting any existing one with the same email.
    ///
    /// The email is lower-cased and an id is assigned when missing.
    #[tracing::instrument(skip(self, account), fields(email = %account.email), level = "debug")]
    pub async fn save(&self, mut account: Account) -> RepositoryResult<Account> {
        account.email = account.email.to_lowercase();
        if account.id.is_empty() {
            account.id = self.ids.next_id(kind::ACCOUNT);
        }
        self.table.put_entity(account).await
    }

    /// All accounts, teams and admins alike.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn list(&self) -> RepositoryResult<Vec<Account>> {
        self.table.scan_entities().await
    }

    /// Find an account by its id. Full scan.
    pub async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Account>> {
        Ok(self.list().await?.into_iter().find(|account| account.id == id))
    }

    /// Find the team whose member list contains `email`. Full scan.
    pub async fn find_by_member(&self, email: &str) -> RepositoryResult<Option<Account>> {
        Ok(self.list().await?.into_iter().find(|account| account.has_member(email)))
    }

    /// Delete the account metadata item only.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn delete(&self, email: &str) -> RepositoryResult<()> {
        self.table.delete_by_key(&keys::account::partition(email), keys::METADATA).await
    }
}
