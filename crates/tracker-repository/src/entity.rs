//! Mapping between typed entities and raw table items.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracker_types::{EntityType, Item};

use crate::error::{RepositoryError, RepositoryResult};

/// A domain type stored in the shared table.
///
/// Implementors derive their composite key from their own fields; all other
/// fields become item attributes through serde.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Type tag written on every item of this kind
    const ENTITY_TYPE: EntityType;

    fn partition_key(&self) -> String;

    fn sort_key(&self) -> String;

    /// Record the last-modified time
    fn set_updated_at(&mut self, at: DateTime<Utc>);

    /// Convert into a table item
    fn to_item(&self) -> RepositoryResult<Item> {
        match serde_json::to_value(self)? {
            Value::Object(attributes) => Ok(Item {
                partition_key: self.partition_key(),
                sort_key: self.sort_key(),
                entity_type: Self::ENTITY_TYPE,
                attributes,
            }),
            other => Err(RepositoryError::Serialization(format!(
                "{} did not serialize to an attribute map: {}",
                Self::ENTITY_TYPE,
                other
            ))),
        }
    }

    /// Convert from a table item, checking the type tag
    fn from_item(item: Item) -> RepositoryResult<Self> {
        if item.entity_type != Self::ENTITY_TYPE {
            return Err(RepositoryError::Validation(format!(
                "Item {}/{} has type {}, expected {}",
                item.partition_key,
                item.sort_key,
                item.entity_type,
                Self::ENTITY_TYPE
            )));
        }
        Ok(serde_json::from_value(Value::Object(item.attributes))?)
    }
}
