//! Raw table items
//!
//! An [`Item`] is one row of the shared table: a composite key, a type tag,
//! and a free-form attribute map. Backends store items opaquely; only the
//! repository layer knows how attributes map onto entity structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{EntityType, StoreError, StoreResult, progress::format_timestamp};

/// Attribute map of a stored item
pub type Attributes = serde_json::Map<String, Value>;

/// Name of the last-modified attribute stamped on every write
pub const UPDATED_AT: &str = "updated_at";

/// Serialized names of the key and type fields; attributes may not reuse them
pub const RESERVED_ATTRIBUTES: [&str; 3] = ["pk", "sk", "type"];

/// Composite key addressing exactly one item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    pub partition: String,
    pub sort: String,
}

impl ItemKey {
    pub fn new(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self { partition: partition.into(), sort: sort.into() }
    }
}

/// A single item in the shared table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "pk")]
    pub partition_key: String,

    #[serde(rename = "sk")]
    pub sort_key: String,

    #[serde(rename = "type")]
    pub entity_type: EntityType,

    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Item {
    pub fn new(
        partition_key: impl Into<String>,
        sort_key: impl Into<String>,
        entity_type: EntityType,
    ) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
            entity_type,
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter.
    ///
    /// Reserved names are accepted here but rejected by [`Item::check_attributes`],
    /// which every backend runs before writing.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// First attribute whose name collides with a key or type field
    pub fn reserved_attribute(&self) -> Option<&str> {
        RESERVED_ATTRIBUTES.into_iter().find(|name| self.attributes.contains_key(*name))
    }

    /// Fail if an attribute would shadow `pk`, `sk` or `type` when serialized
    pub fn check_attributes(&self) -> StoreResult<()> {
        match self.reserved_attribute() {
            Some(name) => Err(StoreError::InvalidItem(format!(
                "attribute name '{}' is reserved ({}/{})",
                name, self.partition_key, self.sort_key
            ))),
            None => Ok(()),
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.partition_key.clone(), self.sort_key.clone())
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// String attribute, if present and a string
    pub fn str_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Last-modified time, if the item has been written through the access layer
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.str_attribute(UPDATED_AT)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc))
    }

    /// Stamp the last-modified attribute as millisecond UTC, e.g. `2024-01-01T00:00:00.000Z`
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.attributes.insert(UPDATED_AT.to_string(), Value::String(format_timestamp(&at)));
    }

    /// Approximate encoded size, used for key-space metrics
    pub fn approximate_size(&self) -> usize {
        self.partition_key.len()
            + self.sort_key.len()
            + serde_json::to_vec(&self.attributes).map(|v| v.len()).unwrap_or_default()
    }
}
