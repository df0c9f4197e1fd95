//! Logical identity of a component record
//!
//! Two records represent "the same fact" over time when they agree on the
//! triple (package_id, schema_name, entity_key). Any store built on the
//! contract keys its supersession decisions on this triple.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The supersession key for component records
///
/// A later record with the same identity and a newer timestamp logically
/// replaces the earlier one in any materialized index, regardless of
/// arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordIdentity {
    package_id: String,
    schema_name: String,
    entity_key: String,
}

impl RecordIdentity {
    /// Create a new identity
    ///
    /// No validation happens here; emptiness of the fields is enforced where
    /// records are constructed and decoded.
    pub fn new(
        package_id: impl Into<String>,
        schema_name: impl Into<String>,
        entity_key: impl Into<String>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            schema_name: schema_name.into(),
            entity_key: entity_key.into(),
        }
    }

    /// Get the producing package identifier
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Get the component schema name
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Get the entity key
    pub fn entity_key(&self) -> &str {
        &self.entity_key
    }
}

impl fmt::Display for RecordIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.package_id, self.schema_name, self.entity_key
        )
    }
}
