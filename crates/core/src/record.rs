//! The component record contract
//!
//! One `ComponentRecord` is a single observation of component data: a
//! schema-tagged payload attached to an entity within a package, stamped
//! with the producer's millisecond timestamp.
//!
//! ## Immutability
//!
//! Fields are private and there are no setters. An "update" is a new record
//! with a newer timestamp for the same identity, never a mutation.
//!
//! ## Wire format
//!
//! JSON with exactly these field names, which are part of the external
//! contract:
//!
//! ```text
//! {
//!   "package_id": "pkgA",
//!   "comp_name": "Position",
//!   "entity_key": "e1",
//!   "is_ephemeral": false,
//!   "data": {"x": 1, "y": 2},
//!   "timestamp_ms": 1700000000000
//! }
//! ```
//!
//! Note that the schema name travels as `comp_name`.

use crate::{Error, RecordIdentity, Result, TimestampMs, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One unit of component data flowing through an indexing system
///
/// ## Invariants
///
/// - `package_id`, `schema_name`, `entity_key` are non-empty
/// - The record is immutable once constructed
/// - `timestamp_ms` orders records that share an identity; the larger
///   timestamp is authoritative regardless of arrival order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    package_id: String,
    #[serde(rename = "comp_name")]
    schema_name: String,
    entity_key: String,
    is_ephemeral: bool,
    data: Value,
    timestamp_ms: TimestampMs,
}

impl ComponentRecord {
    /// Create a new record, validating the identity fields
    ///
    /// Fails with [`Error::InvalidRecord`] naming the offending field when
    /// any of `package_id`, `schema_name`, or `entity_key` is empty. Pure:
    /// no partial record exists on failure.
    pub fn new(
        package_id: impl Into<String>,
        schema_name: impl Into<String>,
        entity_key: impl Into<String>,
        is_ephemeral: bool,
        data: Value,
        timestamp_ms: TimestampMs,
    ) -> Result<Self> {
        let record = Self {
            package_id: package_id.into(),
            schema_name: schema_name.into(),
            entity_key: entity_key.into(),
            is_ephemeral,
            data,
            timestamp_ms,
        };
        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> Result<()> {
        if self.package_id.is_empty() {
            return Err(Error::InvalidRecord {
                field: "package_id",
            });
        }
        if self.schema_name.is_empty() {
            return Err(Error::InvalidRecord { field: "comp_name" });
        }
        if self.entity_key.is_empty() {
            return Err(Error::InvalidRecord {
                field: "entity_key",
            });
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the producing package identifier
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Get the component schema name (`comp_name` on the wire)
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Get the entity key
    pub fn entity_key(&self) -> &str {
        &self.entity_key
    }

    /// Whether this record is transient
    ///
    /// Ephemeral records must be eligible for a distinct retention policy in
    /// any conforming store; they are never durably persisted past their
    /// consumption window.
    pub fn is_ephemeral(&self) -> bool {
        self.is_ephemeral
    }

    /// Get the payload
    ///
    /// Opaque to the record; decode it against the shape that
    /// [`schema_name`](Self::schema_name) maps to in your schema registry.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Consume the record and return the payload
    pub fn into_data(self) -> Value {
        self.data
    }

    /// Get the producer-assigned observation time
    pub fn timestamp_ms(&self) -> TimestampMs {
        self.timestamp_ms
    }

    /// Get the logical identity used for supersession decisions
    pub fn identity(&self) -> RecordIdentity {
        RecordIdentity::new(
            self.package_id.clone(),
            self.schema_name.clone(),
            self.entity_key.clone(),
        )
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Order two records sharing an identity by timestamp
    ///
    /// Only meaningful when `self.identity() == other.identity()`; the
    /// ephemeral flag plays no part in ordering.
    pub fn cmp_by_timestamp(&self, other: &Self) -> Ordering {
        self.debug_assert_same_identity(other);
        self.timestamp_ms.cmp(&other.timestamp_ms)
    }

    /// Whether this record logically replaces `incumbent`
    ///
    /// True only when this record's timestamp is strictly newer. On equal
    /// timestamps the incumbent is retained (first-writer-wins), which makes
    /// replay of the same record a no-op. Only meaningful when both records
    /// share an identity.
    pub fn supersedes(&self, incumbent: &Self) -> bool {
        self.debug_assert_same_identity(incumbent);
        self.timestamp_ms > incumbent.timestamp_ms
    }

    fn debug_assert_same_identity(&self, other: &Self) {
        debug_assert!(
            self.package_id == other.package_id
                && self.schema_name == other.schema_name
                && self.entity_key == other.entity_key,
            "timestamp ordering is only defined for records sharing an identity"
        );
    }

    // =========================================================================
    // Wire codec
    // =========================================================================

    /// Encode this record to wire bytes (JSON)
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a record from wire bytes, enforcing the contract invariants
    ///
    /// Fails with [`Error::MalformedInput`] when the bytes are not
    /// well-formed wire JSON — including a missing or mistyped field — and
    /// with [`Error::InvalidRecord`] when the shape is right but a decoded
    /// identity field is empty.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let record: ComponentRecord = serde_json::from_slice(bytes)?;
        record.validate()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn position_record(timestamp_ms: u64) -> ComponentRecord {
        ComponentRecord::new(
            "pkgA",
            "Position",
            "e1",
            false,
            serde_json::json!({"x": 1, "y": 2}).into(),
            TimestampMs::from_millis(timestamp_ms),
        )
        .unwrap()
    }

    #[test]
    fn test_construction_populates_all_fields() {
        let record = position_record(1000);

        assert_eq!(record.package_id(), "pkgA");
        assert_eq!(record.schema_name(), "Position");
        assert_eq!(record.entity_key(), "e1");
        assert!(!record.is_ephemeral());
        assert_eq!(record.timestamp_ms(), TimestampMs::from_millis(1000));

        let data = record.data().as_object().unwrap();
        assert_eq!(data.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_construction_rejects_empty_package_id() {
        let result = ComponentRecord::new(
            "",
            "Position",
            "e1",
            false,
            serde_json::json!({"x": 1}).into(),
            TimestampMs::from_millis(1000),
        );
        assert!(
            matches!(result, Err(Error::InvalidRecord { field: "package_id" })),
            "expected InvalidRecord for package_id"
        );
    }

    #[test]
    fn test_construction_rejects_empty_schema_name() {
        let result = ComponentRecord::new(
            "pkgA",
            "",
            "e1",
            false,
            Value::Null,
            TimestampMs::from_millis(1000),
        );
        assert!(matches!(
            result,
            Err(Error::InvalidRecord { field: "comp_name" })
        ));
    }

    #[test]
    fn test_construction_rejects_empty_entity_key() {
        let result = ComponentRecord::new(
            "pkgA",
            "Position",
            "",
            false,
            Value::Null,
            TimestampMs::from_millis(1000),
        );
        assert!(matches!(
            result,
            Err(Error::InvalidRecord { field: "entity_key" })
        ));
    }

    #[test]
    fn test_null_data_is_valid() {
        let record = ComponentRecord::new(
            "pkgA",
            "Position",
            "e1",
            false,
            Value::Null,
            TimestampMs::from_millis(1000),
        )
        .unwrap();
        assert!(record.data().is_null());
    }

    #[test]
    fn test_identity_echoes_identity_fields() {
        let record = position_record(1000);
        let id = record.identity();
        assert_eq!(id.package_id(), "pkgA");
        assert_eq!(id.schema_name(), "Position");
        assert_eq!(id.entity_key(), "e1");
    }

    // ====================================================================
    // Ordering and supersession
    // ====================================================================

    #[test]
    fn test_cmp_by_timestamp() {
        let older = position_record(1000);
        let newer = position_record(2000);

        assert_eq!(older.cmp_by_timestamp(&newer), Ordering::Less);
        assert_eq!(newer.cmp_by_timestamp(&older), Ordering::Greater);
        assert_eq!(older.cmp_by_timestamp(&older.clone()), Ordering::Equal);
    }

    #[test]
    fn test_supersedes_is_strictly_newer() {
        let older = position_record(1000);
        let newer = position_record(2000);

        assert!(newer.supersedes(&older));
        assert!(!older.supersedes(&newer));
    }

    #[test]
    fn test_equal_timestamps_retain_incumbent() {
        let first = position_record(1000);
        let second = position_record(1000);

        // Neither supersedes the other; the store keeps whichever it holds
        assert!(!first.supersedes(&second));
        assert!(!second.supersedes(&first));
    }

    #[test]
    fn test_ordering_ignores_ephemeral_flag() {
        let durable = position_record(1000);
        let ephemeral = ComponentRecord::new(
            "pkgA",
            "Position",
            "e1",
            true,
            Value::Null,
            TimestampMs::from_millis(2000),
        )
        .unwrap();

        assert!(ephemeral.supersedes(&durable));
        assert_eq!(durable.cmp_by_timestamp(&ephemeral), Ordering::Less);
    }

    // ====================================================================
    // Wire codec
    // ====================================================================

    #[test]
    fn test_wire_field_names() {
        let record = position_record(1_700_000_000_000);
        let bytes = record.to_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["package_id"], "pkgA");
        assert_eq!(obj["comp_name"], "Position");
        assert_eq!(obj["entity_key"], "e1");
        assert_eq!(obj["is_ephemeral"], false);
        assert_eq!(obj["timestamp_ms"], 1_700_000_000_000u64);
        assert_eq!(obj["data"]["x"], 1);
        assert!(!obj.contains_key("schema_name"));
    }

    #[test]
    fn test_roundtrip_fixed_vector() {
        let record = position_record(1_700_000_000_000);
        let bytes = record.to_bytes().unwrap();
        let restored = ComponentRecord::from_bytes(&bytes).unwrap();
        assert_eq!(record, restored);
    }

    #[test]
    fn test_decode_external_wire_json() {
        let wire = br#"{
            "package_id": "pkgA",
            "comp_name": "Position",
            "entity_key": "e1",
            "is_ephemeral": true,
            "data": [1, 2, 3],
            "timestamp_ms": 42
        }"#;
        let record = ComponentRecord::from_bytes(wire).unwrap();
        assert!(record.is_ephemeral());
        assert_eq!(record.data().as_array().unwrap().len(), 3);
        assert_eq!(record.timestamp_ms().as_millis(), 42);
    }

    #[test]
    fn test_decode_missing_entity_key_is_malformed() {
        let wire = br#"{
            "package_id": "pkgA",
            "comp_name": "Position",
            "is_ephemeral": false,
            "data": null,
            "timestamp_ms": 42
        }"#;
        let result = ComponentRecord::from_bytes(wire);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_decode_empty_entity_key_is_invalid() {
        let wire = br#"{
            "package_id": "pkgA",
            "comp_name": "Position",
            "entity_key": "",
            "is_ephemeral": false,
            "data": null,
            "timestamp_ms": 42
        }"#;
        let result = ComponentRecord::from_bytes(wire);
        assert!(matches!(
            result,
            Err(Error::InvalidRecord { field: "entity_key" })
        ));
    }

    #[test]
    fn test_decode_mistyped_timestamp_is_malformed() {
        let wire = br#"{
            "package_id": "pkgA",
            "comp_name": "Position",
            "entity_key": "e1",
            "is_ephemeral": false,
            "data": null,
            "timestamp_ms": "not-a-number"
        }"#;
        let result = ComponentRecord::from_bytes(wire);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let result = ComponentRecord::from_bytes(b"\xff\xfenot json at all");
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    // ====================================================================
    // Property: wire round-trip preserves every field
    // ====================================================================

    fn arb_payload() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int),
            "[a-zA-Z0-9]{0,10}".prop_map(Value::String),
            prop::collection::hash_map(
                "[a-z]{1,6}",
                any::<i64>().prop_map(Value::Int),
                0..4
            )
            .prop_map(Value::Object),
        ]
    }

    proptest! {
        #[test]
        fn prop_record_roundtrip(
            package_id in "[a-zA-Z0-9_-]{1,16}",
            schema_name in "[a-zA-Z0-9_-]{1,16}",
            entity_key in "[a-zA-Z0-9_-]{1,16}",
            is_ephemeral in any::<bool>(),
            data in arb_payload(),
            timestamp_ms in any::<u64>(),
        ) {
            let record = ComponentRecord::new(
                package_id,
                schema_name,
                entity_key,
                is_ephemeral,
                data,
                TimestampMs::from_millis(timestamp_ms),
            )
            .unwrap();

            let bytes = record.to_bytes().unwrap();
            let restored = ComponentRecord::from_bytes(&bytes).unwrap();
            prop_assert_eq!(record, restored);
        }
    }
}
