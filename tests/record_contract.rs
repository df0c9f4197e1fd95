//! Integration tests for the record contract: construction, validation,
//! and the wire codec as seen through the facade crate.

use compindex::{ComponentRecord, Error, RecordIdentity, TimestampMs, Value};

fn fixed_vector() -> ComponentRecord {
    ComponentRecord::new(
        "pkgA",
        "Position",
        "e1",
        false,
        serde_json::json!({"x": 1, "y": 2}).into(),
        TimestampMs::from_millis(1_700_000_000_000),
    )
    .unwrap()
}

#[test]
fn valid_construction_echoes_identity() {
    let record = fixed_vector();
    assert_eq!(
        record.identity(),
        RecordIdentity::new("pkgA", "Position", "e1")
    );
}

#[test]
fn empty_identity_fields_are_rejected() {
    for (package_id, schema_name, entity_key) in
        [("", "Position", "e1"), ("pkgA", "", "e1"), ("pkgA", "Position", "")]
    {
        let result = ComponentRecord::new(
            package_id,
            schema_name,
            entity_key,
            false,
            serde_json::json!({"x": 1}).into(),
            TimestampMs::from_millis(1000),
        );
        assert!(
            matches!(result, Err(Error::InvalidRecord { .. })),
            "expected InvalidRecord for ({:?}, {:?}, {:?})",
            package_id,
            schema_name,
            entity_key
        );
    }
}

#[test]
fn fixed_vector_roundtrips() {
    let record = fixed_vector();
    let bytes = record.to_bytes().unwrap();
    let restored = ComponentRecord::from_bytes(&bytes).unwrap();
    assert_eq!(record, restored);
}

#[test]
fn wire_uses_contract_field_names() {
    let bytes = fixed_vector().to_bytes().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    for field in [
        "package_id",
        "comp_name",
        "entity_key",
        "is_ephemeral",
        "data",
        "timestamp_ms",
    ] {
        assert!(json.get(field).is_some(), "missing wire field {field}");
    }
}

#[test]
fn decoding_interoperates_with_external_producers() {
    // Bytes as an external producer (different language, same contract)
    // would emit them
    let wire = br#"{"package_id":"pkgA","comp_name":"Position","entity_key":"e1","is_ephemeral":false,"data":{"x":1,"y":2},"timestamp_ms":1700000000000}"#;
    let record = ComponentRecord::from_bytes(wire).unwrap();

    assert_eq!(record, fixed_vector());
}

#[test]
fn missing_identity_field_is_malformed_input() {
    let wire = br#"{"package_id":"pkgA","comp_name":"Position","is_ephemeral":false,"data":null,"timestamp_ms":1}"#;
    assert!(matches!(
        ComponentRecord::from_bytes(wire),
        Err(Error::MalformedInput(_))
    ));
}

#[test]
fn empty_identity_field_is_invalid_record() {
    let wire = br#"{"package_id":"pkgA","comp_name":"Position","entity_key":"","is_ephemeral":false,"data":null,"timestamp_ms":1}"#;
    assert!(matches!(
        ComponentRecord::from_bytes(wire),
        Err(Error::InvalidRecord { field: "entity_key" })
    ));
}

#[test]
fn null_payload_roundtrips() {
    let record = ComponentRecord::new(
        "pkgA",
        "Presence",
        "e1",
        true,
        Value::Null,
        TimestampMs::from_millis(5),
    )
    .unwrap();

    let restored = ComponentRecord::from_bytes(&record.to_bytes().unwrap()).unwrap();
    assert!(restored.data().is_null());
    assert!(restored.is_ephemeral());
}
