//! Context snapshot semantics, end to end.

use crate::prelude::deterministic_layer;
use serde_json::json;

#[test]
fn event_context_is_frozen_at_push_time() {
    let layer = deterministic_layer();

    layer.set_context("user", json!({"id": "42"}));
    let event = layer.push("t", None, None).unwrap();
    layer.set_context("user", json!({"id": "99"}));

    assert_eq!(event.context.unwrap()["user"], json!({"id": "42"}));
    assert_eq!(
        layer.last_event().unwrap().context.unwrap()["user"],
        json!({"id": "42"})
    );
    // The live store has moved on.
    assert_eq!(layer.snapshot_context()["user"], json!({"id": "99"}));
}

#[test]
fn update_merges_only_plain_objects() {
    let layer = deterministic_layer();

    layer.set_context("user", json!({"id": "42", "tags": ["a", "b"]}));
    layer.update_context("user", json!({"tags": ["c"], "plan": "pro"}));

    assert_eq!(
        layer.snapshot_context()["user"],
        json!({"id": "42", "tags": ["c"], "plan": "pro"})
    );

    layer.set_context("session", json!("anonymous"));
    layer.update_context("session", json!({"id": "s-1"}));
    assert_eq!(layer.snapshot_context()["session"], json!({"id": "s-1"}));
}

#[test]
fn optional_fields_are_absent_not_null() {
    let layer = deterministic_layer();

    let event = layer.push("t", None, None).unwrap();
    let record = serde_json::to_value(&event).unwrap();
    let object = record.as_object().unwrap();

    for key in ["context", "data", "customDimensions", "source"] {
        assert!(!object.contains_key(key), "{key} should be absent");
    }
}
