//! Contract validation tests: every violated field is reported, open `meta`
//! is accepted, and the anchor-count rule holds for analyze requests.

use pretty_assertions::assert_eq;
use rstest::rstest;
use seat_core::enums::{CalibrationMode, EntityKind, TableShape};
use seat_schema::{ANALYZE_REQUEST, ANALYZE_RESPONSE, DETECTED_ENTITY, SchemaError, SchemaRegistry};
use serde_json::{Value, json};

fn registry() -> SchemaRegistry {
    SchemaRegistry::new()
}

fn violation_paths(err: &SchemaError) -> Vec<String> {
    let mut paths: Vec<String> = err
        .validation()
        .expect("should be a validation failure")
        .violations
        .iter()
        .map(|v| v.path.clone())
        .collect();
    paths.sort();
    paths.dedup();
    paths
}

fn anchors(n: usize) -> Value {
    let points: Vec<Value> = (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / 10.0;
            json!([t, 1.0 - t])
        })
        .collect();
    Value::Array(points)
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[test]
fn valid_entity_parses() {
    let entity = registry()
        .parse_entity(&json!({
            "type": "TABLE",
            "shape": "ROUND",
            "x": 5,
            "y": 8,
            "radius": 1.2,
            "seats": 4
        }))
        .unwrap();
    assert_eq!(entity.kind, EntityKind::Table);
    assert_eq!(entity.shape, Some(TableShape::Round));
    assert_eq!(entity.radius, Some(1.2));
    assert_eq!(entity.seats, 4);
}

#[test]
fn unknown_meta_keys_are_accepted() {
    let entity = registry()
        .parse_entity(&json!({"type": "BAR", "x": 1, "y": 1, "meta": {"foo": 123}}))
        .unwrap();
    assert_eq!(entity.meta["foo"], json!(123));
}

#[test]
fn integral_float_seats_parse_as_integer() {
    let entity = registry()
        .parse_entity(&json!({"type": "TABLE", "x": 1, "y": 1, "seats": 3.0}))
        .unwrap();
    assert_eq!(entity.seats, 3);
}

#[rstest]
#[case::negative_seats(json!({"type": "TABLE", "x": 1, "y": 1, "seats": -1}), "/seats")]
#[case::fractional_seats(json!({"type": "TABLE", "x": 1, "y": 1, "seats": 2.5}), "/seats")]
#[case::seats_past_u32(json!({"type": "TABLE", "x": 1, "y": 1, "seats": 5_000_000_000_u64}), "/seats")]
#[case::seats_past_u64(json!({"type": "TABLE", "x": 1, "y": 1, "seats": 1e20}), "/seats")]
#[case::x_too_large(json!({"type": "TABLE", "x": 10.5, "y": 1}), "/x")]
#[case::y_negative(json!({"type": "TABLE", "x": 1, "y": -0.1}), "/y")]
#[case::width_too_large(json!({"type": "WALL", "x": 1, "y": 1, "width": 11}), "/width")]
#[case::radius_past_half_plane(json!({"type": "TABLE", "x": 1, "y": 1, "radius": 5.5}), "/radius")]
#[case::confidence_above_one(json!({"type": "CHAIR", "x": 1, "y": 1, "confidence": 1.2}), "/confidence")]
#[case::unknown_kind(json!({"type": "SOFA", "x": 1, "y": 1}), "/type")]
#[case::unknown_shape(json!({"type": "TABLE", "shape": "OVAL", "x": 1, "y": 1}), "/shape")]
#[case::malformed_id(json!({"id": "table-7", "type": "TABLE", "x": 1, "y": 1}), "/id")]
fn invalid_entity_is_rejected(#[case] input: Value, #[case] path: &str) {
    let err = registry().parse_entity(&input).unwrap_err();
    assert_eq!(violation_paths(&err), vec![path.to_string()]);
}

#[test]
fn every_violated_field_is_reported() {
    let err = registry()
        .parse_entity(&json!({
            "type": "TABLE",
            "shape": "OVAL",
            "x": -1,
            "y": 11,
            "height": 12,
            "radius": 9,
            "seats": -3,
            "confidence": 2
        }))
        .unwrap_err();
    assert_eq!(
        violation_paths(&err),
        vec!["/confidence", "/height", "/radius", "/seats", "/shape", "/x", "/y"]
    );
}

#[test]
fn missing_position_is_reported() {
    let violations = registry()
        .violations(DETECTED_ENTITY, &json!({"type": "ZONE"}))
        .unwrap();
    assert!(!violations.is_empty());
}

// ---------------------------------------------------------------------------
// Analyze request
// ---------------------------------------------------------------------------

fn request(mode: &str, anchors: Option<Value>) -> Value {
    let mut calibration = json!({"mode": mode});
    if let Some(anchors) = anchors {
        calibration["anchors"] = anchors;
    }
    json!({
        "idempotencyKey": "0d6c3f4e-2a71-4b8e-9f3c-5b1d2e7a9c40",
        "calibration": calibration
    })
}

#[test]
fn manual_request_with_four_anchors_parses() {
    let parsed = registry()
        .parse_request(&request("MANUAL", Some(anchors(4))))
        .unwrap();
    assert_eq!(parsed.calibration.mode, CalibrationMode::Manual);
    assert_eq!(parsed.calibration.anchors.map(|a| a.len()), Some(4));
}

#[rstest]
#[case::three(3)]
#[case::five(5)]
#[case::none(0)]
fn manual_request_with_wrong_anchor_count_fails(#[case] count: usize) {
    let err = registry()
        .parse_request(&request("MANUAL", Some(anchors(count))))
        .unwrap_err();
    assert_eq!(violation_paths(&err), vec!["/calibration/anchors"]);
}

#[test]
fn manual_request_without_anchors_fails() {
    let err = registry()
        .parse_request(&request("MANUAL", None))
        .unwrap_err();
    assert_eq!(violation_paths(&err), vec!["/calibration/anchors"]);
}

#[test]
fn auto_request_needs_no_anchors() {
    assert!(registry().validate(ANALYZE_REQUEST, &request("AUTO", None)).is_ok());
}

#[test]
fn anchor_outside_unit_square_fails() {
    let bad = json!([[0.0, 0.0], [1.0, 0.0], [1.0, 1.2], [0.0, 1.0]]);
    let err = registry()
        .parse_request(&request("MANUAL", Some(bad)))
        .unwrap_err();
    assert_eq!(violation_paths(&err), vec!["/calibration/anchors/2/1"]);
}

#[test]
fn unknown_mode_fails() {
    let err = registry()
        .parse_request(&request("SEMI", None))
        .unwrap_err();
    assert_eq!(violation_paths(&err), vec!["/calibration/mode"]);
}

// ---------------------------------------------------------------------------
// Analyze response
// ---------------------------------------------------------------------------

fn response(entities: Value, preview: Value) -> Value {
    json!({
        "runId": "6f1c2a4e-8d0b-4c55-9a57-2f8f3c1e9b10",
        "tablesDetected": 1,
        "confidence": 0.9,
        "analysisMs": 850,
        "entities": entities,
        "preview": preview
    })
}

#[test]
fn valid_response_parses_with_default_world() {
    let parsed = registry()
        .parse_response(&response(
            json!([{"type": "TABLE", "shape": "RECT", "x": 2, "y": 3, "width": 2, "height": 1}]),
            json!({"imgWidth": 1200, "imgHeight": 900}),
        ))
        .unwrap();
    assert_eq!(parsed.preview.world_width, 10.0);
    assert_eq!(parsed.preview.world_height, 10.0);
    assert_eq!(parsed.table_count(), 1);
}

#[test]
fn response_reports_entity_index_and_preview() {
    let err = registry()
        .validate(
            ANALYZE_RESPONSE,
            &response(
                json!([
                    {"type": "TABLE", "x": 1, "y": 1},
                    {"type": "TABLE", "x": 1, "y": 14}
                ]),
                json!({"imgWidth": 0, "imgHeight": 900, "worldWidth": 12}),
            ),
        )
        .unwrap_err();
    assert_eq!(
        violation_paths(&err),
        vec!["/entities/1/y", "/preview/imgWidth", "/preview/worldWidth"]
    );
}
