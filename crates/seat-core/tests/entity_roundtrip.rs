//! Serde roundtrip and JsonSchema validation tests for the floor-plan types.

use std::collections::BTreeMap;

use chrono::Utc;
use schemars::schema_for;
use seat_core::entities::*;
use seat_core::enums::*;
use uuid::Uuid;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_table() -> DetectedEntity {
    let mut meta = BTreeMap::new();
    meta.insert("zone".to_string(), serde_json::json!("patio"));
    DetectedEntity {
        id: Some(Uuid::new_v4()),
        label: Some("T4".into()),
        confidence: Some(0.91),
        seats: 4,
        rotation: 45.0,
        meta,
        ..DetectedEntity::round_table(5.0, 8.0, 1.2)
    }
}

roundtrip_and_validate!(entity_roundtrip, DetectedEntity, sample_table());

roundtrip_and_validate!(
    bare_wall_roundtrip,
    DetectedEntity,
    DetectedEntity {
        width: Some(10.0),
        height: Some(0.2),
        ..DetectedEntity::new(EntityKind::Wall, 5.0, 0.1)
    }
);

roundtrip_and_validate!(
    analyze_request_manual_roundtrip,
    AnalyzeRequest,
    AnalyzeRequest::new(
        Uuid::new_v4(),
        Calibration::manual([
            ImagePoint::new(0.05, 0.05),
            ImagePoint::new(0.95, 0.05),
            ImagePoint::new(0.95, 0.95),
            ImagePoint::new(0.05, 0.95),
        ]),
    )
);

roundtrip_and_validate!(
    analyze_request_auto_roundtrip,
    AnalyzeRequest,
    AnalyzeRequest::new(Uuid::new_v4(), Calibration::auto())
);

roundtrip_and_validate!(
    analyze_response_roundtrip,
    AnalyzeResponse,
    AnalyzeResponse {
        run_id: Uuid::new_v4(),
        tables_detected: 2,
        confidence: 0.82,
        analysis_ms: 1_450,
        entities: vec![sample_table(), DetectedEntity::rect_table(2.0, 3.0, 2.0, 1.0)],
        preview: PreviewMeta::new(1024, 768),
    }
);

roundtrip_and_validate!(
    image_detection_roundtrip,
    ImageDetection,
    ImageDetection {
        shape: Some(TableShape::Round),
        radius: Some(0.12),
        confidence: Some(0.7),
        ..ImageDetection::new(EntityKind::Table, 0.5, 0.2)
    }
);

roundtrip_and_validate!(
    snapshot_roundtrip,
    FloorPlanSnapshot,
    FloorPlanSnapshot {
        run_id: Some(Uuid::new_v4()),
        preview: Some(PreviewMeta::new(640, 480)),
        entities: vec![sample_table()],
        captured_at: Utc::now(),
    }
);

#[test]
fn absent_optionals_are_not_serialized() {
    let entity = DetectedEntity::new(EntityKind::Chair, 1.0, 1.0);
    let json = serde_json::to_value(&entity).unwrap();
    let object = json.as_object().unwrap();
    for key in ["id", "shape", "width", "height", "radius", "label", "confidence", "seatsInferred"] {
        assert!(!object.contains_key(key), "{key} should be omitted");
    }
    assert_eq!(object["type"], "CHAIR");
}

#[test]
fn entity_defaults_fill_missing_fields() {
    let entity: DetectedEntity = serde_json::from_str(r#"{"type": "TABLE", "x": 1, "y": 2}"#).unwrap();
    assert_eq!(entity.rotation, 0.0);
    assert_eq!(entity.seats, 0);
    assert!(entity.meta.is_empty());
    assert!(!entity.seats_inferred);
}

#[test]
fn entity_schema_declares_ranges() {
    let schema = serde_json::to_value(schema_for!(DetectedEntity)).unwrap();
    let properties = &schema["properties"];
    assert_eq!(properties["x"]["minimum"], 0.0);
    assert_eq!(properties["x"]["maximum"], 10.0);
    assert_eq!(properties["y"]["maximum"], 10.0);
}
