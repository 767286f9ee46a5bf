use seat_config::LayoutConfig;
use seat_core::entities::{AnalyzeResponse, DetectedEntity, ImageDetection};
use seat_core::errors::{FieldViolation, ValidationError};
use seat_layout::{normalize_detections, normalize_response};
use seat_schema::{IMAGE_DETECTION, SchemaRegistry};
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NormalizeArgs;
use crate::commands::{load_config, read_json};
use crate::output::output;

/// What `seat normalize` produces, matching the shape it was given.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    Response(AnalyzeResponse),
    Entities(Vec<DetectedEntity>),
}

/// Normalize a response object or an array of image-space detections.
pub fn normalize_document(
    registry: &SchemaRegistry,
    layout: &LayoutConfig,
    document: &Value,
) -> anyhow::Result<Normalized> {
    let rules = layout.seat_rules();
    match document {
        Value::Array(items) => {
            let detections = parse_detections(registry, items)?;
            Ok(Normalized::Entities(normalize_detections(
                &detections,
                &layout.plane(),
                &rules,
            )))
        }
        _ => {
            let response = registry.parse_response(document)?;
            Ok(Normalized::Response(normalize_response(response, &rules)))
        }
    }
}

/// Validate every detection first so the error lists all bad items at once.
fn parse_detections(
    registry: &SchemaRegistry,
    items: &[Value],
) -> anyhow::Result<Vec<ImageDetection>> {
    let mut violations = Vec::new();
    for (index, item) in items.iter().enumerate() {
        violations.extend(
            registry
                .violations(IMAGE_DETECTION, item)?
                .into_iter()
                .map(|v| FieldViolation::new(format!("/{index}{}", v.path), v.message)),
        );
    }
    if !violations.is_empty() {
        return Err(ValidationError::new(violations).into());
    }

    items
        .iter()
        .map(|item| Ok(registry.parse::<ImageDetection>(IMAGE_DETECTION, item)?))
        .collect()
}

/// Handle `seat normalize`.
pub fn handle(args: &NormalizeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config(flags)?;
    let document = read_json(&args.file)?;
    let normalized = normalize_document(&SchemaRegistry::new(), &config.layout, &document)?;
    output(&normalized, flags.format)
}
