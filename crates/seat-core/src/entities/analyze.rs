use std::borrow::Cow;

use schemars::{JsonSchema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::WORLD_SIZE;
use crate::entities::DetectedEntity;
use crate::enums::{CalibrationMode, EntityKind};
use crate::errors::FieldViolation;

/// A point in image-fraction space: `[cx, cy]`, origin top-left, Y down.
///
/// Serialized as a bare 2-element array. Both components must lie in `[0, 1]`
/// wherever the point is part of a validated contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePoint(pub [f64; 2]);

impl ImagePoint {
    #[must_use]
    pub const fn new(cx: f64, cy: f64) -> Self {
        Self([cx, cy])
    }

    #[must_use]
    pub const fn cx(self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub const fn cy(self) -> f64 {
        self.0[1]
    }
}

impl JsonSchema for ImagePoint {
    fn schema_name() -> Cow<'static, str> {
        "ImagePoint".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> schemars::Schema {
        json_schema!({
            "type": "array",
            "prefixItems": [
                { "type": "number", "minimum": 0.0, "maximum": 1.0 },
                { "type": "number", "minimum": 0.0, "maximum": 1.0 }
            ],
            "items": false,
            "minItems": 2,
            "maxItems": 2
        })
    }
}

/// Anchor configuration aligning image space to world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    pub mode: CalibrationMode,

    /// Exactly four points when present; required for `MANUAL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<ImagePoint>>,
}

impl Calibration {
    #[must_use]
    pub const fn auto() -> Self {
        Self {
            mode: CalibrationMode::Auto,
            anchors: None,
        }
    }

    #[must_use]
    pub fn manual(anchors: [ImagePoint; 4]) -> Self {
        Self {
            mode: CalibrationMode::Manual,
            anchors: Some(anchors.to_vec()),
        }
    }

    /// Cross-field rules the per-field schema cannot express.
    ///
    /// `prefix` is the JSON pointer of this calibration inside its document.
    #[must_use]
    pub fn semantic_violations(&self, prefix: &str) -> Vec<FieldViolation> {
        let path = format!("{prefix}/anchors");
        match (&self.anchors, self.mode.required_anchors()) {
            (None, Some(required)) => vec![FieldViolation::new(
                path,
                format!("{} calibration requires exactly {required} anchors", self.mode),
            )],
            (Some(anchors), _) if anchors.len() != 4 => vec![FieldViolation::new(
                path,
                format!("expected exactly 4 anchors, got {}", anchors.len()),
            )],
            _ => Vec::new(),
        }
    }
}

/// Request sent to the image-analysis service alongside the image payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub idempotency_key: Uuid,
    pub calibration: Calibration,
}

impl AnalyzeRequest {
    #[must_use]
    pub const fn new(idempotency_key: Uuid, calibration: Calibration) -> Self {
        Self {
            idempotency_key,
            calibration,
        }
    }

    #[must_use]
    pub fn semantic_violations(&self) -> Vec<FieldViolation> {
        self.calibration.semantic_violations("/calibration")
    }
}

const fn default_world_size() -> f64 {
    WORLD_SIZE
}

/// Preview image dimensions paired with the world-plane dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMeta {
    #[schemars(range(min = 1, max = u32::MAX))]
    pub img_width: u32,

    #[schemars(range(min = 1, max = u32::MAX))]
    pub img_height: u32,

    #[serde(default = "default_world_size")]
    #[schemars(range(min = 0.0, max = 10.0))]
    pub world_width: f64,

    #[serde(default = "default_world_size")]
    #[schemars(range(min = 0.0, max = 10.0))]
    pub world_height: f64,
}

impl PreviewMeta {
    /// Preview of `img_width × img_height` pixels on the default world plane.
    #[must_use]
    pub const fn new(img_width: u32, img_height: u32) -> Self {
        Self {
            img_width,
            img_height,
            world_width: WORLD_SIZE,
            world_height: WORLD_SIZE,
        }
    }
}

/// Result of one completed detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub run_id: Uuid,
    #[schemars(range(max = u32::MAX))]
    pub tables_detected: u32,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub confidence: f64,
    #[schemars(range(max = u64::MAX))]
    pub analysis_ms: u64,
    pub entities: Vec<DetectedEntity>,
    pub preview: PreviewMeta,
}

impl AnalyzeResponse {
    /// Number of table entities actually present in `entities`.
    ///
    /// May differ from `tables_detected`, which is the detector's own count.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Table)
            .count()
    }
}
