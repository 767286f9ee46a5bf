use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, TableShape};

/// A raw detector hit in image-fraction space (origin top-left, Y down).
///
/// Extents are fractions of the image: `width` of its width, `height` of its
/// height, `radius` of its shorter side. Values outside `[0, 1]` are accepted
/// and clamped during normalization rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetection {
    #[serde(rename = "type")]
    pub kind: EntityKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<TableShape>,

    pub center: [f64; 2],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    /// Degrees, clockwise as seen in the image.
    #[serde(default)]
    pub rotation: f64,

    #[serde(default)]
    #[schemars(range(max = u32::MAX))]
    pub seats: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl ImageDetection {
    #[must_use]
    pub const fn new(kind: EntityKind, cx: f64, cy: f64) -> Self {
        Self {
            kind,
            shape: None,
            center: [cx, cy],
            width: None,
            height: None,
            radius: None,
            rotation: 0.0,
            seats: 0,
            label: None,
            confidence: None,
            meta: BTreeMap::new(),
        }
    }
}
