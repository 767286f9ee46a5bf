use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{EntityKind, TableShape};

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(b: &bool) -> bool {
    !*b
}

/// One placed object on the floor plan, in world coordinates.
///
/// Position and extents live on the world plane (origin bottom-left, Y up).
/// Optional fields that are absent on input stay absent on output; clamping
/// never invents them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectedEntity {
    /// Assigned when the entity enters a session or is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(rename = "type")]
    pub kind: EntityKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<TableShape>,

    #[schemars(range(min = 0.0, max = 10.0))]
    pub x: f64,

    #[schemars(range(min = 0.0, max = 10.0))]
    pub y: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 10.0))]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 10.0))]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 5.0))]
    pub radius: Option<f64>,

    /// Degrees, counter-clockwise in world space.
    #[serde(default)]
    pub rotation: f64,

    /// Zero means "unknown"; see `seats_inferred` for provenance.
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

    /// Set when `seats` was computed from geometry rather than supplied.
    #[serde(default, skip_serializing_if = "is_false")]
    pub seats_inferred: bool,
}

impl DetectedEntity {
    /// A bare entity of `kind` at `(x, y)` with every optional field absent.
    #[must_use]
    pub const fn new(kind: EntityKind, x: f64, y: f64) -> Self {
        Self {
            id: None,
            kind,
            shape: None,
            x,
            y,
            width: None,
            height: None,
            radius: None,
            rotation: 0.0,
            seats: 0,
            label: None,
            confidence: None,
            meta: BTreeMap::new(),
            seats_inferred: false,
        }
    }

    /// A round table centred at `(x, y)`.
    #[must_use]
    pub const fn round_table(x: f64, y: f64, radius: f64) -> Self {
        let mut entity = Self::new(EntityKind::Table, x, y);
        entity.shape = Some(TableShape::Round);
        entity.radius = Some(radius);
        entity
    }

    /// A rectangular table centred at `(x, y)`.
    #[must_use]
    pub const fn rect_table(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut entity = Self::new(EntityKind::Table, x, y);
        entity.shape = Some(TableShape::Rect);
        entity.width = Some(width);
        entity.height = Some(height);
        entity
    }

    /// Whether the entity carries a usable explicit seat count.
    #[must_use]
    pub const fn has_explicit_seats(&self) -> bool {
        self.seats > 0 && !self.seats_inferred
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.kind.as_str().to_lowercase())
    }
}
