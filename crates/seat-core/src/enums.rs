//! Entity kinds, table shapes, and calibration modes.
//!
//! All enums use `SCREAMING_SNAKE_CASE` serialization, matching the wire
//! contract of the image-analysis service (`"TABLE"`, `"ROUND"`, `"MANUAL"`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// What a placed floor-plan object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Table,
    Chair,
    Wall,
    Door,
    Bar,
    Obstacle,
    Zone,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Table,
        Self::Chair,
        Self::Wall,
        Self::Door,
        Self::Bar,
        Self::Obstacle,
        Self::Zone,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Chair => "CHAIR",
            Self::Wall => "WALL",
            Self::Door => "DOOR",
            Self::Bar => "BAR",
            Self::Obstacle => "OBSTACLE",
            Self::Zone => "ZONE",
        }
    }

    /// Whether entities of this kind carry a seat count.
    #[must_use]
    pub const fn is_seated(self) -> bool {
        matches!(self, Self::Table)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TableShape
// ---------------------------------------------------------------------------

/// Outline of a table. Only meaningful for [`EntityKind::Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableShape {
    Round,
    Rect,
    Polygon,
}

impl TableShape {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Round => "ROUND",
            Self::Rect => "RECT",
            Self::Polygon => "POLYGON",
        }
    }
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CalibrationMode
// ---------------------------------------------------------------------------

/// How image space is aligned to world space.
///
/// `Auto` lets the detector infer the alignment; `Manual` requires four
/// user-supplied anchor points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalibrationMode {
    Auto,
    Manual,
}

impl CalibrationMode {
    /// Number of anchors a calibration in this mode must carry, if any.
    #[must_use]
    pub const fn required_anchors(self) -> Option<usize> {
        match self {
            Self::Auto => None,
            Self::Manual => Some(4),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Manual => "MANUAL",
        }
    }
}

impl fmt::Display for CalibrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
