//! Entity patch builder.
//!
//! `Option<Option<T>>` fields distinguish "leave alone" (`None`) from
//! "clear" (`Some(None)`).

use std::collections::BTreeMap;

use seat_core::entities::DetectedEntity;
use seat_core::enums::{EntityKind, TableShape};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntityKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Option<TableShape>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, serde_json::Value>>,
}

impl EntityPatch {
    /// Whether the patch touches anything that drives seat inference.
    #[must_use]
    pub const fn changes_geometry(&self) -> bool {
        self.kind.is_some()
            || self.shape.is_some()
            || self.width.is_some()
            || self.height.is_some()
            || self.radius.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.changes_geometry()
            && self.x.is_none()
            && self.y.is_none()
            && self.rotation.is_none()
            && self.seats.is_none()
            && self.label.is_none()
            && self.confidence.is_none()
            && self.meta.is_none()
    }

    /// Shallow-merge this patch into `entity`. Seat provenance and clamping
    /// are the session's job.
    pub fn apply_to(&self, entity: &mut DetectedEntity) {
        if let Some(kind) = self.kind {
            entity.kind = kind;
        }
        if let Some(shape) = self.shape {
            entity.shape = shape;
        }
        if let Some(x) = self.x {
            entity.x = x;
        }
        if let Some(y) = self.y {
            entity.y = y;
        }
        if let Some(width) = self.width {
            entity.width = width;
        }
        if let Some(height) = self.height {
            entity.height = height;
        }
        if let Some(radius) = self.radius {
            entity.radius = radius;
        }
        if let Some(rotation) = self.rotation {
            entity.rotation = rotation;
        }
        if let Some(seats) = self.seats {
            entity.seats = seats;
        }
        if let Some(ref label) = self.label {
            entity.label.clone_from(label);
        }
        if let Some(confidence) = self.confidence {
            entity.confidence = confidence;
        }
        if let Some(ref meta) = self.meta {
            entity.meta.clone_from(meta);
        }
    }
}

pub struct EntityPatchBuilder(EntityPatch);

impl Default for EntityPatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityPatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EntityPatch::default())
    }

    #[must_use]
    pub fn kind(mut self, kind: EntityKind) -> Self {
        self.0.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn shape(mut self, shape: Option<TableShape>) -> Self {
        self.0.shape = Some(shape);
        self
    }

    /// Move to `(x, y)` in world units.
    #[must_use]
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.0.x = Some(x);
        self.0.y = Some(y);
        self
    }

    #[must_use]
    pub fn width(mut self, width: Option<f64>) -> Self {
        self.0.width = Some(width);
        self
    }

    #[must_use]
    pub fn height(mut self, height: Option<f64>) -> Self {
        self.0.height = Some(height);
        self
    }

    #[must_use]
    pub fn radius(mut self, radius: Option<f64>) -> Self {
        self.0.radius = Some(radius);
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation: f64) -> Self {
        self.0.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn seats(mut self, seats: u32) -> Self {
        self.0.seats = Some(seats);
        self
    }

    #[must_use]
    pub fn label(mut self, label: Option<String>) -> Self {
        self.0.label = Some(label);
        self
    }

    #[must_use]
    pub fn confidence(mut self, confidence: Option<f64>) -> Self {
        self.0.confidence = Some(confidence);
        self
    }

    #[must_use]
    pub fn meta(mut self, meta: BTreeMap<String, serde_json::Value>) -> Self {
        self.0.meta = Some(meta);
        self
    }

    #[must_use]
    pub fn build(self) -> EntityPatch {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_patch_changes_nothing() {
        let mut entity = DetectedEntity::round_table(1.0, 2.0, 0.8);
        let before = entity.clone();
        let patch = EntityPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut entity);
        assert_eq!(entity, before);
    }

    #[test]
    fn double_option_clears_field() {
        let mut entity = DetectedEntity::round_table(1.0, 2.0, 0.8);
        EntityPatchBuilder::new()
            .radius(None)
            .label(Some("T1".into()))
            .build()
            .apply_to(&mut entity);
        assert_eq!(entity.radius, None);
        assert_eq!(entity.label.as_deref(), Some("T1"));
    }

    #[test]
    fn position_only_patch_is_not_geometric() {
        let patch = EntityPatchBuilder::new().position(3.0, 4.0).build();
        assert!(!patch.changes_geometry());
        assert!(EntityPatchBuilder::new().width(Some(2.0)).build().changes_geometry());
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = EntityPatchBuilder::new().position(3.0, 4.0).seats(6).build();
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"x": 3.0, "y": 4.0, "seats": 6}));
    }
}
