//! Normalization engine: detector output → clamped world-space entities.

use seat_core::entities::{AnalyzeResponse, DetectedEntity, ImageDetection};

use crate::geometry::{WorldPlane, clamp};
use crate::seats::SeatRules;

impl WorldPlane {
    /// Clamp every entity into this plane, preserving length and order.
    #[must_use]
    pub fn clamp_entities(&self, entities: &[DetectedEntity]) -> Vec<DetectedEntity> {
        let clamped: Vec<DetectedEntity> =
            entities.iter().map(|e| self.clamp_entity(e)).collect();

        let adjusted = entities
            .iter()
            .zip(&clamped)
            .filter(|(before, after)| before != after)
            .count();
        if adjusted > 0 {
            tracing::debug!(adjusted, total = entities.len(), "clamped entities into world plane");
        }
        clamped
    }

    /// Map one raw detection from image fractions onto this plane.
    ///
    /// Extents scale with their axis (radius with the shorter one) and the
    /// rotation is mirrored to follow the vertical flip. The result is not
    /// yet clamped.
    #[must_use]
    pub fn detection_to_entity(&self, detection: &ImageDetection) -> DetectedEntity {
        let [x, y] = self.image_to_world(detection.center);
        DetectedEntity {
            id: None,
            kind: detection.kind,
            shape: detection.shape,
            x,
            y,
            width: detection.width.map(|w| w * self.width),
            height: detection.height.map(|h| h * self.height),
            radius: detection.radius.map(|r| r * self.width.min(self.height)),
            rotation: mirror_rotation(detection.rotation),
            seats: detection.seats,
            label: detection.label.clone(),
            confidence: detection.confidence.map(|c| clamp(c, 0.0, 1.0)),
            meta: detection.meta.clone(),
            seats_inferred: false,
        }
    }
}

/// Clockwise-in-image degrees → counter-clockwise-in-world degrees, in `[0, 360)`.
fn mirror_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    (360.0 - degrees.rem_euclid(360.0)) % 360.0
}

/// [`WorldPlane::clamp_entities`] on the default 10 × 10 plane.
#[must_use]
pub fn clamp_entities(entities: &[DetectedEntity]) -> Vec<DetectedEntity> {
    WorldPlane::DEFAULT.clamp_entities(entities)
}

/// Turn raw image-space detections into world entities ready for a session:
/// mapped, clamped, and with missing table seats inferred.
#[must_use]
pub fn normalize_detections(
    detections: &[ImageDetection],
    plane: &WorldPlane,
    rules: &SeatRules,
) -> Vec<DetectedEntity> {
    let outside = detections
        .iter()
        .filter(|d| d.center.iter().any(|c| !(0.0..=1.0).contains(c)))
        .count();
    if outside > 0 {
        tracing::warn!(outside, "detections centred outside the image were clamped");
    }

    let mapped: Vec<DetectedEntity> = detections
        .iter()
        .map(|d| plane.detection_to_entity(d))
        .collect();
    let mut entities = plane.clamp_entities(&mapped);
    rules.fill_missing(&mut entities);
    entities
}

/// Clamp a response's entities to the plane its preview declares and fill
/// missing seat counts. Everything else passes through.
#[must_use]
pub fn normalize_response(mut response: AnalyzeResponse, rules: &SeatRules) -> AnalyzeResponse {
    let plane = WorldPlane::from_preview(&response.preview);
    response.entities = plane.clamp_entities(&response.entities);
    rules.fill_missing(&mut response.entities);
    response
}
