//! Coordinate primitives: clamping and image ↔ world mapping.

use seat_core::WORLD_SIZE;
use seat_core::entities::{DetectedEntity, PreviewMeta};

/// Restrict `v` to `[lo, hi]`.
///
/// Total: never panics (unlike [`f64::clamp`]), and a NaN `v` maps to `lo`.
/// When `lo > hi` the result is `hi`.
#[must_use]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// [`clamp`] with the default world bounds `[0, 10]`.
#[must_use]
pub fn clamp_world(v: f64) -> f64 {
    clamp(v, 0.0, WORLD_SIZE)
}

/// Map an image-fraction point onto the default 10 × 10 world plane.
///
/// `[0, 0]` (image top-left) lands on `[0, 10]` (world top-left). Inputs
/// outside `[0, 1]` are clamped, not rejected.
#[must_use]
pub fn img01_to_world10(point: [f64; 2]) -> [f64; 2] {
    WorldPlane::DEFAULT.image_to_world(point)
}

/// Convert a pixel position on the preview image to image fractions.
///
/// The result is not clamped; feed it to [`WorldPlane::image_to_world`].
#[must_use]
pub fn pixel_to_image01(px: f64, py: f64, preview: &PreviewMeta) -> [f64; 2] {
    [
        px / f64::from(preview.img_width.max(1)),
        py / f64::from(preview.img_height.max(1)),
    ]
}

/// The world plane entities are rendered and edited on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPlane {
    pub width: f64,
    pub height: f64,
}

impl Default for WorldPlane {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl WorldPlane {
    pub const DEFAULT: Self = Self {
        width: WORLD_SIZE,
        height: WORLD_SIZE,
    };

    /// A plane of the given extents, each clamped into `[0, 10]`.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: clamp_world(width),
            height: clamp_world(height),
        }
    }

    /// The plane a response's preview declares.
    #[must_use]
    pub fn from_preview(preview: &PreviewMeta) -> Self {
        Self::new(preview.world_width, preview.world_height)
    }

    /// Largest radius an entity may have: half the shorter side.
    #[must_use]
    pub fn max_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Image fractions (Y down) to world units (Y up), clamped to the plane.
    #[must_use]
    pub fn image_to_world(&self, [cx, cy]: [f64; 2]) -> [f64; 2] {
        [
            clamp(cx * self.width, 0.0, self.width),
            clamp((1.0 - cy) * self.height, 0.0, self.height),
        ]
    }

    /// World units back to image fractions, for overlaying on the preview.
    ///
    /// A degenerate (zero-extent) axis maps to 0.
    #[must_use]
    pub fn world_to_image(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        let fx = if self.width > 0.0 { clamp(x / self.width, 0.0, 1.0) } else { 0.0 };
        let fy = if self.height > 0.0 { clamp(1.0 - y / self.height, 0.0, 1.0) } else { 0.0 };
        [fx, fy]
    }

    /// Copy of `entity` with position and extents forced inside the plane.
    ///
    /// A non-finite rotation becomes 0 and confidence is kept in `[0, 1]`.
    /// Absent optional fields stay absent.
    #[must_use]
    pub fn clamp_entity(&self, entity: &DetectedEntity) -> DetectedEntity {
        DetectedEntity {
            x: clamp(entity.x, 0.0, self.width),
            y: clamp(entity.y, 0.0, self.height),
            width: entity.width.map(|w| clamp(w, 0.0, self.width)),
            height: entity.height.map(|h| clamp(h, 0.0, self.height)),
            radius: entity.radius.map(|r| clamp(r, 0.0, self.max_radius())),
            rotation: if entity.rotation.is_finite() {
                entity.rotation
            } else {
                0.0
            },
            confidence: entity.confidence.map(|c| clamp(c, 0.0, 1.0)),
            ..entity.clone()
        }
    }

    /// Whether every bounded field of `entity` already lies inside the plane.
    #[must_use]
    pub fn contains(&self, entity: &DetectedEntity) -> bool {
        let within = |v: f64, hi: f64| (0.0..=hi).contains(&v);
        within(entity.x, self.width)
            && within(entity.y, self.height)
            && entity.width.is_none_or(|w| within(w, self.width))
            && entity.height.is_none_or(|h| within(h, self.height))
            && entity.radius.is_none_or(|r| within(r, self.max_radius()))
            && entity.rotation.is_finite()
            && entity.confidence.is_none_or(|c| within(c, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use seat_core::enums::EntityKind;

    #[rstest]
    #[case(5.0, 5.0)]
    #[case(-3.0, 0.0)]
    #[case(12.5, 10.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 10.0)]
    fn clamp_world_bounds(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(clamp_world(input), expected);
    }

    #[test]
    fn clamp_with_inverted_bounds_does_not_panic() {
        assert_eq!(clamp(3.0, 5.0, 1.0), 1.0);
    }

    #[rstest]
    #[case([0.0, 0.0], [0.0, 10.0])]
    #[case([1.0, 1.0], [10.0, 0.0])]
    #[case([0.5, 0.5], [5.0, 5.0])]
    #[case([-0.5, 1.5], [0.0, 0.0])]
    fn image_to_world10_flips_y(#[case] input: [f64; 2], #[case] expected: [f64; 2]) {
        assert_eq!(img01_to_world10(input), expected);
    }

    #[test]
    fn non_square_plane_scales_each_axis() {
        let plane = WorldPlane::new(8.0, 4.0);
        assert_eq!(plane.image_to_world([0.5, 0.25]), [4.0, 3.0]);
        assert_eq!(plane.max_radius(), 2.0);
    }

    #[test]
    fn plane_extents_are_clamped_to_ten() {
        assert_eq!(WorldPlane::new(14.0, -1.0), WorldPlane { width: 10.0, height: 0.0 });
    }

    #[test]
    fn world_to_image_inverts_image_to_world() {
        let plane = WorldPlane::DEFAULT;
        let world = plane.image_to_world([0.25, 0.75]);
        assert_eq!(plane.world_to_image(world), [0.25, 0.75]);
    }

    #[test]
    fn degenerate_plane_maps_to_origin() {
        let plane = WorldPlane::new(0.0, 0.0);
        assert_eq!(plane.world_to_image([3.0, 3.0]), [0.0, 0.0]);
    }

    #[test]
    fn pixels_become_fractions() {
        let preview = PreviewMeta::new(800, 400);
        assert_eq!(pixel_to_image01(200.0, 100.0, &preview), [0.25, 0.25]);
    }

    #[test]
    fn clamp_entity_leaves_absent_fields_absent() {
        let entity = DetectedEntity::new(EntityKind::Door, 11.0, -2.0);
        let clamped = WorldPlane::DEFAULT.clamp_entity(&entity);
        assert_eq!((clamped.x, clamped.y), (10.0, 0.0));
        assert_eq!(clamped.width, None);
        assert_eq!(clamped.height, None);
        assert_eq!(clamped.radius, None);
        assert!(WorldPlane::DEFAULT.contains(&clamped));
    }

    #[test]
    fn clamp_entity_caps_radius_at_half_plane() {
        let entity = DetectedEntity::round_table(5.0, 5.0, 7.5);
        let clamped = WorldPlane::DEFAULT.clamp_entity(&entity);
        assert_eq!(clamped.radius, Some(5.0));
    }

    #[test]
    fn clamp_entity_zeroes_non_finite_rotation() {
        let mut entity = DetectedEntity::new(EntityKind::Wall, 3.0, 3.0);
        entity.rotation = f64::NAN;
        entity.confidence = Some(f64::NAN);
        assert!(!WorldPlane::DEFAULT.contains(&entity));

        let clamped = WorldPlane::DEFAULT.clamp_entity(&entity);
        assert_eq!(clamped.rotation, 0.0);
        assert_eq!(clamped.confidence, Some(0.0));
        assert!(WorldPlane::DEFAULT.contains(&clamped));

        entity.rotation = f64::INFINITY;
        assert_eq!(WorldPlane::DEFAULT.clamp_entity(&entity).rotation, 0.0);
    }

    #[test]
    fn clamp_entity_keeps_finite_rotation() {
        let mut entity = DetectedEntity::new(EntityKind::Wall, 3.0, 3.0);
        entity.rotation = 45.0;
        assert_eq!(WorldPlane::DEFAULT.clamp_entity(&entity).rotation, 45.0);
    }
}
