//! End-to-end: a detector hit in image space becomes a seated world entity.

use pretty_assertions::assert_eq;
use seat_core::entities::ImageDetection;
use seat_core::enums::{EntityKind, TableShape};
use seat_layout::{SeatRules, WorldPlane, clamp_entities, infer_seats, normalize_detections};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn round_table_from_detector_is_placed_and_seated() {
    let detection = ImageDetection {
        shape: Some(TableShape::Round),
        radius: Some(0.12),
        ..ImageDetection::new(EntityKind::Table, 0.5, 0.2)
    };

    let entities = normalize_detections(&[detection], &WorldPlane::DEFAULT, &SeatRules::default());
    assert_eq!(entities.len(), 1);

    let table = &entities[0];
    assert!(approx(table.x, 5.0), "x = {}", table.x);
    assert!(approx(table.y, 8.0), "y = {}", table.y);
    assert!(approx(table.radius.unwrap(), 1.2));
    assert_eq!(table.seats, 13);
    assert!(table.seats_inferred);

    // already inside the plane: a second clamp changes nothing
    assert_eq!(clamp_entities(&entities), entities);
}

#[test]
fn inferred_count_matches_direct_inference() {
    let detection = ImageDetection {
        shape: Some(TableShape::Rect),
        width: Some(0.2),
        height: Some(0.1),
        ..ImageDetection::new(EntityKind::Table, 0.25, 0.75)
    };
    let plane = WorldPlane::DEFAULT;
    let entities = normalize_detections(&[detection.clone()], &plane, &SeatRules::default());

    let unseated = plane.detection_to_entity(&detection);
    assert_eq!(entities[0].seats, infer_seats(&unseated));
    assert_eq!(entities[0].seats, 6);
}
