//! Seat-count inference from table geometry.
//!
//! Advisory only: the result fills in missing counts, and the entity is marked
//! `seats_inferred` so an editor can tell it apart from a confirmed value.

use std::f64::consts::TAU;

use seat_core::entities::DetectedEntity;
use seat_core::enums::TableShape;
use serde::{Deserialize, Serialize};

/// World units of table edge per seat.
pub const DEFAULT_SEAT_SPACING: f64 = 0.55;

/// Fewest seats any inferred table gets.
pub const DEFAULT_MIN_SEATS: u32 = 2;

/// Constants driving [`SeatRules::infer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatRules {
    pub spacing: f64,
    pub min_seats: u32,
}

impl Default for SeatRules {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SEAT_SPACING,
            min_seats: DEFAULT_MIN_SEATS,
        }
    }
}

impl SeatRules {
    /// Seat count for `entity`. Never fails.
    ///
    /// - explicit positive `seats` is returned unchanged
    /// - `ROUND` with a radius: one seat per `spacing` of circumference
    /// - `RECT` with both extents: seats along both long edges, ends ignored
    /// - anything else: `min_seats`
    #[must_use]
    pub fn infer(&self, entity: &DetectedEntity) -> u32 {
        if entity.seats > 0 {
            return entity.seats;
        }

        let estimate = match (entity.shape, entity.radius, entity.width, entity.height) {
            (Some(TableShape::Round), Some(radius), _, _) => self.per_length(TAU * radius),
            (Some(TableShape::Rect), _, Some(width), Some(height)) => {
                self.per_length(width.max(height)).saturating_mul(2)
            }
            _ => 0,
        };
        estimate.max(self.min_seats)
    }

    /// Whole seats that fit along `length`. Degenerate spacing fits none.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn per_length(&self, length: f64) -> u32 {
        if self.spacing <= 0.0 || !self.spacing.is_finite() {
            return 0;
        }
        // `as` saturates: NaN → 0, overflow → u32::MAX.
        (length / self.spacing).floor() as u32
    }

    /// Fill `seats` on every seated entity that lacks a count.
    pub fn fill_missing(&self, entities: &mut [DetectedEntity]) {
        for entity in entities.iter_mut().filter(|e| e.kind.is_seated() && e.seats == 0) {
            entity.seats = self.infer(entity);
            entity.seats_inferred = true;
        }
    }
}

/// [`SeatRules::infer`] with the default spacing and floor.
#[must_use]
pub fn infer_seats(entity: &DetectedEntity) -> u32 {
    SeatRules::default().infer(entity)
}

/// [`SeatRules::fill_missing`] with the default rules.
pub fn fill_missing_seats(entities: &mut [DetectedEntity]) {
    SeatRules::default().fill_missing(entities);
}
