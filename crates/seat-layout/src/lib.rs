//! # seat-layout
//!
//! Floor-plan geometry for Seatplan: moving entities between the detector's
//! image space and the editor's world plane, keeping them inside that plane,
//! and inferring seat counts from table geometry.
//!
//! Image space is `[0, 1] × [0, 1]`, origin top-left, Y down. World space is
//! `[0, W] × [0, H]` (10 × 10 by default), origin bottom-left, Y up.
//!
//! Validation (in `seat-schema`) gates entry; clamping here is a separate,
//! unconditional normalization applied before every render or mutation.

pub mod geometry;
pub mod normalize;
pub mod seats;

pub use geometry::{WorldPlane, clamp, clamp_world, img01_to_world10, pixel_to_image01};
pub use normalize::{clamp_entities, normalize_detections, normalize_response};
pub use seats::{
    DEFAULT_MIN_SEATS, DEFAULT_SEAT_SPACING, SeatRules, fill_missing_seats, infer_seats,
};
