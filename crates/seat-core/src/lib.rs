//! # seat-core
//!
//! Core types, identifiers, and error types for Seatplan.
//!
//! This crate provides the foundational types shared across all Seatplan crates:
//! - Floor-plan entities in world space and raw detections in image space
//! - The analyze request/response contract with the image-analysis service
//! - Kind, shape, and calibration enums
//! - Identifier helpers (entity ids, idempotency keys)
//! - Cross-cutting error types, including the field-level `ValidationError`

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;

/// Side length of the default world plane, in world units.
pub const WORLD_SIZE: f64 = 10.0;
