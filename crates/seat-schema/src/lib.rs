//! # seat-schema
//!
//! JSON Schema generation, validation, and registry for Seatplan.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of the JSON Schemas for every contract type
//! - Validation that reports every violated field, not just the first
//! - Typed parsing of entities and analyze requests/responses (validate, then deserialize)
//! - Schema export for external tooling (`seat schema` command)
//!
//! ## Architecture
//!
//! Contract types are defined in `seat-core` with `#[derive(JsonSchema)]` and
//! `#[schemars(range(..))]` bounds. This crate turns those into compiled
//! validators and adds the cross-field rules a schema cannot express (a
//! `MANUAL` calibration needs exactly four anchors).

mod decode;
mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{
    ANALYZE_REQUEST, ANALYZE_RESPONSE, CALIBRATION, DETECTED_ENTITY, FLOOR_PLAN_SNAPSHOT,
    IMAGE_DETECTION, PREVIEW_META, SchemaRegistry,
};
