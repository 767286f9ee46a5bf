//! Identifier helpers.
//!
//! Entities, runs, and analyze requests are all keyed by random (v4) UUIDs.
//! Only syntax is checked here; existence and uniqueness belong to the
//! persistence layer.

use uuid::Uuid;

/// Fresh identifier for an entity entering a floor-plan session.
#[must_use]
pub fn new_entity_id() -> Uuid {
    Uuid::new_v4()
}

/// Fresh idempotency key for an analyze request or reservation confirmation.
#[must_use]
pub fn new_idempotency_key() -> Uuid {
    Uuid::new_v4()
}

/// Fresh identifier for a manually seeded run.
#[must_use]
pub fn new_run_id() -> Uuid {
    Uuid::new_v4()
}

/// Parse a textual identifier, accepting any UUID syntax `uuid` understands.
///
/// # Errors
///
/// Returns the underlying parse error when `s` is not a UUID.
pub fn parse_id(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s.trim())
}
