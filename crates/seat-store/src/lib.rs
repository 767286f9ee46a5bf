//! # seat-store
//!
//! Floor-plan editing session state for Seatplan.
//!
//! A [`FloorPlanSession`] is an ordinary value owned by one editing session
//! (one editor tab, one CLI invocation). Nothing here is global, so several
//! sessions can run side by side without cross-talk.
//!
//! Entities are kept in paint order and indexed by stable id, so patches can
//! address an entity by identity even after others are inserted or removed.
//! Every entity is clamped into the world plane on the way in.

mod error;
mod patch;
mod session;

pub use error::StoreError;
pub use patch::{EntityPatch, EntityPatchBuilder};
pub use session::{AnalysisTicket, FloorPlanSession, ImageRef};
