//! Floor-plan entities and the image-analysis contract.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`; field names
//! are camelCase on the wire. Range constraints are declared with
//! `#[schemars(range(..))]` so the generated schemas carry them.

mod analyze;
mod detection;
mod entity;
mod snapshot;

pub use analyze::{AnalyzeRequest, AnalyzeResponse, Calibration, ImagePoint, PreviewMeta};
pub use detection::ImageDetection;
pub use entity::DetectedEntity;
pub use snapshot::FloorPlanSnapshot;
