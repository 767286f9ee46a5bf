use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{DetectedEntity, PreviewMeta};

/// Serializable state of a floor-plan editing session.
///
/// Handed to the persistence collaborator when the user saves; entity order
/// is paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewMeta>,
    pub entities: Vec<DetectedEntity>,
    pub captured_at: DateTime<Utc>,
}
