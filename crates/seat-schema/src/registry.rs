//! Central schema registry for all Seatplan contract types.
//!
//! The `SchemaRegistry` builds JSON Schemas from seat-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`
//! with format checking enabled, so `"format": "uuid"` is enforced.

use std::collections::HashMap;

use schemars::schema_for;
use seat_core::entities::{AnalyzeRequest, AnalyzeResponse, Calibration, DetectedEntity};
use seat_core::errors::{FieldViolation, ValidationError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::decode::decode;
use crate::error::SchemaError;

pub const DETECTED_ENTITY: &str = "detected_entity";
pub const IMAGE_DETECTION: &str = "image_detection";
pub const CALIBRATION: &str = "calibration";
pub const ANALYZE_REQUEST: &str = "analyze_request";
pub const PREVIEW_META: &str = "preview_meta";
pub const ANALYZE_RESPONSE: &str = "analyze_response";
pub const FLOOR_PLAN_SNAPSHOT: &str = "floor_plan_snapshot";

/// Central store of all JSON Schemas in the Seatplan system.
///
/// Built from seat-core types via [`schemars::schema_for!`]. Provides lookup
/// by name, validation of arbitrary JSON values against registered schemas,
/// and typed parsing of the analyze contract.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing every contract schema from seat-core.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, DETECTED_ENTITY, seat_core::entities::DetectedEntity);
        register!(schemas, IMAGE_DETECTION, seat_core::entities::ImageDetection);
        register!(schemas, CALIBRATION, seat_core::entities::Calibration);
        register!(schemas, ANALYZE_REQUEST, seat_core::entities::AnalyzeRequest);
        register!(schemas, PREVIEW_META, seat_core::entities::PreviewMeta);
        register!(schemas, ANALYZE_RESPONSE, seat_core::entities::AnalyzeResponse);
        register!(
            schemas,
            FLOOR_PLAN_SNAPSHOT,
            seat_core::entities::FloorPlanSnapshot
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Every violation of `instance` against the named schema, plus the
    /// cross-field rules registered for that schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::Generation` if the schema does not compile.
    pub fn violations(
        &self,
        name: &str,
        instance: &Value,
    ) -> Result<Vec<FieldViolation>, SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let mut violations: Vec<FieldViolation> = validator
            .iter_errors(instance)
            .map(|e| FieldViolation::new(e.instance_path.to_string(), e.to_string()))
            .collect();

        violations.extend(semantic_violations(name, instance));
        Ok(violations)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::Invalid` carrying every violated field.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let violations = self.violations(name, instance)?;
        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(schema = name, count = violations.len(), "validation failed");
            Err(ValidationError::new(violations).into())
        }
    }

    /// Re-check an already-typed value against a named schema.
    ///
    /// Rust types cannot hold an unknown enum variant, but they can hold an
    /// out-of-range or non-finite number; this catches those.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaRegistry::validate`]. Non-finite numbers serialize as
    /// `null` and surface as type violations.
    pub fn validate_value<T: Serialize>(&self, name: &str, value: &T) -> Result<(), SchemaError> {
        let instance = serde_json::to_value(value)
            .map_err(|e| ValidationError::single("", format!("not serializable: {e}")))?;
        self.validate(name, &instance)
    }

    /// Validate, then deserialize.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Invalid` with every violation when validation
    /// fails, or a single violation at the offending field when
    /// deserialization still fails.
    pub fn parse<T: DeserializeOwned>(&self, name: &str, instance: &Value) -> Result<T, SchemaError> {
        self.validate(name, instance)?;
        Ok(decode(instance)?)
    }

    /// Parse a single floor-plan entity.
    ///
    /// # Errors
    ///
    /// See [`SchemaRegistry::parse`].
    pub fn parse_entity(&self, instance: &Value) -> Result<DetectedEntity, SchemaError> {
        self.parse(DETECTED_ENTITY, instance)
    }

    /// Parse an analyze request.
    ///
    /// # Errors
    ///
    /// See [`SchemaRegistry::parse`].
    pub fn parse_request(&self, instance: &Value) -> Result<AnalyzeRequest, SchemaError> {
        self.parse(ANALYZE_REQUEST, instance)
    }

    /// Parse an analyze response from the image-analysis service.
    ///
    /// # Errors
    ///
    /// See [`SchemaRegistry::parse`].
    pub fn parse_response(&self, instance: &Value) -> Result<AnalyzeResponse, SchemaError> {
        self.parse(ANALYZE_RESPONSE, instance)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Cross-field rules, evaluated on whichever sub-document still deserializes
/// so they are reported alongside unrelated schema violations.
fn semantic_violations(name: &str, instance: &Value) -> Vec<FieldViolation> {
    let (calibration, prefix) = match name {
        CALIBRATION => (Some(instance), ""),
        ANALYZE_REQUEST => (instance.get("calibration"), "/calibration"),
        _ => (None, ""),
    };

    calibration
        .and_then(|value| serde_json::from_value::<Calibration>(value.clone()).ok())
        .map(|calibration| calibration.semantic_violations(prefix))
        .unwrap_or_default()
}
