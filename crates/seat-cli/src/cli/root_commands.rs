use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use seat_core::entities::ImagePoint;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate a JSON document against a floor-plan contract.
    Validate(ValidateArgs),
    /// Clamp a detector response (or raw image detections) into the world plane.
    Normalize(NormalizeArgs),
    /// List contract schemas, or print one.
    Schema(SchemaArgs),
    /// Send a floor-plan image to the detector and print the resulting plan.
    Analyze(AnalyzeArgs),
    /// Print the effective configuration.
    Config(ConfigArgs),
}

/// Which contract a document is checked against.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ContractKind {
    Entity,
    Request,
    Response,
    Snapshot,
}

impl ContractKind {
    #[must_use]
    pub const fn schema_name(self) -> &'static str {
        match self {
            Self::Entity => seat_schema::DETECTED_ENTITY,
            Self::Request => seat_schema::ANALYZE_REQUEST,
            Self::Response => seat_schema::ANALYZE_RESPONSE,
            Self::Snapshot => seat_schema::FLOOR_PLAN_SNAPSHOT,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Contract to validate against.
    pub kind: ContractKind,
    /// JSON file to check.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct NormalizeArgs {
    /// Analyze response, or a JSON array of image-space detections.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name (omit to list every name).
    pub name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Floor-plan image (png, jpeg, webp).
    pub image: PathBuf,

    /// Manual calibration anchor as `x,y` image fractions; give exactly four.
    #[arg(long = "anchor", value_parser = parse_anchor)]
    pub anchors: Vec<ImagePoint>,
}

#[derive(Clone, Debug, Args)]
pub struct ConfigArgs {
    /// Print as TOML instead of JSON.
    #[arg(long)]
    pub toml: bool,
}

/// Parse `x,y` into an image point.
pub fn parse_anchor(value: &str) -> Result<ImagePoint, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))
    };
    Ok(ImagePoint::new(parse(x)?, parse(y)?))
}
