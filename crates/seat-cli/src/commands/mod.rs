pub mod analyze;
pub mod config;
pub mod normalize;
pub mod schema;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use seat_config::SeatConfig;
use serde_json::Value;

use crate::cli::GlobalFlags;

/// Read and parse a JSON document from disk.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Load configuration, honoring `--config` when given.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SeatConfig> {
    let config = match &flags.config {
        Some(path) => SeatConfig::load_from(path),
        None => SeatConfig::load_with_dotenv(),
    };
    config.context("failed to load seatplan configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_json_reports_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_json(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json is not valid JSON"));
    }

    #[test]
    fn read_json_missing_file() {
        let err = read_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
