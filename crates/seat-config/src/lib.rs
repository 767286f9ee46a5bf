//! # seat-config
//!
//! Layered configuration loading for Seatplan using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SEATPLAN_*` prefix, `__` as separator)
//! 2. Project-level `.seatplan/config.toml`
//! 3. User-level `~/.config/seatplan/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SEATPLAN_DETECTOR__BASE_URL` -> `detector.base_url`,
//! `SEATPLAN_LAYOUT__SEAT_SPACING` -> `layout.seat_spacing`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use seat_config::SeatConfig;
//!
//! let config = SeatConfig::load_with_dotenv().expect("config");
//!
//! if config.detector.is_configured() {
//!     println!("Detector: {}", config.detector.base_url);
//! }
//! ```

mod booking;
mod detector;
mod error;
mod layout;

pub use booking::BookingConfig;
pub use detector::DetectorConfig;
pub use error::ConfigError;
pub use layout::LayoutConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "SEATPLAN_";
const LOCAL_CONFIG: &str = ".seatplan/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeatConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

impl SeatConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate the layout section.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed, or
    /// `ConfigError::InvalidValue` when the layout section is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load with an explicit TOML file layered between the discovered files
    /// and the environment (the CLI's `--config` flag).
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let figment = Self::file_layers()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(figment)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::file_layers().merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.layout.validate()?;
        Ok(config)
    }

    /// The detector section, or `NotConfigured` when it has no base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `detector` section.
    pub fn require_detector(&self) -> Result<&DetectorConfig, ConfigError> {
        if self.detector.is_configured() {
            Ok(&self.detector)
        } else {
            Err(ConfigError::NotConfigured {
                section: "detector".to_string(),
            })
        }
    }

    /// The booking section, or `NotConfigured` when it has no base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `booking` section.
    pub fn require_booking(&self) -> Result<&BookingConfig, ConfigError> {
        if self.booking.is_configured() {
            Ok(&self.booking)
        } else {
            Err(ConfigError::NotConfigured {
                section: "booking".to_string(),
            })
        }
    }

    /// Defaults, then the user-global file, then the project-local file.
    fn file_layers() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("seatplan").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
