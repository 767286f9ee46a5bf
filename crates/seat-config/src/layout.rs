//! Floor-plan layout configuration.

use seat_layout::{DEFAULT_MIN_SEATS, DEFAULT_SEAT_SPACING, SeatRules, WorldPlane};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_world_extent() -> f64 {
    10.0
}

const fn default_seat_spacing() -> f64 {
    DEFAULT_SEAT_SPACING
}

const fn default_min_seats() -> u32 {
    DEFAULT_MIN_SEATS
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Default world-plane width for sessions whose run carries no preview.
    #[serde(default = "default_world_extent")]
    pub world_width: f64,

    /// Default world-plane height for sessions whose run carries no preview.
    #[serde(default = "default_world_extent")]
    pub world_height: f64,

    /// World units of table edge per inferred seat.
    #[serde(default = "default_seat_spacing")]
    pub seat_spacing: f64,

    /// Floor for inferred seat counts.
    #[serde(default = "default_min_seats")]
    pub min_seats: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            world_width: default_world_extent(),
            world_height: default_world_extent(),
            seat_spacing: default_seat_spacing(),
            min_seats: default_min_seats(),
        }
    }
}

impl LayoutConfig {
    /// Reject values the layout engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, extent) in [
            ("layout.world_width", self.world_width),
            ("layout.world_height", self.world_height),
        ] {
            if !(extent > 0.0 && extent <= 10.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be in (0, 10], got {extent}"),
                ));
            }
        }
        if !(self.seat_spacing.is_finite() && self.seat_spacing > 0.0) {
            return Err(ConfigError::invalid(
                "layout.seat_spacing",
                format!("must be a positive number, got {}", self.seat_spacing),
            ));
        }
        if self.min_seats == 0 {
            return Err(ConfigError::invalid("layout.min_seats", "must be at least 1"));
        }
        Ok(())
    }

    #[must_use]
    pub fn plane(&self) -> WorldPlane {
        WorldPlane::new(self.world_width, self.world_height)
    }

    #[must_use]
    pub const fn seat_rules(&self) -> SeatRules {
        SeatRules {
            spacing: self.seat_spacing,
            min_seats: self.min_seats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_layout_engine() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.plane(), WorldPlane::DEFAULT);
        assert_eq!(config.seat_rules(), SeatRules::default());
    }

    #[test]
    fn zero_spacing_is_rejected() {
        let config = LayoutConfig {
            seat_spacing: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layout.seat_spacing"));
    }

    #[test]
    fn zero_min_seats_is_rejected() {
        let config = LayoutConfig {
            min_seats: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "layout.min_seats"
        ));
    }

    #[test]
    fn oversized_plane_is_rejected() {
        let config = LayoutConfig {
            world_height: 12.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layout.world_height"));
    }

    #[test]
    fn nan_width_is_rejected() {
        let config = LayoutConfig {
            world_width: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
