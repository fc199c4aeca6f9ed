//! Galaxy parameters, their declared ranges and the JSON config layer.
//!
//! The generator trusts whatever it is given. Keeping values in range is the
//! job of the code that edits them: the UI clamps through
//! [`GalaxyParams::clamp_to_ranges`] and [`GalaxyParams::load`] rejects
//! files that fail [`GalaxyParams::validate`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ConfigError, ParamError};

/// Declared domain of one tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn check(&self, field: &'static str, value: f64) -> Result<(), ParamError> {
        // NaN fails `contains` too
        if self.contains(value) {
            Ok(())
        } else {
            Err(ParamError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Edit ranges for every numeric parameter, as exposed by the UI.
pub mod ranges {
    use super::ParamRange;

    pub const COUNT: ParamRange = ParamRange::new(100.0, 1_000_000.0, 100.0);
    pub const SIZE: ParamRange = ParamRange::new(0.001, 0.1, 0.001);
    pub const RADIUS: ParamRange = ParamRange::new(0.01, 20.0, 0.01);
    pub const BRANCHES: ParamRange = ParamRange::new(1.0, 30.0, 1.0);
    pub const SPIN: ParamRange = ParamRange::new(-6.0, 6.0, 0.001);
    pub const RANDOMNESS: ParamRange = ParamRange::new(0.0, 2.0, 0.001);
    pub const RANDOMNESS_POWER: ParamRange = ParamRange::new(1.0, 10.0, 0.01);
    pub const ROTATION: ParamRange = ParamRange::new(0.0, 3.0, 0.001);
}

/// Everything that shapes a generated galaxy.
///
/// One instance lives in the [`GalaxyController`](crate::GalaxyController);
/// the generator only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyParams {
    /// Number of particles.
    pub count: u32,
    /// On-screen point sprite size.
    pub size: f32,
    /// Maximum galaxy radius.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Radians of twist per unit radius.
    pub spin: f32,
    /// Magnitude of per-axis positional jitter, relative to radius.
    pub randomness: f32,
    /// Exponent pulling jitter toward zero.
    pub randomness_power: f32,
    /// Color at the core.
    pub inside_color: Color,
    /// Color at the rim.
    pub outside_color: Color,
    /// Angular velocity around Y while animating (rad/s).
    pub rotation: f32,
    /// Per-frame sinusoidal Y displacement.
    pub waviness: bool,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 1000,
            size: 0.02,
            radius: 5.0,
            branches: 3,
            spin: 0.0,
            randomness: 0.2,
            randomness_power: 2.0,
            inside_color: Color::WHITE,
            outside_color: Color::WHITE,
            rotation: 0.0,
            waviness: false,
        }
    }
}

impl GalaxyParams {
    /// Check every numeric field against [`ranges`].
    pub fn validate(&self) -> Result<(), ParamError> {
        ranges::COUNT.check("count", self.count as f64)?;
        ranges::SIZE.check("size", self.size as f64)?;
        ranges::RADIUS.check("radius", self.radius as f64)?;
        ranges::BRANCHES.check("branches", self.branches as f64)?;
        ranges::SPIN.check("spin", self.spin as f64)?;
        ranges::RANDOMNESS.check("randomness", self.randomness as f64)?;
        ranges::RANDOMNESS_POWER.check("randomness_power", self.randomness_power as f64)?;
        ranges::ROTATION.check("rotation", self.rotation as f64)?;

        for (field, c) in [("inside_color", self.inside_color), ("outside_color", self.outside_color)] {
            for v in c.to_array() {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ParamError::OutOfRange {
                        field,
                        value: v as f64,
                        min: 0.0,
                        max: 1.0,
                    });
                }
            }
        }

        Ok(())
    }

    /// Snap every numeric field into its declared range.
    pub fn clamp_to_ranges(&mut self) {
        self.count = ranges::COUNT.clamp(self.count as f64) as u32;
        self.size = ranges::SIZE.clamp(self.size as f64) as f32;
        self.radius = ranges::RADIUS.clamp(self.radius as f64) as f32;
        self.branches = ranges::BRANCHES.clamp(self.branches as f64) as u32;
        self.spin = ranges::SPIN.clamp(self.spin as f64) as f32;
        self.randomness = ranges::RANDOMNESS.clamp(self.randomness as f64) as f32;
        self.randomness_power = ranges::RANDOMNESS_POWER.clamp(self.randomness_power as f64) as f32;
        self.rotation = ranges::ROTATION.clamp(self.rotation as f64) as f32;
    }

    /// Save the parameters to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate parameters from a JSON file.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: GalaxyParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = GalaxyParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.count, 1000);
        assert_eq!(params.branches, 3);
        assert!(!params.waviness);
    }

    #[test]
    fn test_validate_rejects_zero_branches() {
        let params = GalaxyParams {
            branches: 0,
            ..Default::default()
        };
        match params.validate() {
            Err(ParamError::OutOfRange { field, .. }) => assert_eq!(field, "branches"),
            other => panic!("expected out of range, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_nan() {
        let params = GalaxyParams {
            radius: f32::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_clamp_to_ranges() {
        let mut params = GalaxyParams {
            count: 5,
            radius: 100.0,
            randomness_power: 0.5,
            spin: -10.0,
            ..Default::default()
        };
        params.clamp_to_ranges();
        assert_eq!(params.count, 100);
        assert_eq!(params.radius, 20.0);
        assert_eq!(params.randomness_power, 1.0);
        assert_eq!(params.spin, -6.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params = GalaxyParams::from_json(r##"{ "count": 5000, "inside_color": "#ff6030" }"##).unwrap();
        assert_eq!(params.count, 5000);
        assert_eq!(params.radius, 5.0);
        assert_eq!(params.inside_color.to_hex(), "#ff6030");
    }

    #[test]
    fn test_json_out_of_range_is_invalid() {
        let err = GalaxyParams::from_json(r#"{ "count": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("galaxy-params-{}.json", std::process::id()));
        let params = GalaxyParams {
            count: 2500,
            spin: 1.5,
            waviness: true,
            outside_color: Color::from_hex("#1b3984").unwrap(),
            ..Default::default()
        };
        params.save(&path).unwrap();
        let loaded = GalaxyParams::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.count, 2500);
        assert_eq!(loaded.spin, 1.5);
        assert!(loaded.waviness);
        assert_eq!(loaded.outside_color.to_hex(), "#1b3984");
    }
}
