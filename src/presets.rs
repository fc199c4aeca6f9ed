//! Built-in parameter presets.

use crate::color::Color;
use crate::error::ConfigError;
use crate::params::GalaxyParams;

/// A named starting point for editing.
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn() -> GalaxyParams,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "default",
        description: "Small white three-armed disk",
        build: GalaxyParams::default,
    },
    Preset {
        name: "spiral",
        description: "Warm core fading to blue, strongly twisted arms",
        build: spiral,
    },
    Preset {
        name: "pinwheel",
        description: "Many thin arms with little scatter",
        build: pinwheel,
    },
    Preset {
        name: "cloud",
        description: "Loose, barely structured star cloud",
        build: cloud,
    },
    Preset {
        name: "ocean",
        description: "Rotating, waving field",
        build: ocean,
    },
];

/// Look up a preset by name.
pub fn find(name: &str) -> Result<GalaxyParams, ConfigError> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(|p| (p.build)())
        .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

fn spiral() -> GalaxyParams {
    GalaxyParams {
        count: 100_000,
        size: 0.01,
        radius: 5.0,
        branches: 3,
        spin: 1.0,
        randomness: 0.2,
        randomness_power: 3.0,
        inside_color: Color::rgb(1.0, 0.376, 0.188),
        outside_color: Color::rgb(0.106, 0.224, 0.518),
        ..Default::default()
    }
}

fn pinwheel() -> GalaxyParams {
    GalaxyParams {
        count: 200_000,
        size: 0.005,
        radius: 6.0,
        branches: 12,
        spin: -2.0,
        randomness: 0.05,
        randomness_power: 5.0,
        inside_color: Color::WHITE,
        outside_color: Color::rgb(0.6, 0.2, 0.8),
        rotation: 0.2,
        ..Default::default()
    }
}

fn cloud() -> GalaxyParams {
    GalaxyParams {
        count: 50_000,
        size: 0.02,
        radius: 4.0,
        branches: 1,
        spin: 0.3,
        randomness: 1.5,
        randomness_power: 1.0,
        inside_color: Color::rgb(1.0, 0.9, 0.6),
        outside_color: Color::rgb(0.2, 0.1, 0.05),
        ..Default::default()
    }
}

fn ocean() -> GalaxyParams {
    GalaxyParams {
        count: 60_000,
        size: 0.015,
        radius: 8.0,
        branches: 5,
        spin: 0.5,
        randomness: 0.3,
        randomness_power: 2.5,
        inside_color: Color::rgb(0.7, 1.0, 1.0),
        outside_color: Color::rgb(0.0, 0.2, 0.6),
        rotation: 0.1,
        waviness: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_valid() {
        for preset in PRESETS {
            let params = (preset.build)();
            assert!(params.validate().is_ok(), "preset {} is out of range", preset.name);
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("Spiral").unwrap().branches, 3);
        assert!(matches!(find("nebula"), Err(ConfigError::UnknownPreset(_))));
    }
}
