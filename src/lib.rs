//! # Galaxy
//!
//! Procedural spiral galaxies rendered as glowing point clouds.
//!
//! A galaxy is a [`ParticleField`]: one position and one color per particle,
//! generated from [`GalaxyParams`] by [`generate`]. Particles sit on a few
//! spiral arms, twisted by `spin`, scattered by a power-law jitter and shaded
//! from `inside_color` at the core to `outside_color` at the rim.
//!
//! The [`FieldLifecycle`] keeps exactly one galaxy on screen. Every rebuild
//! releases the previous galaxy's drawable (detach, then dispose) before the
//! new one is created and attached, so repeated edits never pile up GPU
//! resources.
//!
//! ## Quick Start
//!
//! ```
//! use galaxy::prelude::*;
//!
//! let params = GalaxyParams {
//!     count: 10_000,
//!     branches: 5,
//!     spin: 1.0,
//!     ..Default::default()
//! };
//!
//! let mut scene = HeadlessScene::new();
//! let mut controller = GalaxyController::seeded(params, 42);
//! controller.start(&mut scene).unwrap();
//!
//! // Edit, then commit once the edit is finished
//! controller.params_mut().branches = 7;
//! controller.commit(&mut scene).unwrap();
//!
//! assert_eq!(scene.live(), 1);
//! assert_eq!(scene.attached().len(), 1);
//! ```
//!
//! ## Interactive viewer
//!
//! [`run`] opens a window and drives a [`GalaxyController`] every frame.
//! Drag to orbit, scroll to zoom. Keys: `R` regenerate, `W` toggle waviness,
//! `S` save parameters, `1`-`5` presets, `Space` pause, `Escape` quit. With
//! the `egui` feature a parameter panel is shown as well.

pub mod color;
pub mod controller;
pub mod error;
pub mod field;
pub mod generator;
mod gpu;
pub mod lifecycle;
pub mod params;
pub mod presets;
pub mod scene;
mod shader;
pub mod time;
#[cfg(feature = "egui")]
mod ui;
pub mod visuals;
mod window;

pub use color::Color;
pub use controller::{EditCommit, GalaxyController};
pub use error::{AppError, ConfigError, GpuError, ParamError, SceneError};
pub use field::ParticleField;
pub use generator::{generate, generate_with};
pub use glam::Vec3;
pub use lifecycle::{DisplayedField, FieldLifecycle};
pub use params::{ranges, GalaxyParams, ParamRange};
pub use scene::{DrawableId, HeadlessScene, Scene};
pub use visuals::PointsMaterial;
pub use window::run;

/// Common imports.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::controller::GalaxyController;
    pub use crate::field::ParticleField;
    pub use crate::generator::{generate, generate_with};
    pub use crate::lifecycle::FieldLifecycle;
    pub use crate::params::GalaxyParams;
    pub use crate::scene::{HeadlessScene, Scene};
    pub use crate::visuals::PointsMaterial;
    pub use glam::Vec3;
}
