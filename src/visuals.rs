//! Render configuration for galaxy point sprites.
//!
//! Galaxies always draw the same way: glowing additive sprites that do not
//! occlude each other, colored per particle, shrinking with distance. Only
//! the sprite size follows the parameters, so it is the only material field;
//! the rest is baked into the pipeline and shader.

use glam::Vec3;

use crate::params::GalaxyParams;

/// Additive blending.
///
/// Particle colors are added together, so dense arms and the core glow
/// brighter than sparse regions.
pub const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Sprites never write depth, so overlapping particles all contribute.
pub const DEPTH_WRITE: bool = false;

/// Material of a point-cloud drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    /// Sprite size in world units at the camera's focal distance.
    pub size: f32,
}

impl PointsMaterial {
    /// The galaxy material at the requested sprite size.
    pub fn galaxy(size: f32) -> Self {
        Self { size }
    }
}

impl From<&GalaxyParams> for PointsMaterial {
    fn from(params: &GalaxyParams) -> Self {
        PointsMaterial::galaxy(params.size)
    }
}

impl Default for PointsMaterial {
    fn default() -> Self {
        PointsMaterial::galaxy(GalaxyParams::default().size)
    }
}

/// Background clear color (RGB, 0.0-1.0).
pub const BACKGROUND_COLOR: Vec3 = Vec3::new(0.0, 0.0, 0.0);
