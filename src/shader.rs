use bytemuck::{Pod, Zeroable};

pub const POINTS_SHADER: &str = include_str!("shaders/points.wgsl");

/// Mirrors `Camera` in `points.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub point_scale: f32,
    pub _pad: [f32; 3],
}

/// Mirrors `Points` in `points.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct PointsUniforms {
    pub model: [[f32; 4]; 4],
    pub size: f32,
    pub _pad: [f32; 3],
}
