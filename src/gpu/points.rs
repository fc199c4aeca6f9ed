//! GPU resources of one galaxy drawable.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::field::ParticleField;
use crate::shader::PointsUniforms;
use crate::visuals::PointsMaterial;

/// Geometry (position + color buffers) and size/rotation uniforms of a point cloud.
pub struct GpuPoints {
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    size: f32,
    count: u32,
    rotation_y: f32,
}

impl GpuPoints {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        field: &ParticleField,
        material: &PointsMaterial,
    ) -> Self {
        // Zero-sized vertex buffers can't be bound
        let placeholder = [0u8; 12];
        let position_bytes = if field.is_empty() { &placeholder[..] } else { field.position_bytes() };
        let color_bytes = if field.is_empty() { &placeholder[..] } else { field.color_bytes() };

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Position Buffer"),
            contents: position_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Color Buffer"),
            contents: color_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniforms = points_uniforms(material.size, 0.0);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Material Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Galaxy Material Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            position_buffer,
            color_buffer,
            uniform_buffer,
            bind_group,
            size: material.size,
            count: field.len() as u32,
            rotation_y: 0.0,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Overwrite positions in place. Extra positions beyond the original count are ignored.
    pub fn write_positions(&self, queue: &wgpu::Queue, positions: &[Vec3]) {
        let n = positions.len().min(self.count as usize);
        if n > 0 {
            queue.write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(&positions[..n]));
        }
    }

    pub fn set_rotation_y(&mut self, queue: &wgpu::Queue, angle: f32) {
        if angle == self.rotation_y {
            return;
        }
        self.rotation_y = angle;
        let uniforms = points_uniforms(self.size, angle);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.color_buffer.slice(..));
        render_pass.draw(0..6, 0..self.count);
    }

    /// Free the buffers now instead of when the last reference drops.
    pub fn destroy(self) {
        self.position_buffer.destroy();
        self.color_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}

fn points_uniforms(size: f32, rotation_y: f32) -> PointsUniforms {
    PointsUniforms {
        model: Mat4::from_rotation_y(rotation_y).to_cols_array_2d(),
        size,
        _pad: [0.0; 3],
    }
}

/// Vertex layouts: positions in slot 0, colors in slot 1, one element per instance.
pub fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    const POSITION: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }];
    const COLOR: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
        offset: 0,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x3,
    }];

    [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vec3>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POSITION,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vec3>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &COLOR,
        },
    ]
}
