//! wgpu renderer for galaxy drawables.

mod camera;
#[cfg(feature = "egui")]
mod egui_integration;
mod points;

pub use camera::Camera;
#[cfg(feature = "egui")]
pub(crate) use egui_integration::EguiIntegration;

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::{GpuError, SceneError};
use crate::field::ParticleField;
use crate::scene::{DrawableId, Scene};
use crate::shader::{CameraUniforms, POINTS_SHADER};
use crate::visuals::{PointsMaterial, ADDITIVE_BLEND, BACKGROUND_COLOR, DEPTH_WRITE};

use points::GpuPoints;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    points_layout: wgpu::BindGroupLayout,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    drawables: HashMap<DrawableId, GpuPoints>,
    attached: Vec<DrawableId>,
    next_id: u64,
    pub camera: Camera,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Colors are authored as plain hex values, so skip the sRGB encode
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        debug!("Surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        let camera = Camera::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(&camera_uniforms(&camera, &config)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_layout = uniform_layout(&device, "Camera Bind Group Layout");
        let points_layout = uniform_layout(&device, "Galaxy Material Bind Group Layout");

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Points Shader"),
            source: wgpu::ShaderSource::Wgsl(POINTS_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Points Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &points_layout],
            push_constant_ranges: &[],
        });

        let pipeline = create_points_pipeline(&device, &pipeline_layout, &shader, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            points_layout,
            camera_buffer,
            camera_bind_group,
            depth_texture,
            drawables: HashMap::new(),
            attached: Vec::new(),
            next_id: 0,
            camera,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.resize(winit::dpi::PhysicalSize {
            width: self.config.width,
            height: self.config.height,
        });
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.render_with(|_, _, _, _| {})
    }

    /// Draw attached galaxies, then let `overlay` record more work (the UI)
    /// onto the same frame.
    pub fn render_with<F>(&mut self, overlay: F) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&camera_uniforms(&self.camera, &self.config)),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Galaxy Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: BACKGROUND_COLOR.x as f64,
                            g: BACKGROUND_COLOR.y as f64,
                            b: BACKGROUND_COLOR.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for id in &self.attached {
                if let Some(points) = self.drawables.get(id) {
                    points.draw(&mut render_pass);
                }
            }
        }

        overlay(&self.device, &self.queue, &mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Scene for GpuState {
    fn create_points(&mut self, field: &ParticleField, material: &PointsMaterial) -> DrawableId {
        let points = GpuPoints::new(&self.device, &self.points_layout, field, material);
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        debug!("Created drawable {} with {} points", id, points.count());
        self.drawables.insert(id, points);
        id
    }

    fn attach(&mut self, id: DrawableId) -> Result<(), SceneError> {
        if !self.drawables.contains_key(&id) {
            return Err(SceneError::UnknownDrawable(id));
        }
        if self.attached.contains(&id) {
            return Err(SceneError::AlreadyAttached(id));
        }
        self.attached.push(id);
        Ok(())
    }

    fn detach(&mut self, id: DrawableId) -> Result<(), SceneError> {
        let pos = self
            .attached
            .iter()
            .position(|a| *a == id)
            .ok_or(SceneError::NotAttached(id))?;
        self.attached.remove(pos);
        Ok(())
    }

    fn dispose(&mut self, id: DrawableId) -> Result<(), SceneError> {
        let points = self
            .drawables
            .remove(&id)
            .ok_or(SceneError::UnknownDrawable(id))?;
        self.attached.retain(|a| *a != id);
        points.destroy();
        debug!("Disposed drawable {}", id);
        Ok(())
    }

    fn upload_positions(&mut self, id: DrawableId, positions: &[Vec3]) -> Result<(), SceneError> {
        let points = self
            .drawables
            .get_mut(&id)
            .ok_or(SceneError::UnknownDrawable(id))?;
        points.write_positions(&self.queue, positions);
        Ok(())
    }

    fn set_rotation_y(&mut self, id: DrawableId, angle: f32) -> Result<(), SceneError> {
        let points = self
            .drawables
            .get_mut(&id)
            .ok_or(SceneError::UnknownDrawable(id))?;
        points.set_rotation_y(&self.queue, angle);
        Ok(())
    }
}

fn create_points_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Points Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &points::vertex_layouts(),
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(ADDITIVE_BLEND),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: DEPTH_WRITE,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn camera_uniforms(camera: &Camera, config: &wgpu::SurfaceConfiguration) -> CameraUniforms {
    let aspect = config.width as f32 / config.height as f32;
    CameraUniforms {
        view: camera.view_matrix().to_cols_array_2d(),
        proj: camera.projection_matrix(aspect).to_cols_array_2d(),
        point_scale: camera.point_scale(),
        _pad: [0.0; 3],
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
