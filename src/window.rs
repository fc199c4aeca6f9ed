//! Interactive viewer: window, event loop and frame driving.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::controller::GalaxyController;
use crate::error::AppError;
use crate::gpu::GpuState;
use crate::params::GalaxyParams;
use crate::presets::PRESETS;
use crate::time::Time;

#[cfg(feature = "egui")]
use crate::gpu::EguiIntegration;

/// Open a window and show the controller's galaxy until it is closed.
///
/// `config_path` is where "save" writes the current parameters.
pub fn run(controller: GalaxyController, config_path: PathBuf) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(controller, config_path);
    event_loop.run_app(&mut app)?;

    match app.exit_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    controller: GalaxyController,
    time: Time,
    config_path: PathBuf,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    // Camera easing keeps running while the clock is paused
    last_frame: Instant,
    frames: u64,
    exit_error: Option<AppError>,
}

impl App {
    fn new(controller: GalaxyController, config_path: PathBuf) -> Self {
        Self {
            window: None,
            gpu_state: None,
            #[cfg(feature = "egui")]
            egui: None,
            controller,
            time: Time::new(),
            config_path,
            mouse_pressed: false,
            last_mouse_pos: None,
            last_frame: Instant::now(),
            frames: 0,
            exit_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title("Galaxy")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let mut gpu_state = pollster::block_on(GpuState::new(window.clone()))?;

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(
                &gpu_state.device,
                gpu_state.config.format,
                &window,
            ));
        }

        self.controller.start(&mut gpu_state)?;
        info!(
            "Showing {} particles in {} arms",
            self.controller.params().count,
            self.controller.params().branches
        );

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        let result = match key {
            KeyCode::Escape => {
                event_loop.exit();
                Ok(())
            }
            KeyCode::Space => {
                self.time.toggle_pause();
                Ok(())
            }
            KeyCode::KeyR => self.controller.commit(gpu_state),
            KeyCode::KeyW => {
                let params = self.controller.params_mut();
                params.waviness = !params.waviness;
                self.controller.commit(gpu_state)
            }
            KeyCode::KeyS => {
                save_params(self.controller.params(), &self.config_path);
                Ok(())
            }
            KeyCode::Digit1 | KeyCode::Digit2 | KeyCode::Digit3 | KeyCode::Digit4 | KeyCode::Digit5 => {
                let index = match key {
                    KeyCode::Digit1 => 0,
                    KeyCode::Digit2 => 1,
                    KeyCode::Digit3 => 2,
                    KeyCode::Digit4 => 3,
                    _ => 4,
                };
                match PRESETS.get(index) {
                    Some(preset) => {
                        info!("Preset: {}", preset.name);
                        self.controller.replace_params((preset.build)(), gpu_state)
                    }
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            error!("Failed to rebuild galaxy: {}", e);
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) else {
            return;
        };

        let elapsed = self.time.update();
        let now = Instant::now();
        gpu_state
            .camera
            .update(now.duration_since(self.last_frame).as_secs_f32());
        self.last_frame = now;

        if let Err(e) = self.controller.update(elapsed, gpu_state) {
            error!("Failed to animate galaxy: {}", e);
        }

        self.frames += 1;
        if self.frames % 30 == 0 {
            window.set_title(&format!(
                "Galaxy - {} particles - {:.0} FPS{}",
                self.controller.params().count,
                self.time.fps(),
                if self.time.is_paused() { " - paused" } else { "" }
            ));
        }

        #[cfg(feature = "egui")]
        let result = match &mut self.egui {
            Some(egui) => {
                egui.begin_pass(window);
                let ctx = egui.ctx.clone();
                let mut panel = crate::ui::PanelResponse::default();
                egui::Window::new("Galaxy")
                    .default_pos([10.0, 10.0])
                    .resizable(false)
                    .show(&ctx, |ui| {
                        panel = crate::ui::render_params_panel(ui, self.controller.params_mut());
                    });
                let pointer_down = ctx.input(|i| i.pointer.any_down());
                let output = egui.end_pass(window);

                let rebuilt = if let Some(name) = panel.preset {
                    crate::presets::find(name)
                        .map_err(|e| error!("{}", e))
                        .ok()
                        .map(|params| self.controller.replace_params(params, gpu_state))
                } else if panel.regenerate {
                    Some(self.controller.commit(gpu_state))
                } else {
                    Some(
                        self.controller
                            .observe_edit(panel.changed, pointer_down, gpu_state)
                            .map(|_| ()),
                    )
                };
                if let Some(Err(e)) = rebuilt {
                    error!("Failed to rebuild galaxy: {}", e);
                }
                if panel.save {
                    save_params(self.controller.params(), &self.config_path);
                }

                let size = [gpu_state.config.width, gpu_state.config.height];
                gpu_state.render_with(|device, queue, encoder, view| {
                    egui.paint(device, queue, encoder, view, size, &output);
                })
            }
            None => gpu_state.render(),
        };

        #[cfg(not(feature = "egui"))]
        let result = gpu_state.render();

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }

        window.request_redraw();
    }
}

fn save_params(params: &GalaxyParams, path: &Path) {
    match params.save(path) {
        Ok(()) => info!("Saved parameters to {}", path.display()),
        Err(e) => error!("Failed to save parameters: {}", e),
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            error!("{}", e);
            self.exit_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        let consumed = match (&mut self.egui, &self.window) {
            (Some(egui), Some(window)) => egui.on_window_event(window, &event),
            _ => false,
        };
        #[cfg(not(feature = "egui"))]
        let consumed = false;

        match event {
            WindowEvent::CloseRequested => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    self.controller.shutdown(gpu_state);
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !consumed => self.handle_key(event_loop, key),
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed && !consumed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;
                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state.camera.rotate(dx as f32, dy as f32);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}
