//! Visualization builder and windowed runner.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::error::SimulationError;
use crate::field::FieldEvaluator;
use crate::gpu::{Camera, GpuState, LineStyle};
use crate::grid::Grid;
use crate::noise::RandomNoise;
use crate::preset::Preset;
use crate::scene::Scene;

/// A windowed vector-field visualization.
///
/// Start from a preset or a config, optionally override parts of it, then
/// call [`run`](Self::run):
///
/// ```ignore
/// Visualization::new(Preset::EinsteinRosen)
///     .with_grid(150, 10.0)
///     .with_speed(0.5)
///     .run()?;
/// ```
pub struct Visualization {
    config: SceneConfig,
    field: Option<Box<dyn FieldEvaluator>>,
    title: Option<String>,
}

impl Visualization {
    pub fn new(preset: Preset) -> Self {
        Self::from_config(SceneConfig::from_preset(preset))
    }

    pub fn from_config(config: SceneConfig) -> Self {
        Self {
            config,
            field: None,
            title: None,
        }
    }

    /// Override grid resolution and half-extent.
    pub fn with_grid(mut self, size: u32, range: f32) -> Self {
        self.config.grid_size = Some(size);
        self.config.grid_range = Some(range);
        self
    }

    /// Drive the grid with a custom evaluator instead of the preset's field.
    pub fn with_field<F: FieldEvaluator + 'static>(mut self, field: F) -> Self {
        self.field = Some(Box::new(field));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Time multiplier (1.0 = real time).
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.config.speed = speed;
        self
    }

    pub fn with_camera_distance(mut self, distance: f32) -> Self {
        self.config.camera_distance = Some(distance);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the scene this visualization would run, without opening a window.
    pub fn build_scene(&mut self) -> Result<Scene, SimulationError> {
        let mut scene = Scene::from_config(&self.config)?;
        if let Some(field) = self.field.take() {
            let grid = Grid::new(self.config.grid_size(), self.config.grid_range())?;
            let noise = match self.config.seed {
                Some(seed) => RandomNoise::seeded(seed),
                None => RandomNoise::from_entropy(),
            };
            let mut custom = Scene::new(field, grid).with_noise(noise);
            if let Some(strings) = scene.strings().cloned() {
                custom = custom.with_strings(strings);
            }
            custom.clock_mut().set_time_scale(self.config.speed);
            scene = custom;
        }
        Ok(scene)
    }

    /// Open a window and run until it is closed.
    pub fn run(mut self) -> Result<(), SimulationError> {
        let scene = self.build_scene()?;
        log::info!(
            "Starting {} ({}x{} grid, range {}, {} vectors)",
            self.config.preset,
            self.config.grid_size(),
            self.config.grid_size(),
            self.config.grid_range(),
            scene.vectors().grid().len()
        );

        let title = self
            .title
            .take()
            .unwrap_or_else(|| format!("warpfield - {}", self.config.preset));

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(scene, &self.config, title);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Scene,
    style: LineStyle,
    camera_distance: f32,
    title: String,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<SimulationError>,
}

impl App {
    fn new(scene: Scene, config: &SceneConfig, title: String) -> Self {
        Self {
            window: None,
            gpu_state: None,
            scene,
            style: LineStyle::from(config),
            camera_distance: config.camera_distance(),
            title,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SimulationError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            PhysicalKey::Code(KeyCode::KeyP) => {
                let clock = self.scene.clock_mut();
                clock.toggle_pause();
                log::info!("{}", if clock.is_paused() { "Paused" } else { "Resumed" });
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let fps_sampled = self.scene.frame();

        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state.upload(&mut self.scene);
            match gpu_state.render() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    log::warn!("Surface lost, reconfiguring");
                    gpu_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            if fps_sampled {
                let fps = self.scene.clock().fps();
                log::debug!("{:.1} fps", fps);
                window.set_title(&format!("{} ({:.0} fps)", self.title, fps));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        self.window = Some(window.clone());

        let camera = Camera::new(self.camera_distance);
        match pollster::block_on(GpuState::new(window, &mut self.scene, self.style, camera)) {
            Ok(gpu_state) => self.gpu_state = Some(gpu_state),
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
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
                            gpu_state.camera.orbit(dx as f32, dy as f32);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
