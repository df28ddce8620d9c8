//! Window creation, event handling, and the per-frame driver.
//!
//! [`OrreryApp`] implements winit's [`ApplicationHandler`]. Startup acquires
//! the GPU, joins the texture loads, and builds the scene; after that every
//! `RedrawRequested` runs one frame. Anything that fails inside a frame is
//! logged and the frame skipped — a single bad frame never ends the session.

use std::sync::Arc;
use std::time::{Duration, Instant};

use orrery_config::Config;
use orrery_render::{
    BodyPipeline, CameraRig, DepthBuffer, FrameEncoder, GpuSceneRenderer, RenderContext,
    SceneStore, SurfaceError, TextureManager, init_render_context_blocking, load_all,
};
use orrery_scene::{Scene, SceneError, SceneParams, build_system};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::frame::{FrameClock, FrameStats};

/// How often the title-bar frame stats refresh.
const TITLE_REFRESH: Duration = Duration::from_secs(1);

/// How many frames between periodic stats log lines.
const STATS_LOG_INTERVAL: u64 = 600;

/// Errors that can end a single frame. Caught at the redraw boundary.
#[derive(Debug, thiserror::Error)]
enum FrameError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Normalize a wheel event to line-ish units (~40 px per line).
fn scroll_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_x, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / 40.0) as f32,
    }
}

/// Application state: window, GPU resources, scene, and camera.
pub struct OrreryApp {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    depth: Option<DepthBuffer>,
    pipeline: Option<BodyPipeline>,
    textures: Option<TextureManager>,
    store: SceneStore,
    scene: Option<Scene>,
    camera: CameraRig,
    clock: FrameClock,
    stats: FrameStats,
    cursor: Option<(f64, f64)>,
    last_title_refresh: Instant,
}

impl OrreryApp {
    /// Create the application from a loaded config.
    pub fn with_config(config: Config) -> Self {
        let camera = CameraRig::new(&config.camera, &config.controls);
        Self {
            config,
            window: None,
            gpu: None,
            depth: None,
            pipeline: None,
            textures: None,
            store: SceneStore::new(),
            scene: None,
            camera,
            clock: FrameClock::new(),
            stats: FrameStats::new(),
            cursor: None,
            last_title_refresh: Instant::now(),
        }
    }

    fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ))
    }

    /// Join the texture loads, upload them, and build the scene forest.
    /// Any failure here is fatal: the scene must never partially exist.
    fn build_scene(&mut self, gpu: &RenderContext) -> bool {
        let timeout = Duration::from_secs(self.config.textures.load_timeout_secs);
        let decoded = match load_all(&self.config.textures.sources, timeout) {
            Ok(decoded) => decoded,
            Err(e) => {
                error!("Texture loading failed: {e}");
                return false;
            }
        };

        let mut textures = TextureManager::new(&gpu.device);
        for tex in &decoded {
            if let Err(e) = textures.create_from_rgba(
                &gpu.device,
                &gpu.queue,
                &tex.name,
                &tex.pixels,
                tex.width,
                tex.height,
            ) {
                error!("Texture upload failed for {:?}: {e}", tex.name);
                return false;
            }
        }
        info!("Loaded {} textures", textures.len());

        let pipeline =
            BodyPipeline::new(&gpu.device, gpu.surface_format, textures.bind_group_layout());
        let params = SceneParams::from_system(&self.config.system);
        let scene = {
            let mut renderer = GpuSceneRenderer {
                device: &gpu.device,
                pipeline: &pipeline,
                store: &mut self.store,
            };
            match build_system(
                &self.config.system.planets,
                &textures.name_table(),
                &params,
                &mut renderer,
            ) {
                Ok(scene) => scene,
                Err(e) => {
                    error!("Scene construction failed: {e}");
                    return false;
                }
            }
        };
        info!("Scene built: {} bodies", scene.node_count());

        self.pipeline = Some(pipeline);
        self.textures = Some(textures);
        self.scene = Some(scene);
        true
    }

    /// Run one frame: advance animation, recompute camera transforms, and
    /// draw the forest in descriptor order.
    fn render_frame(&mut self) -> Result<(), FrameError> {
        let elapsed_ms = self.clock.tick();
        self.stats.record(elapsed_ms);

        let gpu = self.gpu.as_ref().ok_or(SceneError::NotInitialized)?;
        let scene = self.scene.as_mut().ok_or(SceneError::NotInitialized)?;
        let depth = self.depth.as_ref().ok_or(SceneError::NotInitialized)?;
        let pipeline = self.pipeline.as_ref().ok_or(SceneError::NotInitialized)?;
        let textures = self.textures.as_ref().ok_or(SceneError::NotInitialized)?;

        scene.update(elapsed_ms);

        let projection = self.camera.projection_matrix();
        let view = self.camera.view_matrix();

        self.store.clear_draws();
        {
            let mut renderer = GpuSceneRenderer {
                device: &gpu.device,
                pipeline,
                store: &mut self.store,
            };
            scene.draw(&mut renderer, projection, view);
        }
        self.store.flush(&gpu.queue);

        let surface_texture = gpu.get_current_texture()?;
        let mut frame = FrameEncoder::new(&gpu.device, surface_texture);
        {
            let mut pass = frame.begin_scene_pass(depth);
            self.store.replay(&mut pass, pipeline, textures);
        }
        frame.finish(&gpu.queue);

        self.refresh_overlay();
        Ok(())
    }

    /// Display-only frame stats: title bar once a second, log line
    /// every [`STATS_LOG_INTERVAL`] frames.
    fn refresh_overlay(&mut self) {
        if self.stats.frames().is_multiple_of(STATS_LOG_INTERVAL) {
            info!(
                "Frame stats: avg {:.2} ms, {:.1} fps",
                self.stats.average_ms(),
                self.stats.fps()
            );
        }

        if !self.config.debug.show_fps {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_title_refresh) < TITLE_REFRESH {
            return;
        }
        self.last_title_refresh = now;
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "{} — avg {:.2} ms / {:.1} fps",
                self.config.window.title,
                self.stats.average_ms(),
                self.stats.fps()
            ));
        }
    }
}

impl ApplicationHandler for OrreryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match init_render_context_blocking(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera
            .set_aspect_ratio(size.width as f32, size.height as f32);
        self.depth = Some(DepthBuffer::new(
            &gpu.device,
            size.width.max(1),
            size.height.max(1),
        ));

        if !self.build_scene(&gpu) {
            event_loop.exit();
            return;
        }

        self.gpu = Some(gpu);
        self.window = Some(window);

        // The scene exists; from here on the redraw chain drives everything.
        self.clock = FrameClock::new();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let (w, h) = (new_size.width.max(1), new_size.height.max(1));
                self.camera.set_aspect_ratio(w as f32, h as f32);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(w, h);
                    if let Some(depth) = &mut self.depth {
                        depth.resize(&gpu.device, w, h);
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.camera.begin_drag(),
                ElementState::Released => self.camera.end_drag(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((last_x, last_y)) = self.cursor {
                    let dx = (position.x - last_x) as f32;
                    let dy = (position.y - last_y) as f32;
                    self.camera.pan(dx, dy);
                }
                self.cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.camera.zoom(scroll_delta(delta));
            }
            WindowEvent::RedrawRequested => {
                match self.render_frame() {
                    Ok(()) => {}
                    Err(FrameError::Surface(SurfaceError::OutOfMemory)) => {
                        error!("GPU out of memory");
                        event_loop.exit();
                        return;
                    }
                    // One bad frame never ends the session: log and move on.
                    Err(e) => warn!("Frame skipped: {e}"),
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Creates an event loop and runs the application with the given config.
///
/// This function blocks until the window is closed.
pub fn run_with_config(config: Config) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = OrreryApp::with_config(config);
    event_loop.run_app(&mut app).expect("Event loop failed");
}
