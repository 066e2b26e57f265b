//! Standalone window backed by winit.
//!
//! ```no_run
//! # use mirage::Viewer;
//! Viewer::builder()
//!     .with_title("Mirage")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;
use std::time::Duration;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::MirageError, gpu::render_context::RenderContext, options::Options,
    scene::{gallery, Scene},
    InputEvent, MirageEngine, MouseButton,
};

/// Pixel scroll deltas are scaled to roughly match one wheel line.
const PIXEL_SCROLL_SCALE: f32 = 0.01;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    scenes: Option<Vec<Scene>>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            scenes: None,
            options: None,
            title: "Mirage".into(),
        }
    }

    /// Show these scenes instead of the built-in gallery.
    #[must_use]
    pub fn with_scenes(mut self, scenes: Vec<Scene>) -> Self {
        self.scenes = Some(scenes);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            scenes: self.scenes.unwrap_or_else(gallery::all),
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing a scene library through the trackball
/// camera.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    scenes: Vec<Scene>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`MirageError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), MirageError> {
        let event_loop =
            EventLoop::new().map_err(|e| MirageError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            last_tick: None,
            pending: Some((self.scenes, self.options)),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MirageError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<MirageEngine>,
    /// Time of the last animation tick; `None` while idle.
    last_tick: Option<Instant>,
    /// Scenes and options waiting for the window to exist.
    pending: Option<(Vec<Scene>, Options)>,
    title: String,
}

fn surface_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

async fn create_engine(
    window: Arc<Window>,
    size: (u32, u32),
    scenes: Vec<Scene>,
    options: Options,
) -> Result<MirageEngine, MirageError> {
    let context =
        RenderContext::new(window, size, options.render.present_mode())
            .await?;
    MirageEngine::new(context, options, scenes).await
}

impl ViewerApp {
    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        let now = Instant::now();
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        let animating = engine.update(dt);
        self.last_tick = animating.then_some(now);

        let _ = engine.take_redraw_request();
        let _ = engine.render();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some((scenes, options)) = self.pending.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = surface_size(window.inner_size());
        let engine = match pollster::block_on(create_engine(
            Arc::clone(&window),
            size,
            scenes,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let (width, height) = surface_size(size);
                engine.handle_input(InputEvent::Resized { width, height });
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let (width, height) = surface_size(window.inner_size());
                    engine.resize(width, height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                engine.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 * PIXEL_SCROLL_SCALE
                    }
                };
                engine.handle_input(InputEvent::Scroll { delta });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                if !engine.handle_key_press(&key) {
                    log::trace!("unbound key {key}");
                }
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if engine.camera().is_animating() || engine.take_redraw_request() {
            self.request_redraw();
        }
    }
}
