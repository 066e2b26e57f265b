//! Host-facing glue between input, camera, scenes and the renderer.
//!
//! Methods are split across submodules by concern:
//!
//! - `input`: event and command dispatch, key actions
//! - `scene_management`: selection and replacement of scenes

mod command;
mod input;
mod scene_management;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub use self::command::CameraCommand;
use crate::camera::{TrackballCamera, Viewport};
use crate::error::MirageError;
use crate::gpu::render_context::RenderContext;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::{
    DiagnosticSink, FrameBackend, FrameRenderer, FrameReport, LogSink,
    WgpuBackend,
};
use crate::scene::{Scene, SceneGraphView, SceneLibrary};

/// Host-facing engine: a trackball camera looking at the selected scene of
/// a [`SceneLibrary`].
///
/// # Frame loop
///
/// Forward window events to [`handle_input`](Self::handle_input) (or
/// pre-translated commands to [`execute`](Self::execute)), advance the
/// reset animation with [`update`](Self::update), and call
/// [`render`](Self::render) when [`take_redraw_request`](Self::take_redraw_request)
/// returns `true`. The engine never polls; camera changes, selection
/// changes, scene replacement and resizes raise the redraw request.
///
/// # Backends
///
/// The backend defaults to [`WgpuBackend`]. Any [`FrameBackend`] works,
/// which lets hosts record frames instead of drawing them.
pub struct MirageEngine<B: FrameBackend = WgpuBackend> {
    camera: TrackballCamera,
    renderer: FrameRenderer<B>,
    library: SceneLibrary,
    input: InputProcessor,
    options: Options,
    sink: Box<dyn DiagnosticSink>,
    /// Shared with the camera's change listener.
    redraw: Rc<Cell<bool>>,
}

impl MirageEngine {
    /// Engine drawing into `context` with wgpu.
    ///
    /// # Errors
    ///
    /// Returns [`MirageError::Pipeline`] if the render pipelines cannot be
    /// created on this device.
    pub async fn new(
        context: RenderContext,
        options: Options,
        scenes: Vec<Scene>,
    ) -> Result<Self, MirageError> {
        let (width, height) = context.size();
        let backend = WgpuBackend::new(context, &options.render).await?;
        let mut engine = Self::with_backend(backend, options, scenes);
        engine.camera.update_viewport(Viewport::from_size(width, height));
        Ok(engine)
    }
}

impl<B: FrameBackend> MirageEngine<B> {
    /// Engine drawing through an arbitrary backend.
    #[must_use]
    pub fn with_backend(
        mut backend: B,
        options: Options,
        scenes: Vec<Scene>,
    ) -> Self {
        backend.set_clear_color(options.render.clear());
        let mut camera =
            TrackballCamera::new(&options.camera, &options.animation);
        let redraw = Rc::new(Cell::new(true));
        let flag = Rc::clone(&redraw);
        camera.on_change(move |_| flag.set(true));

        let library = SceneLibrary::new(scenes);
        log::info!(
            "engine ready with {} scenes, selected {:?}",
            library.len(),
            library.selected_index()
        );

        Self {
            camera,
            renderer: FrameRenderer::new(
                backend,
                options.camera.projection(),
            ),
            library,
            input: InputProcessor::with_key_bindings(
                options.keybindings.clone(),
            ),
            options,
            sink: Box::new(LogSink),
            redraw,
        }
    }

    // ── Frame loop ──

    /// Advance the reset animation by `dt`. Returns `true` while it is
    /// still running, so hosts keep ticking.
    pub fn update(&mut self, dt: Duration) -> bool {
        self.camera.advance(dt)
    }

    /// Draw the selected scene (or an empty frame) and present it.
    pub fn render(&mut self) -> FrameReport {
        let scene = self
            .library
            .selected()
            .map(|scene| -> &dyn SceneGraphView { scene });
        self.renderer.render(
            scene,
            self.camera.viewport(),
            &self.camera,
            self.sink.as_mut(),
        )
    }

    /// Resize the drawable and the trackball viewport. Zero sizes are
    /// ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring degenerate resize {width}x{height}");
            return;
        }
        self.renderer.resize(width, height);
        self.camera.update_viewport(Viewport::from_size(width, height));
        self.request_redraw();
    }

    /// Consume the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        self.redraw.replace(false)
    }

    /// Raise a redraw request.
    pub fn request_redraw(&self) {
        self.redraw.set(true);
    }

    // ── Accessors ──

    /// The trackball camera.
    #[must_use]
    pub fn camera(&self) -> &TrackballCamera {
        &self.camera
    }

    /// The scene library.
    #[must_use]
    pub fn library(&self) -> &SceneLibrary {
        &self.library
    }

    /// The frame renderer.
    #[must_use]
    pub fn renderer(&self) -> &FrameRenderer<B> {
        &self.renderer
    }

    /// The input processor.
    #[must_use]
    pub fn input(&self) -> &InputProcessor {
        &self.input
    }

    /// Route node diagnostics to `sink` instead of the log.
    ///
    /// The engine owns the sink from here on; to read messages back, pass a
    /// clone of a [`ConsoleSink`](crate::renderer::ConsoleSink) and drain
    /// the copy you kept.
    pub fn set_diagnostic_sink(&mut self, sink: impl DiagnosticSink + 'static) {
        self.sink = Box::new(sink);
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply new options to the camera, projection, clear color and key
    /// bindings. The present mode only takes effect on a new surface.
    pub fn set_options(&mut self, options: Options) {
        self.camera
            .apply_options(&options.camera, &options.animation);
        self.renderer.set_projection(options.camera.projection());
        self.renderer
            .backend_mut()
            .set_clear_color(options.render.clear());
        self.input.set_key_bindings(options.keybindings.clone());
        self.options = options;
        self.request_redraw();
    }
}
