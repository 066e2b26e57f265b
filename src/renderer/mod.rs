//! Scene rendering.
//!
//! [`FrameRenderer`] runs the per-frame state machine (acquire, begin, one
//! draw per valid node, present) against any [`FrameBackend`].
//! [`WgpuBackend`] is the production backend; tests drive the state machine
//! with a recording backend instead.

pub mod arena;
pub mod frame;
pub mod wgpu_backend;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;

pub use frame::{FrameReport, FrameRenderer};
pub use wgpu_backend::WgpuBackend;

use crate::camera::FrameMatrices;
use crate::scene::SceneNode;

/// One node draw handed to the backend. The node is already validated.
#[derive(Debug, Clone, Copy)]
pub struct NodeDraw<'a> {
    /// Position of the node in the snapshot's draw order.
    pub index: usize,
    /// The node being drawn.
    pub node: &'a SceneNode,
    /// Model transform: translate(position) × rotate(axis, angle).
    pub model: Mat4,
}

/// GPU-facing half of the frame state machine.
pub trait FrameBackend {
    /// In-flight frame state, from `acquire` until `present`.
    type Frame;

    /// Acquire a drawable surface. `None` drops this frame.
    fn acquire(&mut self) -> Option<Self::Frame>;

    /// Start encoding: upload camera matrices and bind resources cached for
    /// `revision` (`None` when no scene is selected).
    fn begin(
        &mut self,
        frame: &mut Self::Frame,
        matrices: &FrameMatrices,
        revision: Option<u64>,
    );

    /// Describe why this backend cannot hold `node`'s resources, or `None`
    /// if it can. Called after [`SceneNode::validate`] passes; a rejected
    /// node is skipped and reported like an invalid one.
    fn check_node(&self, _node: &SceneNode) -> Option<String> {
        None
    }

    /// Record one draw call.
    fn encode_node(&mut self, frame: &mut Self::Frame, draw: NodeDraw<'_>);

    /// Finish encoding, submit and present.
    fn present(&mut self, frame: Self::Frame);

    /// Resize the drawable surface and any size-dependent attachments.
    fn resize(&mut self, width: u32, height: u32);

    /// Change the color frames are cleared to. Backends without a color
    /// target ignore it.
    fn set_clear_color(&mut self, _color: wgpu::Color) {}
}

/// Receives node validity messages (the host's log console).
pub trait DiagnosticSink {
    /// Record one diagnostic message.
    fn report(&mut self, message: &str);
}

/// Sink that forwards diagnostics to the `log` facade under the
/// `mirage::console` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, message: &str) {
        log::info!(target: "mirage::console", "{message}");
    }
}

impl DiagnosticSink for Vec<String> {
    fn report(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

/// Shared message buffer for hosts that show a console.
///
/// Clones share one buffer: hand one clone to the engine and keep another
/// to [`drain`](Self::drain) after each frame.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink {
    messages: Rc<RefCell<Vec<String>>>,
}

impl ConsoleSink {
    /// Empty console.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every message reported so far, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        self.messages.take()
    }

    /// Messages waiting to be drained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// Whether no message is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}
