//! The engine's camera vocabulary.
//!
//! Every camera operation, whether it comes from a pointer gesture, a key
//! binding or a programmatic call, is a `CameraCommand` passed to
//! [`MirageEngine::execute`](super::MirageEngine::execute).

/// A camera operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Capture the hemisphere point under the pointer as the drag anchor.
    SetAnchor {
        /// Pointer x in physical pixels.
        x: f32,
        /// Pointer y in physical pixels (origin top-left).
        y: f32,
    },
    /// Rotate by the arc from the anchor to the pointer.
    DragTo {
        /// Pointer x in physical pixels.
        x: f32,
        /// Pointer y in physical pixels (origin top-left).
        y: f32,
    },
    /// Scale the camera distance.
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
    /// Ease the orientation back to identity.
    ResetOrientation,
    /// The drawable area changed size.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}
