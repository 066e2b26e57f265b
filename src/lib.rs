// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive trackball camera and scene-graph renderer built on wgpu.
//!
//! Mirage turns read-only scene snapshots (nodes carrying position,
//! rotation, geometry and an optional texture) into GPU draw calls, and
//! reacts to pointer input with a quaternion trackball: drags rotate the
//! view around a virtual hemisphere, scrolling zooms, and a double-click
//! eases the orientation back to neutral.
//!
//! # Key entry points
//!
//! - [`camera::TrackballCamera`] - orientation, hemisphere projection, zoom
//! - [`animation::EasingScheduler`] - fixed-step eased animation driver
//! - [`renderer::FrameRenderer`] - the per-frame render state machine
//! - [`scene::SceneGraphView`] - read-only adapter over scene snapshots
//! - [`engine::MirageEngine`] - host-facing glue tying the pieces together
//!
//! # Threading
//!
//! Everything runs on the host's control thread. Camera mutation, easing
//! ticks and render calls are serialized by the event loop; the engine
//! raises a redraw request instead of polling.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::TrackballCamera;
pub use engine::MirageEngine;
pub use error::MirageError;
pub use engine::CameraCommand;
pub use input::{InputEvent, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
