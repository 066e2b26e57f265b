//! Shared utilities.
//!
//! Easing curves used by the animation scheduler.

pub mod easing;
