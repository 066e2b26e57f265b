//! Host-driven animation.
//!
//! Animations advance only when the host loop calls `advance(dt)`; there are
//! no background timers.

pub mod scheduler;

pub use scheduler::{EasingScheduler, SchedulerConfig, Tick};
