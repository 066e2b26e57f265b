use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::SchedulerConfig;
use crate::util::easing::EasingFunction;

/// Orientation reset animation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Number of steps in the reset animation.
    #[schemars(title = "Reset Steps", range(min = 2, max = 240))]
    pub reset_steps: u32,
    /// Duration of the reset animation in milliseconds.
    #[schemars(title = "Reset Duration (ms)", range(min = 0, max = 5000))]
    pub reset_duration_ms: u64,
    /// Easing curve of the reset animation.
    #[schemars(skip)]
    pub reset_easing: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            reset_steps: crate::animation::scheduler::DEFAULT_STEPS,
            reset_duration_ms: 330,
            reset_easing: EasingFunction::DEFAULT,
        }
    }
}

impl AnimationOptions {
    /// Scheduler configuration for the reset animation.
    #[must_use]
    pub fn reset_scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            steps: self.reset_steps,
            duration: Duration::from_millis(self.reset_duration_ms),
            easing: self.reset_easing,
        }
    }
}
