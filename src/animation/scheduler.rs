//! Fixed-step eased animation driver.
//!
//! The scheduler owns no timer. The host loop calls
//! [`EasingScheduler::advance`] with the elapsed frame time and receives
//! every step that has come due, in order. Once the last step has fired the
//! run is dropped, so nothing outlives a finished, cancelled or dropped
//! scheduler.

use std::time::Duration;

use crate::util::easing::EasingFunction;

/// Default number of steps in a run.
pub const DEFAULT_STEPS: u32 = 30;

/// Default run duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(330);

/// One step of an animation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Step index in `0..steps`.
    pub index: u32,
    /// Eased interpolation parameter in `[0, 1]`.
    pub t: f32,
    /// Whether this is the final step of the run.
    pub last: bool,
}

/// Timing configuration for a scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Number of evenly spaced steps per run (at least 2).
    pub steps: u32,
    /// Total run duration.
    pub duration: Duration,
    /// Curve applied to the normalized step position.
    pub easing: EasingFunction,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            duration: DEFAULT_DURATION,
            easing: EasingFunction::DEFAULT,
        }
    }
}

/// State of an in-flight run.
#[derive(Debug, Clone, Copy)]
struct Run {
    next_step: u32,
    elapsed: Duration,
}

/// Drives `steps` eased ticks over a fixed duration.
///
/// Step `i` comes due at `(i + 1) * duration / steps` and carries
/// `t = easing(i / (steps - 1))`, so the first tick has `t = 0` and the last
/// has `t = 1`. Starting a new run replaces any in-flight run outright.
#[derive(Debug, Clone)]
pub struct EasingScheduler {
    config: SchedulerConfig,
    run: Option<Run>,
}

impl Default for EasingScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl EasingScheduler {
    /// Create an idle scheduler. Step counts below 2 are raised to 2.
    #[must_use]
    pub fn new(mut config: SchedulerConfig) -> Self {
        config.steps = config.steps.max(2);
        Self { config, run: None }
    }

    /// Current timing configuration.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Replace the timing configuration. Cancels any in-flight run.
    pub fn set_config(&mut self, config: SchedulerConfig) {
        *self = Self::new(config);
    }

    /// Begin a new run, cancelling the in-flight one if any.
    pub fn start(&mut self) {
        if self.run.is_some() {
            log::debug!("easing run restarted before completion");
        }
        self.run = Some(Run {
            next_step: 0,
            elapsed: Duration::ZERO,
        });
    }

    /// Cancel the in-flight run. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        self.run.take().is_some()
    }

    /// Whether a run is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Eased parameter for step `index`.
    #[must_use]
    pub fn step_value(&self, index: u32) -> f32 {
        let last = self.config.steps - 1;
        let x = index.min(last) as f32 / last as f32;
        self.config.easing.evaluate(x)
    }

    /// Time between consecutive steps.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.config.duration / self.config.steps
    }

    /// Advance the run by `dt`, invoking `on_tick` for every step that came
    /// due. Returns `true` while the run is still in flight afterwards.
    pub fn advance(&mut self, dt: Duration, mut on_tick: impl FnMut(Tick)) -> bool {
        let Some(mut run) = self.run else {
            return false;
        };
        let interval = self.interval();
        let steps = self.config.steps;
        run.elapsed = run.elapsed.saturating_add(dt);

        while run.next_step < steps
            && run.elapsed >= interval * (run.next_step + 1)
        {
            let index = run.next_step;
            run.next_step += 1;
            on_tick(Tick {
                index,
                t: self.step_value(index),
                last: index + 1 == steps,
            });
        }

        if run.next_step >= steps {
            self.run = None;
            false
        } else {
            self.run = Some(run);
            true
        }
    }

    /// Fire every remaining step immediately and end the run.
    pub fn finish(&mut self, on_tick: impl FnMut(Tick)) {
        if self.run.is_some() {
            let _ = self.advance(self.config.duration, on_tick);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(scheduler: &mut EasingScheduler, dt: Duration) -> Vec<Tick> {
        let mut ticks = Vec::new();
        let _ = scheduler.advance(dt, |tick| ticks.push(tick));
        ticks
    }

    #[test]
    fn idle_scheduler_never_ticks() {
        let mut scheduler = EasingScheduler::default();
        assert!(!scheduler.is_running());
        assert!(collect(&mut scheduler, Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn full_run_issues_exactly_n_ticks() {
        let mut scheduler = EasingScheduler::default();
        scheduler.start();

        let mut ticks = Vec::new();
        // 60 fps frames until the run ends
        let frame = Duration::from_micros(16_667);
        let mut frames = 0;
        while scheduler.advance(frame, |tick| ticks.push(tick)) {
            frames += 1;
            assert!(frames < 1000, "run never finished");
        }

        assert_eq!(ticks.len(), DEFAULT_STEPS as usize);
        assert_eq!(ticks[0].t, 0.0);
        assert_eq!(ticks.last().unwrap().t, 1.0);
        assert!(ticks.last().unwrap().last);
        assert!(ticks.windows(2).all(|w| w[1].t >= w[0].t));
        assert!(ticks.iter().enumerate().all(|(i, t)| t.index == i as u32));
        assert!(!scheduler.is_running());
    }

    #[test]
    fn steps_come_due_on_schedule() {
        let mut scheduler = EasingScheduler::new(SchedulerConfig {
            steps: 10,
            duration: Duration::from_millis(100),
            easing: EasingFunction::Linear,
        });
        scheduler.start();

        assert!(collect(&mut scheduler, Duration::from_millis(5)).is_empty());
        let ticks = collect(&mut scheduler, Duration::from_millis(20));
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[1].index, 1);
        assert!((ticks[1].t - 1.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn large_delta_flushes_remaining_steps() {
        let mut scheduler = EasingScheduler::default();
        scheduler.start();
        let _ = collect(&mut scheduler, Duration::from_millis(50));
        let rest = collect(&mut scheduler, Duration::from_secs(10));
        assert_eq!(rest.last().unwrap().t, 1.0);
        assert!(!scheduler.is_running());
    }

    #[test]
    fn huge_delta_saturates_instead_of_overflowing() {
        let mut scheduler = EasingScheduler::default();
        scheduler.start();
        let _ = collect(&mut scheduler, Duration::from_millis(50));
        let rest = collect(&mut scheduler, Duration::MAX);
        assert!(rest.last().is_some_and(|tick| tick.last));
        assert!(!scheduler.is_running());
    }

    #[test]
    fn restart_cancels_in_flight_run() {
        let mut scheduler = EasingScheduler::default();
        scheduler.start();
        let first = collect(&mut scheduler, Duration::from_millis(100));
        assert!(!first.is_empty());

        scheduler.start();
        let mut all = Vec::new();
        scheduler.finish(|tick| all.push(tick));
        assert_eq!(all.len(), DEFAULT_STEPS as usize);
        assert_eq!(all[0].index, 0);
    }

    #[test]
    fn cancel_releases_the_run() {
        let mut scheduler = EasingScheduler::default();
        scheduler.start();
        assert!(scheduler.cancel());
        assert!(!scheduler.cancel());
        assert!(collect(&mut scheduler, Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn degenerate_step_count_is_raised() {
        let scheduler = EasingScheduler::new(SchedulerConfig {
            steps: 0,
            ..SchedulerConfig::default()
        });
        assert_eq!(scheduler.config().steps, 2);
        assert_eq!(scheduler.step_value(0), 0.0);
        assert_eq!(scheduler.step_value(1), 1.0);
    }
}
