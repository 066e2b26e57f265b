use std::time::Duration;

use glam::Vec2;
use web_time::Instant;

const DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(400);

/// Presses further apart than this (physical pixels) never pair up.
const DOUBLE_CLICK_SLOP: f32 = 4.0;

/// Result of feeding a button press through the click state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PressKind {
    /// First press, or a press too late/far from the previous one.
    Single,
    /// Second press within the threshold at roughly the same spot.
    Double,
}

/// Tracks cursor position and the double-click state machine.
pub(crate) struct MouseState {
    pub(crate) position: Vec2,
    last_press: Option<(Instant, Vec2)>,
}

impl MouseState {
    pub(crate) fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            last_press: None,
        }
    }

    /// Classify a primary-button press at the current position.
    ///
    /// A double press resets the machine, so a third quick press starts a
    /// new pair.
    pub(crate) fn press(&mut self, now: Instant) -> PressKind {
        let position = self.position;
        let is_double = self.last_press.is_some_and(|(time, at)| {
            now.saturating_duration_since(time) < DOUBLE_CLICK_THRESHOLD
                && at.distance(position) <= DOUBLE_CLICK_SLOP
        });
        if is_double {
            self.last_press = None;
            PressKind::Double
        } else {
            self.last_press = Some((now, position));
            PressKind::Single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_presses_pair_up() {
        let mut state = MouseState::new();
        let t0 = Instant::now();
        assert_eq!(state.press(t0), PressKind::Single);
        assert_eq!(
            state.press(t0 + Duration::from_millis(150)),
            PressKind::Double
        );
        assert_eq!(
            state.press(t0 + Duration::from_millis(200)),
            PressKind::Single
        );
    }

    #[test]
    fn slow_presses_stay_single() {
        let mut state = MouseState::new();
        let t0 = Instant::now();
        assert_eq!(state.press(t0), PressKind::Single);
        assert_eq!(
            state.press(t0 + Duration::from_millis(450)),
            PressKind::Single
        );
    }

    #[test]
    fn distant_presses_stay_single() {
        let mut state = MouseState::new();
        let t0 = Instant::now();
        assert_eq!(state.press(t0), PressKind::Single);
        state.position = Vec2::new(50.0, 0.0);
        assert_eq!(
            state.press(t0 + Duration::from_millis(100)),
            PressKind::Single
        );
    }
}
