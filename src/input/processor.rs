//! Converts raw platform events into camera commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! button state, double-click timing) and the key-binding map. It is the
//! only thing that sits between raw window events and the engine's
//! [`execute`](crate::MirageEngine::execute) method.

use glam::Vec2;
use web_time::Instant;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use super::mouse::{MouseState, PressKind};
use crate::engine::CameraCommand;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`CameraCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input.handle_event(event) {
///     engine.execute(cmd);
/// }
///
/// if let Some(action) = input.handle_key_press("KeyR") {
///     engine.apply_key_action(action);
/// }
/// ```
pub struct InputProcessor {
    mouse: MouseState,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
    /// Set by a double press; drags are ignored until release so the reset
    /// animation is not fought by the held button.
    drag_suppressed: bool,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            mouse: MouseState::new(),
            mouse_pressed: false,
            drag_suppressed: false,
            key_bindings,
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        (self.mouse.position.x, self.mouse.position.y)
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Look up a key press and return the bound action, if any.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<KeyAction> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event, returning a camera command if one is
    /// produced.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<CameraCommand> {
        self.handle_event_at(event, Instant::now())
    }

    pub(crate) fn handle_event_at(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> Option<CameraCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.mouse.position = Vec2::new(x, y);
                (self.mouse_pressed && !self.drag_suppressed)
                    .then_some(CameraCommand::DragTo { x, y })
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed, now)
            }
            InputEvent::Scroll { delta } => {
                Some(CameraCommand::Zoom { delta })
            }
            InputEvent::Resized { width, height } => {
                Some(CameraCommand::Resize { width, height })
            }
        }
    }

    /// Primary-button press anchors a drag, or resets on a double press.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        now: Instant,
    ) -> Option<CameraCommand> {
        if button != MouseButton::Left {
            return None;
        }

        if !pressed {
            self.mouse_pressed = false;
            self.drag_suppressed = false;
            return None;
        }

        self.mouse_pressed = true;
        match self.mouse.press(now) {
            PressKind::Double => {
                self.drag_suppressed = true;
                Some(CameraCommand::ResetOrientation)
            }
            PressKind::Single => {
                self.drag_suppressed = false;
                let (x, y) = self.mouse_pos();
                Some(CameraCommand::SetAnchor { x, y })
            }
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn press() -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        }
    }

    fn release() -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        }
    }

    #[test]
    fn press_then_move_anchors_and_drags() {
        let mut input = InputProcessor::new();
        let t0 = Instant::now();
        assert_eq!(
            input.handle_event_at(
                InputEvent::CursorMoved { x: 10.0, y: 20.0 },
                t0
            ),
            None
        );
        assert_eq!(
            input.handle_event_at(press(), t0),
            Some(CameraCommand::SetAnchor { x: 10.0, y: 20.0 })
        );
        assert_eq!(
            input.handle_event_at(
                InputEvent::CursorMoved { x: 30.0, y: 25.0 },
                t0
            ),
            Some(CameraCommand::DragTo { x: 30.0, y: 25.0 })
        );
        assert_eq!(input.handle_event_at(release(), t0), None);
        assert_eq!(
            input.handle_event_at(
                InputEvent::CursorMoved { x: 40.0, y: 25.0 },
                t0
            ),
            None
        );
    }

    #[test]
    fn double_press_resets_and_suppresses_drag() {
        let mut input = InputProcessor::new();
        let t0 = Instant::now();
        let _ = input.handle_event_at(press(), t0);
        let _ = input.handle_event_at(release(), t0);
        assert_eq!(
            input.handle_event_at(press(), t0 + Duration::from_millis(200)),
            Some(CameraCommand::ResetOrientation)
        );
        assert_eq!(
            input.handle_event_at(InputEvent::CursorMoved { x: 5.0, y: 5.0 }, t0),
            None
        );
        let _ = input.handle_event_at(release(), t0);
        assert!(!input.mouse_pressed());
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut input = InputProcessor::new();
        let event = InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        };
        assert_eq!(input.handle_event(event), None);
        assert!(!input.mouse_pressed());
    }

    #[test]
    fn scroll_and_resize_pass_through() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: -3.0 }),
            Some(CameraCommand::Zoom { delta: -3.0 })
        );
        assert_eq!(
            input.handle_event(InputEvent::Resized {
                width: 640,
                height: 480
            }),
            Some(CameraCommand::Resize {
                width: 640,
                height: 480
            })
        );
    }

    #[test]
    fn key_presses_use_bindings() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_key_press("KeyR"),
            Some(KeyAction::ResetOrientation)
        );
        let mut bindings = KeybindingOptions::default();
        bindings.bind("KeyN", KeyAction::NextScene);
        input.set_key_bindings(bindings);
        assert_eq!(input.handle_key_press("KeyN"), Some(KeyAction::NextScene));
    }
}
