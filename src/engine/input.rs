//! Input dispatch for MirageEngine

use glam::Vec2;

use super::{CameraCommand, MirageEngine};
use crate::input::{InputEvent, KeyAction};
use crate::renderer::FrameBackend;

impl<B: FrameBackend> MirageEngine<B> {
    /// Process a platform-agnostic input event.
    ///
    /// Pointer presses anchor the trackball, drags rotate it, a double
    /// press starts the reset animation, scrolling zooms and resizes
    /// update the drawable.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.execute(command);
        }
    }

    /// Look up `key` in the bindings and apply the bound action. Returns
    /// `true` if the key was bound.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        let Some(action) = self.input.handle_key_press(key) else {
            return false;
        };
        self.apply_key_action(action);
        true
    }

    /// Execute a camera command.
    pub fn execute(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::SetAnchor { x, y } => {
                self.camera.set_anchor(Vec2::new(x, y));
            }
            CameraCommand::DragTo { x, y } => {
                let _ = self.camera.drag_to(Vec2::new(x, y));
            }
            CameraCommand::Zoom { delta } => {
                let before = self.camera.zoom_distance();
                if self.camera.scroll(delta) != before {
                    self.request_redraw();
                }
            }
            CameraCommand::ResetOrientation => {
                log::debug!("resetting orientation");
                self.camera.animate_to_identity();
                self.request_redraw();
            }
            CameraCommand::Resize { width, height } => {
                self.resize(width, height);
            }
        }
    }

    /// Apply a key-bound action.
    pub fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::ResetOrientation => {
                self.execute(CameraCommand::ResetOrientation);
            }
            KeyAction::NextScene => {
                if self.library.select_next() {
                    self.on_selection_changed();
                }
            }
            KeyAction::PreviousScene => {
                if self.library.select_previous() {
                    self.on_selection_changed();
                }
            }
            KeyAction::ClearSelection => {
                let _ = self.select_scene(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Quat;

    use super::super::tests::engine;
    use super::*;
    use crate::scene::gallery;

    #[test]
    fn drag_rotates_and_requests_redraw() {
        let mut engine = engine(Vec::new());
        engine.execute(CameraCommand::SetAnchor { x: 400.0, y: 300.0 });
        assert!(!engine.take_redraw_request());

        engine.execute(CameraCommand::DragTo { x: 450.0, y: 300.0 });
        assert!(engine.take_redraw_request());
        let angle = engine.camera().orientation().angle_between(Quat::IDENTITY);
        assert!(angle > 0.01);
    }

    #[test]
    fn pointer_events_drive_the_trackball() {
        let mut engine = engine(Vec::new());
        engine.handle_input(InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        engine.handle_input(InputEvent::MouseButton {
            button: crate::input::MouseButton::Left,
            pressed: true,
        });
        engine.handle_input(InputEvent::CursorMoved { x: 400.0, y: 250.0 });
        engine.handle_input(InputEvent::MouseButton {
            button: crate::input::MouseButton::Left,
            pressed: false,
        });
        assert!(engine.take_redraw_request());
        assert!(!engine.camera().orientation().abs_diff_eq(Quat::IDENTITY, 1e-4));

        // released: further motion does nothing
        let orientation = engine.camera().orientation();
        engine.handle_input(InputEvent::CursorMoved { x: 10.0, y: 10.0 });
        assert_eq!(engine.camera().orientation(), orientation);
    }

    #[test]
    fn zoom_requests_redraw_only_when_distance_changes() {
        let mut engine = engine(Vec::new());
        engine.execute(CameraCommand::Zoom { delta: 10.0 });
        assert!(engine.take_redraw_request());

        for _ in 0..1000 {
            engine.execute(CameraCommand::Zoom { delta: -50.0 });
        }
        let _ = engine.take_redraw_request();
        assert_eq!(engine.camera().zoom_distance(), 1.0);
        engine.execute(CameraCommand::Zoom { delta: -50.0 });
        assert!(!engine.take_redraw_request());
    }

    #[test]
    fn reset_animation_returns_to_identity() {
        let mut engine = engine(Vec::new());
        engine.execute(CameraCommand::SetAnchor { x: 400.0, y: 300.0 });
        engine.execute(CameraCommand::DragTo { x: 500.0, y: 200.0 });
        engine.execute(CameraCommand::ResetOrientation);
        assert!(engine.camera().is_animating());

        let mut frames = 0;
        while engine.update(Duration::from_millis(16)) {
            frames += 1;
            assert!(frames < 100, "reset animation never finished");
        }
        assert!(engine.take_redraw_request());
        assert!(engine
            .camera()
            .orientation()
            .abs_diff_eq(Quat::IDENTITY, 1e-5));
    }

    #[test]
    fn key_actions_change_the_selection() {
        let mut engine = engine(gallery::all());
        assert_eq!(engine.library().selected_index(), Some(0));

        assert!(engine.handle_key_press("Tab"));
        assert_eq!(engine.library().selected_index(), Some(1));
        assert!(engine.take_redraw_request());

        engine.apply_key_action(KeyAction::PreviousScene);
        engine.apply_key_action(KeyAction::PreviousScene);
        assert_eq!(
            engine.library().selected_index(),
            Some(engine.library().len() - 1)
        );

        assert!(engine.handle_key_press("Escape"));
        assert_eq!(engine.library().selected_index(), None);
        assert!(!engine.handle_key_press("KeyZ"));
    }

    #[test]
    fn resize_command_reaches_the_viewport() {
        let mut engine = engine(Vec::new());
        engine.handle_input(InputEvent::Resized {
            width: 300,
            height: 200,
        });
        assert_eq!(engine.camera().viewport().width, 300.0);
        assert!(engine.take_redraw_request());
    }
}
