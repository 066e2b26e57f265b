use serde::{Deserialize, Serialize};

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// KeyR = "reset_orientation"
/// Tab = "next_scene"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Ease the camera orientation back to identity.
    ResetOrientation,
    /// Select the next scene in the library.
    NextScene,
    /// Select the previous scene in the library.
    PreviousScene,
    /// Deselect the current scene (renders an empty frame).
    ClearSelection,
}
