//! Centralized camera, animation and render options with TOML preset
//! support.
//!
//! All sub-structs use `#[serde(default)]` so partial TOML files (e.g. only
//! overriding `[camera]`) work correctly.

mod animation;
mod camera;
mod keybindings;
mod render;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use render::RenderOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MirageError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection, trackball and zoom parameters.
    pub camera: CameraOptions,
    /// Orientation reset animation parameters.
    pub animation: AnimationOptions,
    /// Frame clearing and presentation options.
    pub render: RenderOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MirageError::OptionsParse`] if the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self, MirageError> {
        toml::from_str(content)
            .map_err(|e| MirageError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MirageError::Io`] if the file cannot be read, or
    /// [`MirageError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, MirageError> {
        let content = std::fs::read_to_string(path).map_err(MirageError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`MirageError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), MirageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MirageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MirageError::Io)?;
        }
        std::fs::write(path, content).map_err(MirageError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
fovy = 60.0

[animation]
reset_easing = "linear"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 60.0);
        assert_eq!(opts.camera.zoom_max, 100.0);
        assert_eq!(opts.animation.reset_steps, 30);
        assert_eq!(opts.animation.reset_easing, EasingFunction::Linear);
        assert_eq!(opts.render.clear_color, [0.8, 0.8, 0.8, 1.0]);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera\nfovy = ").unwrap_err();
        assert!(matches!(err, MirageError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyR"),
            Some(KeyAction::ResetOrientation)
        );
        assert_eq!(opts.keybindings.lookup("Tab"), Some(KeyAction::NextScene));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn reset_scheduler_follows_options() {
        let mut opts = AnimationOptions::default();
        opts.reset_steps = 12;
        opts.reset_duration_ms = 120;
        let config = opts.reset_scheduler();
        assert_eq!(config.steps, 12);
        assert_eq!(config.duration.as_millis(), 120);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("animation"));
        assert!(props.contains_key("render"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("trackball_radius").is_some());
        assert!(camera.get("znear").is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "mirage-options-{}",
            std::process::id()
        ));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.camera.zoom_initial = 25.0;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
