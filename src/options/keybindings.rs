use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping key codes to actions.
pub struct KeybindingOptions {
    /// Maps key string (e.g. `"Tab"`) → action.
    pub bindings: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyAction::ResetOrientation),
            ("Tab".into(), KeyAction::NextScene),
            ("ArrowDown".into(), KeyAction::NextScene),
            ("ArrowUp".into(), KeyAction::PreviousScene),
            ("Escape".into(), KeyAction::ClearSelection),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, action: KeyAction) {
        let _ = self.bindings.insert(key.into(), action);
    }
}
