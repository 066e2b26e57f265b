use super::Scene;

/// Ordered list of scenes with an optional selection.
#[derive(Debug, Clone, Default)]
pub struct SceneLibrary {
    scenes: Vec<Scene>,
    selected: Option<usize>,
}

impl SceneLibrary {
    /// Library holding `scenes`, with the first one selected.
    #[must_use]
    pub fn new(scenes: Vec<Scene>) -> Self {
        let mut library = Self::default();
        library.replace(scenes);
        library
    }

    /// Replace the scene list.
    ///
    /// The selected index is kept while it is still in range and clamped to
    /// the last scene otherwise. With no previous selection the first scene
    /// is selected. An empty list clears the selection.
    pub fn replace(&mut self, scenes: Vec<Scene>) {
        self.scenes = scenes;
        let last = self.scenes.len().checked_sub(1);
        self.selected = match (self.selected, last) {
            (_, None) => None,
            (None, Some(_)) => Some(0),
            (Some(index), Some(last)) => Some(index.min(last)),
        };
    }

    /// Select a scene, or clear the selection with `None`.
    ///
    /// Returns `true` if the selection changed. Out-of-range indices are
    /// ignored.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        if index.is_some_and(|i| i >= self.scenes.len()) {
            return false;
        }
        let changed = self.selected != index;
        self.selected = index;
        changed
    }

    /// Select the next scene, wrapping around.
    pub fn select_next(&mut self) -> bool {
        let len = self.scenes.len();
        if len == 0 {
            return false;
        }
        let next = self.selected.map_or(0, |i| (i + 1) % len);
        self.select(Some(next))
    }

    /// Select the previous scene, wrapping around.
    pub fn select_previous(&mut self) -> bool {
        let len = self.scenes.len();
        if len == 0 {
            return false;
        }
        let prev = self.selected.map_or(len - 1, |i| (i + len - 1) % len);
        self.select(Some(prev))
    }

    /// Index of the selected scene.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected scene.
    #[must_use]
    pub fn selected(&self) -> Option<&Scene> {
        self.selected.and_then(|i| self.scenes.get(i))
    }

    /// Mutable access to the selected scene.
    pub fn selected_mut(&mut self) -> Option<&mut Scene> {
        self.selected.and_then(|i| self.scenes.get_mut(i))
    }

    /// All scenes in order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Number of scenes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
