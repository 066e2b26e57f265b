//! Scene selection and replacement for MirageEngine

use super::MirageEngine;
use crate::renderer::FrameBackend;
use crate::scene::{Scene, SceneGraphView};

impl<B: FrameBackend> MirageEngine<B> {
    /// Select the scene at `index`, or show nothing with `None`.
    ///
    /// Returns `true` if the selection changed. Out-of-range indices are
    /// ignored.
    pub fn select_scene(&mut self, index: Option<usize>) -> bool {
        let changed = self.library.select(index);
        if changed {
            self.on_selection_changed();
        }
        changed
    }

    /// Replace every scene, e.g. after the scripting side rebuilt its
    /// graph. The selection is kept when still in range.
    pub fn replace_scenes(&mut self, scenes: Vec<Scene>) {
        self.library.replace(scenes);
        log::info!(
            "scenes replaced: {} available, selected {:?}",
            self.library.len(),
            self.library.selected_index()
        );
        self.request_redraw();
    }

    /// Mutable access to the selected scene. Edits bump its revision, so
    /// the next frame re-uploads its GPU resources.
    pub fn selected_scene_mut(&mut self) -> Option<&mut Scene> {
        self.request_redraw();
        self.library.selected_mut()
    }

    pub(super) fn on_selection_changed(&mut self) {
        match self.library.selected() {
            Some(scene) => log::info!(
                "showing scene '{}' ({} nodes)",
                scene.name(),
                scene.node_count()
            ),
            None => log::info!("scene selection cleared"),
        }
        self.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::engine;
    use super::*;
    use crate::renderer::ConsoleSink;
    use crate::scene::SceneNode;

    fn triangle() -> SceneNode {
        SceneNode::new(
            vec![
                0.0, 0.0, 0.0, 1.0, //
                1.0, 0.0, 0.0, 1.0, //
                0.0, 1.0, 0.0, 1.0,
            ],
            vec![1.0; 12],
        )
    }

    #[test]
    fn selecting_changes_what_is_drawn() {
        let mut engine = engine(vec![
            Scene::new("one").with_node(triangle()),
            Scene::new("three")
                .with_node(triangle())
                .with_node(triangle())
                .with_node(triangle()),
        ]);
        assert_eq!(engine.render().drawn, 1);

        assert!(engine.select_scene(Some(1)));
        assert!(engine.take_redraw_request());
        assert_eq!(engine.render().drawn, 3);

        assert!(!engine.select_scene(Some(1)));
        assert!(!engine.select_scene(Some(7)));
        assert!(!engine.take_redraw_request());

        assert!(engine.select_scene(None));
        assert_eq!(engine.render().drawn, 0);
    }

    #[test]
    fn replacing_scenes_keeps_or_clamps_the_selection() {
        let mut engine = engine(vec![
            Scene::new("a"),
            Scene::new("b"),
            Scene::new("c"),
        ]);
        assert!(engine.select_scene(Some(2)));
        let _ = engine.take_redraw_request();

        engine.replace_scenes(vec![Scene::new("x"), Scene::new("y")]);
        assert!(engine.take_redraw_request());
        assert_eq!(engine.library().selected_index(), Some(1));

        engine.replace_scenes(Vec::new());
        assert_eq!(engine.library().selected_index(), None);
        assert!(engine.render().presented);
    }

    #[test]
    fn invalid_nodes_reach_the_diagnostic_sink() {
        let mut engine = engine(vec![Scene::new("broken")
            .with_node(SceneNode::new(Vec::new(), Vec::new()))
            .with_node(triangle())]);
        let console = ConsoleSink::new();
        engine.set_diagnostic_sink(console.clone());
        let report = engine.render();
        assert_eq!(report.drawn, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(console.drain(), vec!["broken: node 0: node has no vertices"]);

        let _ = engine.render();
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn editing_the_selected_scene_bumps_its_revision() {
        let mut engine = engine(vec![Scene::new("edit").with_node(triangle())]);
        let before = engine.library().selected().map(Scene::revision);
        if let Some(scene) = engine.selected_scene_mut() {
            scene.push(triangle());
        }
        let after = engine.library().selected().map(Scene::revision);
        assert_ne!(before, after);
        assert!(engine.take_redraw_request());
        assert_eq!(engine.render().drawn, 2);
    }
}
