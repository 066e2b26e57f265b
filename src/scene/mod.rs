//! Scene snapshots consumed by the renderer.
//!
//! A [`Scene`] is a named, ordered list of [`SceneNode`]s. The renderer only
//! ever sees a scene through the read-only [`SceneGraphView`] trait, borrowed
//! for the duration of one `render` call. Every mutation bumps the scene's
//! revision so GPU resources built for an older snapshot are dropped.

pub mod gallery;
mod library;
pub mod mesh;
mod node;

use std::sync::atomic::{AtomicU64, Ordering};

pub use library::SceneLibrary;
pub use node::{
    NodeImage, ParseTopologyError, SceneNode, Topology, FLOATS_PER_VERTEX,
};

/// Read-only view of one scene snapshot.
pub trait SceneGraphView {
    /// Display name of the scene.
    fn name(&self) -> &str;

    /// Snapshot revision. Two views with the same revision hold identical
    /// node data.
    fn revision(&self) -> u64;

    /// Number of nodes in the snapshot.
    fn node_count(&self) -> usize;

    /// Node at `index`, in stable draw order.
    fn node(&self, index: usize) -> Option<&SceneNode>;
}

// Revisions are unique across every scene so replacing one scene with
// another never reuses cached GPU data.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// A named list of nodes.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    nodes: Vec<SceneNode>,
    revision: u64,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            revision: next_revision(),
        }
    }

    /// Append a node (builder form).
    #[must_use]
    pub fn with_node(mut self, node: SceneNode) -> Self {
        self.push(node);
        self
    }

    /// Append a node.
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
        self.invalidate();
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.invalidate();
    }

    /// Rename the scene.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// All nodes in draw order.
    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Mutable access to a node. Bumps the revision.
    pub fn node_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        if index >= self.nodes.len() {
            return None;
        }
        self.invalidate();
        self.nodes.get_mut(index)
    }

    fn invalidate(&mut self) {
        self.revision = next_revision();
    }
}

impl SceneGraphView for Scene {
    fn name(&self) -> &str {
        &self.name
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, index: usize) -> Option<&SceneNode> {
        self.nodes.get(index)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn point() -> SceneNode {
        SceneNode::new(vec![0.0, 0.0, 0.0, 1.0], vec![1.0; 4])
            .with_topology(Topology::Point)
    }

    #[test]
    fn mutation_bumps_revision() {
        let mut scene = Scene::new("points");
        let r0 = scene.revision();
        scene.push(point());
        let r1 = scene.revision();
        assert_ne!(r0, r1);

        let node = scene.node_mut(0).unwrap();
        node.set_position(Vec3::X);
        assert_ne!(scene.revision(), r1);
        assert_eq!(scene.node(0).unwrap().position(), Vec3::X);
    }

    #[test]
    fn out_of_range_node_mut_keeps_revision() {
        let mut scene = Scene::new("empty");
        let r0 = scene.revision();
        assert!(scene.node_mut(3).is_none());
        assert_eq!(scene.revision(), r0);
    }

    #[test]
    fn distinct_scenes_have_distinct_revisions() {
        let a = Scene::new("a").with_node(point());
        let b = Scene::new("b").with_node(point());
        assert_ne!(a.revision(), b.revision());
        assert_eq!(a.node_count(), 1);
        assert_eq!(a.name(), "a");
    }
}
