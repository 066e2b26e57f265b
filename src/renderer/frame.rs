//! The per-frame render state machine.

use super::{DiagnosticSink, FrameBackend, NodeDraw};
use crate::camera::core::model_matrix;
use crate::camera::{FrameMatrices, Projection, TrackballCamera, Viewport};
use crate::scene::SceneGraphView;

/// What happened during one `render` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Whether a surface was acquired and presented.
    pub presented: bool,
    /// Nodes drawn.
    pub drawn: usize,
    /// Invalid nodes skipped.
    pub skipped: usize,
}

/// Turns a scene snapshot into draw calls on a [`FrameBackend`].
///
/// Rendering never mutates the scene or the camera, and never returns an
/// error: an unavailable surface drops the frame, an invalid node is
/// skipped and reported to the diagnostic sink.
pub struct FrameRenderer<B: FrameBackend> {
    backend: B,
    projection: Projection,
}

impl<B: FrameBackend> FrameRenderer<B> {
    /// Renderer drawing through `backend` with the given projection.
    #[must_use]
    pub fn new(backend: B, projection: Projection) -> Self {
        Self {
            backend,
            projection,
        }
    }

    /// The backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Current projection parameters.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replace the projection parameters.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Forward a surface resize to the backend.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
    }

    /// Render one frame.
    ///
    /// With no scene an empty, cleared frame is still presented.
    pub fn render(
        &mut self,
        scene: Option<&dyn SceneGraphView>,
        viewport: Viewport,
        camera: &TrackballCamera,
        sink: &mut dyn DiagnosticSink,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        let Some(mut frame) = self.backend.acquire() else {
            return report;
        };

        let matrices = FrameMatrices::new(
            camera.orientation(),
            camera.zoom_distance(),
            viewport,
            &self.projection,
        );
        self.backend
            .begin(&mut frame, &matrices, scene.map(|s| s.revision()));

        if let Some(scene) = scene {
            for index in 0..scene.node_count() {
                let Some(node) = scene.node(index) else {
                    continue;
                };
                let problem = Some(node.validate())
                    .filter(|problem| !problem.is_empty())
                    .or_else(|| self.backend.check_node(node));
                if let Some(problem) = problem {
                    let message =
                        format!("{}: node {index}: {problem}", scene.name());
                    log::warn!("skipping {message}");
                    sink.report(&message);
                    report.skipped += 1;
                    continue;
                }
                let (axis, angle) = node.rotation();
                let model = model_matrix(node.position(), axis, angle);
                self.backend
                    .encode_node(&mut frame, NodeDraw { index, node, model });
                report.drawn += 1;
            }
        }

        self.backend.present(frame);
        report.presented = true;
        report
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::options::{AnimationOptions, CameraOptions};
    use crate::scene::{Scene, SceneNode, Topology};

    /// Records every backend call instead of touching a GPU.
    #[derive(Default)]
    struct Recorder {
        surface_unavailable: bool,
        acquired: usize,
        presented: usize,
        revisions: Vec<Option<u64>>,
        draws: Vec<(usize, Topology, usize, Mat4)>,
        resized: Option<(u32, u32)>,
        max_vertices: Option<usize>,
    }

    impl FrameBackend for Recorder {
        type Frame = Vec<usize>;

        fn acquire(&mut self) -> Option<Self::Frame> {
            if self.surface_unavailable {
                return None;
            }
            self.acquired += 1;
            Some(Vec::new())
        }

        fn begin(
            &mut self,
            _frame: &mut Self::Frame,
            _matrices: &FrameMatrices,
            revision: Option<u64>,
        ) {
            self.revisions.push(revision);
        }

        fn check_node(&self, node: &SceneNode) -> Option<String> {
            let max = self.max_vertices?;
            let count = node.vertex_count();
            (count > max)
                .then(|| format!("{count} vertices, backend holds {max}"))
        }

        fn encode_node(&mut self, frame: &mut Self::Frame, draw: NodeDraw<'_>) {
            frame.push(draw.index);
            self.draws.push((
                draw.index,
                draw.node.topology(),
                draw.node.vertex_count(),
                draw.model,
            ));
        }

        fn present(&mut self, _frame: Self::Frame) {
            self.presented += 1;
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.resized = Some((width, height));
        }
    }

    fn camera() -> TrackballCamera {
        TrackballCamera::new(
            &CameraOptions::default(),
            &AnimationOptions::default(),
        )
    }

    fn renderer() -> FrameRenderer<Recorder> {
        FrameRenderer::new(Recorder::default(), Projection::default())
    }

    fn valid_triangle() -> SceneNode {
        SceneNode::new(
            vec![
                0.0, 0.0, 0.0, 1.0, //
                1.0, 0.0, 0.0, 1.0, //
                0.0, 1.0, 0.0, 1.0,
            ],
            vec![1.0; 12],
        )
        .with_position(Vec3::new(1.0, 2.0, 3.0))
        .with_rotation(Vec3::Y, std::f32::consts::FRAC_PI_2)
    }

    #[test]
    fn no_scene_still_presents_an_empty_frame() {
        let mut renderer = renderer();
        let mut log: Vec<String> = Vec::new();
        let report = renderer.render(
            None,
            Viewport::new(800.0, 600.0),
            &camera(),
            &mut log,
        );
        assert!(report.presented);
        assert_eq!(report.drawn, 0);
        assert_eq!(renderer.backend().acquired, 1);
        assert_eq!(renderer.backend().presented, 1);
        assert_eq!(renderer.backend().revisions, vec![None]);
        assert!(log.is_empty());
    }

    #[test]
    fn invalid_node_is_skipped_and_reported_once() {
        let scene = Scene::new("mixed")
            .with_node(SceneNode::new(vec![0.0; 10], vec![0.0; 10]))
            .with_node(valid_triangle());
        let mut renderer = renderer();
        let mut log: Vec<String> = Vec::new();

        let report = renderer.render(
            Some(&scene),
            Viewport::new(800.0, 600.0),
            &camera(),
            &mut log,
        );

        assert_eq!(report.drawn, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(log.len(), 1);
        assert!(log[0].starts_with("mixed: node 0: vertex data"));

        let draws = &renderer.backend().draws;
        assert_eq!(draws.len(), 1);
        let (index, topology, count, model) = draws[0];
        assert_eq!(index, 1);
        assert_eq!(topology, Topology::Triangle);
        assert_eq!(count, 3);
        let origin = model.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
        assert_eq!(renderer.backend().presented, 1);
    }

    #[test]
    fn backend_rejected_node_is_skipped_and_reported() {
        let big = SceneNode::new(vec![0.0; 24], vec![1.0; 24]);
        let scene = Scene::new("limits")
            .with_node(valid_triangle())
            .with_node(big)
            .with_node(SceneNode::new(Vec::new(), Vec::new()));
        let mut renderer = renderer();
        renderer.backend_mut().max_vertices = Some(3);
        let mut log: Vec<String> = Vec::new();

        let report = renderer.render(
            Some(&scene),
            Viewport::new(800.0, 600.0),
            &camera(),
            &mut log,
        );

        assert_eq!(report.drawn, 1);
        assert_eq!(report.skipped, 2);
        assert!(report.presented);
        assert_eq!(log[0], "limits: node 1: 6 vertices, backend holds 3");
        // validation problems take precedence over backend limits
        assert_eq!(log[1], "limits: node 2: node has no vertices");
        let drawn: Vec<usize> =
            renderer.backend().draws.iter().map(|d| d.0).collect();
        assert_eq!(drawn, vec![0]);
    }

    #[test]
    fn nodes_are_drawn_in_snapshot_order() {
        let scene = Scene::new("ordered")
            .with_node(valid_triangle())
            .with_node(valid_triangle().with_topology(Topology::Point))
            .with_node(valid_triangle().with_topology(Topology::LineStrip));
        let mut renderer = renderer();
        let report = renderer.render(
            Some(&scene),
            Viewport::new(100.0, 100.0),
            &camera(),
            &mut Vec::<String>::new(),
        );
        assert_eq!(report.drawn, 3);
        let order: Vec<usize> =
            renderer.backend().draws.iter().map(|d| d.0).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(
            renderer.backend().revisions,
            vec![Some(scene.revision())]
        );
    }

    #[test]
    fn unavailable_surface_drops_the_frame() {
        let scene = Scene::new("one").with_node(valid_triangle());
        let mut renderer = renderer();
        renderer.backend_mut().surface_unavailable = true;
        let report = renderer.render(
            Some(&scene),
            Viewport::new(100.0, 100.0),
            &camera(),
            &mut Vec::<String>::new(),
        );
        assert_eq!(report, FrameReport::default());
        assert_eq!(renderer.backend().presented, 0);
        assert!(renderer.backend().draws.is_empty());

        renderer.backend_mut().surface_unavailable = false;
        assert!(renderer
            .render(
                Some(&scene),
                Viewport::new(100.0, 100.0),
                &camera(),
                &mut Vec::<String>::new(),
            )
            .presented);
    }

    #[test]
    fn resize_reaches_the_backend() {
        let mut renderer = renderer();
        renderer.resize(640, 480);
        assert_eq!(renderer.backend().resized, Some((640, 480)));
    }
}
