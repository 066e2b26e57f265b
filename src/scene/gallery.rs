//! Built-in example scenes, so the viewer has something to show without an
//! external scene source.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};

use super::mesh::{
    bridge, checker_colors, circle, cone, cycle_colors, flat_normals,
    gridlines, height_colors, lattice, lift, lift_height, lift_map, linspace,
    solid_colors, to_spherical, to_vert4, triangulate,
};
use super::{NodeImage, Scene, SceneNode, Topology};

fn node<I, C>(points: I, topology: Topology, colors: C) -> SceneNode
where
    I: IntoIterator<Item = Vec3>,
    C: Fn(&[f32]) -> Vec<f32>,
{
    let vertices = to_vert4(points);
    let colors = colors(&vertices);
    SceneNode::new(vertices, colors).with_topology(topology)
}

fn black(vertices: &[f32]) -> Vec<f32> {
    solid_colors(vertices, [0.0, 0.0, 0.0, 1.0])
}

fn cycle(vertices: &[f32]) -> Vec<f32> {
    cycle_colors(vertices.len() / 4)
}

/// Flat 24×24 grid of line segments.
#[must_use]
pub fn gridlines_scene() -> Scene {
    let x = linspace(-1.0, 1.0, 24);
    let mesh = lift(&lattice(&x, &x));
    Scene::new("Gridlines").with_node(node(
        gridlines(&mesh).into_iter().flatten(),
        Topology::Line,
        black,
    ))
}

/// Paraboloid triangulated over a 14×11 lattice, colored by height.
#[must_use]
pub fn triangular_lattice() -> Scene {
    let x = linspace(-1.0, 1.0, 14);
    let y = linspace(-1.0, 1.0, 11);
    let mesh = lift_height(&lattice(&x, &y), |x, y| x * x + y * y);
    Scene::new("Triangular lattice").with_node(node(
        triangulate(&mesh).into_iter().flatten(),
        Topology::Triangle,
        height_colors,
    ))
}

/// Filled cone plus a black outline drawn as a line strip.
#[must_use]
pub fn cone_scene() -> Scene {
    let filled = node(
        cone(24).into_iter().flatten(),
        Topology::Triangle,
        height_colors,
    )
    .with_position(Vec3::new(0.0, 0.0, 0.50));
    let outline = node(
        cone(24).into_iter().flatten(),
        Topology::LineStrip,
        black,
    )
    .with_position(Vec3::new(0.0, 0.0, 0.51));
    Scene::new("Cone").with_node(filled).with_node(outline)
}

/// Open cylinder bridged between two circles.
#[must_use]
pub fn cylinder() -> Scene {
    let top: Vec<Vec3> = circle(10).into_iter().map(|p| p + Vec3::Z).collect();
    let bottom: Vec<Vec3> =
        circle(10).into_iter().map(|p| p - Vec3::Z).collect();
    let mesh = bridge(&top, &bottom);
    Scene::new("Cylinder").with_node(node(
        triangulate(&mesh).into_iter().flatten(),
        Topology::Triangle,
        cycle,
    ))
}

/// Lit unit sphere.
#[must_use]
pub fn sphere() -> Scene {
    let q = linspace(0.0, PI, 20);
    let p = linspace(0.0, TAU, 20);
    let mesh = lift_map(&lattice(&q, &p), to_spherical);
    let sphere = node(
        triangulate(&mesh).into_iter().flatten(),
        Topology::Triangle,
        cycle,
    );
    let normals = flat_normals(sphere.vertices());
    Scene::new("Sphere").with_node(sphere.with_normals(normals))
}

/// Ribbon wound along a helix.
#[must_use]
pub fn helix() -> Scene {
    let t = linspace(-8.0 * PI, 8.0 * PI, 300);
    let outer: Vec<Vec3> = t
        .iter()
        .map(|&t| Vec3::new(t.cos(), t.sin(), t * 0.1))
        .collect();
    let inner: Vec<Vec3> = outer
        .iter()
        .map(|p| Vec3::new(p.x * 0.8, p.y * 0.8, p.z + 0.1))
        .collect();
    let mesh = bridge(&outer, &inner);
    Scene::new("Helix").with_node(node(
        triangulate(&mesh).into_iter().flatten(),
        Topology::Triangle,
        cycle,
    ))
}

/// Three colored axis rods, an origin ball and a textured floor plane, all
/// translated so the origin sits at (-5, -5, 0).
#[must_use]
pub fn plot_axes() -> Scene {
    let rod_top: Vec<Vec3> = circle(90)
        .into_iter()
        .map(|p| p * 0.25 + Vec3::new(0.0, 0.0, 10.0))
        .collect();
    let rod_bottom: Vec<Vec3> =
        circle(90).into_iter().map(|p| p * 0.25).collect();
    let rod = triangulate(&bridge(&rod_top, &rod_bottom));
    let rod_node = |rgba: [f32; 4]| {
        node(rod.iter().flatten().copied(), Topology::Triangle, |v| {
            solid_colors(v, rgba)
        })
    };

    let q = linspace(0.0, PI, 15);
    let p = linspace(0.0, TAU, 31);
    let ball = triangulate(&lift_map(&lattice(&q, &p), |qp: Vec2| {
        to_spherical(qp) * 0.75
    }));
    let origin = node(ball.into_iter().flatten(), Topology::Triangle, |v| {
        checker_colors(v, [0.5, 0.0, 0.7, 1.0], [0.7, 0.0, 0.5, 1.0])
    });

    let x = linspace(0.0, 10.0, 30);
    let plane = node(
        triangulate(&lift(&lattice(&x, &x))).into_iter().flatten(),
        Topology::Triangle,
        |v| solid_colors(v, [1.0; 4]),
    )
    .with_image(NodeImage::checkerboard(
        64,
        2,
        [90, 90, 90, 255],
        [230, 230, 230, 255],
    ));

    let offset = Vec3::new(-5.0, -5.0, 0.0);
    let x_axis =
        rod_node([1.0, 0.0, 0.0, 1.0]).with_rotation(Vec3::Y, FRAC_PI_2);
    let y_axis =
        rod_node([0.0, 1.0, 0.0, 1.0]).with_rotation(Vec3::X, -FRAC_PI_2);
    let z_axis = rod_node([0.0, 0.0, 1.0, 1.0]);

    let mut scene = Scene::new("Plot axes");
    for n in [x_axis, y_axis, z_axis, origin, plane] {
        scene.push(n.with_position(offset));
    }
    scene
}

/// Every example scene, in menu order.
#[must_use]
pub fn all() -> Vec<Scene> {
    vec![
        gridlines_scene(),
        triangular_lattice(),
        cone_scene(),
        cylinder(),
        helix(),
        sphere(),
        plot_axes(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraphView;

    #[test]
    fn every_gallery_node_is_valid() {
        for scene in all() {
            for i in 0..scene.node_count() {
                let node = scene.node(i).unwrap();
                assert_eq!(
                    node.validate(),
                    "",
                    "{} node {i} is invalid",
                    scene.name()
                );
            }
        }
    }

    #[test]
    fn gallery_names_are_unique() {
        let scenes = all();
        let mut names: Vec<&str> = scenes.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenes.len());
    }

    #[test]
    fn plot_axes_places_every_node() {
        let scene = plot_axes();
        assert_eq!(scene.node_count(), 5);
        for node in scene.nodes() {
            assert_eq!(node.position(), Vec3::new(-5.0, -5.0, 0.0));
        }
        let (axis, angle) = scene.node(0).unwrap().rotation();
        assert_eq!(axis, Vec3::Y);
        assert!((angle - FRAC_PI_2).abs() < 1e-6);
        assert!(scene.node(4).unwrap().image().is_some());
    }

    #[test]
    fn gridlines_are_segment_pairs() {
        let scene = gridlines_scene();
        let node = scene.node(0).unwrap();
        assert_eq!(node.topology(), Topology::Line);
        assert_eq!(node.vertex_count(), 2 * (23 * 24 * 2));
    }
}
