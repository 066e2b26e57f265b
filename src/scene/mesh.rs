//! Geometry generation helpers for building scene nodes.
//!
//! A [`Mesh`] is a row-major grid of 3D points (`nu` rows of `nv` points).
//! Helpers turn meshes and paths into segment or triangle lists, which
//! [`to_vert4`] flattens into node vertex data.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::node::FLOATS_PER_VERTEX;

/// Row-major grid of 2D lattice points.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    nu: usize,
    nv: usize,
    points: Vec<Vec2>,
}

impl Lattice {
    /// Point at row `i`, column `j`.
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> Vec2 {
        self.points[i * self.nv + j]
    }

    /// (rows, columns).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.nu, self.nv)
    }
}

/// Row-major grid of 3D points (a quadrilateral mesh).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    nu: usize,
    nv: usize,
    points: Vec<Vec3>,
}

impl Mesh {
    /// Point at row `i`, column `j`.
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> Vec3 {
        self.points[i * self.nv + j]
    }

    /// (rows, columns).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.nu, self.nv)
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
#[must_use]
pub fn linspace(start: f32, end: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f32;
            (0..n).map(|i| start + step * i as f32).collect()
        }
    }
}

/// Lattice with `L[i][j] = (u[i], v[j])`.
#[must_use]
pub fn lattice(u: &[f32], v: &[f32]) -> Lattice {
    let points = u
        .iter()
        .flat_map(|&x| v.iter().map(move |&y| Vec2::new(x, y)))
        .collect();
    Lattice {
        nu: u.len(),
        nv: v.len(),
        points,
    }
}

/// Flat mesh: every lattice point at z = 0.
#[must_use]
pub fn lift(lattice: &Lattice) -> Mesh {
    lift_map(lattice, |p| p.extend(0.0))
}

/// Height-field mesh: z = `f(x, y)`.
#[must_use]
pub fn lift_height(lattice: &Lattice, f: impl Fn(f32, f32) -> f32) -> Mesh {
    lift_map(lattice, |p| p.extend(f(p.x, p.y)))
}

/// Mesh from an arbitrary map of the plane into space.
#[must_use]
pub fn lift_map(lattice: &Lattice, f: impl Fn(Vec2) -> Vec3) -> Mesh {
    Mesh {
        nu: lattice.nu,
        nv: lattice.nv,
        points: lattice.points.iter().map(|&p| f(p)).collect(),
    }
}

/// Segments joining every pair of adjacent mesh points.
///
/// Yields `(nu - 1) * nv + nu * (nv - 1)` segments.
#[must_use]
pub fn gridlines(mesh: &Mesh) -> Vec<[Vec3; 2]> {
    let (nu, nv) = mesh.shape();
    let mut lines = Vec::new();
    for j in 0..nv {
        for i in 1..nu {
            lines.push([mesh.at(i - 1, j), mesh.at(i, j)]);
        }
    }
    for i in 0..nu {
        for j in 1..nv {
            lines.push([mesh.at(i, j - 1), mesh.at(i, j)]);
        }
    }
    lines
}

/// Tessellate each mesh quad into four triangles fanned around its center.
///
/// Yields `(nu - 1) * (nv - 1) * 4` triangles.
#[must_use]
pub fn triangulate(mesh: &Mesh) -> Vec<[Vec3; 3]> {
    let (nu, nv) = mesh.shape();
    let mut triangles =
        Vec::with_capacity(nu.saturating_sub(1) * nv.saturating_sub(1) * 4);
    for i in 1..nu {
        for j in 1..nv {
            let a = mesh.at(i - 1, j - 1);
            let b = mesh.at(i - 1, j);
            let c = mesh.at(i, j);
            let d = mesh.at(i, j - 1);
            let e = (a + b + c + d) * 0.25;
            triangles.extend([[e, a, b], [e, b, c], [e, c, d], [e, d, a]]);
        }
    }
    triangles
}

/// Triangles joining every segment of `path` to `apex`.
#[must_use]
pub fn reach(path: &[Vec3], apex: Vec3) -> Vec<[Vec3; 3]> {
    path.windows(2).map(|w| [w[0], w[1], apex]).collect()
}

/// `n + 1` points on the unit circle in the x-y plane; first == last.
#[must_use]
pub fn circle(n: usize) -> Vec<Vec3> {
    linspace(0.0, TAU, n + 1)
        .into_iter()
        .map(|t| Vec3::new(t.cos(), t.sin(), 0.0))
        .collect()
}

/// Unit cone with its apex at +Z and `n` base segments.
#[must_use]
pub fn cone(n: usize) -> Vec<[Vec3; 3]> {
    reach(&circle(n), Vec3::Z)
}

/// Two-row mesh spanning `path1` and `path2`; triangulate it for a band.
///
/// The longer path is truncated to the shorter one's length.
#[must_use]
pub fn bridge(path1: &[Vec3], path2: &[Vec3]) -> Mesh {
    let nv = path1.len().min(path2.len());
    let points = path1[..nv].iter().chain(&path2[..nv]).copied().collect();
    Mesh { nu: 2, nv, points }
}

/// Unit sphere point at polar angle `q` and azimuth `p`.
#[must_use]
pub fn to_spherical(qp: Vec2) -> Vec3 {
    let (q, p) = (qp.x, qp.y);
    Vec3::new(q.sin() * p.cos(), q.sin() * p.sin(), q.cos())
}

/// Flatten 3D points into vertex data, appending w = 1.
#[must_use]
pub fn to_vert4<I>(points: I) -> Vec<f32>
where
    I: IntoIterator<Item = Vec3>,
{
    points
        .into_iter()
        .flat_map(|p| [p.x, p.y, p.z, 1.0])
        .collect()
}

/// Per-face normals for triangle-list vertex data, repeated per vertex.
///
/// Degenerate faces get a zero normal.
#[must_use]
pub fn flat_normals(vertices: &[f32]) -> Vec<f32> {
    vertices
        .chunks_exact(FLOATS_PER_VERTEX * 3)
        .flat_map(|tri| {
            let p = |k: usize| {
                let o = k * FLOATS_PER_VERTEX;
                Vec3::new(tri[o], tri[o + 1], tri[o + 2])
            };
            let n = (p(1) - p(0)).cross(p(2) - p(0)).normalize_or_zero();
            [n.x, n.y, n.z, 0.0].repeat(3)
        })
        .collect()
}

/// Colors ramping with vertex height: low is green-blue, high is red-white.
#[must_use]
pub fn height_colors(vertices: &[f32]) -> Vec<f32> {
    vertices
        .chunks_exact(FLOATS_PER_VERTEX)
        .flat_map(|v| {
            let z = v[2];
            [z, 1.0 - z, 1.0 - z * 0.5, 1.0]
        })
        .collect()
}

/// One color for every vertex.
#[must_use]
pub fn solid_colors(vertices: &[f32], rgba: [f32; 4]) -> Vec<f32> {
    rgba.repeat(vertices.len() / FLOATS_PER_VERTEX)
}

/// Red, green, blue repeating per vertex.
#[must_use]
pub fn cycle_colors(count: usize) -> Vec<f32> {
    (0..count)
        .flat_map(|n| {
            let mut color = [0.0, 0.0, 0.0, 1.0];
            color[n % 3] = 1.0;
            color
        })
        .collect()
}

/// Two colors alternating per triangle.
#[must_use]
pub fn checker_colors(
    vertices: &[f32],
    dark: [f32; 4],
    light: [f32; 4],
) -> Vec<f32> {
    let count = vertices.len() / FLOATS_PER_VERTEX;
    (0..count)
        .flat_map(|n| if (n / 3) % 2 == 0 { dark } else { light })
        .collect()
}
