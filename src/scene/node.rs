//! Scene nodes: flat vertex data plus placement, topology and an optional
//! texture image.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

/// Floats per vertex in every per-vertex stream (x y z w / r g b a).
pub const FLOATS_PER_VERTEX: usize = 4;

/// Primitive assembly mode for a node's vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Independent points.
    Point,
    /// Independent line segments (2 vertices each).
    Line,
    /// Connected polyline.
    LineStrip,
    /// Independent triangles (3 vertices each).
    #[default]
    Triangle,
    /// Connected triangle strip.
    TriangleStrip,
}

impl Topology {
    /// Every topology, in pipeline order.
    pub const ALL: [Topology; 5] = [
        Topology::Point,
        Topology::Line,
        Topology::LineStrip,
        Topology::Triangle,
        Topology::TriangleStrip,
    ];

    /// Textual name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::LineStrip => "line strip",
            Self::Triangle => "triangle",
            Self::TriangleStrip => "triangle strip",
        }
    }

    /// Index into [`Topology::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Equivalent wgpu primitive topology.
    #[must_use]
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::Point => wgpu::PrimitiveTopology::PointList,
            Self::Line => wgpu::PrimitiveTopology::LineList,
            Self::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Self::Triangle => wgpu::PrimitiveTopology::TriangleList,
            Self::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }

    /// Number of primitives assembled from `vertices` vertices.
    #[must_use]
    pub fn primitive_count(self, vertices: usize) -> usize {
        match self {
            Self::Point => vertices,
            Self::Line => vertices / 2,
            Self::LineStrip => vertices.saturating_sub(1),
            Self::Triangle => vertices / 3,
            Self::TriangleStrip => vertices.saturating_sub(2),
        }
    }

    fn check_vertex_count(self, vertices: usize) -> Option<String> {
        match self {
            Self::Line if vertices % 2 != 0 => Some(format!(
                "line node has {vertices} vertices, expected a multiple of 2"
            )),
            Self::Triangle if vertices % 3 != 0 => Some(format!(
                "triangle node has {vertices} vertices, expected a multiple of 3"
            )),
            Self::LineStrip if vertices < 2 => Some(format!(
                "line strip node needs at least 2 vertices, has {vertices}"
            )),
            Self::TriangleStrip if vertices < 3 => Some(format!(
                "triangle strip node needs at least 3 vertices, has {vertices}"
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown primitive topology name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTopologyError(String);

impl fmt::Display for ParseTopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown primitive type '{}' (expected point, line, line strip, \
             triangle or triangle strip)",
            self.0
        )
    }
}

impl std::error::Error for ParseTopologyError {}

impl FromStr for Topology {
    type Err = ParseTopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        Self::ALL
            .into_iter()
            .find(|t| t.name() == normalized)
            .ok_or_else(|| ParseTopologyError(s.to_owned()))
    }
}

/// RGBA8 image sampled by a node's fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl NodeImage {
    /// Wrap raw RGBA8 pixels (row-major, 4 bytes per pixel).
    #[must_use]
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Two-color checkerboard of `size`×`size` pixels with `cells` squares
    /// per side.
    #[must_use]
    pub fn checkerboard(
        size: u32,
        cells: u32,
        dark: [u8; 4],
        light: [u8; 4],
    ) -> Self {
        let cell = (size / cells.max(1)).max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let texel = if (x / cell + y / cell) % 2 == 0 {
                    dark
                } else {
                    light
                };
                rgba.extend_from_slice(&texel);
            }
        }
        Self::new(size, size, rgba)
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data.
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    fn check(&self) -> Option<String> {
        if self.width == 0 || self.height == 0 {
            return Some(format!(
                "image has zero size ({}x{})",
                self.width, self.height
            ));
        }
        let expected = self.width as usize * self.height as usize * 4;
        (self.rgba.len() != expected).then(|| {
            format!(
                "image data has {} bytes, expected {expected} for {}x{} RGBA",
                self.rgba.len(),
                self.width,
                self.height
            )
        })
    }
}

/// One drawable node of a scene snapshot.
///
/// Vertex, color and normal data are flat `f32` streams with
/// [`FLOATS_PER_VERTEX`] floats per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    vertices: Vec<f32>,
    colors: Vec<f32>,
    normals: Option<Vec<f32>>,
    position: Vec3,
    rotation_axis: Vec3,
    rotation_angle: f32,
    topology: Topology,
    image: Option<NodeImage>,
}

impl SceneNode {
    /// Triangle-list node at the origin with no rotation.
    #[must_use]
    pub fn new(vertices: Vec<f32>, colors: Vec<f32>) -> Self {
        Self {
            vertices,
            colors,
            normals: None,
            position: Vec3::ZERO,
            rotation_axis: Vec3::Z,
            rotation_angle: 0.0,
            topology: Topology::Triangle,
            image: None,
        }
    }

    /// Set the primitive topology.
    #[must_use]
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Set the node position.
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the node rotation as axis + angle (radians).
    #[must_use]
    pub fn with_rotation(mut self, axis: Vec3, angle: f32) -> Self {
        self.rotation_axis = axis;
        self.rotation_angle = angle;
        self
    }

    /// Attach per-vertex normals.
    #[must_use]
    pub fn with_normals(mut self, normals: Vec<f32>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Attach a texture image.
    #[must_use]
    pub fn with_image(mut self, image: NodeImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Move the node.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Change the node rotation.
    pub fn set_rotation(&mut self, axis: Vec3, angle: f32) {
        self.rotation_axis = axis;
        self.rotation_angle = angle;
    }

    /// Change the primitive topology.
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Flat vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Flat RGBA colors.
    #[must_use]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Flat normals, if any.
    #[must_use]
    pub fn normals(&self) -> Option<&[f32]> {
        self.normals.as_deref()
    }

    /// Whether the node carries normals.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Node position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation as (axis, angle in radians).
    #[must_use]
    pub fn rotation(&self) -> (Vec3, f32) {
        (self.rotation_axis, self.rotation_angle)
    }

    /// Primitive topology.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Texture image, if any.
    #[must_use]
    pub fn image(&self) -> Option<&NodeImage> {
        self.image.as_ref()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    /// Number of primitives assembled by the topology.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.topology.primitive_count(self.vertex_count())
    }

    /// Return an empty string if this node can be drawn. Otherwise return a
    /// message describing the problem.
    #[must_use]
    pub fn validate(&self) -> String {
        self.problem().unwrap_or_default()
    }

    fn problem(&self) -> Option<String> {
        if self.vertices.is_empty() {
            return Some("node has no vertices".to_owned());
        }
        if self.vertices.len() % FLOATS_PER_VERTEX != 0 {
            return Some(format!(
                "vertex data has {} floats, expected a multiple of \
                 {FLOATS_PER_VERTEX}",
                self.vertices.len()
            ));
        }
        if self.colors.len() != self.vertices.len() {
            return Some(format!(
                "color data has {} floats, expected {} to match the vertices",
                self.colors.len(),
                self.vertices.len()
            ));
        }
        if let Some(normals) = &self.normals {
            if normals.len() != self.vertices.len() {
                return Some(format!(
                    "normal data has {} floats, expected {} to match the \
                     vertices",
                    normals.len(),
                    self.vertices.len()
                ));
            }
        }
        if !self.position.is_finite()
            || !self.rotation_axis.is_finite()
            || !self.rotation_angle.is_finite()
        {
            return Some("node position or rotation is not finite".to_owned());
        }
        if let Some(problem) =
            self.topology.check_vertex_count(self.vertex_count())
        {
            return Some(problem);
        }
        self.image.as_ref().and_then(NodeImage::check)
    }
}
