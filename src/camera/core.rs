use glam::{Mat4, Quat, Vec2, Vec3};

/// Size of the drawable area in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels (at least 1).
    pub width: f32,
    /// Height in pixels (at least 1).
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Viewport {
    /// Create a viewport; dimensions are clamped to at least one pixel.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Viewport from integer surface dimensions.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Center point in pixel coordinates.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Length of the shorter side.
    #[must_use]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Perspective projection with a fixed vertical field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Projection {
    /// Projection matrix for the given viewport.
    #[must_use]
    pub fn matrix(&self, viewport: Viewport) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            viewport.aspect(),
            self.znear,
            self.zfar,
        )
    }
}

/// View matrix: pull the camera back by `zoom` along -Z, then apply the
/// trackball orientation to the scene.
#[must_use]
pub fn view_matrix(orientation: Quat, zoom: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -zoom))
        * Mat4::from_quat(orientation)
}

/// Model matrix: translate(position) × rotate(axis, angle).
///
/// A zero-length axis means no rotation.
#[must_use]
pub fn model_matrix(position: Vec3, axis: Vec3, angle: f32) -> Mat4 {
    let rotation = axis
        .try_normalize()
        .map_or(Quat::IDENTITY, |axis| Quat::from_axis_angle(axis, angle));
    Mat4::from_translation(position) * Mat4::from_quat(rotation)
}

/// Per-frame camera matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    /// World → eye transform.
    pub view: Mat4,
    /// Eye → clip transform.
    pub projection: Mat4,
}

impl FrameMatrices {
    /// Build the matrices for one frame.
    #[must_use]
    pub fn new(
        orientation: Quat,
        zoom: f32,
        viewport: Viewport,
        projection: &Projection,
    ) -> Self {
        Self {
            view: view_matrix(orientation, zoom),
            projection: projection.matrix(viewport),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view and projection matrices.
pub struct CameraUniform {
    /// World → eye matrix.
    pub view: [[f32; 4]; 4],
    /// Eye → clip matrix.
    pub proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity matrices.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Update uniform fields from the frame matrices.
    pub fn update(&mut self, matrices: &FrameMatrices) {
        self.view = matrices.view.to_cols_array_2d();
        self.proj = matrices.projection.to_cols_array_2d();
    }
}
