use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::Projection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, trackball and zoom parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Trackball radius as a fraction of the shorter viewport side.
    #[schemars(title = "Trackball Radius", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub trackball_radius: f32,
    /// Camera distance from the scene origin at startup.
    #[schemars(skip)]
    pub zoom_initial: f32,
    /// Closest allowed camera distance.
    #[schemars(skip)]
    pub zoom_min: f32,
    /// Farthest allowed camera distance.
    #[schemars(skip)]
    pub zoom_max: f32,
    /// Relative distance change per scroll unit.
    #[schemars(title = "Zoom Speed", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            trackball_radius: 0.5,
            zoom_initial: 10.0,
            zoom_min: 1.0,
            zoom_max: 100.0,
            zoom_speed: 0.01,
        }
    }
}

impl CameraOptions {
    /// Perspective parameters derived from these options.
    #[must_use]
    pub fn projection(&self) -> Projection {
        Projection {
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
        }
    }
}
