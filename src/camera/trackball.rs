//! Quaternion trackball.
//!
//! Pointer positions are mapped onto a virtual hemisphere facing the
//! viewer. A drag rotates the scene by the arc between the anchor point
//! (captured at pointer-down) and the current point, composed onto the
//! orientation captured with the anchor.

use std::time::Duration;

use glam::{Mat4, Quat, Vec2, Vec3};

use super::core::Viewport;
use crate::animation::{EasingScheduler, SchedulerConfig};
use crate::options::{AnimationOptions, CameraOptions};

/// Callback fired after every orientation change.
pub type ChangeListener = Box<dyn FnMut(Quat)>;

/// Vectors shorter than this are treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Trackball camera: orientation, zoom distance and the reset animation.
pub struct TrackballCamera {
    orientation: Quat,
    anchor: Vec3,
    anchored_orientation: Quat,
    viewport: Viewport,
    /// Trackball radius as a fraction of the shorter viewport side.
    radius_factor: f32,
    zoom: f32,
    zoom_min: f32,
    zoom_max: f32,
    zoom_speed: f32,
    reset: EasingScheduler,
    listeners: Vec<ChangeListener>,
}

impl Default for TrackballCamera {
    fn default() -> Self {
        Self::new(&CameraOptions::default(), &AnimationOptions::default())
    }
}

impl TrackballCamera {
    /// Create a camera at the neutral orientation.
    #[must_use]
    pub fn new(camera: &CameraOptions, animation: &AnimationOptions) -> Self {
        let zoom_min = camera.zoom_min.max(f32::EPSILON);
        let zoom_max = camera.zoom_max.max(zoom_min);
        Self {
            orientation: Quat::IDENTITY,
            anchor: Vec3::Z,
            anchored_orientation: Quat::IDENTITY,
            viewport: Viewport::default(),
            radius_factor: camera.trackball_radius,
            zoom: camera.zoom_initial.clamp(zoom_min, zoom_max),
            zoom_min,
            zoom_max,
            zoom_speed: camera.zoom_speed,
            reset: EasingScheduler::new(animation.reset_scheduler()),
            listeners: Vec::new(),
        }
    }

    /// Apply updated options. Orientation is kept; zoom is re-clamped.
    pub fn apply_options(
        &mut self,
        camera: &CameraOptions,
        animation: &AnimationOptions,
    ) {
        self.zoom_min = camera.zoom_min.max(f32::EPSILON);
        self.zoom_max = camera.zoom_max.max(self.zoom_min);
        self.zoom = self.zoom.clamp(self.zoom_min, self.zoom_max);
        self.zoom_speed = camera.zoom_speed;
        self.radius_factor = camera.trackball_radius;
        let config: SchedulerConfig = animation.reset_scheduler();
        if *self.reset.config() != config {
            self.reset.set_config(config);
        }
    }

    /// Register a callback fired after each orientation mutation.
    pub fn on_change(&mut self, listener: impl FnMut(Quat) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Current orientation (unit quaternion).
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Current orientation as a rotation matrix.
    #[must_use]
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }

    /// Hemisphere point captured by the last [`set_anchor`](Self::set_anchor).
    #[must_use]
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Viewport used for pointer mapping.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the viewport after a surface resize.
    pub fn update_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Camera distance from the scene origin.
    #[must_use]
    pub fn zoom_distance(&self) -> f32 {
        self.zoom
    }

    /// Allowed zoom range.
    #[must_use]
    pub fn zoom_range(&self) -> (f32, f32) {
        (self.zoom_min, self.zoom_max)
    }

    /// Scale the zoom distance by `1 + delta * zoom_speed`, clamped to the
    /// zoom range. Non-finite deltas are ignored. Returns the new distance.
    pub fn scroll(&mut self, delta: f32) -> f32 {
        if delta.is_finite() {
            let scaled = self.zoom * (1.0 + delta * self.zoom_speed);
            self.zoom = scaled.clamp(self.zoom_min, self.zoom_max);
        }
        self.zoom
    }

    /// Map a pointer position (physical pixels, origin top-left, y down)
    /// onto the unit hemisphere facing the viewer.
    ///
    /// Inside the trackball radius the height is `R - |p|`; outside, the
    /// point is clamped to the rim at zero height.
    #[must_use]
    pub fn project_to_hemisphere(&self, point: Vec2) -> Vec3 {
        let radius = self.radius_factor * self.viewport.min_side();
        let center = self.viewport.center();
        let mut planar = Vec2::new(point.x - center.x, center.y - point.y);
        let distance = planar.length();

        let z = if distance < radius {
            radius - distance
        } else {
            if distance > DEGENERATE_EPSILON {
                planar *= radius / distance;
            }
            0.0
        };

        planar.extend(z).try_normalize().unwrap_or(Vec3::Z)
    }

    /// Capture the hemisphere point under `point` and the current
    /// orientation. Cancels a running reset animation.
    pub fn set_anchor(&mut self, point: Vec2) {
        if self.reset.cancel() {
            log::debug!("reset animation superseded by drag");
        }
        self.anchor = self.project_to_hemisphere(point);
        self.anchored_orientation = self.orientation;
    }

    /// Rotate by the arc from the anchor to `point`, composed onto the
    /// anchored orientation. Returns the incremental rotation.
    ///
    /// Degenerate drags (no movement, or antipodal points) yield the
    /// identity rotation.
    pub fn drag_to(&mut self, point: Vec2) -> Quat {
        let current = self.project_to_hemisphere(point);
        let rotation = arc_rotation(self.anchor, current);
        self.orientation = (rotation * self.anchored_orientation).normalize();
        self.notify();
        rotation
    }

    /// Ease the orientation back to identity over the reset animation.
    /// Restarts the animation if one is already running.
    pub fn animate_to_identity(&mut self) {
        self.anchored_orientation = self.orientation;
        self.reset.start();
    }

    /// Whether the reset animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.reset.is_running()
    }

    /// Advance the reset animation by `dt`, firing the change notification
    /// once per step. Returns `true` while the animation is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Self {
            reset,
            orientation,
            anchored_orientation,
            listeners,
            ..
        } = self;
        let from = *anchored_orientation;

        reset.advance(dt, |tick| {
            *orientation = if tick.last {
                Quat::IDENTITY
            } else {
                from.slerp(Quat::IDENTITY, tick.t).normalize()
            };
            for listener in listeners.iter_mut() {
                listener(*orientation);
            }
        })
    }

    fn notify(&mut self) {
        let orientation = self.orientation;
        for listener in &mut self.listeners {
            listener(orientation);
        }
    }
}

/// Rotation carrying hemisphere point `from` to `to`.
///
/// The quaternion angle is twice the arc angle: a drag across the full
/// hemisphere turns the scene a full half-turn.
fn arc_rotation(from: Vec3, to: Vec3) -> Quat {
    let axis = from.cross(to);
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    match axis.try_normalize() {
        Some(axis) if angle > DEGENERATE_EPSILON => {
            Quat::from_axis_angle(axis, 2.0 * angle)
        }
        _ => Quat::IDENTITY,
    }
}
