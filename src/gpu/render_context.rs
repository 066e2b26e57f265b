//! Window-bound GPU context: device, queue and the presentation surface.

use std::fmt;

use crate::scene::SceneNode;

/// Failure while bringing up the GPU for a window.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused the requested limits.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The surface reports no usable format for this adapter.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "cannot create surface: {e}"),
            Self::AdapterRequest(e) => write!(f, "no adapter for surface: {e}"),
            Self::DeviceRequest(e) => write!(f, "cannot open device: {e}"),
            Self::UnsupportedSurface => {
                f.write_str("surface has no format usable by the adapter")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// Device limits that a node's GPU resources have to fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    /// Largest texture width or height.
    pub max_texture_side: u32,
    /// Largest single buffer, in bytes.
    pub max_buffer_bytes: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::from_limits(&wgpu::Limits::default())
    }
}

impl ResourceLimits {
    /// Limits a device was opened with.
    #[must_use]
    pub fn from_limits(limits: &wgpu::Limits) -> Self {
        Self {
            max_texture_side: limits.max_texture_dimension_2d,
            max_buffer_bytes: limits.max_buffer_size,
        }
    }

    /// Describe the first resource of `node` the device cannot hold, or
    /// `None` if everything fits.
    #[must_use]
    pub fn check(&self, node: &SceneNode) -> Option<String> {
        let streams = [
            ("vertex", Some(node.vertices())),
            ("color", Some(node.colors())),
            ("normal", node.normals()),
        ];
        for (name, data) in streams {
            let Some(data) = data else { continue };
            let bytes = (data.len() * size_of::<f32>()) as u64;
            if bytes > self.max_buffer_bytes {
                return Some(format!(
                    "{name} data is {bytes} bytes, device buffers hold at \
                     most {}",
                    self.max_buffer_bytes
                ));
            }
        }
        let image = node.image()?;
        let side = image.width().max(image.height());
        (side > self.max_texture_side).then(|| {
            format!(
                "image is {}x{}, device textures are at most {max}x{max}",
                image.width(),
                image.height(),
                max = self.max_texture_side
            )
        })
    }
}

/// GPU device and queue bound to one window surface.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    limits: ResourceLimits,
}

impl RenderContext {
    /// Open a device that can present to `window` and configure the surface
    /// at `initial_size` with `present_mode`.
    ///
    /// The device is opened with the default limits raised to the
    /// adapter's texture resolution.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] if no surface, adapter, device or
    /// surface format is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        present_mode: wgpu::PresentMode,
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Mirage Device"),
                required_limits: wgpu::Limits::default()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;
        let limits = ResourceLimits::from_limits(&device.limits());

        let (width, height) = initial_size;
        let mut config = surface
            .get_default_config(&adapter, width.max(1), height.max(1))
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = present_mode;
        surface.configure(&device, &config);

        let info = adapter.get_info();
        log::info!(
            "{} ({:?}): {:?} surface {}x{}, textures up to {}px",
            info.name,
            info.backend,
            config.format,
            config.width,
            config.height,
            limits.max_texture_side
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            limits,
        })
    }

    /// Color format of the surface.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Resource limits of the device.
    #[must_use]
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Reconfigure the surface at a new size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next surface texture, or `None` when this frame has to be dropped.
    ///
    /// A lost or outdated surface is reconfigured so the following frame
    /// can draw again.
    pub fn acquire(&self) -> Option<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Some(texture),
            Err(
                error @ (wgpu::SurfaceError::Lost
                | wgpu::SurfaceError::Outdated),
            ) => {
                log::debug!("surface {error}, reconfiguring; frame dropped");
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(error) => {
                log::debug!("surface unavailable ({error}); frame dropped");
                None
            }
        }
    }

    /// Encoder for one frame's commands.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Finish `encoder` and queue it.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeImage;

    fn triangle() -> SceneNode {
        SceneNode::new(vec![0.0; 12], vec![1.0; 12])
    }

    #[test]
    fn default_limits_match_wgpu_defaults() {
        let limits = ResourceLimits::default();
        assert_eq!(limits.max_texture_side, 8192);
        assert_eq!(
            limits.max_buffer_bytes,
            wgpu::Limits::default().max_buffer_size
        );
    }

    #[test]
    fn small_node_fits() {
        let node = triangle().with_image(NodeImage::new(2, 2, vec![0; 16]));
        assert_eq!(ResourceLimits::default().check(&node), None);
    }

    #[test]
    fn oversized_image_is_rejected() {
        let node =
            triangle().with_image(NodeImage::new(9000, 1, vec![255; 36_000]));
        assert!(node.validate().is_empty());
        let problem = ResourceLimits::default().check(&node);
        assert_eq!(
            problem.as_deref(),
            Some("image is 9000x1, device textures are at most 8192x8192")
        );
    }

    #[test]
    fn oversized_stream_is_rejected() {
        let limits = ResourceLimits {
            max_texture_side: 8192,
            max_buffer_bytes: 32,
        };
        // 12 floats = 48 bytes
        let problem = limits.check(&triangle());
        assert!(problem.is_some_and(|p| p.starts_with("vertex data is 48")));

        let limits = ResourceLimits {
            max_buffer_bytes: 48,
            ..limits
        };
        assert_eq!(limits.check(&triangle()), None);
        let with_normals = triangle().with_normals(vec![0.0; 16]);
        assert!(limits
            .check(&with_normals)
            .is_some_and(|p| p.starts_with("normal data")));
    }
}
