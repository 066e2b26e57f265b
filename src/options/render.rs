use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Frame clearing and presentation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render", inline)]
#[serde(default)]
pub struct RenderOptions {
    /// Background color (linear RGBA).
    #[schemars(skip)]
    pub clear_color: [f32; 4],
    /// Wait for vertical blank when presenting.
    #[schemars(title = "VSync")]
    pub vsync: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.8, 0.8, 0.8, 1.0],
            vsync: true,
        }
    }
}

impl RenderOptions {
    /// Clear color as a wgpu color.
    #[must_use]
    pub fn clear(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: f64::from(a),
        }
    }

    /// Present mode matching the vsync setting.
    #[must_use]
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}
