//! Renderer Settings
//!
//! Configuration of the forward renderer. Everything here is chosen before
//! the GPU is initialized and can be loaded from JSON.
//!
//! ```rust,ignore
//! use coder_desk::renderer::settings::RenderSettings;
//!
//! let settings = RenderSettings {
//!     vsync: false,
//!     msaa_samples: 1,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Depth buffer format used by every pass.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Which GPU to ask for when several are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerPreference {
    LowPower,
    #[default]
    HighPerformance,
}

impl From<PowerPreference> for wgpu::PowerPreference {
    fn from(p: PowerPreference) -> Self {
        match p {
            PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
            PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub power_preference: PowerPreference,

    /// Enables vertical synchronization.
    ///
    /// `true` presents with `AutoVsync`, `false` with `AutoNoVsync`, which
    /// may tear.
    pub vsync: bool,

    /// Samples per pixel. Anything other than 1 or 4 falls back to 1.
    pub msaa_samples: u32,

    /// Clear color in linear RGBA.
    ///
    /// The default is fully transparent so the page shows through the
    /// canvas.
    pub clear_color: [f64; 4],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            power_preference: PowerPreference::HighPerformance,
            vsync: true,
            msaa_samples: 4,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl RenderSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sample count actually used for the color and depth targets.
    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> u32 {
        if self.msaa_samples == 4 { 4 } else { 1 }
    }

    #[must_use]
    pub fn wgpu_clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color { r, g, b, a }
    }

    #[must_use]
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}
