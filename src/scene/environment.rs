//! Image-based lighting stand-in.
//!
//! The reflective materials sample a uniform environment: a grey room with no
//! features, so a single radiance color is all a prefiltered map would hold.

use glam::Vec3;

use crate::utils::color::hex_to_rgb;

#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// Linear radiance of the surroundings.
    pub color: Vec3,
    pub intensity: f32,
    /// Disables the term entirely when false.
    pub enabled: bool,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: Vec3::ZERO,
            intensity: 1.0,
            enabled: false,
        }
    }

    /// Uniform environment of the given (sRGB hex) color.
    #[must_use]
    pub fn uniform(color: u32) -> Self {
        Self {
            color: hex_to_rgb(color),
            intensity: 1.0,
            enabled: true,
        }
    }

    /// Radiance actually fed to the shader.
    #[must_use]
    pub fn radiance(&self) -> Vec3 {
        if self.enabled {
            self.color * self.intensity
        } else {
            Vec3::ZERO
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
