use glam::Vec3;

use crate::utils::color::hex_to_rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel light shining from the node's position towards `target`
    /// (world space).
    Directional { target: Vec3 },
    /// Omni light. Contribution fades linearly to zero at `range`;
    /// a range of zero means unlimited.
    Point { range: f32 },
}

#[derive(Debug, Clone)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,

    /// Kept as scene data; the forward renderer has no shadow pass.
    pub cast_shadows: bool,
}

impl Light {
    #[must_use]
    pub fn new_ambient(color: u32, intensity: f32) -> Self {
        Self::with_kind(LightKind::Ambient, color, intensity)
    }

    #[must_use]
    pub fn new_directional(color: u32, intensity: f32) -> Self {
        Self::with_kind(LightKind::Directional { target: Vec3::ZERO }, color, intensity)
    }

    #[must_use]
    pub fn new_point(color: u32, intensity: f32, range: f32) -> Self {
        Self::with_kind(LightKind::Point { range }, color, intensity)
    }

    fn with_kind(kind: LightKind, color: u32, intensity: f32) -> Self {
        Self {
            color: hex_to_rgb(color),
            intensity,
            kind,
            cast_shadows: false,
        }
    }

    #[must_use]
    pub fn with_shadows(mut self, cast: bool) -> Self {
        self.cast_shadows = cast;
        self
    }
}
