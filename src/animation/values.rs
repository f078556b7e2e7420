use glam::Vec3;

pub trait Interpolatable: Copy + Clone + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

/// A property value a tween can drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimValue {
    Scalar(f32),
    Color(Vec3),
}

impl AnimValue {
    /// Interpolates between two values of the same kind. Mismatched kinds
    /// snap to `end`.
    #[must_use]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        match (start, end) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(f32::interpolate_linear(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(Vec3::interpolate_linear(a, b, t)),
            _ => end,
        }
    }

    /// Component-wise sum, used for relative (`by`) tweens.
    #[must_use]
    pub fn offset(self, delta: Self) -> Self {
        match (self, delta) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a + b),
            (Self::Color(a), Self::Color(b)) => Self::Color(a + b),
            _ => self,
        }
    }

    #[must_use]
    pub fn as_scalar(self) -> Option<f32> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Color(_) => None,
        }
    }

    #[must_use]
    pub fn as_color(self) -> Option<Vec3> {
        match self {
            Self::Color(v) => Some(v),
            Self::Scalar(_) => None,
        }
    }
}

impl From<f32> for AnimValue {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec3> for AnimValue {
    fn from(v: Vec3) -> Self {
        Self::Color(v)
    }
}
