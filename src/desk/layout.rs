//! Device-dependent framing.
//!
//! The container width picks the initial camera framing; the window width
//! decides whether the compact mobile view is used. The mobile view is
//! re-evaluated on every resize but only applied when it flips.

use glam::Vec3;

/// Window widths at or below this use the mobile view.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

const PHONE_MAX_WIDTH: f32 = 480.0;
const TABLET_MAX_WIDTH: f32 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Phone,
    Tablet,
    Desktop,
}

impl DeviceClass {
    /// Classifies a container width in CSS pixels.
    #[must_use]
    pub fn from_width(width: f32) -> Self {
        if width < PHONE_MAX_WIDTH {
            Self::Phone
        } else if width < TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    #[must_use]
    pub fn framing(self) -> CameraFraming {
        let target = Vec3::new(0.0, 0.3, 0.0);
        let (position, min_distance) = match self {
            Self::Phone => (Vec3::new(0.0, 0.7, 1.2), 0.8),
            Self::Tablet => (Vec3::new(0.0, 0.6, 1.0), 0.6),
            Self::Desktop => (Vec3::new(0.0, 0.6, 0.8), 0.2),
        };
        CameraFraming {
            position,
            target,
            min_distance,
            max_distance: 2.5,
        }
    }
}

/// Where the camera sits and how far the orbit controls may zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub position: Vec3,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
}

#[must_use]
pub fn is_mobile(window_width: f32) -> bool {
    window_width <= MOBILE_BREAKPOINT
}

/// Setup scale and camera pose for one side of the mobile switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobileView {
    pub scale: f32,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
}

impl MobileView {
    #[must_use]
    pub fn new(mobile: bool, base_scale: f32, mobile_scale: f32) -> Self {
        let camera_target = Vec3::new(0.0, 0.6, 0.0);
        if mobile {
            Self {
                scale: mobile_scale,
                camera_position: Vec3::new(0.0, 1.2, 2.2),
                camera_target,
            }
        } else {
            Self {
                scale: base_scale,
                camera_position: Vec3::new(0.0, 1.2, 2.0),
                camera_target,
            }
        }
    }
}

/// Camera move requested by a layout change. Distance limits are only set
/// by the initial device framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPlacement {
    pub position: Vec3,
    pub target: Vec3,
    pub distance_limits: Option<(f32, f32)>,
}

impl From<CameraFraming> for CameraPlacement {
    fn from(f: CameraFraming) -> Self {
        Self {
            position: f.position,
            target: f.target,
            distance_limits: Some((f.min_distance, f.max_distance)),
        }
    }
}
