//! Desk scene configuration.
//!
//! Every field has a default matching the published page, so an empty JSON
//! object is a valid configuration.

use std::f32::consts::PI;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::desk::layout::CameraPlacement;
use crate::errors::{DeskError, Result};
use crate::utils::OrbitControls;

/// Orbit camera limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar_angle: f32,
    pub min_azimuth_angle: f32,
    pub max_azimuth_angle: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.1,
            min_distance: 0.3,
            max_distance: 3.0,
            max_polar_angle: PI / 1.5,
            min_azimuth_angle: -PI,
            max_azimuth_angle: PI,
        }
    }
}

impl OrbitConfig {
    /// Rejects limit pairs whose lower bound exceeds the upper one.
    pub fn validate(&self) -> Result<()> {
        if self.min_distance > self.max_distance {
            return Err(DeskError::InvalidConfig(format!(
                "orbit.min_distance {} exceeds orbit.max_distance {}",
                self.min_distance, self.max_distance
            )));
        }
        if self.min_azimuth_angle > self.max_azimuth_angle {
            return Err(DeskError::InvalidConfig(format!(
                "orbit.min_azimuth_angle {} exceeds orbit.max_azimuth_angle {}",
                self.min_azimuth_angle, self.max_azimuth_angle
            )));
        }
        Ok(())
    }

    /// Orbit controls reproducing `placement`, with these limits applied.
    /// Distance limits carried by the placement win over the configured ones.
    #[must_use]
    pub fn controls(&self, placement: &CameraPlacement) -> OrbitControls {
        let mut controls = OrbitControls::looking_from(placement.position, placement.target);
        controls.enable_damping = true;
        controls.damping_factor = self.damping_factor;
        let (min, max) = placement
            .distance_limits
            .unwrap_or((self.min_distance, self.max_distance));
        controls.min_distance = min;
        controls.max_distance = max;
        controls.max_polar_angle = self.max_polar_angle;
        controls.min_azimuth_angle = self.min_azimuth_angle;
        controls.max_azimuth_angle = self.max_azimuth_angle;
        controls
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// First day of the career, used for the "years of experience" label.
    pub career_start: NaiveDate,

    /// Adds axes and grid helpers to the scene.
    pub debug_helpers: bool,

    /// Vertical field of view in degrees.
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,

    /// Seconds for hover highlight and reset tweens.
    pub hover_duration: f32,

    /// Uniform scale of the whole setup on desktop and on mobile.
    pub base_scale: f32,
    pub mobile_scale: f32,

    pub orbit: OrbitConfig,

    /// Seed for the procedural fabric noise and random key presses.
    pub seed: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            career_start: crate::page::career_start(),
            debug_helpers: false,
            camera_fov: 70.0,
            camera_near: 0.1,
            camera_far: 1000.0,
            hover_duration: 0.3,
            base_scale: 0.4,
            mobile_scale: 0.3,
            orbit: OrbitConfig::default(),
            seed: 0x00C0_DE5E,
        }
    }
}

impl DeskConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.orbit.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded desk config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
