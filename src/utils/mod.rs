//! Utility Module
//!
//! - [`OrbitControls`]: damped orbit camera controller
//! - [`color`]: hex / HSL to linear RGB conversion

pub mod color;
pub mod orbit_control;

pub use orbit_control::OrbitControls;
