//! Application layer
//!
//! - [`input`]: platform-agnostic pointer state
//! - [`winit`]: windowed app framework (feature `winit`)
//! - `web`: browser page glue (wasm32 only)

pub mod input;

#[cfg(feature = "winit")]
pub mod winit;

#[cfg(target_arch = "wasm32")]
pub mod web;
