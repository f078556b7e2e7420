//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`DeskError`] covers:
//! - GPU initialization failures
//! - Window and event loop errors
//! - Page data errors (malformed skill attributes, impossible dates)
//! - Configuration loading errors
//!
//! # Usage
//!
//! Fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, DeskError>`.
//!
//! ```rust,ignore
//! use coder_desk::errors::Result;
//! use coder_desk::desk::DeskConfig;
//!
//! fn load() -> Result<DeskConfig> {
//!     DeskConfig::from_json_str("{}")
//! }
//! ```
//!
//! DOM lookups in the page glue are deliberately not errors: a missing
//! element is logged with `log::warn!` and the remaining glue keeps running.

use thiserror::Error;

/// The main error type for the desk scene and its page glue.
#[derive(Error, Debug)]
pub enum DeskError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the presentation surface.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// Window system error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Page Data Errors
    // ========================================================================
    /// A required DOM element was missing.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A `data-level` / `data-total` attribute could not be parsed.
    #[error("Invalid skill attribute `{attribute}`: {value:?}")]
    InvalidSkillAttribute {
        /// Attribute name
        attribute: &'static str,
        /// The raw attribute value
        value: String,
    },

    /// A calendar date could not be constructed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    // ========================================================================
    // Configuration & I/O Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// WASM-specific error.
    #[cfg(target_arch = "wasm32")]
    #[error("WASM error: {0}")]
    WasmError(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DeskError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        DeskError::WasmError(format!("{err:?}"))
    }
}

/// Alias for `Result<T, DeskError>`.
pub type Result<T> = std::result::Result<T, DeskError>;
