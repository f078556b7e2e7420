//! CPU-side RGBA textures.
//!
//! Procedural textures are painted into an [`image::RgbaImage`] and handed
//! to the renderer, which uploads them once per version.

use glam::Vec2;
use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
}

#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub image: RgbaImage,
    pub wrap: WrapMode,
    /// UV multiplier, applied through the material when sampling.
    pub repeat: Vec2,
    version: u64,
}

impl Texture {
    #[must_use]
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
            wrap: WrapMode::ClampToEdge,
            repeat: Vec2::ONE,
            version: 0,
        }
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: Vec2) -> Self {
        self.wrap = WrapMode::Repeat;
        self.repeat = repeat;
        self
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the pixel data and marks the texture for re-upload.
    pub fn set_image(&mut self, image: RgbaImage) {
        self.image = image;
        self.version = self.version.wrapping_add(1);
    }
}
