//! Surface materials.
//!
//! A single flat struct covers the four shading models the scene uses.
//! `Basic` is unlit, `Phong` and `Standard` are lit (the renderer maps
//! roughness/metalness onto a Blinn-Phong approximation), and `Shadow`
//! marks shadow catchers that only contribute when shadow maps exist.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::assets::TextureHandle;
use crate::utils::color::hex_to_rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Basic,
    Phong,
    Standard,
    Shadow,
}

impl MaterialKind {
    #[must_use]
    pub fn is_lit(self) -> bool {
        matches!(self, Self::Phong | Self::Standard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Blending {
    #[default]
    Normal,
    Additive,
}

#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,

    pub color: Vec3,
    pub opacity: f32,
    pub transparent: bool,

    pub emissive: Vec3,
    pub emissive_intensity: f32,

    // Phong
    pub shininess: f32,
    pub specular: Vec3,

    // Standard
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,

    pub side: Side,
    pub blending: Blending,
    pub depth_write: bool,

    pub map: Option<TextureHandle>,
    pub map_repeat: Vec2,

    pub visible: bool,

    version: u64,
}

impl Material {
    fn with_kind(kind: MaterialKind, color: u32) -> Self {
        Self {
            name: String::new(),
            kind,
            color: hex_to_rgb(color),
            opacity: 1.0,
            transparent: false,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            shininess: 30.0,
            specular: hex_to_rgb(0x111111),
            roughness: 1.0,
            metalness: 0.0,
            env_map_intensity: 0.5,
            side: Side::Front,
            blending: Blending::Normal,
            depth_write: true,
            map: None,
            map_repeat: Vec2::ONE,
            visible: true,
            version: 0,
        }
    }

    #[must_use]
    pub fn new_basic(color: u32) -> Self {
        Self::with_kind(MaterialKind::Basic, color)
    }

    #[must_use]
    pub fn new_phong(color: u32) -> Self {
        Self::with_kind(MaterialKind::Phong, color)
    }

    #[must_use]
    pub fn new_standard(color: u32) -> Self {
        Self::with_kind(MaterialKind::Standard, color)
    }

    /// Shadow catcher, transparent black with the given opacity.
    #[must_use]
    pub fn new_shadow(opacity: f32) -> Self {
        let mut m = Self::with_kind(MaterialKind::Shadow, 0x000000);
        m.opacity = opacity;
        m.transparent = true;
        m
    }

    // === Builders ===

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    #[must_use]
    pub fn with_emissive(mut self, emissive: u32, intensity: f32) -> Self {
        self.emissive = hex_to_rgb(emissive);
        self.emissive_intensity = intensity;
        self
    }

    #[must_use]
    pub fn with_emissive_rgb(mut self, emissive: Vec3, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    #[must_use]
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    #[must_use]
    pub fn with_specular(mut self, specular: u32) -> Self {
        self.specular = hex_to_rgb(specular);
        self
    }

    /// Sets roughness and metalness; environment intensity follows the
    /// metalness so that polished metals pick up more of the sky.
    #[must_use]
    pub fn with_pbr(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self.env_map_intensity = if metalness > 0.5 { 1.0 } else { 0.5 };
        self
    }

    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.blending = blending;
        if blending == Blending::Additive {
            self.transparent = true;
            self.depth_write = false;
        }
        self
    }

    #[must_use]
    pub fn with_map(mut self, map: TextureHandle) -> Self {
        self.map = Some(map);
        self
    }

    #[must_use]
    pub fn with_map_repeat(mut self, repeat: Vec2) -> Self {
        self.map_repeat = repeat;
        self
    }

    #[must_use]
    pub fn with_color_rgb(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    // === Runtime mutation ===

    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
        self.touch();
    }

    pub fn set_color_hex(&mut self, color: u32) {
        self.set_color(hex_to_rgb(color));
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.touch();
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bumps the version so GPU-side caches know to refresh.
    #[inline]
    pub fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Whether this material goes through the blended pass.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.transparent || self.blending == Blending::Additive
    }
}
