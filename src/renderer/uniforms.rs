//! GPU-side uniform layouts. Each struct mirrors a WGSL struct in
//! `shaders/forward.wgsl` field for field.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::resources::{Material, MaterialKind};

pub const MAX_POINT_LIGHTS: usize = 8;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct PointLightUniform {
    /// xyz world position, w range (0 = unlimited)
    pub position: [f32; 4],
    /// rgb premultiplied by intensity
    pub color: [f32; 4],
}

/// Group 0: camera and lights, written once per frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_projection: [[f32; 4]; 4],
    /// xyz camera position, w = 1 when the shader must encode to sRGB
    pub camera_position: [f32; 4],
    pub ambient: [f32; 4],
    pub environment: [f32; 4],
    /// xyz direction towards the light, w = 1 when present
    pub directional_direction: [f32; 4],
    pub directional_color: [f32; 4],
    /// x = number of point lights
    pub counts: [u32; 4],
    pub point_lights: [PointLightUniform; MAX_POINT_LIGHTS],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl FrameUniforms {
    pub fn set_camera(&mut self, view_projection: Mat4, position: Vec3, encode_srgb: bool) {
        self.view_projection = view_projection.to_cols_array_2d();
        self.camera_position = [position.x, position.y, position.z, if encode_srgb { 1.0 } else { 0.0 }];
    }

    /// Adds a point light; returns `false` once the array is full.
    pub fn push_point_light(&mut self, position: Vec3, range: f32, color: Vec3) -> bool {
        let index = self.counts[0] as usize;
        let Some(slot) = self.point_lights.get_mut(index) else {
            return false;
        };
        *slot = PointLightUniform {
            position: [position.x, position.y, position.z, range],
            color: [color.x, color.y, color.z, 0.0],
        };
        self.counts[0] += 1;
        true
    }
}

/// Group 1: one per material.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct MaterialUniforms {
    /// rgb, a = opacity
    pub color: [f32; 4],
    /// rgb premultiplied by emissive intensity
    pub emissive: [f32; 4],
    /// rgb, w = shininess
    pub specular: [f32; 4],
    /// roughness, metalness, env intensity, shading model
    pub params: [f32; 4],
    /// repeat.xy, z = 1 when a map is bound
    pub map: [f32; 4],
}

impl MaterialUniforms {
    #[must_use]
    pub fn from_material(material: &Material, has_map: bool) -> Self {
        let model = match material.kind {
            MaterialKind::Basic | MaterialKind::Shadow => 0.0,
            MaterialKind::Phong => 1.0,
            MaterialKind::Standard => 2.0,
        };
        let c = material.color;
        let e = material.emissive * material.emissive_intensity;
        let s = material.specular;
        Self {
            color: [c.x, c.y, c.z, material.opacity],
            emissive: [e.x, e.y, e.z, 0.0],
            specular: [s.x, s.y, s.z, material.shininess],
            params: [material.roughness, material.metalness, material.env_map_intensity, model],
            map: [
                material.map_repeat.x,
                material.map_repeat.y,
                if has_map { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Group 2: per draw, addressed with a dynamic offset.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix (upper 3×3 used).
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniforms {
    #[must_use]
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
        }
    }
}

/// Stride between objects in the dynamic uniform buffer.
pub const OBJECT_STRIDE: u64 = 256;
