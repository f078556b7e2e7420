//! Renderer Configuration Tests
//!
//! Tests for:
//! - RenderSettings defaults, JSON loading and derived wgpu state
//! - PipelineKey derivation from materials (culling, blending, depth writes)
//! - Uniform packing for frames, materials and objects
//!
//! Nothing here needs a GPU device.

use glam::{Mat4, Vec2, Vec3};

use coder_desk::renderer::pipeline::PipelineKey;
use coder_desk::renderer::settings::{PowerPreference, RenderSettings};
use coder_desk::renderer::uniforms::{
    FrameUniforms, MaterialUniforms, ObjectUniforms, MAX_POINT_LIGHTS, OBJECT_STRIDE,
};
use coder_desk::resources::material::{Blending, Material, Side};

// ============================================================================
// Settings Tests
// ============================================================================

#[test]
fn default_settings() {
    let settings = RenderSettings::default();
    assert!(settings.vsync);
    assert_eq!(settings.msaa_samples, 4);
    assert_eq!(settings.sample_count(), 4);
    assert_eq!(settings.power_preference, PowerPreference::HighPerformance);
    // transparent so the page shows through
    assert_eq!(settings.clear_color[3], 0.0);
}

#[test]
fn unsupported_sample_counts_fall_back() {
    for samples in [0, 1, 2, 8] {
        let settings = RenderSettings {
            msaa_samples: samples,
            ..Default::default()
        };
        assert_eq!(settings.sample_count(), 1, "{samples} samples");
    }
}

#[test]
fn present_mode_follows_vsync() {
    let mut settings = RenderSettings::default();
    assert_eq!(settings.present_mode(), wgpu::PresentMode::AutoVsync);
    settings.vsync = false;
    assert_eq!(settings.present_mode(), wgpu::PresentMode::AutoNoVsync);
}

#[test]
fn settings_from_partial_json() {
    let settings = RenderSettings::from_json_str(r#"{ "vsync": false, "power_preference": "LowPower" }"#).unwrap();
    assert!(!settings.vsync);
    assert_eq!(settings.power_preference, PowerPreference::LowPower);
    assert_eq!(settings.msaa_samples, 4);
    assert!(RenderSettings::from_json_str(r#"{ "vsync": 3 }"#).is_err());
    assert!(RenderSettings::from_json_str("nope").is_err());
}

#[test]
fn clear_color_converts() {
    let settings = RenderSettings {
        clear_color: [0.1, 0.2, 0.3, 1.0],
        ..Default::default()
    };
    let c = settings.wgpu_clear_color();
    assert_eq!((c.r, c.g, c.b, c.a), (0.1, 0.2, 0.3, 1.0));
}

// ============================================================================
// Pipeline Key Tests
// ============================================================================

#[test]
fn opaque_front_material() {
    let key = PipelineKey::from_material(&Material::new_phong(0x333333));
    assert_eq!(key, PipelineKey::empty());
    assert_eq!(key.cull_mode(), Some(wgpu::Face::Back));
    assert!(key.blend_state().is_none());
}

#[test]
fn transparent_material_blends_without_depth_write() {
    let key = PipelineKey::from_material(&Material::new_standard(0x111111).with_opacity(0.6));
    assert!(key.contains(PipelineKey::TRANSPARENT | PipelineKey::NO_DEPTH_WRITE));
    assert_eq!(key.blend_state(), Some(wgpu::BlendState::ALPHA_BLENDING));
}

#[test]
fn additive_material() {
    let material = Material::new_basic(0xffffff).with_blending(Blending::Additive);
    let key = PipelineKey::from_material(&material);
    assert!(key.contains(PipelineKey::ADDITIVE));
    let blend = key.blend_state().unwrap();
    assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::One);
}

#[test]
fn side_selects_cull_mode() {
    let back = PipelineKey::from_material(&Material::new_basic(0).with_side(Side::Back));
    let double = PipelineKey::from_material(&Material::new_basic(0).with_side(Side::Double));
    assert_eq!(back.cull_mode(), Some(wgpu::Face::Front));
    assert_eq!(double.cull_mode(), None);
}

#[test]
fn disabled_depth_write() {
    let mut material = Material::new_basic(0);
    material.depth_write = false;
    let key = PipelineKey::from_material(&material);
    assert!(key.contains(PipelineKey::NO_DEPTH_WRITE));
    assert!(!key.contains(PipelineKey::TRANSPARENT));
}

// ============================================================================
// Uniform Tests
// ============================================================================

#[test]
fn point_lights_cap_at_max() {
    let mut frame = FrameUniforms::default();
    for i in 0..MAX_POINT_LIGHTS {
        assert!(frame.push_point_light(Vec3::splat(i as f32), 1.0, Vec3::ONE));
    }
    assert!(!frame.push_point_light(Vec3::ZERO, 1.0, Vec3::ONE));
    assert_eq!(frame.counts[0] as usize, MAX_POINT_LIGHTS);
    assert_eq!(frame.point_lights[3].position, [3.0, 3.0, 3.0, 1.0]);
}

#[test]
fn camera_flag_marks_srgb_encoding() {
    let mut frame = FrameUniforms::default();
    frame.set_camera(Mat4::IDENTITY, Vec3::new(1.0, 2.0, 3.0), true);
    assert_eq!(frame.camera_position, [1.0, 2.0, 3.0, 1.0]);
    frame.set_camera(Mat4::IDENTITY, Vec3::ZERO, false);
    assert_eq!(frame.camera_position[3], 0.0);
}

#[test]
fn material_uniforms_pack_fields() {
    let material = Material::new_standard(0xffffff)
        .with_opacity(0.5)
        .with_pbr(0.3, 0.7)
        .with_emissive(0xffffff, 2.0)
        .with_map_repeat(Vec2::new(10.0, 10.0));
    let u = MaterialUniforms::from_material(&material, true);

    assert_eq!(u.color[3], 0.5);
    assert_eq!(u.emissive[0], 2.0);
    assert_eq!(&u.params[..2], &[0.3, 0.7]);
    assert_eq!(u.params[3], 2.0);
    assert_eq!(u.map, [10.0, 10.0, 1.0, 0.0]);

    let basic = MaterialUniforms::from_material(&Material::new_basic(0), false);
    assert_eq!(basic.params[3], 0.0);
    assert_eq!(basic.map[2], 0.0);
}

#[test]
fn object_normal_matrix_undoes_scale() {
    let object = ObjectUniforms::new(Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)));
    assert_eq!(object.model[0][0], 2.0);
    assert!((object.normal[0][0] - 0.5).abs() < 1e-6);
}

#[test]
fn uniform_sizes_fit_their_slots() {
    assert!(std::mem::size_of::<ObjectUniforms>() as u64 <= OBJECT_STRIDE);
    assert_eq!(std::mem::size_of::<MaterialUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
}
