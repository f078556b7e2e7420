//! Per-frame RGB lighting: key caps cycling through hues, pulsing part
//! lights, fan rings and the monitor power LED.

use glam::Vec3;

use crate::assets::{AssetServer, MaterialHandle};
use crate::desk::parts::{ComputerMouse, Keyboard, Monitor, PcCase};
use crate::scene::{NodeHandle, Scene};
use crate::utils::color::{hex_to_rgb, hsl_to_rgb};

/// Intensity and speed of the ambient effects for one device class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientProfile {
    /// Multiplier applied to wall-clock seconds.
    pub speed: f32,
    pub saturation: f32,
    /// Base intensity the part lights pulse around.
    pub light_intensity: f32,
    /// Only every n-th key cap is recolored.
    pub key_stride: usize,
    pub key_bob: bool,
}

impl AmbientProfile {
    #[must_use]
    pub fn new(mobile: bool) -> Self {
        if mobile {
            Self {
                speed: 0.7,
                saturation: 0.6,
                light_intensity: 0.5,
                key_stride: 3,
                key_bob: false,
            }
        } else {
            Self {
                speed: 1.0,
                saturation: 0.8,
                light_intensity: 0.7,
                key_stride: 1,
                key_bob: true,
            }
        }
    }
}

/// Everything the ambient pass touches.
pub struct AmbientRig<'a> {
    pub keyboard: &'a Keyboard,
    pub keyboard_light: NodeHandle,
    pub mouse: &'a ComputerMouse,
    pub pc: &'a PcCase,
    pub monitor: &'a Monitor,
    pub monitor_on: bool,
}

/// Hue of key `index` at animation time `t`.
#[must_use]
pub fn key_hue(t: f32, index: usize) -> f32 {
    (t * 0.15 + index as f32 * 0.02).rem_euclid(1.0)
}

/// LED color for the given power state at animation time `t`.
#[must_use]
pub fn led_color(monitor_on: bool, t: f32) -> u32 {
    if monitor_on {
        0x00_ff00
    } else if (t * 0.5).sin() > 0.0 {
        0xff_0000
    } else {
        0x33_0000
    }
}

fn set_material_color(assets: &mut AssetServer, handle: MaterialHandle, color: Vec3) {
    if let Some(material) = assets.get_material_mut(handle) {
        material.set_color(color);
    }
}

fn set_light(scene: &mut Scene, node: NodeHandle, color: Vec3, intensity: f32) {
    if let Some(light) = scene.get_light_mut(node) {
        light.color = color;
        light.intensity = intensity;
    }
}

/// Applies the ambient effects `seconds` after startup.
pub fn update(rig: &AmbientRig<'_>, profile: AmbientProfile, seconds: f64, scene: &mut Scene, assets: &mut AssetServer) {
    let t = (seconds * f64::from(profile.speed)) as f32;
    let s = profile.saturation;
    let li = profile.light_intensity;

    let keys = rig.keyboard.keys.iter().zip(&rig.keyboard.key_materials).enumerate();
    for (i, (&key, &material)) in keys.step_by(profile.key_stride.max(1)) {
        set_material_color(assets, material, hsl_to_rgb(key_hue(t, i), s, 0.5));
        if profile.key_bob
            && i % 7 == 0
            && let Some(node) = scene.get_node_mut(key)
        {
            node.transform.position.y = (t * 5.0 + i as f32).sin() * 0.002;
        }
    }

    set_material_color(assets, rig.keyboard.edge_material, hsl_to_rgb(t * 0.2, 0.8, 0.5));

    set_light(
        scene,
        rig.keyboard_light,
        hsl_to_rgb(t * 0.2, s, 0.5),
        li * 0.5 + (t * 1.5).sin() * 0.15,
    );

    let mouse_color = hsl_to_rgb(t * 0.1, s, 0.5);
    set_light(scene, rig.mouse.light, mouse_color, li * 0.3 + (t * 2.0).sin() * 0.15);
    for &material in &rig.mouse.light_materials {
        set_material_color(assets, material, mouse_color);
    }

    let pc_hue = (t * 0.05).rem_euclid(1.0);
    set_light(scene, rig.pc.light, hsl_to_rgb(pc_hue, s, 0.5), li * 0.7 + (t * 1.2).sin() * 0.2);
    for (i, &ring) in rig.pc.fan_rings.iter().enumerate() {
        set_material_color(assets, ring, hsl_to_rgb(pc_hue + i as f32 * 0.1, s, 0.5));
    }

    set_material_color(assets, rig.monitor.led_material, hex_to_rgb(led_color(rig.monitor_on, t)));
}
