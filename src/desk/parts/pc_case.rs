//! Gaming PC tower with a glass side panel, visible internals and RGB fans.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;

use crate::assets::MaterialHandle;
use crate::desk::parts::PartBuilder;
use crate::resources::primitives::{
    CylinderOptions, create_box, create_circle, create_cylinder, create_ring, create_tube,
};
use crate::resources::{CubicBezierCurve3, Material, Side};
use crate::scene::{Light, NodeHandle};
use crate::utils::color::hsl_to_rgb;

#[derive(Debug, Clone)]
pub struct PcCase {
    pub root: NodeHandle,
    /// RGB point light inside the case.
    pub light: NodeHandle,
    /// Ring materials of the three case fans, animated with the light.
    pub fan_rings: Vec<MaterialHandle>,
}

struct CaseMaterials {
    case: MaterialHandle,
    glass: MaterialHandle,
    mesh: MaterialHandle,
    metal_bright: MaterialHandle,
    metal_dark: MaterialHandle,
    pcb: MaterialHandle,
}

fn cylinder(radius: f32, height: f32, segments: u32) -> crate::resources::Geometry {
    create_cylinder(CylinderOptions::new(radius, radius, height, segments))
}

impl PcCase {
    pub fn build(b: &mut PartBuilder<'_>, parent: NodeHandle) -> Self {
        let mats = CaseMaterials {
            case: b.material(Material::new_standard(0x22_2222).with_name("pc_case").with_pbr(0.3, 0.5)),
            glass: b.material(
                Material::new_standard(0x11_1111)
                    .with_name("pc_glass")
                    .with_pbr(0.05, 0.0)
                    .with_opacity(0.6),
            ),
            mesh: b.material(Material::new_standard(0x08_0808).with_name("pc_mesh").with_pbr(0.4, 0.6)),
            metal_bright: b.material(
                Material::new_standard(0xCC_CCCC).with_name("metal_bright").with_pbr(0.1, 0.9),
            ),
            metal_dark: b.material(
                Material::new_standard(0x44_4444).with_name("metal_dark").with_pbr(0.2, 0.8),
            ),
            pcb: b.material(Material::new_standard(0x00_3300).with_name("pcb").with_pbr(0.8, 0.2)),
        };

        let root = b
            .group("pc_case", parent)
            .with_position(0.5, 0.99, 0.2)
            .with_scale(0.8)
            .build();

        let main_case = b
            .mesh_with("case_body", create_box(0.25, 0.4, 0.35), mats.case, root)
            .build();

        build_side_panel(b, &mats, main_case);
        build_front_panel(b, &mats, main_case);
        build_internals(b, &mats, main_case);

        let light = b
            .scene
            .build_node("pc_light")
            .with_light(Light::new_point(0xff_0000, 0.7, 0.4))
            .with_position(-0.1, 0.0, 0.0)
            .with_parent(main_case)
            .build();

        let fan_rings = build_case_fans(b, main_case);

        Self {
            root,
            light,
            fan_rings,
        }
    }
}

fn build_side_panel(b: &mut PartBuilder<'_>, mats: &CaseMaterials, main_case: NodeHandle) {
    let panel = b.group("side_panel", main_case).build();

    b.mesh_with("glass_panel", create_box(0.01, 0.38, 0.33), mats.glass, panel)
        .with_position(-0.12, 0.0, 0.0)
        .build();

    let frame_edges = [
        ([-0.12, 0.19, 0.0], [0.01, 0.02, 0.35]),
        ([-0.12, -0.19, 0.0], [0.01, 0.02, 0.35]),
        ([-0.12, 0.0, 0.17], [0.01, 0.4, 0.015]),
        ([-0.12, 0.0, -0.17], [0.01, 0.4, 0.015]),
    ];
    for (pos, size) in frame_edges {
        b.mesh_with("panel_frame", create_box(size[0], size[1], size[2]), mats.metal_dark, panel)
            .with_position(pos[0], pos[1], pos[2])
            .build();
    }
}

fn build_front_panel(b: &mut PartBuilder<'_>, mats: &CaseMaterials, main_case: NodeHandle) {
    let front = b
        .group("front_panel", main_case)
        .with_position(0.0, 0.0, 0.175)
        .build();

    b.mesh_with("front_face", create_box(0.25, 0.4, 0.01), mats.case, front)
        .build();

    let power_mat = b.material(
        Material::new_phong(0x33_3333)
            .with_name("power_button")
            .with_emissive(0x00_ff00, 0.5),
    );
    b.mesh_with("power_button", cylinder(0.008, 0.004, 16), power_mat, front)
        .with_rotation(FRAC_PI_2, 0.0, 0.0)
        .with_position(-0.1, 0.16, 0.01)
        .build();

    b.mesh_with("reset_button", cylinder(0.004, 0.003, 12), mats.metal_dark, front)
        .with_rotation(FRAC_PI_2, 0.0, 0.0)
        .with_position(-0.1, 0.14, 0.01)
        .build();

    let usb_geo = b.geometry(create_box(0.014, 0.006, 0.004));
    for y in [0.16, 0.14] {
        b.mesh("usb_port", usb_geo, mats.metal_bright, front)
            .with_position(-0.08, y, 0.01)
            .with_rotation(FRAC_PI_2, 0.0, 0.0)
            .build();
    }

    let jack_geo = b.geometry(create_circle(0.003, 12));
    for (y, color) in [(0.16, 0x00_ff00), (0.14, 0xff_0000)] {
        let mat = b.material(Material::new_phong(color).with_name("audio_jack"));
        b.mesh("audio_jack", jack_geo, mat, front)
            .with_position(-0.04, y, 0.01)
            .build();
    }

    // ventilation: a dark panel crossed by a grid of thin bars
    for (y, w, h) in [(0.08, 0.22, 0.06), (-0.12, 0.22, 0.14)] {
        let area = b
            .mesh_with("vent_mesh", create_box(w, h, 0.001), mats.mesh, front)
            .with_position(0.0, y, 0.006)
            .build();

        let bars = 12;
        let spacing = w / bars as f32;
        let vertical_geo = b.geometry(create_box(0.001, h - 0.01, 0.002));
        for i in 0..bars {
            b.mesh("vent_bar", vertical_geo, mats.metal_dark, area)
                .with_position(-w / 2.0 + i as f32 * spacing, 0.0, 0.001)
                .build();
        }

        let horizontal_geo = b.geometry(create_box(w - 0.01, 0.001, 0.002));
        let rows = (h / spacing).floor() as u32;
        for i in 0..rows {
            b.mesh("vent_bar", horizontal_geo, mats.metal_dark, area)
                .with_position(0.0, -h / 2.0 + i as f32 * spacing, 0.001)
                .build();
        }
    }
}

fn build_internals(b: &mut PartBuilder<'_>, mats: &CaseMaterials, main_case: NodeHandle) {
    let inside = b
        .group("internals", main_case)
        .with_position(-0.08, 0.0, 0.0)
        .build();

    b.mesh_with("motherboard", create_box(0.01, 0.3, 0.28), mats.pcb, inside)
        .with_position(-0.03, 0.0, 0.0)
        .build();

    let cpu_mat = b.material(Material::new_phong(0x88_8888).with_name("cpu").with_shininess(100.0));
    b.mesh_with("cpu", create_box(0.02, 0.04, 0.04), cpu_mat, inside)
        .with_position(-0.015, 0.05, 0.05)
        .build();

    b.mesh_with("cooler_base", cylinder(0.025, 0.01, 16), mats.metal_bright, inside)
        .with_rotation(FRAC_PI_2, 0.0, 0.0)
        .with_position(-0.005, 0.05, 0.05)
        .build();

    let cooler_fan_mat =
        b.material(Material::new_phong(0x22_2222).with_name("cooler_fan").with_shininess(30.0));
    b.mesh_with("cooler_fan", cylinder(0.02, 0.01, 16), cooler_fan_mat, inside)
        .with_rotation(FRAC_PI_2, 0.0, 0.0)
        .with_position(0.01, 0.05, 0.05)
        .build();

    let blade_geo = b.geometry(create_box(0.015, 0.002, 0.006));
    for i in 0..7 {
        let angle = i as f32 / 7.0 * TAU;
        b.mesh("cooler_blade", blade_geo, mats.metal_dark, inside)
            .with_position(0.01, 0.05 + angle.sin() * 0.015, 0.05 + angle.cos() * 0.015)
            .with_rotation(0.0, 0.0, angle)
            .build();
    }

    let ram_geo = b.geometry(create_box(0.01, 0.018, 0.06));
    for i in 0..4 {
        let color = hsl_to_rgb(i as f32 * 0.2, 0.8, 0.5);
        let mat = b.material(
            Material::new_phong(0xffffff)
                .with_name("ram")
                .with_color_rgb(color)
                .with_emissive_rgb(color, 0.2)
                .with_shininess(60.0),
        );
        b.mesh("ram_stick", ram_geo, mat, inside)
            .with_position(-0.02, 0.12 - 0.02 * i as f32, 0.05)
            .build();
    }

    let gpu_mat = b.material(Material::new_phong(0x11_1111).with_name("gpu").with_shininess(30.0));
    b.mesh_with("gpu", create_box(0.1, 0.02, 0.15), gpu_mat, inside)
        .with_position(0.02, -0.05, 0.01)
        .build();

    let gpu_fan_geo = b.geometry(cylinder(0.03, 0.005, 24));
    let gpu_blade_geo = b.geometry(create_box(0.025, 0.001, 0.008));
    for z in [-0.04, 0.04] {
        let fan = b
            .mesh("gpu_fan", gpu_fan_geo, mats.metal_dark, inside)
            .with_rotation(FRAC_PI_2, 0.0, 0.0)
            .with_position(0.02, -0.04, z)
            .build();
        for i in 0..9 {
            let angle = i as f32 / 9.0 * TAU;
            b.mesh("gpu_fan_blade", gpu_blade_geo, mats.metal_bright, fan)
                .with_position(0.0, angle.sin() * 0.02, angle.cos() * 0.02)
                .with_rotation(0.0, 0.0, angle)
                .build();
        }
    }

    let psu_mat = b.material(Material::new_phong(0x22_2222).with_name("psu").with_shininess(20.0));
    b.mesh_with("psu", create_box(0.15, 0.07, 0.14), psu_mat, inside)
        .with_position(0.05, -0.16, 0.0)
        .build();

    let cables = [
        (Vec3::new(-0.02, 0.05, 0.1), Vec3::new(0.04, -0.06, 0.05), 0.004, 0xFF_FF00),
        (Vec3::new(-0.02, 0.05, 0.02), Vec3::new(0.04, -0.15, 0.02), 0.005, 0xFF_0000),
        (Vec3::new(-0.02, 0.1, 0.1), Vec3::new(0.04, -0.06, 0.0), 0.003, 0x00_00FF),
    ];
    for (start, end, radius, color) in cables {
        let curve = CubicBezierCurve3::new(
            start,
            start + Vec3::new(0.05, -0.05, 0.0),
            end + Vec3::new(-0.05, 0.05, 0.0),
            end,
        );
        let mat = b.material(Material::new_phong(color).with_name("pc_cable").with_shininess(50.0));
        b.mesh_with("pc_cable", create_tube(&curve, 16, radius, 8, false), mat, inside)
            .build();
    }
}

fn build_case_fans(b: &mut PartBuilder<'_>, main_case: NodeHandle) -> Vec<MaterialHandle> {
    let frame_mat = b.material(
        Material::new_phong(0x44_4444)
            .with_name("fan_frame")
            .with_side(Side::Double)
            .with_shininess(60.0),
    );
    let hub_mat = b.material(Material::new_phong(0x22_2222).with_name("fan_hub").with_shininess(80.0));
    let blade_mat =
        b.material(Material::new_phong(0x22_2222).with_name("fan_blade").with_shininess(30.0));

    let frame_geo = b.geometry(create_ring(0.04, 0.05, 16));
    let hub_geo = b.geometry(cylinder(0.01, 0.01, 16));
    let blade_geo = b.geometry(create_box(0.002, 0.01, 0.025));
    let ring_geo = b.geometry(create_ring(0.03, 0.035, 24));

    let mut rings = Vec::with_capacity(3);
    for y in [0.12, 0.0, -0.12] {
        let fan = b
            .group("case_fan", main_case)
            .with_position(-0.119, y, 0.0)
            .build();

        b.mesh("fan_frame", frame_geo, frame_mat, fan)
            .with_rotation(0.0, FRAC_PI_2, 0.0)
            .build();

        let center = b.group("fan_center", fan).build();
        b.mesh("fan_hub", hub_geo, hub_mat, center)
            .with_rotation(0.0, 0.0, FRAC_PI_2)
            .build();
        for i in 0..9 {
            let angle = i as f32 / 9.0 * TAU;
            b.mesh("fan_blade", blade_geo, blade_mat, center)
                .with_position(0.0, angle.sin() * 0.025, angle.cos() * 0.025)
                .with_rotation(angle, 0.0, 0.0)
                .build();
        }

        let ring_mat = b.material(
            Material::new_basic(0xff_ffff)
                .with_name("fan_ring")
                .with_side(Side::Double)
                .with_opacity(0.8),
        );
        b.mesh("fan_ring", ring_geo, ring_mat, fan)
            .with_rotation(0.0, FRAC_PI_2, 0.0)
            .build();
        rings.push(ring_mat);
    }
    rings
}
