//! Gaming mouse with RGB glow.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Affine3A, Vec3};

use crate::assets::MaterialHandle;
use crate::desk::parts::PartBuilder;
use crate::resources::primitives::{
    CylinderOptions, ExtrudeOptions, PlaneOptions, create_box, create_cylinder, create_extrude,
    create_plane, create_ring, create_torus, create_tube,
};
use crate::resources::{Blending, CubicBezierCurve3, Material, Shape, Side};
use crate::scene::{Light, NodeHandle};

/// Rest height of the button meshes above the body origin.
pub const BUTTON_Y: f32 = 0.028;

const GLOW_OPACITY: f32 = 0.15;
const RING_OPACITY: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct ComputerMouse {
    pub root: NodeHandle,
    pub left_button: NodeHandle,
    pub light: NodeHandle,
    /// Glow plane and light ring, tinted with the light.
    pub light_materials: Vec<MaterialHandle>,
    /// Resting opacity of each entry of `light_materials`.
    pub light_opacities: Vec<f32>,
}

fn body_shape() -> Shape {
    let mut s = Shape::new();
    s.path
        .move_to(-0.025, -0.05)
        .quadratic_curve_to(-0.045, -0.02, -0.045, 0.01)
        .bezier_curve_to(-0.045, 0.04, -0.04, 0.055, -0.025, 0.07)
        .bezier_curve_to(0.0, 0.08, 0.025, 0.08, 0.03, 0.07)
        .bezier_curve_to(0.045, 0.05, 0.045, 0.03, 0.045, 0.01)
        .quadratic_curve_to(0.04, -0.035, 0.025, -0.05)
        .quadratic_curve_to(0.0, -0.06, -0.025, -0.05);
    s
}

fn grip_shape() -> Shape {
    let mut s = Shape::new();
    s.path
        .move_to(-0.04, -0.02)
        .quadratic_curve_to(-0.042, 0.02, -0.04, 0.05)
        .line_to(-0.03, 0.06)
        .quadratic_curve_to(-0.025, 0.03, -0.025, -0.015)
        .quadratic_curve_to(-0.03, -0.025, -0.04, -0.02);
    s
}

/// Button outline; `side` is -1 for the left button and 1 for the right.
fn button_shape(side: f32) -> Shape {
    let mut s = Shape::new();
    s.path
        .move_to(0.04 * side, 0.01)
        .quadratic_curve_to(0.04 * side, 0.04, 0.025 * side, 0.065)
        .line_to(0.0, 0.07)
        .line_to(0.0, -0.05)
        .line_to(0.025 * side, -0.045)
        .quadratic_curve_to(0.035 * side, -0.03, 0.04 * side, 0.01);
    s
}

impl ComputerMouse {
    pub fn build(b: &mut PartBuilder<'_>, parent: NodeHandle) -> Self {
        let root = b
            .group("mouse", parent)
            .with_position(0.3, 0.825, 0.25)
            .with_scale(0.85)
            .build();

        let body_mat = b.material(
            Material::new_phong(0x0f_0f0f)
                .with_name("mouse_body")
                .with_shininess(90.0)
                .with_specular(0x33_3333),
        );
        b.mesh_with(
            "mouse_body",
            create_extrude(&body_shape(), ExtrudeOptions::beveled(0.025, 0.005, 0.005, 10)),
            body_mat,
            root,
        )
        .with_rotation(-FRAC_PI_2, 0.0, 0.0)
        .build();

        let grip_mat = b.material(Material::new_phong(0x08_0808).with_name("mouse_grip").with_shininess(5.0));
        let grip = create_extrude(&grip_shape(), ExtrudeOptions::beveled(0.005, 0.001, 0.001, 3));
        let mut mirrored = grip.clone();
        mirrored.apply_matrix(&Affine3A::from_scale(Vec3::new(-1.0, 1.0, 1.0)));
        for (name, geometry) in [("mouse_grip_left", grip), ("mouse_grip_right", mirrored)] {
            b.mesh_with(name, geometry, grip_mat, root)
                .with_rotation(-FRAC_PI_2, 0.0, 0.0)
                .with_position(0.0, 0.027, 0.0)
                .build();
        }

        let button_mat = b.material(Material::new_phong(0x11_1111).with_name("mouse_button").with_shininess(70.0));
        let button_options = ExtrudeOptions::beveled(0.004, 0.001, 0.001, 2);
        let left_button = b
            .mesh_with("mouse_button_left", create_extrude(&button_shape(-1.0), button_options), button_mat, root)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, BUTTON_Y, 0.0)
            .build();
        b.mesh_with("mouse_button_right", create_extrude(&button_shape(1.0), button_options), button_mat, root)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, BUTTON_Y, 0.0)
            .build();

        let rim_mat = b.material(Material::new_phong(0x22_2222).with_name("wheel_rim").with_shininess(60.0));
        b.mesh_with("wheel_rim", create_torus(0.006, 0.002, 16, 24), rim_mat, root)
            .with_rotation(FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, 0.032, 0.015)
            .build();

        let wheel_mat = b.material(Material::new_phong(0x44_4444).with_name("wheel").with_shininess(40.0));
        let wheel = b
            .mesh_with(
                "wheel",
                create_cylinder(CylinderOptions::new(0.006, 0.006, 0.008, 16)),
                wheel_mat,
                root,
            )
            .with_rotation(FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, 0.032, 0.015)
            .build();

        let rib_mat = b.material(Material::new_phong(0x33_3333).with_name("wheel_rib"));
        let rib_geo = b.geometry(create_box(0.001, 0.01, 0.001));
        for i in 0..12 {
            let angle = i as f32 / 12.0 * TAU;
            b.mesh("wheel_rib", rib_geo, rib_mat, wheel)
                .with_position(angle.sin() * 0.006, 0.0, angle.cos() * 0.006)
                .with_rotation(0.0, angle, 0.0)
                .build();
        }

        let dpi_mat = b.material(Material::new_phong(0x33_3333).with_name("dpi_button"));
        b.mesh_with("dpi_button", create_box(0.008, 0.002, 0.012), dpi_mat, root)
            .with_position(0.0, 0.027, 0.035)
            .build();

        let logo_mat = b.material(
            Material::new_basic(0xcc_cccc)
                .with_name("mouse_logo")
                .with_opacity(0.7),
        );
        b.mesh_with("mouse_logo", create_plane(PlaneOptions::new(0.01, 0.005)), logo_mat, root)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, 0.027, -0.03)
            .build();

        let glow_mat = b.material(
            Material::new_basic(0xff_0000)
                .with_name("mouse_glow")
                .with_opacity(GLOW_OPACITY)
                .with_side(Side::Double)
                .with_blending(Blending::Additive),
        );
        b.mesh_with("mouse_glow", create_plane(PlaneOptions::new(0.08, 0.12)), glow_mat, root)
            .with_position(0.0, 0.001, 0.01)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .build();

        let ring_mat = b.material(
            Material::new_basic(0xff_0000)
                .with_name("mouse_ring")
                .with_opacity(RING_OPACITY)
                .with_side(Side::Double),
        );
        b.mesh_with("mouse_ring", create_ring(0.035, 0.038, 20), ring_mat, root)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, 0.001, 0.0)
            .build();

        let light = b
            .scene
            .build_node("mouse_light")
            .with_light(Light::new_point(0xff_0000, 0.4, 0.08))
            .with_position(0.0, 0.015, 0.0)
            .with_parent(root)
            .build();

        let cable_curve = CubicBezierCurve3::new(
            Vec3::new(0.0, 0.01, -0.05),
            Vec3::new(0.0, 0.0, -0.1),
            Vec3::new(-0.05, -0.03, -0.15),
            Vec3::new(-0.1, -0.05, -0.2),
        );
        let cable_mat = b.material(Material::new_phong(0x11_1111).with_name("mouse_cable").with_shininess(20.0));
        b.mesh_with("mouse_cable", create_tube(&cable_curve, 20, 0.003, 8, false), cable_mat, root)
            .build();

        Self {
            root,
            left_button,
            light,
            light_materials: vec![glow_mat, ring_mat],
            light_opacities: vec![GLOW_OPACITY, RING_OPACITY],
        }
    }
}
