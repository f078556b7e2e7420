//! Flat-panel monitor on an oval stand. The screen swaps between an "off"
//! material and one showing the code-editor texture.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::assets::{MaterialHandle, TextureHandle};
use crate::desk::parts::PartBuilder;
use crate::resources::primitives::{
    CylinderOptions, ExtrudeOptions, PlaneOptions, create_box, create_circle, create_cylinder,
    create_extrude, create_plane, create_ring, create_tube,
};
use crate::resources::shape::rounded_rect_path;
use crate::resources::{Blending, CubicBezierCurve3, Material, Shape, Side};
use crate::scene::NodeHandle;

const BODY_WIDTH: f32 = 0.6;
const BODY_HEIGHT: f32 = 0.35;
const BODY_DEPTH: f32 = 0.018;
const CORNER_RADIUS: f32 = 0.025;

const SCREEN_WIDTH: f32 = BODY_WIDTH - 0.05 - 0.04;
const SCREEN_HEIGHT: f32 = BODY_HEIGHT - 0.05 - 0.04;

#[derive(Debug, Clone)]
pub struct Monitor {
    pub root: NodeHandle,
    pub screen: NodeHandle,
    pub screen_off: MaterialHandle,
    pub screen_on: MaterialHandle,
    pub led: NodeHandle,
    pub led_material: MaterialHandle,
    /// Additive glow in front of the screen, created the first time the
    /// monitor is switched on.
    pub glow: Option<NodeHandle>,
}

impl Monitor {
    pub fn build(b: &mut PartBuilder<'_>, parent: NodeHandle, code_texture: TextureHandle) -> Self {
        let root = b
            .group("monitor", parent)
            .with_position(-0.1, 0.825, 0.0)
            .with_scale(0.85)
            .build();

        let base_mat = b.material(Material::new_phong(0x33_3333).with_name("monitor_base").with_shininess(60.0));
        b.mesh_with(
            "monitor_base",
            create_extrude(&Shape::ellipse(0.11, 0.07), ExtrudeOptions::beveled(0.02, 0.005, 0.005, 6)),
            base_mat,
            root,
        )
        .with_rotation(-FRAC_PI_2, 0.0, 0.0)
        .build();

        let grip_mat = b.material(Material::new_phong(0x11_1111).with_name("monitor_grip").with_shininess(5.0));
        b.mesh_with("monitor_grip", create_ring(0.08, 0.1, 36), grip_mat, root)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, -0.01, 0.0)
            .build();

        let stand_mat = b.material(Material::new_phong(0x44_4444).with_name("monitor_stand").with_shininess(70.0));
        let stand = b
            .mesh_with("monitor_stand", create_box(0.025, 0.2, 0.025), stand_mat, root)
            .with_position(0.0, 0.11, 0.0)
            .build();

        let hole_mat = b.material(Material::new_phong(0x22_2222).with_name("cable_hole"));
        b.mesh_with(
            "cable_hole",
            create_cylinder(CylinderOptions::new(0.008, 0.008, 0.028, 12)),
            hole_mat,
            stand,
        )
        .with_rotation(FRAC_PI_2, 0.0, 0.0)
        .with_position(0.0, 0.06, 0.015)
        .build();

        b.mesh_with("monitor_mount", create_box(0.07, 0.05, 0.015), stand_mat, root)
            .with_position(0.0, 0.21, 0.0)
            .build();

        b.mesh_with(
            "monitor_tilt",
            create_cylinder(CylinderOptions::new(0.01, 0.01, 0.075, 12)),
            stand_mat,
            root,
        )
        .with_rotation(0.0, 0.0, FRAC_PI_2)
        .with_position(0.0, 0.22, 0.01)
        .build();

        let body_mat = b.material(Material::new_phong(0x22_2222).with_name("monitor_body").with_shininess(60.0));
        let body = b
            .mesh_with(
                "monitor_body",
                create_extrude(
                    &Shape::rounded_rect(BODY_WIDTH, BODY_HEIGHT, CORNER_RADIUS),
                    ExtrudeOptions::beveled(BODY_DEPTH, 0.005, 0.002, 3),
                ),
                body_mat,
                root,
            )
            .with_position(0.0, 0.3, 0.0)
            .build();

        let mut bezel_shape = Shape::rounded_rect(BODY_WIDTH - 0.05, BODY_HEIGHT - 0.05, CORNER_RADIUS);
        bezel_shape.add_hole(rounded_rect_path(SCREEN_WIDTH, SCREEN_HEIGHT, CORNER_RADIUS / 2.0));
        let bezel_mat = b.material(Material::new_phong(0x15_1515).with_name("monitor_bezel").with_shininess(70.0));
        b.mesh_with(
            "monitor_bezel",
            create_extrude(&bezel_shape, ExtrudeOptions::flat(0.005)),
            bezel_mat,
            root,
        )
        .with_position(0.0, 0.3, BODY_DEPTH - 0.001)
        .build();

        let screen_off = b.material(Material::new_basic(0x11_1111).with_name("screen_off"));
        // transparent so the power-on fade is visible
        let screen_on = b.material(
            Material::new_basic(0xff_ffff)
                .with_name("screen_on")
                .with_map(code_texture)
                .with_opacity(1.0),
        );
        let screen = b
            .mesh_with(
                "screen",
                create_plane(PlaneOptions::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
                screen_off,
                root,
            )
            .with_position(0.0, 0.3, BODY_DEPTH + 0.004)
            .build();

        let logo_mat = b.material(
            Material::new_basic(0x44_4444)
                .with_name("monitor_logo")
                .with_opacity(0.8),
        );
        b.mesh_with("monitor_logo", create_plane(PlaneOptions::new(0.06, 0.01)), logo_mat, root)
            .with_position(0.0, 0.12, BODY_DEPTH + 0.005)
            .build();

        let led_material = b.material(Material::new_basic(0x33_3333).with_name("monitor_led"));
        let led = b
            .mesh_with("monitor_led", create_circle(0.004, 16), led_material, body)
            .with_position(BODY_WIDTH / 2.0 - 0.03, -BODY_HEIGHT / 2.0 + 0.02, BODY_DEPTH + 0.005)
            .build();

        let cable_curve = CubicBezierCurve3::new(
            Vec3::ZERO,
            Vec3::new(0.0, -0.05, -0.03),
            Vec3::new(0.0, -0.1, -0.05),
            Vec3::new(0.0, -0.25, -0.03),
        );
        let cable_mat = b.material(Material::new_phong(0x11_1111).with_name("monitor_cable").with_shininess(30.0));
        b.mesh_with("monitor_cable", create_tube(&cable_curve, 16, 0.005, 8, false), cable_mat, root)
            .with_position(0.0, 0.3, -BODY_DEPTH / 2.0)
            .build();

        Self {
            root,
            screen,
            screen_off,
            screen_on,
            led,
            led_material,
            glow: None,
        }
    }

    /// Returns the glow node, creating it on first use.
    pub fn ensure_glow(&mut self, b: &mut PartBuilder<'_>) -> NodeHandle {
        if let Some(glow) = self.glow {
            return glow;
        }
        let mat = b.material(
            Material::new_basic(0x88_ccff)
                .with_name("monitor_glow")
                .with_opacity(0.2)
                .with_side(Side::Double)
                .with_blending(Blending::Additive),
        );
        let glow = b
            .mesh_with("monitor_glow", create_plane(PlaneOptions::new(0.56, 0.32)), mat, self.root)
            .with_position(0.0, 0.3, 0.02)
            .build();
        self.glow = Some(glow);
        glow
    }
}
