//! Office chair on a six-caster base.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::{Vec2, Vec3};

use crate::assets::TextureHandle;
use crate::desk::parts::PartBuilder;
use crate::resources::primitives::{
    CylinderOptions, ExtrudeOptions, SphereOptions, create_box, create_circle, create_cylinder,
    create_extrude, create_sphere, create_torus, create_tube,
};
use crate::resources::shape::rect_path;
use crate::resources::{CatmullRomCurve3, Geometry, Material, Shape};
use crate::scene::NodeHandle;

const CASTER_COUNT: usize = 6;

#[derive(Debug, Clone)]
pub struct Chair {
    pub root: NodeHandle,
    /// Everything below the root, turned to face the desk.
    pub base: NodeHandle,
}

fn cylinder(radius: f32, height: f32, segments: u32) -> Geometry {
    create_cylinder(CylinderOptions::new(radius, radius, height, segments))
}

impl Chair {
    pub fn build(b: &mut PartBuilder<'_>, parent: NodeHandle, fabric: TextureHandle) -> Self {
        let black = b.material(Material::new_standard(0x22_2222).with_name("chair_black").with_pbr(0.6, 0.1));
        let metallic = b.material(Material::new_standard(0x88_8888).with_name("chair_metal").with_pbr(0.2, 0.8));
        let rubber = b.material(Material::new_standard(0x11_1111).with_name("chair_wheel").with_pbr(0.7, 0.5));
        let chrome = b.material(Material::new_standard(0xDD_DDDD).with_name("chair_chrome").with_pbr(0.1, 0.9));
        let fabric_mat = b.material(
            Material::new_standard(0x22_2222)
                .with_name("chair_fabric")
                .with_pbr(0.8, 0.1)
                .with_map(fabric)
                .with_map_repeat(Vec2::splat(10.0)),
        );

        let root = b
            .group("chair", parent)
            .with_position(0.0, 0.0, 0.7)
            .with_scale(1.2)
            .build();
        let base = b.group("chair_base", root).with_rotation(0.0, PI, 0.0).build();

        b.mesh_with("base_ring", create_torus(0.2, 0.02, 16, 32), metallic, base)
            .with_rotation(FRAC_PI_2, 0.0, 0.0)
            .build();

        let mount_geo = b.geometry(cylinder(0.015, 0.015, 8));
        let caster_curve = CatmullRomCurve3::new(vec![
            Vec3::ZERO,
            Vec3::new(0.0, -0.02, 0.01),
            Vec3::new(0.0, -0.04, 0.02),
            Vec3::new(0.0, -0.08, 0.0),
        ]);
        let caster_geo = b.geometry(create_tube(&caster_curve, 8, 0.008, 8, false));
        let swivel_geo = b.geometry(create_sphere(SphereOptions::new(0.012, 16, 16)));
        let axle_geo = b.geometry(cylinder(0.006, 0.025, 8));
        let hub_geo = b.geometry(cylinder(0.017, 0.015, 16));
        let wheel_geo = b.geometry(cylinder(0.025, 0.01, 16));
        let cap_geo = b.geometry(create_circle(0.015, 16));

        for i in 0..CASTER_COUNT {
            let angle = i as f32 / CASTER_COUNT as f32 * TAU;
            let caster = b
                .group("caster", base)
                .with_position(angle.cos() * 0.22, 0.0, angle.sin() * 0.22)
                .build();

            b.mesh("caster_mount", mount_geo, black, caster).build();
            b.mesh("caster_arm", caster_geo, chrome, caster).build();
            b.mesh("caster_swivel", swivel_geo, metallic, caster)
                .with_position(0.0, -0.01, 0.0)
                .build();
            b.mesh("caster_axle", axle_geo, chrome, caster)
                .with_rotation(0.0, 0.0, FRAC_PI_2)
                .with_position(0.0, -0.08, 0.0)
                .build();
            b.mesh("caster_hub", hub_geo, black, caster)
                .with_rotation(0.0, 0.0, FRAC_PI_2)
                .with_position(0.0, -0.08, 0.0)
                .build();
            b.mesh("caster_wheel", wheel_geo, rubber, caster)
                .with_rotation(0.0, 0.0, FRAC_PI_2)
                .with_position(0.0, -0.08, 0.0)
                .build();
            b.mesh("caster_cap", cap_geo, metallic, caster)
                .with_position(0.006, -0.08, 0.0)
                .with_rotation(0.0, FRAC_PI_2, 0.0)
                .build();
        }

        b.mesh_with("chair_post", cylinder(0.02, 0.3, 12), chrome, base)
            .with_position(0.0, 0.15, 0.0)
            .build();
        b.mesh_with("chair_sleeve", cylinder(0.025, 0.1, 12), black, base)
            .with_position(0.0, 0.23, 0.0)
            .build();
        b.mesh_with("chair_mechanism", create_box(0.15, 0.03, 0.15), black, base)
            .with_position(0.0, 0.3, 0.0)
            .build();
        b.mesh_with("chair_lever", cylinder(0.005, 0.08, 8), metallic, base)
            .with_position(0.07, 0.28, 0.07)
            .with_rotation(FRAC_PI_4, 0.0, 0.0)
            .build();
        b.mesh_with("lever_knob", create_sphere(SphereOptions::new(0.008, 8, 8)), black, base)
            .with_position(0.11, 0.25, 0.11)
            .build();

        let mut seat_shape = Shape::new();
        seat_shape.path = rect_path(0.4, 0.4);
        b.mesh_with(
            "chair_seat",
            create_extrude(&seat_shape, ExtrudeOptions::beveled(0.05, 0.02, 0.02, 5)),
            fabric_mat,
            base,
        )
        .with_position(0.0, 0.32, 0.0)
        .with_rotation(-FRAC_PI_2, 0.0, 0.0)
        .build();

        // pivot at the bottom edge so the tilt leans the top back
        let mut backrest = create_box(0.38, 0.4, 0.05);
        backrest.translate(Vec3::new(0.0, 0.2, 0.0));
        b.mesh_with("chair_backrest", backrest, fabric_mat, base)
            .with_position(0.0, 0.35, -0.2)
            .with_rotation(-PI / 12.0, 0.0, 0.0)
            .build();

        let mut armrest = create_box(0.05, 0.03, 0.2);
        armrest.translate(Vec3::new(0.0, 0.0, -0.1));
        let armrest_geo = b.geometry(armrest);
        for x in [0.2, -0.2] {
            b.mesh("chair_armrest", armrest_geo, black, base)
                .with_position(x, 0.4, 0.0)
                .build();
        }

        Self { root, base }
    }
}
