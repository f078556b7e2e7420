use std::f32::consts::FRAC_PI_2;

use crate::desk::parts::PartBuilder;
use crate::resources::primitives::{
    CylinderOptions, PlaneOptions, create_box, create_cylinder, create_plane,
};
use crate::resources::{Material, Side};
use crate::scene::NodeHandle;

const DESK_COLOR: u32 = 0x8B_4513;
const DESK_LEG_COLOR: u32 = 0x5D_4037;

const LEG_POSITIONS: [(f32, f32); 4] = [(0.65, 0.5), (-0.65, 0.5), (0.65, -0.1), (-0.65, -0.1)];

/// Ground, boundary plane, desk top and legs.
#[derive(Debug, Clone)]
pub struct Furniture {
    /// Shadow catcher on the scene root.
    pub ground: NodeHandle,
    /// Invisible vertical plane marking the left edge of the scene.
    pub boundary: NodeHandle,
    pub desk: NodeHandle,
    pub legs: Vec<NodeHandle>,
}

impl Furniture {
    pub fn build(b: &mut PartBuilder<'_>, root: NodeHandle, setup: NodeHandle) -> Self {
        let ground_mat = b.material(Material::new_shadow(0.3).with_name("ground"));
        let ground = b
            .mesh_with("ground", create_plane(PlaneOptions::new(10.0, 10.0)), ground_mat, root)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .build();

        let boundary_mat = b.material(
            Material::new_basic(0xffffff)
                .with_name("boundary")
                .with_opacity(0.0)
                .with_side(Side::Double),
        );
        let boundary = b
            .mesh_with(
                "boundary",
                create_plane(PlaneOptions::new(10.0, 10.0)),
                boundary_mat,
                root,
            )
            .with_position(-0.5, 0.0, 0.0)
            .with_rotation(0.0, FRAC_PI_2, 0.0)
            .visible(false)
            .build();

        let desk_mat = b.material(
            Material::new_standard(DESK_COLOR)
                .with_name("desk")
                .with_pbr(0.6, 0.1),
        );
        let desk = b
            .mesh_with("desk", create_box(1.4, 0.05, 0.8), desk_mat, setup)
            .with_position(0.0, 0.8, 0.2)
            .build();

        let leg_mat = b.material(
            Material::new_standard(DESK_LEG_COLOR)
                .with_name("desk_leg")
                .with_pbr(0.7, 0.1),
        );
        let leg_geo = b.geometry(create_cylinder(CylinderOptions::new(0.025, 0.025, 0.8, 8)));
        let legs = LEG_POSITIONS
            .iter()
            .map(|&(x, z)| {
                b.mesh("desk_leg", leg_geo, leg_mat, setup)
                    .with_position(x, 0.4, z)
                    .build()
            })
            .collect();

        Self {
            ground,
            boundary,
            desk,
            legs,
        }
    }
}
