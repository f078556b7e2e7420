//! RGB mechanical keyboard.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::assets::{GeometryHandle, MaterialHandle};
use crate::desk::parts::PartBuilder;
use crate::resources::primitives::{
    ExtrudeOptions, PlaneOptions, SphereOptions, create_circle, create_extrude, create_plane,
    create_sphere, create_tube,
};
use crate::resources::{CubicBezierCurve3, Material, Shape, Side};
use crate::scene::NodeHandle;
use crate::utils::color::hex_to_rgb;

const BASE_WIDTH: f32 = 0.45;
const BASE_HEIGHT: f32 = 0.02;
const BASE_DEPTH: f32 = 0.18;

const KEY_SIZE: f32 = 0.025;
const KEY_SPACING: f32 = 0.028;
const KEY_HEIGHT: f32 = 0.01;
const KEY_GAP: f32 = KEY_SPACING - KEY_SIZE;

/// Height of every key group above the base.
pub const KEY_ROW_Y: f32 = 0.014;

/// Height of a key cap inside its group when not pressed.
pub const KEY_REST_Y: f32 = 0.0;

/// Opacity of the edge strip between presses.
pub const EDGE_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Standard,
    Modifier,
    Spacebar,
    Enter,
    Escape,
}

impl KeyKind {
    /// Width in key units.
    #[must_use]
    pub fn width_units(self) -> f32 {
        match self {
            Self::Standard | Self::Escape => 1.0,
            Self::Modifier => 1.5,
            Self::Spacebar => 6.0,
            Self::Enter => 2.0,
        }
    }

    #[must_use]
    pub fn color(self) -> u32 {
        match self {
            Self::Standard => 0x1a_1a1a,
            Self::Modifier | Self::Spacebar | Self::Enter => 0x22_2222,
            Self::Escape => 0x33_3333,
        }
    }
}

/// Rows from the top (escape row) to the spacebar row.
#[must_use]
pub fn key_layout() -> [Vec<KeyKind>; 5] {
    use KeyKind::{Enter, Escape, Modifier, Spacebar, Standard};

    let row = |first: KeyKind, standard: usize, last: Option<KeyKind>| {
        let mut keys = vec![first];
        keys.extend(std::iter::repeat_n(Standard, standard));
        keys.extend(last);
        keys
    };

    [
        row(Escape, 13, None),
        row(Standard, 13, None),
        row(Modifier, 11, Some(Enter)),
        row(Modifier, 10, Some(Modifier)),
        vec![Modifier, Modifier, Modifier, Spacebar, Modifier, Modifier, Modifier, Modifier],
    ]
}

/// Centers of the keys of one row along X.
#[must_use]
pub fn row_key_centers(row: &[KeyKind]) -> Vec<f32> {
    let row_width: f32 = row.iter().map(|k| KEY_SIZE * k.width_units()).sum::<f32>()
        + row.len().saturating_sub(1) as f32 * KEY_GAP;

    let mut x = -row_width / 2.0 + KEY_SIZE / 2.0;
    row.iter()
        .map(|k| {
            let center = x;
            x += KEY_SIZE * k.width_units() + KEY_GAP;
            center
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Keyboard {
    pub root: NodeHandle,
    /// Key cap meshes, in layout order. Each owns its material.
    pub keys: Vec<NodeHandle>,
    pub key_materials: Vec<MaterialHandle>,
    /// Cap color each key material was created with.
    pub key_colors: Vec<Vec3>,
    /// Edge strip material, animated together with the strip mesh.
    pub edge_material: MaterialHandle,
}

impl Keyboard {
    pub fn build(b: &mut PartBuilder<'_>, parent: NodeHandle) -> Self {
        let root = b
            .group("keyboard", parent)
            .with_position(0.0, 0.825, 0.25)
            .with_scale(0.85)
            .build();

        let base_mat = b.material(Material::new_phong(0x11_1111).with_name("keyboard_base").with_shininess(70.0));
        b.mesh_with(
            "keyboard_base",
            create_extrude(
                &Shape::rounded_rect(BASE_WIDTH, BASE_DEPTH, 0.02),
                ExtrudeOptions::beveled(BASE_HEIGHT, 0.004, 0.004, 3),
            ),
            base_mat,
            root,
        )
        .with_rotation(-FRAC_PI_2, 0.0, 0.0)
        .build();

        let logo_mat = b.material(
            Material::new_basic(0x88_8888)
                .with_name("keyboard_logo")
                .with_opacity(0.8),
        );
        b.mesh_with("keyboard_logo", create_plane(PlaneOptions::new(0.03, 0.01)), logo_mat, root)
            .with_position(0.18, 0.013, -0.06)
            .with_rotation(-FRAC_PI_2, 0.0, 0.0)
            .build();

        let edge_material = b.material(
            Material::new_basic(0xff_0000)
                .with_name("keyboard_edge")
                .with_opacity(EDGE_OPACITY)
                .with_side(Side::Double),
        );
        b.mesh_with(
            "keyboard_edge",
            create_plane(PlaneOptions::new(BASE_WIDTH - 0.01, 0.004)),
            edge_material,
            root,
        )
        .with_position(0.0, 0.002, BASE_DEPTH / 2.0 - 0.002)
        .build();

        let mut keys = Vec::new();
        let mut key_materials = Vec::new();
        let mut key_colors = Vec::new();
        let mut cap_geometries: Vec<(KeyKind, GeometryHandle, GeometryHandle)> = Vec::new();

        for (row_index, row) in key_layout().iter().enumerate() {
            let z = row_index as f32 * KEY_SPACING - 0.05;
            for (&kind, x) in row.iter().zip(row_key_centers(row)) {
                let (cap_geo, dip_geo) = match cap_geometries.iter().find(|(k, ..)| *k == kind) {
                    Some(&(_, cap, dip)) => (cap, dip),
                    None => {
                        let (cap, dip) = key_geometries(kind);
                        let cap = b.geometry(cap);
                        let dip = b.geometry(dip);
                        cap_geometries.push((kind, cap, dip));
                        (cap, dip)
                    }
                };

                let group = b.group("key", root).with_position(x, KEY_ROW_Y, z).build();

                let cap_mat = b.material(
                    Material::new_phong(kind.color())
                        .with_name("key_cap")
                        .with_shininess(80.0)
                        .with_specular(0x22_2222),
                );
                let cap = b
                    .mesh("key_cap", cap_geo, cap_mat, group)
                    .with_rotation(-FRAC_PI_2, 0.0, 0.0)
                    .build();

                let dip_mat = b.material(
                    Material::new_phong(kind.color())
                        .with_name("key_dip")
                        .with_shininess(90.0)
                        .with_opacity(0.4)
                        .with_side(Side::Back),
                );
                b.mesh("key_dip", dip_geo, dip_mat, cap)
                    .with_scale_xyz(1.0, 0.2, 1.0)
                    .with_position(0.0, KEY_HEIGHT + 0.002, 0.0)
                    .with_rotation(PI, 0.0, 0.0)
                    .build();

                keys.push(cap);
                key_materials.push(cap_mat);
                key_colors.push(hex_to_rgb(kind.color()));
            }
        }

        let indicator_geo = b.geometry(create_circle(0.002, 8));
        for x in [0.16, 0.19, 0.22] {
            let mat = b.material(Material::new_basic(0x33_3333).with_name("indicator"));
            b.mesh("indicator", indicator_geo, mat, root)
                .with_position(x, 0.012, -0.078)
                .with_rotation(-FRAC_PI_2, 0.0, 0.0)
                .build();
        }

        let cable_curve = CubicBezierCurve3::new(
            Vec3::new(0.2, 0.01, 0.0),
            Vec3::new(0.2, 0.0, -0.05),
            Vec3::new(0.15, -0.02, -0.1),
            Vec3::new(0.1, -0.05, -0.12),
        );
        let cable_mat = b.material(Material::new_phong(0x11_1111).with_name("keyboard_cable").with_shininess(20.0));
        b.mesh_with("keyboard_cable", create_tube(&cable_curve, 16, 0.004, 8, false), cable_mat, root)
            .build();

        log::debug!("Keyboard built with {} keys", keys.len());

        Self {
            root,
            keys,
            key_materials,
            key_colors,
            edge_material,
        }
    }
}

/// Rounded cap and the concave dip on top of it.
fn key_geometries(kind: KeyKind) -> (crate::resources::Geometry, crate::resources::Geometry) {
    let width = KEY_SIZE * kind.width_units();
    let cap = create_extrude(
        &Shape::rounded_rect(width, KEY_SIZE, width * 0.2),
        ExtrudeOptions::beveled(KEY_HEIGHT, 0.002, 0.003, 3).with_curve_segments(6),
    );
    let dip = create_sphere(SphereOptions::new(width * 0.9, 16, 16).hemisphere());
    (cap, dip)
}
