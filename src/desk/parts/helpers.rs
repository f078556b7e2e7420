//! Axes and grid overlays for local debugging.
//!
//! The renderer only draws triangles, so helper lines are thin boxes.

use crate::desk::parts::PartBuilder;
use crate::resources::Material;
use crate::resources::primitives::create_box;
use crate::scene::NodeHandle;

const LINE_THICKNESS: f32 = 0.004;

#[derive(Debug, Clone)]
pub struct DebugHelpers {
    pub axes: NodeHandle,
    pub grid: NodeHandle,
}

impl DebugHelpers {
    pub fn build(b: &mut PartBuilder<'_>, root: NodeHandle) -> Self {
        let axes = build_axes(b, root, 2.0);
        let grid = build_grid(b, root, 5.0, 10);
        log::info!("Added axes and grid helpers");
        Self { axes, grid }
    }
}

/// X red, Y green, Z blue, each `size` long from the origin.
fn build_axes(b: &mut PartBuilder<'_>, root: NodeHandle, size: f32) -> NodeHandle {
    let axes = b.group("axes_helper", root).build();
    let t = LINE_THICKNESS;
    let lines = [
        ((size, t, t), (size / 2.0, 0.0, 0.0), 0xff_0000),
        ((t, size, t), (0.0, size / 2.0, 0.0), 0x00_ff00),
        ((t, t, size), (0.0, 0.0, size / 2.0), 0x00_00ff),
    ];
    for ((w, h, d), (x, y, z), color) in lines {
        let mat = b.material(Material::new_basic(color).with_name("axis"));
        b.mesh_with("axis", create_box(w, h, d), mat, axes)
            .with_position(x, y, z)
            .build();
    }
    axes
}

/// `divisions` cells per side on the XZ plane; the center lines are darker.
fn build_grid(b: &mut PartBuilder<'_>, root: NodeHandle, size: f32, divisions: u32) -> NodeHandle {
    let grid = b.group("grid_helper", root).build();
    let center_mat = b.material(Material::new_basic(0x44_4444).with_name("grid_center"));
    let line_mat = b.material(Material::new_basic(0x88_8888).with_name("grid_line"));
    let along_x = b.geometry(create_box(size, LINE_THICKNESS, LINE_THICKNESS));
    let along_z = b.geometry(create_box(LINE_THICKNESS, LINE_THICKNESS, size));

    let half = size / 2.0;
    let step = size / divisions as f32;
    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        let mat = if i * 2 == divisions { center_mat } else { line_mat };
        b.mesh("grid_line", along_x, mat, grid)
            .with_position(0.0, 0.0, offset)
            .build();
        b.mesh("grid_line", along_z, mat, grid)
            .with_position(offset, 0.0, 0.0)
            .build();
    }
    grid
}
