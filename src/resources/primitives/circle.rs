use std::f32::consts::TAU;

use crate::resources::geometry::Geometry;

/// Flat disc in XY facing +Z.
#[must_use]
pub fn create_circle(radius: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);

    let mut positions = vec![[0.0, 0.0, 0.0]];
    let mut normals = vec![[0.0, 0.0, 1.0]];
    let mut uvs = vec![[0.5, 0.5]];
    let mut indices = Vec::with_capacity(segments as usize * 3);

    for s in 0..=segments {
        let angle = s as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        positions.push([radius * cos, radius * sin, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([(cos + 1.0) * 0.5, (sin + 1.0) * 0.5]);
    }

    for i in 1..=segments {
        indices.extend_from_slice(&[i, i + 1, 0]);
    }

    Geometry::from_buffers(positions, normals, uvs, indices)
}

/// Flat annulus in XY facing +Z.
#[must_use]
pub fn create_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for radius in [inner_radius, outer_radius] {
        for s in 0..=segments {
            let angle = s as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            positions.push([radius * cos, radius * sin, 0.0]);
            normals.push([0.0, 0.0, 1.0]);
            let k = radius / outer_radius.max(f32::EPSILON);
            uvs.push([(cos * k + 1.0) * 0.5, (sin * k + 1.0) * 0.5]);
        }
    }

    let stride = segments + 1;
    for i in 0..segments {
        let a = i;
        let b = i + stride;
        let c = i + stride + 1;
        let d = i + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    Geometry::from_buffers(positions, normals, uvs, indices)
}
