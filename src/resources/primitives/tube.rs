use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::resources::curve::Curve3;
use crate::resources::geometry::Geometry;

/// Parallel-transport frames along a curve.
///
/// Returns `(tangents, normals, binormals)` for `segments + 1` samples.
#[must_use]
pub fn compute_frames(curve: &dyn Curve3, segments: u32, closed: bool) -> (Vec<Vec3>, Vec<Vec3>, Vec<Vec3>) {
    let count = segments as usize + 1;
    let tangents: Vec<Vec3> = (0..count)
        .map(|i| curve.tangent_at(i as f32 / segments as f32))
        .collect();

    let mut normals = vec![Vec3::ZERO; count];
    let mut binormals = vec![Vec3::ZERO; count];

    // seed with the axis least aligned to the first tangent
    let t0 = tangents[0];
    let abs = t0.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let v = t0.cross(axis).normalize_or(Vec3::X);
    normals[0] = t0.cross(v);
    binormals[0] = t0.cross(normals[0]);

    for i in 1..count {
        normals[i] = normals[i - 1];
        let b = tangents[i - 1].cross(tangents[i]);
        if b.length() > f32::EPSILON {
            let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
            normals[i] = Quat::from_axis_angle(b.normalize(), theta) * normals[i];
        }
        binormals[i] = tangents[i].cross(normals[i]);
    }

    if closed && count > 1 {
        // spread the seam twist over the whole tube
        let last = count - 1;
        let mut theta = normals[0].dot(normals[last]).clamp(-1.0, 1.0).acos() / segments as f32;
        if tangents[0].dot(normals[0].cross(normals[last])) > 0.0 {
            theta = -theta;
        }
        for i in 1..count {
            normals[i] = Quat::from_axis_angle(tangents[i], theta * i as f32) * normals[i];
            binormals[i] = tangents[i].cross(normals[i]);
        }
    }

    (tangents, normals, binormals)
}

/// Sweeps a circle of `radius` along `curve`. Ends are left open.
#[must_use]
pub fn create_tube(
    curve: &dyn Curve3,
    tubular_segments: u32,
    radius: f32,
    radial_segments: u32,
    closed: bool,
) -> Geometry {
    let tubular = tubular_segments.max(1);
    let radial = radial_segments.max(3);
    let (_, frame_normals, binormals) = compute_frames(curve, tubular, closed);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=tubular {
        let t = i as f32 / tubular as f32;
        let p = curve.point_at(t);
        let (n, b) = (frame_normals[i as usize], binormals[i as usize]);

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let normal = (n * -v.cos() + b * v.sin()).normalize_or_zero();
            positions.push((p + normal * radius).to_array());
            normals.push(normal.to_array());
            uvs.push([t, j as f32 / radial as f32]);
        }
    }

    let stride = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry::from_buffers(positions, normals, uvs, indices)
}
