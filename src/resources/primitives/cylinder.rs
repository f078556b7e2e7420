use std::f32::consts::TAU;

use crate::resources::geometry::Geometry;

pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

impl CylinderOptions {
    #[must_use]
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            ..Default::default()
        }
    }
}

/// Y-aligned cylinder (or cone frustum) centered on the origin.
#[must_use]
pub fn create_cylinder(options: CylinderOptions) -> Geometry {
    let radial = options.radial_segments.max(3);
    let rows = options.height_segments.max(1);
    let half_height = options.height / 2.0;
    let slope = if options.height.abs() > f32::EPSILON {
        (options.radius_bottom - options.radius_top) / options.height
    } else {
        0.0
    };

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    // side wall
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (options.radius_bottom - options.radius_top) + options.radius_top;
        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * options.theta_length + options.theta_start;
            let (sin, cos) = theta.sin_cos();
            positions.push([radius * sin, -v * options.height + half_height, radius * cos]);
            let n = glam::Vec3::new(sin, slope, cos).normalize();
            normals.push(n.to_array());
            uvs.push([u, 1.0 - v]);
        }
    }

    let stride = radial + 1;
    for y in 0..rows {
        for x in 0..radial {
            let a = y * stride + x;
            let b = (y + 1) * stride + x;
            let c = (y + 1) * stride + x + 1;
            let d = y * stride + x + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    if !options.open_ended {
        for top in [true, false] {
            let radius = if top { options.radius_top } else { options.radius_bottom };
            if radius <= 0.0 {
                continue;
            }
            let sign = if top { 1.0 } else { -1.0 };

            let center_start = positions.len() as u32;
            for _ in 1..=radial {
                positions.push([0.0, half_height * sign, 0.0]);
                normals.push([0.0, sign, 0.0]);
                uvs.push([0.5, 0.5]);
            }

            let ring_start = positions.len() as u32;
            for x in 0..=radial {
                let u = x as f32 / radial as f32;
                let theta = u * options.theta_length + options.theta_start;
                let (sin, cos) = theta.sin_cos();
                positions.push([radius * sin, half_height * sign, radius * cos]);
                normals.push([0.0, sign, 0.0]);
                uvs.push([cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5]);
            }

            for x in 0..radial {
                let c = center_start + x;
                let i = ring_start + x;
                if top {
                    indices.extend_from_slice(&[i, i + 1, c]);
                } else {
                    indices.extend_from_slice(&[i + 1, i, c]);
                }
            }
        }
    }

    Geometry::from_buffers(positions, normals, uvs, indices)
}
