use std::f32::consts::{PI, TAU};

use crate::resources::geometry::Geometry;

pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub phi_start: f32,
    pub phi_length: f32,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
            phi_start: 0.0,
            phi_length: TAU,
            theta_start: 0.0,
            theta_length: PI,
        }
    }
}

impl SphereOptions {
    #[must_use]
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments,
            height_segments,
            ..Default::default()
        }
    }

    /// Upper half only (theta in `[0, PI/2]`).
    #[must_use]
    pub fn hemisphere(mut self) -> Self {
        self.theta_length = PI / 2.0;
        self
    }
}

/// UV sphere; theta runs from the +Y pole downward, phi around Y.
pub fn create_sphere(options: SphereOptions) -> Geometry {
    let radius = options.radius;
    let width_segments = options.width_segments.max(3);
    let height_segments = options.height_segments.max(2);
    let theta_end = (options.theta_start + options.theta_length).min(PI);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = options.theta_start + v * options.theta_length;

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = options.phi_start + u * options.phi_length;

            let n = [-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin()];
            positions.push([n[0] * radius, n[1] * radius, n[2] * radius]);
            normals.push(n);
            uvs.push([u, 1.0 - v]);
        }
    }

    let stride = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;

            // skip the collapsed triangles at the poles
            if iy != 0 || options.theta_start > 0.0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 || theta_end < PI {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Geometry::from_buffers(positions, normals, uvs, indices)
}
