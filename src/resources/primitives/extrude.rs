//! Extrusion of a 2D [`Shape`] along +Z, with an optional rounded bevel.
//!
//! The bevel grows the outline outward: the caps keep the original outline
//! while the side walls reach `bevel_size` beyond it. With the bevel enabled
//! the front cap sits at `z = -bevel_thickness` and the back cap at
//! `z = depth + bevel_thickness`.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::resources::geometry::Geometry;
use crate::resources::shape::{triangulate, Shape};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeOptions {
    pub depth: f32,
    pub steps: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,
    pub curve_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            steps: 1,
            bevel_enabled: true,
            bevel_thickness: 0.2,
            bevel_size: 0.1,
            bevel_segments: 3,
            curve_segments: 12,
        }
    }
}

impl ExtrudeOptions {
    /// Plain extrusion without bevel.
    #[must_use]
    pub fn flat(depth: f32) -> Self {
        Self {
            depth,
            bevel_enabled: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn beveled(depth: f32, thickness: f32, size: f32, segments: u32) -> Self {
        Self {
            depth,
            bevel_enabled: true,
            bevel_thickness: thickness,
            bevel_size: size,
            bevel_segments: segments,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_curve_segments(mut self, segments: u32) -> Self {
        self.curve_segments = segments;
        self
    }
}

/// Side walls are split into separate vertex columns at corners sharper
/// than this (cosine of ~35 degrees).
const SMOOTH_CORNER_COS: f32 = 0.82;

#[derive(Clone, Copy)]
struct Layer {
    z: f32,
    offset: f32,
}

fn layers(options: &ExtrudeOptions) -> Vec<Layer> {
    let steps = options.steps.max(1);
    let mut out = Vec::new();

    let (thickness, size, segments) = if options.bevel_enabled {
        (
            options.bevel_thickness,
            options.bevel_size,
            options.bevel_segments.max(1),
        )
    } else {
        (0.0, 0.0, 0)
    };

    for b in 0..segments {
        let t = b as f32 / segments as f32;
        out.push(Layer {
            z: -thickness * (t * FRAC_PI_2).cos(),
            offset: size * (t * FRAC_PI_2).sin(),
        });
    }
    for s in 0..=steps {
        out.push(Layer {
            z: options.depth * s as f32 / steps as f32,
            offset: size,
        });
    }
    for b in (0..segments).rev() {
        let t = b as f32 / segments as f32;
        out.push(Layer {
            z: options.depth + thickness * (t * FRAC_PI_2).cos(),
            offset: size * (t * FRAC_PI_2).sin(),
        });
    }
    out
}

/// Outward edge normal for ring edge `a -> b`. Outlines are counter-clockwise
/// and holes clockwise, so the right-hand side is outside the solid for both.
fn edge_normal(a: Vec2, b: Vec2) -> Vec2 {
    let d = b - a;
    Vec2::new(d.y, -d.x).normalize_or_zero()
}

/// Miter offset direction per ring vertex, in units of bevel size.
fn bevel_vectors(ring: &[Vec2]) -> Vec<Vec2> {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let n1 = edge_normal(prev, ring[i]);
            let n2 = edge_normal(ring[i], next);
            let denom = 1.0 + n1.dot(n2);
            if denom < 1e-4 {
                return n1;
            }
            let v = (n1 + n2) / denom;
            v.clamp_length_max(2.0)
        })
        .collect()
}

fn extrude_sides(ring: &[Vec2], layers: &[Layer], out: &mut Geometry) {
    let n = ring.len();
    if n < 3 {
        return;
    }
    let bevel = bevel_vectors(ring);

    // (ring vertex, arc length) per column; sharp corners get two columns
    let mut columns: Vec<(usize, f32)> = Vec::with_capacity(n * 2 + 1);
    let mut arc = 0.0;
    let mut seam_smooth = true;
    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let next = ring[(i + 1) % n];
        let sharp = edge_normal(prev, ring[i]).dot(edge_normal(ring[i], next)) < SMOOTH_CORNER_COS;
        if i == 0 {
            seam_smooth = !sharp;
        } else if sharp {
            columns.push((i, arc));
        }
        columns.push((i, arc));
        arc += ring[i].distance(next);
    }
    // closing column; the seam is split for uvs either way
    columns.push((0, arc));

    let mut side = Geometry::new();
    for layer in layers {
        for &(vi, len) in &columns {
            let p = ring[vi] + bevel[vi] * layer.offset;
            side.positions.push([p.x, p.y, layer.z]);
            side.uvs.push([len, layer.z]);
        }
    }

    let stride = columns.len() as u32;
    for l in 0..layers.len().saturating_sub(1) as u32 {
        for c in 0..stride - 1 {
            if columns[c as usize].0 == columns[c as usize + 1].0 {
                continue;
            }
            let a = l * stride + c;
            let b = a + 1;
            let cc = b + stride;
            let d = a + stride;
            side.indices.extend_from_slice(&[a, b, cc, a, cc, d]);
        }
    }

    side.compute_vertex_normals();
    if seam_smooth {
        let last = stride as usize - 1;
        for l in 0..layers.len() {
            let (first, closing) = (l * stride as usize, l * stride as usize + last);
            let n = (Vec3::from_array(side.normals[first]) + Vec3::from_array(side.normals[closing]))
                .normalize_or(Vec3::Z)
                .to_array();
            side.normals[first] = n;
            side.normals[closing] = n;
        }
    }
    out.merge(&side);
}

fn add_cap(points: &[Vec2], tris: &[u32], z: f32, facing_back: bool, out: &mut Geometry) {
    let mut cap = Geometry::new();
    let nz = if facing_back { 1.0 } else { -1.0 };
    for p in points {
        cap.positions.push([p.x, p.y, z]);
        cap.normals.push([0.0, 0.0, nz]);
        cap.uvs.push([p.x, p.y]);
    }
    for tri in tris.chunks_exact(3) {
        if facing_back {
            cap.indices.extend_from_slice(tri);
        } else {
            cap.indices.extend_from_slice(&[tri[2], tri[1], tri[0]]);
        }
    }
    out.merge(&cap);
}

/// Extrudes `shape` along +Z.
///
/// Degenerate shapes (fewer than three distinct outline points) produce an
/// empty geometry.
#[must_use]
pub fn create_extrude(shape: &Shape, options: ExtrudeOptions) -> Geometry {
    let (contour, holes) = shape.extract_points(options.curve_segments.max(1));
    if contour.len() < 3 {
        return Geometry::new();
    }

    let tris = triangulate(&contour, &holes);
    let layers = layers(&options);

    let mut cap_points = contour.clone();
    for hole in &holes {
        cap_points.extend_from_slice(hole);
    }

    let mut geo = Geometry::new();

    let (Some(front), Some(back)) = (layers.first(), layers.last()) else {
        return geo;
    };
    add_cap(&cap_points, &tris, front.z, false, &mut geo);
    add_cap(&cap_points, &tris, back.z, true, &mut geo);

    extrude_sides(&contour, &layers, &mut geo);
    for hole in &holes {
        extrude_sides(hole, &layers, &mut geo);
    }

    geo.compute_bounding_volume();
    geo
}
