//! CPU-side triangle geometry.
//!
//! Every primitive in this crate produces the same interleavable layout:
//! position, normal and uv per vertex plus a `u32` index list with
//! counter-clockwise front faces.

use glam::{Affine3A, Mat3A, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// An inverted box that any `expand` call will overwrite.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn center(&self) -> Vec3 { (self.min + self.max) * 0.5 }
    pub fn size(&self) -> Vec3 { self.max - self.min }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        if self.is_empty() {
            return *self;
        }
        let mut out = Self::EMPTY;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.expand(matrix.transform_point3(corner));
        }
        out
    }

    #[must_use]
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,

    bounding_box: Option<BoundingBox>,
    version: u64,
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a geometry from raw buffers and computes its bounds.
    ///
    /// Missing normals are computed from the faces, missing uvs are zero-filled.
    #[must_use]
    pub fn from_buffers(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        uvs: Vec<[f32; 2]>,
        indices: Vec<u32>,
    ) -> Self {
        let vertex_count = positions.len();
        let mut geo = Self {
            positions,
            normals,
            uvs,
            indices,
            bounding_box: None,
            version: 0,
        };
        if geo.uvs.len() != vertex_count {
            geo.uvs.resize(vertex_count, [0.0, 0.0]);
        }
        if geo.normals.len() == vertex_count {
            geo.compute_bounding_volume();
        } else {
            geo.compute_vertex_normals();
        }
        geo
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the three corners of triangle `i`.
    #[must_use]
    pub fn triangle(&self, i: usize) -> Option<[Vec3; 3]> {
        let tri = self.indices.get(i * 3..i * 3 + 3)?;
        let a = Vec3::from_array(*self.positions.get(tri[0] as usize)?);
        let b = Vec3::from_array(*self.positions.get(tri[1] as usize)?);
        let c = Vec3::from_array(*self.positions.get(tri[2] as usize)?);
        Some([a, b, c])
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.apply_matrix(&Affine3A::from_translation(offset));
    }

    /// Transforms positions by `matrix` and normals by its inverse transpose.
    pub fn apply_matrix(&mut self, matrix: &Affine3A) {
        for p in &mut self.positions {
            *p = matrix.transform_point3(Vec3::from_array(*p)).to_array();
        }

        let normal_matrix: Mat3A = matrix.matrix3.inverse().transpose();
        for n in &mut self.normals {
            let v = normal_matrix * Vec3::from_array(*n);
            *n = v.normalize_or_zero().to_array();
        }

        // mirrored transforms flip the winding
        if matrix.matrix3.determinant() < 0.0 {
            for tri in self.indices.chunks_exact_mut(3) {
                tri.swap(1, 2);
            }
        }

        self.compute_bounding_volume();
    }

    /// Appends `other`, offsetting its indices.
    pub fn merge(&mut self, other: &Geometry) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + base));
        self.compute_bounding_volume();
    }

    /// Recomputes smooth vertex normals from face normals (area weighted).
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (Some(a), Some(b), Some(c)) = (
                self.positions.get(ia),
                self.positions.get(ib),
                self.positions.get(ic),
            ) else {
                continue;
            };
            let (a, b, c) = (Vec3::from_array(*a), Vec3::from_array(*b), Vec3::from_array(*c));
            // cross product length is twice the area, which is the weight we want
            let face = (b - a).cross(c - a);
            acc[ia] += face;
            acc[ib] += face;
            acc[ic] += face;
        }

        self.normals = acc
            .into_iter()
            .map(|n| n.normalize_or(Vec3::Y).to_array())
            .collect();

        self.compute_bounding_volume();
    }

    /// Recomputes the cached bounding box and bumps the version.
    pub fn compute_bounding_volume(&mut self) {
        let mut bbox = BoundingBox::EMPTY;
        for p in &self.positions {
            bbox.expand(Vec3::from_array(*p));
        }
        self.bounding_box = if bbox.is_empty() { None } else { Some(bbox) };
        self.version = self.version.wrapping_add(1);
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    /// Sphere centered on the AABB center enclosing every vertex.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        let bbox = self.bounding_box?;
        let center = bbox.center();
        let radius_sq = self
            .positions
            .iter()
            .map(|p| Vec3::from_array(*p).distance_squared(center))
            .fold(0.0_f32, f32::max);
        Some(BoundingSphere {
            center,
            radius: radius_sq.sqrt(),
        })
    }
}
