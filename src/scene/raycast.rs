//! Ray picking against scene meshes.

use glam::{Affine3A, Vec3};

use crate::assets::AssetServer;
use crate::resources::geometry::BoundingBox;
use crate::resources::material::Side;
use crate::scene::{NodeHandle, Scene};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length for world rays; may be scaled after `transform`.
    pub direction: Vec3,
}

/// Which triangle faces a ray ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Culling {
    None,
    Back,
    Front,
}

impl From<Side> for Culling {
    fn from(side: Side) -> Self {
        match side {
            Side::Front => Culling::Back,
            Side::Back => Culling::Front,
            Side::Double => Culling::None,
        }
    }
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The same ray expressed through `matrix`. The direction is not
    /// renormalized, so ray parameters stay comparable across spaces.
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }

    /// Slab test. Returns the entry parameter (0 when starting inside).
    #[must_use]
    pub fn intersect_box(&self, bbox: &BoundingBox) -> Option<f32> {
        if bbox.is_empty() {
            return None;
        }
        let inv = self.direction.recip();
        let t1 = (bbox.min - self.origin) * inv;
        let t2 = (bbox.max - self.origin) * inv;

        // NaN from 0 * inf is discarded by min/max_element on the other axes
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_far < 0.0 || t_near > t_far {
            return None;
        }
        Some(t_near.max(0.0))
    }

    /// Möller–Trumbore. Triangles are counter-clockwise when front facing.
    #[must_use]
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3, culling: Culling) -> Option<f32> {
        const EPSILON: f32 = 1e-10;

        let edge1 = b - a;
        let edge2 = c - a;
        let pvec = self.direction.cross(edge2);
        let det = edge1.dot(pvec);

        // det > 0: the ray hits the front face
        match culling {
            Culling::Back if det < EPSILON => return None,
            Culling::Front if det > -EPSILON => return None,
            _ if det.abs() < EPSILON => return None,
            _ => {}
        }

        let inv_det = 1.0 / det;
        let tvec = self.origin - a;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = self.direction.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub node: NodeHandle,
    /// Distance along the (unit) world ray.
    pub distance: f32,
    pub point: Vec3,
    pub face_index: usize,
}

pub struct Raycaster;

impl Raycaster {
    /// All mesh hits in the subtree of `root`, nearest first.
    ///
    /// Hidden nodes (and everything below them) are skipped. Each mesh
    /// reports at most its nearest triangle. Requires current world
    /// matrices.
    #[must_use]
    pub fn intersect_subtree(scene: &Scene, assets: &AssetServer, root: NodeHandle, ray: &Ray) -> Vec<Intersection> {
        let mut hits = Vec::new();
        if !scene.is_visible_in_world(root) {
            return hits;
        }

        scene.traverse_visible(root, &mut |handle, node| {
            let Some(mesh) = node.mesh.and_then(|k| scene.meshes.get(k)) else {
                return;
            };
            let Some(geometry) = assets.get_geometry(mesh.geometry) else {
                return;
            };
            let culling = assets
                .get_material(mesh.material)
                .map_or(Culling::Back, |m| Culling::from(m.side));

            let world = node.transform.world_matrix;
            if world.matrix3.determinant().abs() < 1e-12 {
                return;
            }
            let local_ray = ray.transform(&world.inverse());

            if let Some(bbox) = geometry.bounding_box()
                && local_ray.intersect_box(&bbox).is_none()
            {
                return;
            }

            let mut nearest: Option<(f32, usize)> = None;
            for i in 0..geometry.triangle_count() {
                let Some([a, b, c]) = geometry.triangle(i) else {
                    continue;
                };
                if let Some(t) = local_ray.intersect_triangle(a, b, c, culling)
                    && nearest.is_none_or(|(best, _)| t < best)
                {
                    nearest = Some((t, i));
                }
            }

            if let Some((t, face_index)) = nearest {
                let point = world.transform_point3(local_ray.at(t));
                hits.push(Intersection {
                    node: handle,
                    distance: point.distance(ray.origin),
                    point,
                    face_index,
                });
            }
        });

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
