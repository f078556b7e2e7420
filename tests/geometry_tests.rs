//! Geometry, Shape and Primitive Tests
//!
//! Tests for:
//! - BoundingBox center, size, union, transform, inflate
//! - Geometry buffers, bounds, normals, merge and mirrored transforms
//! - Primitive generators (box, circle, ring, cylinder, plane, sphere, torus)
//! - Path flattening, winding and ear-clipping triangulation with holes
//! - Extrusion with and without bevel
//! - Curves and tube sweeps

use glam::{Affine3A, Vec2, Vec3};

use coder_desk::resources::curve::{CatmullRomCurve3, CubicBezierCurve3, Curve3};
use coder_desk::resources::geometry::{BoundingBox, Geometry};
use coder_desk::resources::primitives::{
    compute_frames, create_box, create_circle, create_cylinder, create_extrude, create_plane, create_ring,
    create_sphere, create_torus, create_tube, CylinderOptions, ExtrudeOptions, PlaneOptions, SphereOptions,
};
use coder_desk::resources::shape::{is_clockwise, rect_path, signed_area, triangulate, Path, Shape};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn triangle_area_2d(points: &[Vec2], tri: &[u32]) -> f32 {
    let (a, b, c) = (points[tri[0] as usize], points[tri[1] as usize], points[tri[2] as usize]);
    ((b - a).perp_dot(c - a)) * 0.5
}

// ============================================================================
// BoundingBox Tests
// ============================================================================

#[test]
fn bbox_center_and_size() {
    let bbox = BoundingBox {
        min: Vec3::new(-1.0, 0.0, 2.0),
        max: Vec3::new(3.0, 2.0, 4.0),
    };
    assert!(vec3_approx(bbox.center(), Vec3::new(1.0, 1.0, 3.0)));
    assert!(vec3_approx(bbox.size(), Vec3::new(4.0, 2.0, 2.0)));
}

#[test]
fn bbox_empty_until_expanded() {
    let mut bbox = BoundingBox::EMPTY;
    assert!(bbox.is_empty());

    bbox.expand(Vec3::new(1.0, 2.0, 3.0));
    assert!(!bbox.is_empty());
    assert!(bbox.contains_point(Vec3::new(1.0, 2.0, 3.0)));

    bbox.expand(Vec3::new(-1.0, 0.0, 0.0));
    assert!(vec3_approx(bbox.min, Vec3::new(-1.0, 0.0, 0.0)));
    assert!(vec3_approx(bbox.max, Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn bbox_union_covers_both() {
    let a = BoundingBox {
        min: Vec3::ZERO,
        max: Vec3::ONE,
    };
    let b = BoundingBox {
        min: Vec3::splat(-2.0),
        max: Vec3::splat(0.5),
    };
    let u = a.union(&b);
    assert!(vec3_approx(u.min, Vec3::splat(-2.0)));
    assert!(vec3_approx(u.max, Vec3::ONE));
}

#[test]
fn bbox_transform_rotated_box_grows() {
    let bbox = BoundingBox {
        min: Vec3::new(-1.0, -0.5, -0.5),
        max: Vec3::new(1.0, 0.5, 0.5),
    };
    let rotated = bbox.transform(&Affine3A::from_rotation_y(std::f32::consts::FRAC_PI_2));
    // x and z extents swap under a quarter turn
    assert!(approx(rotated.size().x, 1.0));
    assert!(approx(rotated.size().z, 2.0));

    let moved = bbox.transform(&Affine3A::from_translation(Vec3::new(5.0, 0.0, 0.0)));
    assert!(vec3_approx(moved.center(), Vec3::new(5.0, 0.0, 0.0)));
}

#[test]
fn bbox_transform_keeps_empty() {
    let moved = BoundingBox::EMPTY.transform(&Affine3A::from_translation(Vec3::ONE));
    assert!(moved.is_empty());
}

#[test]
fn bbox_inflate() {
    let bbox = BoundingBox {
        min: Vec3::ZERO,
        max: Vec3::ONE,
    }
    .inflate(0.5);
    assert!(vec3_approx(bbox.min, Vec3::splat(-0.5)));
    assert!(vec3_approx(bbox.max, Vec3::splat(1.5)));
}

// ============================================================================
// Geometry Tests
// ============================================================================

fn single_triangle() -> Geometry {
    Geometry::from_buffers(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        Vec::new(),
        Vec::new(),
        vec![0, 1, 2],
    )
}

#[test]
fn from_buffers_fills_missing_streams() {
    let geo = single_triangle();
    assert_eq!(geo.vertex_count(), 3);
    assert_eq!(geo.triangle_count(), 1);
    assert_eq!(geo.uvs.len(), 3);
    assert_eq!(geo.normals.len(), 3);
    for n in &geo.normals {
        assert!(vec3_approx(Vec3::from_array(*n), Vec3::Z));
    }
}

#[test]
fn empty_geometry_has_no_bounds() {
    let geo = Geometry::new();
    assert!(geo.is_empty());
    assert!(geo.bounding_box().is_none());
    assert!(geo.bounding_sphere().is_none());
}

#[test]
fn triangle_lookup() {
    let geo = single_triangle();
    let [a, b, c] = geo.triangle(0).unwrap();
    assert!(vec3_approx(a, Vec3::ZERO));
    assert!(vec3_approx(b, Vec3::X));
    assert!(vec3_approx(c, Vec3::Y));
    assert!(geo.triangle(1).is_none());
}

#[test]
fn translate_moves_bounds_and_bumps_version() {
    let mut geo = create_box(1.0, 1.0, 1.0);
    let before = geo.version();
    geo.translate(Vec3::new(0.0, 2.0, 0.0));

    assert!(geo.version() > before);
    let bbox = geo.bounding_box().unwrap();
    assert!(vec3_approx(bbox.center(), Vec3::new(0.0, 2.0, 0.0)));
}

#[test]
fn mirrored_matrix_keeps_front_faces_outward() {
    let mut geo = single_triangle();
    geo.apply_matrix(&Affine3A::from_scale(Vec3::new(-1.0, 1.0, 1.0)));

    let [a, b, c] = geo.triangle(0).unwrap();
    let face = (b - a).cross(c - a).normalize();
    let normal = Vec3::from_array(geo.normals[0]);
    // winding and stored normal still agree after the mirror
    assert!(face.dot(normal) > 0.99);
}

#[test]
fn merge_offsets_indices() {
    let mut a = single_triangle();
    let mut b = single_triangle();
    b.translate(Vec3::new(0.0, 0.0, 3.0));
    a.merge(&b);

    assert_eq!(a.vertex_count(), 6);
    assert_eq!(a.triangle_count(), 2);
    assert_eq!(&a.indices[3..], &[3, 4, 5]);
    let [p, _, _] = a.triangle(1).unwrap();
    assert!(approx(p.z, 3.0));
    assert!(approx(a.bounding_box().unwrap().max.z, 3.0));
}

#[test]
fn vertex_normals_shared_vertex_averages_faces() {
    // two triangles folded at a right angle along the X axis
    let mut geo = Geometry::from_buffers(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
        Vec::new(),
        Vec::new(),
        vec![0, 1, 2, 0, 1, 3],
    );
    geo.compute_vertex_normals();

    let shared = Vec3::from_array(geo.normals[0]);
    let expected = Vec3::new(0.0, 1.0, 1.0).normalize();
    assert!(vec3_approx(shared, expected), "got {shared:?}");
}

#[test]
fn bounding_sphere_encloses_vertices() {
    let geo = create_box(2.0, 2.0, 2.0);
    let sphere = geo.bounding_sphere().unwrap();
    assert!(vec3_approx(sphere.center, Vec3::ZERO));
    assert!(approx(sphere.radius, 3.0_f32.sqrt()));
}

// ============================================================================
// Primitive Tests
// ============================================================================

#[test]
fn box_counts_and_extent() {
    let geo = create_box(2.0, 4.0, 6.0);
    assert_eq!(geo.vertex_count(), 24);
    assert_eq!(geo.indices.len(), 36);

    let bbox = geo.bounding_box().unwrap();
    assert!(vec3_approx(bbox.min, Vec3::new(-1.0, -2.0, -3.0)));
    assert!(vec3_approx(bbox.max, Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn box_faces_wind_outward() {
    let geo = create_box(1.0, 1.0, 1.0);
    for i in 0..geo.triangle_count() {
        let [a, b, c] = geo.triangle(i).unwrap();
        let face = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(face.dot(centroid) > 0.0, "triangle {i} faces inward");
    }
}

#[test]
fn circle_counts() {
    let geo = create_circle(1.0, 16);
    assert_eq!(geo.vertex_count(), 18);
    assert_eq!(geo.triangle_count(), 16);
    assert!(approx(geo.bounding_box().unwrap().max.x, 1.0));
}

#[test]
fn circle_clamps_segments() {
    let geo = create_circle(1.0, 1);
    assert_eq!(geo.triangle_count(), 3);
}

#[test]
fn ring_spans_inner_to_outer() {
    let geo = create_ring(0.5, 1.0, 8);
    assert_eq!(geo.triangle_count(), 16);
    for p in &geo.positions {
        let r = Vec2::new(p[0], p[1]).length();
        assert!(approx(r, 0.5) || approx(r, 1.0));
    }
}

#[test]
fn cylinder_height_and_radius() {
    let geo = create_cylinder(CylinderOptions::new(0.5, 1.0, 2.0, 12));
    let bbox = geo.bounding_box().unwrap();
    assert!(approx(bbox.min.y, -1.0));
    assert!(approx(bbox.max.y, 1.0));
    assert!(approx(bbox.max.x.max(bbox.max.z), 1.0));
    assert!(!geo.is_empty());
}

#[test]
fn plane_faces_positive_z() {
    let geo = create_plane(PlaneOptions::new(2.0, 1.0));
    assert_eq!(geo.vertex_count(), 4);
    assert_eq!(geo.triangle_count(), 2);
    for i in 0..geo.triangle_count() {
        let [a, b, c] = geo.triangle(i).unwrap();
        assert!((b - a).cross(c - a).z > 0.0);
    }
    let size = geo.bounding_box().unwrap().size();
    assert!(approx(size.x, 2.0));
    assert!(approx(size.y, 1.0));
}

#[test]
fn sphere_vertices_on_radius() {
    let geo = create_sphere(SphereOptions::new(1.5, 16, 8));
    for p in &geo.positions {
        assert!(approx(Vec3::from_array(*p).length(), 1.5));
    }
    // poles collapse one triangle per quad on the first and last rows
    assert_eq!(geo.triangle_count(), 16 * 8 * 2 - 2 * 16);
}

#[test]
fn hemisphere_stays_above_equator() {
    let geo = create_sphere(SphereOptions::new(1.0, 12, 6).hemisphere());
    let bbox = geo.bounding_box().unwrap();
    assert!(bbox.min.y > -EPSILON);
    assert!(approx(bbox.max.y, 1.0));
}

#[test]
fn torus_extent() {
    let geo = create_torus(1.0, 0.25, 8, 24);
    let bbox = geo.bounding_box().unwrap();
    assert!(approx(bbox.max.z - bbox.min.z, 0.5));
    assert!(bbox.max.x > 1.2 && bbox.max.x < 1.26);
}

// ============================================================================
// Shape Tests
// ============================================================================

#[test]
fn signed_area_and_winding() {
    let ccw = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    assert!(approx(signed_area(&ccw), 1.0));
    assert!(!is_clockwise(&ccw));

    let cw: Vec<Vec2> = ccw.iter().rev().copied().collect();
    assert!(is_clockwise(&cw));
}

#[test]
fn path_lines_contribute_end_points_only() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(1.0, 0.0).line_to(1.0, 1.0);
    assert_eq!(path.points(12), vec![Vec2::ZERO, Vec2::X, Vec2::ONE]);
}

#[test]
fn path_curves_are_subdivided() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).quadratic_curve_to(1.0, 1.0, 2.0, 0.0);
    let points = path.points(8);
    assert_eq!(points.len(), 9);
    assert!(approx(points[4].y, 0.5));
}

#[test]
fn extract_points_normalizes_winding() {
    let mut shape = Shape::new();
    // clockwise outline
    shape.path.move_to(0.0, 0.0).line_to(0.0, 1.0).line_to(1.0, 1.0).line_to(1.0, 0.0).line_to(0.0, 0.0);
    shape.add_hole(rect_path(0.5, 0.5));

    let (contour, holes) = shape.extract_points(4);
    assert_eq!(contour.len(), 4);
    assert!(!is_clockwise(&contour));
    assert_eq!(holes.len(), 1);
    assert!(is_clockwise(&holes[0]));
}

#[test]
fn triangulate_square() {
    let square = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    let tris = triangulate(&square, &[]);
    assert_eq!(tris.len(), 6);

    let total: f32 = tris.chunks_exact(3).map(|t| triangle_area_2d(&square, t)).sum();
    assert!(approx(total, 1.0));
}

#[test]
fn triangulate_concave_outline() {
    // L shape, area 3
    let l = [
        Vec2::new(0.0, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(2.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 2.0),
        Vec2::new(0.0, 2.0),
    ];
    let tris = triangulate(&l, &[]);
    assert_eq!(tris.len() / 3, 4);
    for t in tris.chunks_exact(3) {
        assert!(triangle_area_2d(&l, t) > 0.0, "triangle {t:?} is not counter-clockwise");
    }
    let total: f32 = tris.chunks_exact(3).map(|t| triangle_area_2d(&l, t)).sum();
    assert!(approx(total, 3.0));
}

#[test]
fn triangulate_with_hole_subtracts_area() {
    let outer = vec![
        Vec2::new(-2.0, -2.0),
        Vec2::new(2.0, -2.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(-2.0, 2.0),
    ];
    let hole = vec![
        Vec2::new(-1.0, -1.0),
        Vec2::new(-1.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, -1.0),
    ];
    let tris = triangulate(&outer, std::slice::from_ref(&hole));

    let mut all = outer.clone();
    all.extend_from_slice(&hole);
    assert_eq!(tris.len() / 3, 8);
    let total: f32 = tris.chunks_exact(3).map(|t| triangle_area_2d(&all, t)).sum();
    assert!(approx(total, 16.0 - 4.0), "area {total}");
}

#[test]
fn triangulate_degenerate_outline() {
    assert!(triangulate(&[Vec2::ZERO, Vec2::X], &[]).is_empty());
}

#[test]
fn rounded_rect_stays_inside_bounds() {
    let shape = Shape::rounded_rect(2.0, 1.0, 0.2);
    let (contour, _) = shape.extract_points(6);
    for p in &contour {
        assert!(p.x.abs() <= 1.0 + EPSILON && p.y.abs() <= 0.5 + EPSILON);
    }
    // corners are cut, so the area is slightly below the full rectangle
    let area = signed_area(&contour);
    assert!(area < 2.0 && area > 1.9);
}

#[test]
fn ellipse_shape_area() {
    let shape = Shape::ellipse(2.0, 1.0);
    let (contour, _) = shape.extract_points(32);
    let area = signed_area(&contour);
    assert!((area - std::f32::consts::PI * 2.0).abs() < 0.05, "area {area}");
}

// ============================================================================
// Extrude Tests
// ============================================================================

#[test]
fn flat_extrude_spans_depth() {
    let mut shape = Shape::new();
    shape.path = rect_path(1.0, 2.0);
    let geo = create_extrude(&shape, ExtrudeOptions::flat(0.5));

    let bbox = geo.bounding_box().unwrap();
    assert!(approx(bbox.min.z, 0.0));
    assert!(approx(bbox.max.z, 0.5));
    assert!(approx(bbox.size().x, 1.0));
    assert!(approx(bbox.size().y, 2.0));
}

#[test]
fn beveled_extrude_grows_outline_and_caps() {
    let mut shape = Shape::new();
    shape.path = rect_path(1.0, 1.0);
    let geo = create_extrude(&shape, ExtrudeOptions::beveled(0.5, 0.1, 0.05, 3));

    let bbox = geo.bounding_box().unwrap();
    assert!(approx(bbox.min.z, -0.1));
    assert!(approx(bbox.max.z, 0.6));
    assert!(approx(bbox.max.x, 0.55));
}

#[test]
fn extrude_with_hole_is_hollow() {
    let mut shape = Shape::new();
    shape.path = rect_path(2.0, 2.0);
    shape.add_hole(rect_path(1.0, 1.0));
    let geo = create_extrude(&shape, ExtrudeOptions::flat(1.0));

    // no vertex may sit strictly inside the hole
    for p in &geo.positions {
        assert!(p[0].abs() >= 0.5 - EPSILON || p[1].abs() >= 0.5 - EPSILON);
    }
}

#[test]
fn extrude_empty_shape_is_empty() {
    let geo = create_extrude(&Shape::new(), ExtrudeOptions::flat(1.0));
    assert!(geo.is_empty());
}

// ============================================================================
// Curve and Tube Tests
// ============================================================================

#[test]
fn bezier_endpoints_and_tangent() {
    let curve = CubicBezierCurve3::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
    assert!(vec3_approx(curve.point_at(0.0), Vec3::ZERO));
    assert!(vec3_approx(curve.point_at(1.0), Vec3::new(3.0, 0.0, 0.0)));
    assert!(vec3_approx(curve.tangent_at(0.5), Vec3::X));
    assert_eq!(curve.points(10).len(), 11);
}

#[test]
fn catmull_rom_passes_through_points() {
    let points = vec![Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
    let curve = CatmullRomCurve3::new(points.clone());
    assert!(vec3_approx(curve.point_at(0.0), points[0]));
    assert!(vec3_approx(curve.point_at(0.5), points[1]));
    assert!(vec3_approx(curve.point_at(1.0), points[2]));
}

#[test]
fn frames_are_orthonormal() {
    let curve = CatmullRomCurve3::new(vec![Vec3::ZERO, Vec3::new(1.0, 0.5, 0.0), Vec3::new(2.0, 0.0, 1.0)]);
    let (tangents, normals, binormals) = compute_frames(&curve, 10, false);
    assert_eq!(tangents.len(), 11);
    for i in 0..tangents.len() {
        assert!(approx(tangents[i].length(), 1.0));
        assert!(approx(normals[i].length(), 1.0));
        assert!(tangents[i].dot(normals[i]).abs() < 1e-3);
        assert!(binormals[i].dot(normals[i]).abs() < 1e-3);
    }
}

#[test]
fn tube_along_straight_line() {
    let curve = CubicBezierCurve3::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
    let geo = create_tube(&curve, 4, 0.1, 6, false);

    assert_eq!(geo.vertex_count(), 5 * 7);
    assert_eq!(geo.triangle_count(), 4 * 6 * 2);
    for p in &geo.positions {
        let radial = Vec2::new(p[1], p[2]).length();
        assert!(approx(radial, 0.1), "radius {radial}");
    }
}
