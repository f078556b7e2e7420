//! Scene Graph, Camera, Raycast and Input Tests
//!
//! Tests for:
//! - Node hierarchy (attach, remove, find, visibility)
//! - Transform propagation to world matrices
//! - Euler rotation round trips beyond a half turn
//! - Camera aspect, frustum and picking rays
//! - Ray/box and ray/triangle intersection with face culling
//! - Subtree raycasting through the asset server
//! - Pointer input state and NDC conversion

use glam::{Affine3A, Vec2, Vec3};

use coder_desk::app::input::{pixels_to_ndc, ButtonState, Input, MouseButton, TouchPhase};
use coder_desk::assets::AssetServer;
use coder_desk::resources::geometry::BoundingBox;
use coder_desk::resources::material::{Material, Side};
use coder_desk::resources::mesh::Mesh;
use coder_desk::resources::primitives::create_box;
use coder_desk::scene::{Camera, Culling, NodeHandle, Ray, Raycaster, Scene};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn add_unit_box(scene: &mut Scene, assets: &mut AssetServer, name: &str, side: Side) -> NodeHandle {
    let geometry = assets.add_geometry(create_box(1.0, 1.0, 1.0));
    let material = assets.add_material(Material::new_basic(0xffffff).with_side(side));
    scene.add_mesh(Mesh::new(geometry, material).with_name(name))
}

// ============================================================================
// Hierarchy Tests
// ============================================================================

#[test]
fn build_node_attaches_to_parent() {
    let mut scene = Scene::new();
    let root = scene.create_node("root");
    let child = scene.build_node("child").with_parent(root).build();

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(root));
    assert_eq!(scene.get_node(root).unwrap().children(), &[child]);
    assert_eq!(scene.root_nodes, vec![root]);
}

#[test]
fn find_by_name_searches_subtrees() {
    let mut scene = Scene::new();
    let desk = scene.create_node("desk");
    let leg = scene.build_node("leg").with_parent(desk).build();
    let other = scene.create_node("other");

    assert_eq!(scene.find_by_name("leg"), Some(leg));
    assert_eq!(scene.find_by_name_in(other, "leg"), None);
    assert_eq!(scene.find_by_name("missing"), None);
}

#[test]
fn attach_rejects_cycles() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    let b = scene.build_node("b").with_parent(a).build();

    scene.attach(a, b);
    assert_eq!(scene.get_node(a).unwrap().parent(), None);
    assert!(scene.is_descendant_of(b, a));
}

#[test]
fn remove_node_drops_subtree_and_components() {
    let mut scene = Scene::new();
    let mut assets = AssetServer::new();
    let group = scene.create_node("group");
    let mesh = add_unit_box(&mut scene, &mut assets, "box", Side::Front);
    scene.attach(mesh, group);

    assert_eq!(scene.meshes.len(), 1);
    scene.remove_node(group);

    assert!(scene.get_node(mesh).is_none());
    assert!(scene.meshes.is_empty());
    assert!(scene.root_nodes.is_empty());
}

#[test]
fn hidden_parent_hides_subtree() {
    let mut scene = Scene::new();
    let parent = scene.build_node("parent").visible(false).build();
    let child = scene.build_node("child").with_parent(parent).build();

    assert!(!scene.is_visible_in_world(child));

    let mut visited = Vec::new();
    scene.traverse_visible(parent, &mut |h, _| visited.push(h));
    assert!(visited.is_empty());

    let mut all = Vec::new();
    scene.traverse(parent, &mut |h, _| all.push(h));
    assert_eq!(all, vec![parent, child]);
}

// ============================================================================
// Transform Tests
// ============================================================================

#[test]
fn world_matrix_composes_parents() {
    let mut scene = Scene::new();
    let parent = scene
        .build_node("parent")
        .with_position(1.0, 0.0, 0.0)
        .with_scale(2.0)
        .build();
    let child = scene.build_node("child").with_position(0.0, 1.0, 0.0).with_parent(parent).build();

    scene.update_matrix_world();

    let world = scene.get_node(child).unwrap().world_matrix();
    assert!(vec3_approx(world.translation.into(), Vec3::new(1.0, 2.0, 0.0)));
}

#[test]
fn world_matrix_follows_changes() {
    let mut scene = Scene::new();
    let node = scene.create_node("node");
    scene.update_matrix_world();

    scene.get_node_mut(node).unwrap().transform.position = Vec3::new(0.0, 0.0, -3.0);
    scene.update_matrix_world();

    let pos = scene.get_node(node).unwrap().transform.world_position();
    assert!(vec3_approx(pos, Vec3::new(0.0, 0.0, -3.0)));
}

#[test]
fn euler_angles_survive_full_turns() {
    let mut scene = Scene::new();
    let node = scene.create_node("chair");
    let transform = &mut scene.get_node_mut(node).unwrap().transform;

    transform.set_rotation_euler(0.0, std::f32::consts::TAU, 0.0);
    assert!(approx(transform.rotation_euler().y, std::f32::consts::TAU));

    transform.set_rotation_axis(2, 0.3);
    let euler = transform.rotation_euler();
    assert!(approx(euler.y, std::f32::consts::TAU));
    assert!(approx(euler.z, 0.3));
}

#[test]
fn look_at_points_negative_z() {
    let mut scene = Scene::new();
    let node = scene.build_node("eye").with_position(0.0, 0.0, 5.0).build();
    let transform = &mut scene.get_node_mut(node).unwrap().transform;
    transform.look_at(Vec3::new(5.0, 0.0, 5.0), Vec3::Y);

    let forward = transform.rotation * Vec3::NEG_Z;
    assert!(vec3_approx(forward, Vec3::X));
}

// ============================================================================
// Camera Tests
// ============================================================================

fn camera_scene(position: Vec3) -> Scene {
    let mut scene = Scene::new();
    let cam = scene.add_camera(Camera::new_perspective(60.0, 1.0, 0.1, 100.0));
    scene.get_node_mut(cam).unwrap().transform.position = position;
    scene.update_matrix_world();
    if let Some((transform, camera)) = scene.query_main_camera_bundle() {
        let world = *transform.world_matrix();
        camera.update_view_projection(&world);
    }
    scene
}

#[test]
fn first_camera_becomes_active() {
    let mut scene = Scene::new();
    let first = scene.add_camera(Camera::new_perspective(45.0, 1.0, 0.1, 10.0));
    scene.add_camera(Camera::new_perspective(45.0, 1.0, 0.1, 10.0));
    assert_eq!(scene.active_camera, Some(first));
}

#[test]
fn camera_fov_is_stored_in_radians() {
    let camera = Camera::new_perspective(90.0, 1.0, 0.1, 10.0);
    assert!(approx(camera.fov, std::f32::consts::FRAC_PI_2));
}

#[test]
fn set_aspect_ignores_zero_height() {
    let mut camera = Camera::new_perspective(45.0, 1.0, 0.1, 10.0);
    camera.set_aspect(1600.0, 800.0);
    assert!(approx(camera.aspect, 2.0));
    camera.set_aspect(1600.0, 0.0);
    assert!(approx(camera.aspect, 2.0));
}

#[test]
fn center_ray_looks_down_negative_z() {
    let scene = camera_scene(Vec3::new(0.0, 1.0, 5.0));
    let camera = scene.main_camera().unwrap();
    let ray = camera.ray_from_ndc(Vec2::ZERO);

    assert!(vec3_approx(ray.origin, Vec3::new(0.0, 1.0, 5.0)));
    assert!(vec3_approx(ray.direction, Vec3::NEG_Z));
}

#[test]
fn corner_rays_diverge() {
    let scene = camera_scene(Vec3::ZERO);
    let camera = scene.main_camera().unwrap();
    let right = camera.ray_from_ndc(Vec2::new(1.0, 0.0));
    let up = camera.ray_from_ndc(Vec2::new(0.0, 1.0));

    assert!(right.direction.x > 0.0);
    assert!(up.direction.y > 0.0);
    // 60 degree vertical fov: the top edge is 30 degrees off axis
    assert!(approx(up.direction.angle_between(Vec3::NEG_Z), 30f32.to_radians()));
}

#[test]
fn frustum_culls_behind_camera() {
    let scene = camera_scene(Vec3::ZERO);
    let frustum = scene.main_camera().unwrap().frustum();
    assert!(frustum.intersects_sphere(Vec3::new(0.0, 0.0, -5.0), 0.5));
    assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, 5.0), 0.5));
    assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, -500.0), 1.0));
}

// ============================================================================
// Ray Primitive Tests
// ============================================================================

#[test]
fn ray_box_entry_distance() {
    let bbox = BoundingBox {
        min: Vec3::splat(-1.0),
        max: Vec3::splat(1.0),
    };
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    assert!(approx(ray.intersect_box(&bbox).unwrap(), 4.0));

    let miss = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
    assert!(miss.intersect_box(&bbox).is_none());

    let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
    assert!(away.intersect_box(&bbox).is_none());
}

#[test]
fn ray_inside_box_starts_at_zero() {
    let bbox = BoundingBox {
        min: Vec3::splat(-1.0),
        max: Vec3::splat(1.0),
    };
    let ray = Ray::new(Vec3::ZERO, Vec3::X);
    assert_eq!(ray.intersect_box(&bbox), Some(0.0));
    assert!(ray.intersect_box(&BoundingBox::EMPTY).is_none());
}

#[test]
fn ray_triangle_culling() {
    // counter-clockwise seen from +Z
    let (a, b, c) = (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    let from_front = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
    let from_back = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);

    assert!(approx(from_front.intersect_triangle(a, b, c, Culling::Back).unwrap(), 2.0));
    assert!(from_back.intersect_triangle(a, b, c, Culling::Back).is_none());
    assert!(from_front.intersect_triangle(a, b, c, Culling::Front).is_none());
    assert!(from_back.intersect_triangle(a, b, c, Culling::Front).is_some());
    assert!(from_back.intersect_triangle(a, b, c, Culling::None).is_some());
}

#[test]
fn ray_triangle_misses_outside() {
    let (a, b, c) = (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    let ray = Ray::new(Vec3::new(2.0, 2.0, 2.0), Vec3::NEG_Z);
    assert!(ray.intersect_triangle(a, b, c, Culling::None).is_none());
}

#[test]
fn side_maps_to_culling() {
    assert_eq!(Culling::from(Side::Front), Culling::Back);
    assert_eq!(Culling::from(Side::Back), Culling::Front);
    assert_eq!(Culling::from(Side::Double), Culling::None);
}

#[test]
fn ray_transform_keeps_parameters() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X);
    let scaled = ray.transform(&Affine3A::from_scale(Vec3::splat(2.0)));
    assert!(vec3_approx(scaled.at(1.0), Vec3::new(2.0, 0.0, 0.0)));
}

// ============================================================================
// Raycaster Tests
// ============================================================================

#[test]
fn subtree_hits_sorted_nearest_first() {
    let mut scene = Scene::new();
    let mut assets = AssetServer::new();
    let root = scene.create_node("root");

    let far = add_unit_box(&mut scene, &mut assets, "far", Side::Front);
    let near = add_unit_box(&mut scene, &mut assets, "near", Side::Front);
    scene.attach(far, root);
    scene.attach(near, root);
    scene.get_node_mut(far).unwrap().transform.position = Vec3::new(0.0, 0.0, -10.0);
    scene.get_node_mut(near).unwrap().transform.position = Vec3::new(0.0, 0.0, -5.0);
    scene.update_matrix_world();

    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
    let hits = Raycaster::intersect_subtree(&scene, &assets, root, &ray);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].node, near);
    assert!(approx(hits[0].distance, 4.5));
    assert!(vec3_approx(hits[0].point, Vec3::new(0.0, 0.0, -4.5)));
    assert_eq!(hits[1].node, far);
}

#[test]
fn subtree_skips_hidden_nodes() {
    let mut scene = Scene::new();
    let mut assets = AssetServer::new();
    let node = add_unit_box(&mut scene, &mut assets, "box", Side::Front);
    scene.get_node_mut(node).unwrap().transform.position = Vec3::new(0.0, 0.0, -5.0);
    scene.get_node_mut(node).unwrap().visible = false;
    scene.update_matrix_world();

    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
    assert!(Raycaster::intersect_subtree(&scene, &assets, node, &ray).is_empty());
}

#[test]
fn back_side_material_hits_far_wall() {
    let mut scene = Scene::new();
    let mut assets = AssetServer::new();
    let node = add_unit_box(&mut scene, &mut assets, "room", Side::Back);
    scene.get_node_mut(node).unwrap().transform.position = Vec3::new(0.0, 0.0, -5.0);
    scene.update_matrix_world();

    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
    let hits = Raycaster::intersect_subtree(&scene, &assets, node, &ray);
    assert_eq!(hits.len(), 1);
    assert!(approx(hits[0].distance, 5.5));
}

#[test]
fn scaled_mesh_reports_world_distance() {
    let mut scene = Scene::new();
    let mut assets = AssetServer::new();
    let node = add_unit_box(&mut scene, &mut assets, "big", Side::Front);
    {
        let t = &mut scene.get_node_mut(node).unwrap().transform;
        t.position = Vec3::new(0.0, 0.0, -10.0);
        t.scale = Vec3::splat(4.0);
    }
    scene.update_matrix_world();

    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
    let hits = Raycaster::intersect_subtree(&scene, &assets, node, &ray);
    assert!(approx(hits[0].distance, 8.0));
}

#[test]
fn subtree_bbox_in_world_space() {
    let mut scene = Scene::new();
    let mut assets = AssetServer::new();
    let node = add_unit_box(&mut scene, &mut assets, "box", Side::Front);
    scene.get_node_mut(node).unwrap().transform.position = Vec3::new(2.0, 0.0, 0.0);
    scene.update_matrix_world();

    let bbox = scene.get_bbox_of_node(node, &assets).unwrap();
    assert!(vec3_approx(bbox.center(), Vec3::new(2.0, 0.0, 0.0)));
}

// ============================================================================
// Input Tests
// ============================================================================

#[test]
fn ndc_conversion() {
    let size = Vec2::new(800.0, 600.0);
    assert_eq!(pixels_to_ndc(Vec2::ZERO, size), Some(Vec2::new(-1.0, 1.0)));
    assert_eq!(pixels_to_ndc(Vec2::new(400.0, 300.0), size), Some(Vec2::ZERO));
    assert_eq!(pixels_to_ndc(Vec2::new(800.0, 600.0), size), Some(Vec2::new(1.0, -1.0)));
    assert_eq!(pixels_to_ndc(Vec2::ZERO, Vec2::ZERO), None);
}

#[test]
fn pointer_ndc_needs_a_screen_size() {
    let mut input = Input::new();
    input.inject_mouse_position(10.0, 10.0);
    assert!(input.pointer_ndc().is_none());

    input.inject_resize(20, 20);
    assert_eq!(input.pointer_ndc(), Some(Vec2::ZERO));
}

#[test]
fn button_edges_reset_each_frame() {
    let mut input = Input::new();
    input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
    assert!(input.get_mouse_button_down(MouseButton::Left));
    assert!(input.get_mouse_button(MouseButton::Left));

    input.start_frame();
    assert!(!input.get_mouse_button_down(MouseButton::Left));
    assert!(input.get_mouse_button(MouseButton::Left));

    input.inject_mouse_button(MouseButton::Left, ButtonState::Released);
    assert!(input.get_mouse_button_up(MouseButton::Left));
    assert!(!input.get_mouse_button(MouseButton::Left));
}

#[test]
fn first_position_produces_no_delta() {
    let mut input = Input::new();
    input.inject_mouse_position(100.0, 100.0);
    assert!(!input.pointer_moved());

    input.inject_mouse_position(110.0, 95.0);
    assert_eq!(input.mouse_delta(), Vec2::new(10.0, -5.0));
    assert!(input.pointer_moved());

    input.start_frame();
    assert!(!input.pointer_moved());
}

#[test]
fn touch_acts_as_left_button() {
    let mut input = Input::new();
    input.inject_touch(1, TouchPhase::Started, 50.0, 60.0);

    assert!(input.touch_started());
    assert_eq!(input.touch_count(), 1);
    assert!(input.get_mouse_button_down(MouseButton::Left));
    assert_eq!(input.mouse_position(), Vec2::new(50.0, 60.0));

    input.start_frame();
    input.inject_touch(1, TouchPhase::Moved, 55.0, 60.0);
    assert_eq!(input.mouse_delta(), Vec2::new(5.0, 0.0));

    input.inject_touch(1, TouchPhase::Ended, 55.0, 60.0);
    assert_eq!(input.touch_count(), 0);
    assert!(input.get_mouse_button_up(MouseButton::Left));
}

#[test]
fn scroll_accumulates_within_frame() {
    let mut input = Input::new();
    input.inject_scroll(0.0, 1.0);
    input.inject_scroll(0.0, 2.0);
    assert_eq!(input.scroll_delta(), Vec2::new(0.0, 3.0));
    input.start_frame();
    assert_eq!(input.scroll_delta(), Vec2::ZERO);
}
