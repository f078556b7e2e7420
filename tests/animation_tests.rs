//! Tween and Timeline Tests
//!
//! Tests for:
//! - Easing curves (endpoints, symmetry, monotonicity)
//! - AnimValue interpolation and offsets
//! - Tween to / from_to / by / set / hold semantics and delays
//! - Yoyo (ping-pong) repeats
//! - Timeline sequencing and absolute offsets
//! - Tweener ordering, kill and dead-target cleanup

use glam::Vec3;

use coder_desk::animation::{AnimValue, Axis, Ease, LoopMode, Timeline, Tween, TweenStatus, TweenTarget, Tweener};
use coder_desk::assets::AssetServer;
use coder_desk::resources::material::Material;
use coder_desk::scene::{Light, NodeHandle, Scene};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn setup() -> (Scene, AssetServer, NodeHandle) {
    let mut scene = Scene::new();
    let node = scene.create_node("key");
    (scene, AssetServer::new(), node)
}

fn pos_y(scene: &Scene, node: NodeHandle) -> f32 {
    scene.get_node(node).unwrap().transform.position.y
}

fn step(tweener: &mut Tweener, scene: &mut Scene, assets: &mut AssetServer, seconds: f32, dt: f32) {
    let steps = (seconds / dt).round() as usize;
    for _ in 0..steps {
        tweener.update(dt, scene, assets);
    }
}

// ============================================================================
// Easing Tests
// ============================================================================

#[test]
fn eases_hit_endpoints() {
    for ease in [
        Ease::Linear,
        Ease::Power1In,
        Ease::Power1Out,
        Ease::Power1InOut,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power2InOut,
    ] {
        assert!(approx(ease.apply(0.0), 0.0), "{ease:?} at 0");
        assert!(approx(ease.apply(1.0), 1.0), "{ease:?} at 1");
    }
}

#[test]
fn ease_in_out_is_symmetric() {
    assert!(approx(Ease::Power1InOut.apply(0.5), 0.5));
    assert!(approx(Ease::Power2InOut.apply(0.25) + Ease::Power2InOut.apply(0.75), 1.0));
}

#[test]
fn ease_out_leads_ease_in() {
    assert!(approx(Ease::Power1Out.apply(0.5), 0.75));
    assert!(approx(Ease::Power1In.apply(0.5), 0.25));
    assert!(approx(Ease::Power2Out.apply(0.5), 0.875));
}

#[test]
fn ease_clamps_input() {
    assert!(approx(Ease::Linear.apply(-1.0), 0.0));
    assert!(approx(Ease::Power2In.apply(2.0), 1.0));
}

#[test]
fn default_ease_is_power1_out() {
    assert_eq!(Ease::default(), Ease::Power1Out);
}

// ============================================================================
// AnimValue Tests
// ============================================================================

#[test]
fn anim_value_lerp() {
    let v = AnimValue::lerp(AnimValue::Scalar(0.0), AnimValue::Scalar(10.0), 0.25);
    assert_eq!(v, AnimValue::Scalar(2.5));

    let c = AnimValue::lerp(AnimValue::Color(Vec3::ZERO), AnimValue::Color(Vec3::ONE), 0.5);
    assert_eq!(c.as_color(), Some(Vec3::splat(0.5)));
}

#[test]
fn anim_value_mismatch_snaps_to_end() {
    let v = AnimValue::lerp(AnimValue::Scalar(0.0), AnimValue::Color(Vec3::ONE), 0.1);
    assert_eq!(v, AnimValue::Color(Vec3::ONE));
    assert_eq!(v.as_scalar(), None);
}

#[test]
fn anim_value_offset() {
    assert_eq!(AnimValue::Scalar(1.0).offset(AnimValue::Scalar(2.0)), AnimValue::Scalar(3.0));
}

// ============================================================================
// Tween Tests
// ============================================================================

#[test]
fn tween_to_reaches_target() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::Y);
    let mut tween = Tween::to(target, -0.02, 0.1).with_ease(Ease::Linear);

    assert_eq!(tween.tick(0.05, &mut scene, &mut assets), TweenStatus::Running);
    assert!(approx(pos_y(&scene, node), -0.01));

    assert_eq!(tween.tick(0.05, &mut scene, &mut assets), TweenStatus::Finished);
    assert!(approx(pos_y(&scene, node), -0.02));
}

#[test]
fn tween_waits_for_delay() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::X);
    let mut tween = Tween::to(target, 1.0, 1.0).with_delay(0.5);

    assert_eq!(tween.tick(0.25, &mut scene, &mut assets), TweenStatus::Waiting);
    assert!(!tween.is_started());
    assert!(approx(scene.get_node(node).unwrap().transform.position.x, 0.0));
    assert!(approx(tween.total_duration(), 1.5));
}

#[test]
fn tween_start_value_is_read_after_delay() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::Y);
    let mut tween = Tween::to(target, 2.0, 1.0).with_delay(0.5).with_ease(Ease::Linear);

    tween.tick(0.25, &mut scene, &mut assets);
    // moved by someone else while the tween is still waiting
    scene.get_node_mut(node).unwrap().transform.position.y = 1.0;
    tween.tick(0.75, &mut scene, &mut assets);

    // half way from 1.0 to 2.0
    assert!(approx(pos_y(&scene, node), 1.5));
}

#[test]
fn from_to_writes_start_immediately() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::Y);
    let mut tween = Tween::from_to(target, 5.0, 6.0, 1.0);

    tween.tick(0.0, &mut scene, &mut assets);
    assert!(approx(pos_y(&scene, node), 5.0));
}

#[test]
fn by_is_relative_to_start() {
    let (mut scene, mut assets, node) = setup();
    scene.get_node_mut(node).unwrap().transform.position.y = 1.0;
    let mut tween = Tween::by(TweenTarget::NodePosition(node, Axis::Y), 0.5, 0.2);

    tween.tick(0.3, &mut scene, &mut assets);
    assert!(approx(pos_y(&scene, node), 1.5));
}

#[test]
fn set_applies_once_after_delay() {
    let (mut scene, mut assets, node) = setup();
    let mut tween = Tween::set(TweenTarget::NodePosition(node, Axis::Z), 3.0).with_delay(0.1);

    assert_eq!(tween.tick(0.05, &mut scene, &mut assets), TweenStatus::Waiting);
    assert_eq!(tween.tick(0.05, &mut scene, &mut assets), TweenStatus::Finished);
    assert!(approx(scene.get_node(node).unwrap().transform.position.z, 3.0));
}

#[test]
fn yoyo_returns_to_start() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::Y);
    let mut tween = Tween::to(target, 1.0, 1.0).yoyo(1).with_ease(Ease::Linear);
    assert_eq!(tween.loop_mode, LoopMode::PingPong);

    tween.tick(1.5, &mut scene, &mut assets);
    // half way back on the second pass
    assert!(approx(pos_y(&scene, node), 0.5));

    assert_eq!(tween.tick(0.6, &mut scene, &mut assets), TweenStatus::Finished);
    assert!(approx(pos_y(&scene, node), 0.0));
}

#[test]
fn rotation_tween_uses_euler_angles() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodeRotation(node, Axis::Y);
    let mut tween = Tween::by(target, std::f32::consts::TAU, 1.0);

    tween.tick(1.0, &mut scene, &mut assets);
    let euler = scene.get_node(node).unwrap().transform.rotation_euler();
    assert!(approx(euler.y, std::f32::consts::TAU));
}

#[test]
fn light_and_material_targets() {
    let (mut scene, mut assets, _) = setup();
    let light = scene.add_light(Light::new_point(0xffffff, 1.0, 10.0));
    let material = assets.add_material(Material::new_standard(0x000000));

    let mut intensity = Tween::to(TweenTarget::LightIntensity(light), 3.0, 0.5);
    let mut color = Tween::to(TweenTarget::MaterialColor(material), Vec3::ONE, 0.5);
    let mut opacity = Tween::to(TweenTarget::MaterialOpacity(material), 0.25, 0.5);

    intensity.tick(1.0, &mut scene, &mut assets);
    color.tick(1.0, &mut scene, &mut assets);
    opacity.tick(1.0, &mut scene, &mut assets);

    assert!(approx(scene.get_light(light).unwrap().intensity, 3.0));
    let m = assets.get_material(material).unwrap();
    assert_eq!(m.color, Vec3::ONE);
    assert!(approx(m.opacity, 0.25));
}

#[test]
fn wrong_value_kind_kills_tween() {
    let (mut scene, mut assets, node) = setup();
    let mut tween = Tween::to(TweenTarget::NodePosition(node, Axis::X), Vec3::ONE, 1.0);
    assert_eq!(tween.tick(0.5, &mut scene, &mut assets), TweenStatus::Dead);
}

#[test]
fn missing_target_is_dead() {
    let (mut scene, mut assets, node) = setup();
    scene.remove_node(node);
    let mut tween = Tween::to(TweenTarget::NodePosition(node, Axis::X), 1.0, 1.0);
    assert_eq!(tween.tick(0.1, &mut scene, &mut assets), TweenStatus::Dead);
}

// ============================================================================
// Timeline Tests
// ============================================================================

#[test]
fn timeline_then_appends() {
    let (_, _, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::Y);
    let timeline = Timeline::new()
        .then(Tween::to(target, -0.02, 0.1))
        .then(Tween::to(target, 0.0, 0.1));

    assert_eq!(timeline.len(), 2);
    assert!(approx(timeline.duration(), 0.2));

    let tweens = timeline.into_tweens();
    assert!(approx(tweens[0].delay, 0.0));
    assert!(approx(tweens[1].delay, 0.1));
}

#[test]
fn timeline_with_places_absolutely() {
    let (_, _, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::X);
    let timeline = Timeline::new()
        .with(Tween::to(target, 1.0, 1.0), 0.0)
        .with(Tween::to(target, 2.0, 0.5).with_delay(0.25), 2.0);

    assert!(approx(timeline.duration(), 2.75));
    let tweens = timeline.into_tweens();
    assert!(approx(tweens[1].delay, 2.25));
}

#[test]
fn empty_timeline() {
    let timeline = Timeline::new();
    assert!(timeline.is_empty());
    assert!(approx(timeline.duration(), 0.0));
}

#[test]
fn key_press_timeline_returns_to_rest() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::Y);
    let mut tweener = Tweener::new();
    tweener.add_timeline(
        Timeline::new()
            .then(Tween::to(target, -0.02, 0.1))
            .then(Tween::to(target, 0.0, 0.1)),
    );

    step(&mut tweener, &mut scene, &mut assets, 0.1, 0.01);
    assert!(approx(pos_y(&scene, node), -0.02));

    step(&mut tweener, &mut scene, &mut assets, 0.12, 0.01);
    assert!(approx(pos_y(&scene, node), 0.0));
    assert_eq!(tweener.active_count(), 0);
}

// ============================================================================
// Tweener Tests
// ============================================================================

#[test]
fn newer_tween_wins_same_frame() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::Y);
    let mut tweener = Tweener::new();
    tweener.add(Tween::hold(target, 1.0, 1.0));
    tweener.add(Tween::hold(target, 2.0, 1.0));

    tweener.update(0.1, &mut scene, &mut assets);
    assert!(approx(pos_y(&scene, node), 2.0));
}

#[test]
fn kill_target_leaves_value() {
    let (mut scene, mut assets, node) = setup();
    let target = TweenTarget::NodePosition(node, Axis::Y);
    let other = TweenTarget::NodePosition(node, Axis::X);
    let mut tweener = Tweener::new();
    tweener.add(Tween::to(target, 1.0, 1.0).with_ease(Ease::Linear));
    tweener.add(Tween::to(other, 1.0, 1.0));

    tweener.update(0.5, &mut scene, &mut assets);
    tweener.kill_target(target);

    assert!(!tweener.is_animating(target));
    assert!(tweener.is_animating(other));
    tweener.update(0.5, &mut scene, &mut assets);
    assert!(approx(pos_y(&scene, node), 0.5));
}

#[test]
fn dead_tweens_are_dropped() {
    let (mut scene, mut assets, node) = setup();
    let mut tweener = Tweener::new();
    tweener.add(Tween::to(TweenTarget::NodePosition(node, Axis::X), 1.0, 1.0));
    scene.remove_node(node);

    tweener.update(0.1, &mut scene, &mut assets);
    assert_eq!(tweener.active_count(), 0);
}

#[test]
fn clear_drops_everything() {
    let (_, _, node) = setup();
    let mut tweener = Tweener::new();
    tweener.add(Tween::to(TweenTarget::NodePosition(node, Axis::X), 1.0, 1.0));
    tweener.clear();
    assert_eq!(tweener.active_count(), 0);
}
