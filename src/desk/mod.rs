//! The interactive desk setup.
//!
//! [`DeskScene::build`] assembles the whole setup into a [`Scene`] and keeps
//! the handles needed afterwards. Per frame the app calls
//! [`DeskScene::update`] for the ambient RGB effects, then advances the
//! shared [`Tweener`] which carries every hover and click animation.
//!
//! ```rust,ignore
//! let mut desk = DeskScene::build(&mut engine.scene, &mut engine.assets, &DeskConfig::default());
//! let placement = desk.initial_layout(&mut engine.scene, width, width);
//!
//! // every frame
//! desk.update(elapsed, &mut engine.scene, &mut engine.assets);
//! engine.update(dt);
//! ```

pub mod ambient;
pub mod config;
pub mod interaction;
pub mod layout;
pub mod lighting;
pub mod parts;
pub mod textures;

pub use config::{DeskConfig, OrbitConfig};
pub use interaction::{CursorIcon, Hotspot, PointerHit};
pub use layout::{CameraFraming, CameraPlacement, DeviceClass, MobileView};
pub use lighting::DeskLights;

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::animation::{Axis, Ease, Timeline, Tween, TweenTarget, Tweener};
use crate::assets::AssetServer;
use crate::desk::ambient::{AmbientProfile, AmbientRig};
use crate::desk::interaction::{HoverState, HotspotNodes};
use crate::desk::parts::{
    Chair, ComputerMouse, DebugHelpers, Furniture, Keyboard, Monitor, PartBuilder, PcCase,
};
use crate::desk::parts::keyboard::{EDGE_OPACITY, KEY_REST_Y};
use crate::desk::parts::mouse::BUTTON_Y;
use crate::scene::{Camera, Environment, NodeHandle, Ray, Raycaster, Scene};
use crate::utils::color::hex_to_rgb;

/// Environment color reflected by the standard materials.
const ENVIRONMENT_COLOR: u32 = 0x44_4444;

const WHITE: Vec3 = Vec3::ONE;

pub struct DeskScene {
    pub root: NodeHandle,
    /// Group holding every object of the setup. Scaled for mobile and used
    /// as the picking root.
    pub setup: NodeHandle,
    pub camera: NodeHandle,

    pub lights: DeskLights,
    pub furniture: Furniture,
    pub pc: PcCase,
    pub monitor: Monitor,
    pub keyboard: Keyboard,
    pub mouse: ComputerMouse,
    pub chair: Chair,
    pub helpers: Option<DebugHelpers>,

    hotspots: HotspotNodes,
    hover: HoverState,
    monitor_on: bool,
    mobile: bool,

    hover_duration: f32,
    base_scale: f32,
    mobile_scale: f32,

    rng: StdRng,
}

impl DeskScene {
    /// Builds lights, furniture, every part and the camera.
    ///
    /// The setup starts at the desktop scale; call
    /// [`DeskScene::initial_layout`] once the viewport size is known.
    pub fn build(scene: &mut Scene, assets: &mut AssetServer, config: &DeskConfig) -> Self {
        log::info!("Building desk scene");

        scene.environment = Environment::uniform(ENVIRONMENT_COLOR);
        scene.background = None;

        let root = scene.create_node("desk_scene");
        let lights = DeskLights::build(scene, root);

        let camera = scene.add_camera(Camera::new_perspective(
            config.camera_fov,
            1.0,
            config.camera_near,
            config.camera_far,
        ));
        scene.active_camera = Some(camera);

        let code_texture = assets.add_texture(textures::code_texture());
        let fabric_texture = assets.add_texture(textures::fabric_texture(config.seed));

        let mut b = PartBuilder::new(scene, assets);
        let setup = b
            .group("computer_setup", root)
            .with_scale(config.base_scale)
            .build();

        let helpers = config.debug_helpers.then(|| DebugHelpers::build(&mut b, root));
        let furniture = Furniture::build(&mut b, root, setup);
        let pc = PcCase::build(&mut b, setup);
        let monitor = Monitor::build(&mut b, setup, code_texture);
        let keyboard = Keyboard::build(&mut b, setup);
        let mouse = ComputerMouse::build(&mut b, setup);
        let chair = Chair::build(&mut b, setup, fabric_texture);

        let hotspots = HotspotNodes {
            pc: pc.root,
            keyboard: keyboard.root,
            mouse: mouse.root,
            monitor: monitor.root,
            chair: chair.root,
            pc_light: pc.light,
            keyboard_light: lights.keyboard,
            mouse_light: mouse.light,
        };

        let mut desk = Self {
            root,
            setup,
            camera,
            lights,
            furniture,
            pc,
            monitor,
            keyboard,
            mouse,
            chair,
            helpers,
            hotspots,
            hover: HoverState::default(),
            monitor_on: false,
            mobile: false,
            hover_duration: config.hover_duration,
            base_scale: config.base_scale,
            mobile_scale: config.mobile_scale,
            rng: StdRng::seed_from_u64(config.seed),
        };
        desk.place_camera(scene, DeviceClass::Desktop.framing().into());

        log::info!(
            "Desk scene ready: {} nodes, {} meshes, {} keys",
            scene.nodes.len(),
            scene.meshes.len(),
            desk.keyboard.keys.len()
        );
        desk
    }

    // ========================================================================
    // State
    // ========================================================================

    #[must_use]
    pub fn is_monitor_on(&self) -> bool {
        self.monitor_on
    }

    /// Currently highlighted hotspot.
    #[must_use]
    pub fn hovered(&self) -> Option<Hotspot> {
        self.hover.current
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    #[must_use]
    pub fn hotspot_root(&self, hotspot: Hotspot) -> NodeHandle {
        self.hotspots.root(hotspot)
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Ambient RGB effects for `seconds` since startup.
    pub fn update(&self, seconds: f64, scene: &mut Scene, assets: &mut AssetServer) {
        let rig = AmbientRig {
            keyboard: &self.keyboard,
            keyboard_light: self.lights.keyboard,
            mouse: &self.mouse,
            pc: &self.pc,
            monitor: &self.monitor,
            monitor_on: self.monitor_on,
        };
        ambient::update(&rig, AmbientProfile::new(self.mobile), seconds, scene, assets);
    }

    // ========================================================================
    // Pointer interaction
    // ========================================================================

    /// Nearest hovered hotspot under `ray`. World matrices must be current.
    #[must_use]
    pub fn pick(&self, scene: &Scene, assets: &AssetServer, ray: &Ray) -> Option<Hotspot> {
        match self.hit_at(scene, assets, ray) {
            PointerHit::Hotspot(h) => Some(h),
            PointerHit::Nothing | PointerHit::Scenery => None,
        }
    }

    fn hit_at(&self, scene: &Scene, assets: &AssetServer, ray: &Ray) -> PointerHit {
        let hits = Raycaster::intersect_subtree(scene, assets, self.setup, ray);
        self.hotspots.hover_hit(scene, &hits)
    }

    /// Updates the hover highlight. Returns the cursor to show when it
    /// should change.
    pub fn pointer_moved(
        &mut self,
        ray: &Ray,
        scene: &Scene,
        assets: &AssetServer,
        tweener: &mut Tweener,
    ) -> Option<CursorIcon> {
        let hit = self.hit_at(scene, assets, ray);
        let change = self.hover.transition(hit);

        if let Some(previous) = change.reset {
            log::debug!("Hover left {previous:?}");
            for tween in self.hotspots.reset_tweens(previous, self.hover_duration) {
                tweener.add(tween);
            }
        }
        if let Some(next) = change.highlight {
            log::debug!("Hover entered {next:?}");
            for tween in self.hotspots.hover_tweens(next, self.hover_duration) {
                tweener.add(tween);
            }
        }
        change.cursor
    }

    /// Runs the click action of the first clickable hotspot under `ray`.
    pub fn click(
        &mut self,
        ray: &Ray,
        scene: &mut Scene,
        assets: &mut AssetServer,
        tweener: &mut Tweener,
    ) -> Option<Hotspot> {
        let hits = Raycaster::intersect_subtree(scene, assets, self.setup, ray);
        let target = self.hotspots.click_hit(scene, &hits)?;
        log::debug!("Clicked {target:?}");

        match target {
            Hotspot::Pc => {
                self.toggle_monitor(scene, assets, tweener);
            }
            Hotspot::Keyboard => {
                self.toggle_monitor(scene, assets, tweener);
                self.animate_keyboard_press(tweener);
            }
            Hotspot::Mouse => self.animate_mouse_click(scene, assets, tweener),
            Hotspot::Chair => self.animate_chair_spin(tweener),
            Hotspot::Monitor => {}
        }
        Some(target)
    }

    // ========================================================================
    // Click animations
    // ========================================================================

    /// Flips the monitor power and returns the new state.
    pub fn toggle_monitor(&mut self, scene: &mut Scene, assets: &mut AssetServer, tweener: &mut Tweener) -> bool {
        self.monitor_on = !self.monitor_on;
        let screen = self.monitor.screen;

        if self.monitor_on {
            if let Some(mesh) = scene.get_mesh_mut(screen) {
                mesh.material = self.monitor.screen_on;
            }
            tweener.add(Tween::from_to(
                TweenTarget::MaterialOpacity(self.monitor.screen_on),
                0.0,
                1.0,
                0.5,
            ));

            let glow = self.monitor.ensure_glow(&mut PartBuilder::new(scene, assets));
            if let Some(node) = scene.get_node_mut(glow) {
                node.visible = true;
            }
        } else {
            if let Some(mesh) = scene.get_mesh_mut(screen) {
                mesh.material = self.monitor.screen_off;
            }
            if let Some(node) = self.monitor.glow.and_then(|g| scene.get_node_mut(g)) {
                node.visible = false;
            }
            if let Some(node) = scene.get_node(screen) {
                let z = node.transform.position.z;
                tweener.add(Tween::to(TweenTarget::NodePosition(screen, Axis::Z), z - 0.001, 0.05).yoyo(1));
            }
        }

        let led = if self.monitor_on { 0x00_ff00 } else { 0xff_0000 };
        if let Some(material) = assets.get_material_mut(self.monitor.led_material) {
            material.set_color(hex_to_rgb(led));
        }

        log::debug!("Monitor {}", if self.monitor_on { "on" } else { "off" });
        self.monitor_on
    }

    /// Presses 3 to 7 random keys. Returns the pressed key indices.
    ///
    /// Every effect returns to the resting pose, so presses that overlap
    /// an earlier one settle at the same place.
    pub fn animate_keyboard_press(&mut self, tweener: &mut Tweener) -> Vec<usize> {
        let key_count = self.keyboard.keys.len();
        if key_count == 0 {
            return Vec::new();
        }

        let wanted = self.rng.random_range(3..=7).min(key_count);
        let mut pressed: Vec<usize> = Vec::with_capacity(wanted);
        while pressed.len() < wanted {
            let index = self.rng.random_range(0..key_count);
            if !pressed.contains(&index) {
                pressed.push(index);
            }
        }

        for &index in &pressed {
            let target = TweenTarget::NodePosition(self.keyboard.keys[index], Axis::Y);
            tweener.add_timeline(
                Timeline::new()
                    .then(Tween::to(target, KEY_REST_Y - 0.005, 0.05))
                    .then(Tween::to(target, KEY_REST_Y, 0.05)),
            );

            let target = TweenTarget::MaterialColor(self.keyboard.key_materials[index]);
            tweener.add_timeline(
                Timeline::new()
                    .then(Tween::to(target, WHITE, 0.05))
                    .then(Tween::to(target, self.keyboard.key_colors[index], 0.1)),
            );
        }

        let rest = interaction::light_intensity(Hotspot::Keyboard, self.hover.current == Some(Hotspot::Keyboard));
        let light = TweenTarget::LightIntensity(self.lights.keyboard);
        tweener.add_timeline(
            Timeline::new()
                .then(Tween::to(light, 1.5, 0.1))
                .then(Tween::to(light, rest, 0.3)),
        );

        let edge = TweenTarget::MaterialOpacity(self.keyboard.edge_material);
        tweener.add_timeline(
            Timeline::new()
                .then(Tween::to(edge, 0.9, 0.1))
                .then(Tween::to(edge, EDGE_OPACITY, 0.3)),
        );

        pressed
    }

    /// Clicks the left button, flashes the mouse lights and wakes the
    /// monitor.
    pub fn animate_mouse_click(&mut self, scene: &mut Scene, assets: &mut AssetServer, tweener: &mut Tweener) {
        let button = TweenTarget::NodePosition(self.mouse.left_button, Axis::Y);
        tweener.add_timeline(
            Timeline::new()
                .then(Tween::to(button, BUTTON_Y - 0.003, 0.1))
                .then(Tween::to(button, BUTTON_Y, 0.1)),
        );

        let light = self.mouse.light;
        let rest = interaction::light_intensity(Hotspot::Mouse, self.hover.current == Some(Hotspot::Mouse));
        let intensity = TweenTarget::LightIntensity(light);
        tweener.add_timeline(
            Timeline::new()
                .then(Tween::to(intensity, 1.5, 0.2))
                .then(Tween::to(intensity, rest, 0.5)),
        );
        tweener.add(Tween::hold(TweenTarget::LightColor(light), WHITE, 0.2));

        let materials = self.mouse.light_materials.iter().zip(&self.mouse.light_opacities);
        for (&material, &opacity) in materials {
            let target = TweenTarget::MaterialOpacity(material);
            tweener.add(Tween::hold(TweenTarget::MaterialColor(material), WHITE, 0.2));
            tweener.add(Tween::hold(target, (opacity * 1.5).min(1.0), 0.2));
            tweener.add(Tween::set(target, opacity).with_delay(0.2));
        }

        if !self.monitor_on {
            self.toggle_monitor(scene, assets, tweener);
        }
    }

    /// One full turn of the chair with a small lift and a rocking tilt.
    pub fn animate_chair_spin(&mut self, tweener: &mut Tweener) {
        let chair = self.chair.root;
        tweener.add_timeline(
            Timeline::new()
                .with(
                    Tween::by(TweenTarget::NodeRotation(chair, Axis::Y), TAU, 1.5).with_ease(Ease::Power2InOut),
                    0.0,
                )
                .with(
                    Tween::to(TweenTarget::NodePosition(chair, Axis::Y), 0.1, 0.75)
                        .yoyo(1)
                        .with_ease(Ease::Power1InOut),
                    0.0,
                ),
        );
        tweener.add(
            Tween::to(TweenTarget::NodeRotation(chair, Axis::Z), PI / 16.0, 0.3)
                .yoyo(3)
                .with_ease(Ease::Power1InOut),
        );
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Frames the camera for the container and picks the mobile or desktop
    /// view for the window. Returns the placement for the orbit controls.
    pub fn initial_layout(&mut self, scene: &mut Scene, container_width: f32, window_width: f32) -> CameraPlacement {
        let class = DeviceClass::from_width(container_width);
        log::info!("Adjusting for device size: {container_width}px wide ({class:?})");

        let mut placement = CameraPlacement::from(class.framing());
        self.mobile = layout::is_mobile(window_width);
        let view = MobileView::new(self.mobile, self.base_scale, self.mobile_scale);
        self.set_setup_scale(scene, view.scale);
        if self.mobile {
            placement.position = view.camera_position;
            placement.target = view.camera_target;
        }

        self.place_camera(scene, placement);
        placement
    }

    /// Re-evaluates the mobile view after a resize. Returns the new camera
    /// placement only when the view flipped.
    pub fn apply_layout(&mut self, scene: &mut Scene, window_width: f32) -> Option<CameraPlacement> {
        let mobile = layout::is_mobile(window_width);
        if mobile == self.mobile {
            return None;
        }
        self.mobile = mobile;
        log::info!("Switching to {} view at {window_width}px", if mobile { "mobile" } else { "desktop" });

        let view = MobileView::new(mobile, self.base_scale, self.mobile_scale);
        self.set_setup_scale(scene, view.scale);
        let placement = CameraPlacement {
            position: view.camera_position,
            target: view.camera_target,
            distance_limits: None,
        };
        self.place_camera(scene, placement);
        Some(placement)
    }

    fn set_setup_scale(&self, scene: &mut Scene, scale: f32) {
        if let Some(node) = scene.get_node_mut(self.setup) {
            node.transform.scale = Vec3::splat(scale);
        }
    }

    fn place_camera(&self, scene: &mut Scene, placement: CameraPlacement) {
        if let Some(node) = scene.get_node_mut(self.camera) {
            node.transform.position = placement.position;
            node.transform.look_at(placement.target, Vec3::Y);
        }
    }
}
