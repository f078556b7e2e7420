//! Interactive desk viewer.
//!
//! Orbit with the left button, pan with the right one, zoom with the wheel.
//! Hover a device to highlight it; click the PC or keyboard to toggle the
//! monitor, the mouse to click it, the chair to spin it.

use std::sync::Arc;

use coder_desk::app::input::MouseButton;
use coder_desk::app::winit::{App, AppHandler, Window};
use coder_desk::desk::{CursorIcon, DeskConfig, DeskScene};
use coder_desk::engine::{Engine, FrameState};
use coder_desk::utils::OrbitControls;
use glam::Vec2;
use winit::event::WindowEvent;

/// Pointer travel (pixels) below which a press and release count as a click.
const CLICK_SLOP: f32 = 5.0;

struct DeskApp {
    desk: DeskScene,
    controls: OrbitControls,
    press_position: Option<Vec2>,
    /// Set when a touch already triggered the click for this gesture.
    touch_clicked: bool,
}

fn logical_width(window: &Window) -> f32 {
    let size = window.inner_size();
    (f64::from(size.width) / window.scale_factor()) as f32
}

impl AppHandler for DeskApp {
    fn init(engine: &mut Engine, window: &Arc<Window>) -> Self {
        let config = DeskConfig::default();
        let mut desk = DeskScene::build(&mut engine.scene, &mut engine.assets, &config);

        let width = logical_width(window);
        let placement = desk.initial_layout(&mut engine.scene, width, width);
        let controls = config.orbit.controls(&placement);

        #[cfg(target_arch = "wasm32")]
        if let Err(e) = coder_desk::app::web::init_page(config.career_start) {
            log::warn!("Page glue skipped: {e}");
        }

        Self {
            desk,
            controls,
            press_position: None,
            touch_clicked: false,
        }
    }

    fn on_event(&mut self, engine: &mut Engine, window: &Arc<Window>, event: &WindowEvent) -> bool {
        if let WindowEvent::Resized(_) = event
            && let Some(placement) = self.desk.apply_layout(&mut engine.scene, logical_width(window))
        {
            self.controls.set_position(placement.position, placement.target);
        }
        false
    }

    fn update(&mut self, engine: &mut Engine, window: &Arc<Window>, frame: &FrameState) {
        self.desk.update(frame.time, &mut engine.scene, &mut engine.assets);

        if let Some((transform, camera)) = engine.scene.query_main_camera_bundle() {
            self.controls.update(transform, &engine.input, camera.fov.to_degrees(), frame.dt);
        }

        let input = &engine.input;
        let ray = input
            .pointer_ndc()
            .zip(engine.scene.main_camera())
            .map(|(ndc, camera)| camera.ray_from_ndc(ndc));
        let Some(ray) = ray else {
            return;
        };

        if input.pointer_moved()
            && let Some(icon) = self
                .desk
                .pointer_moved(&ray, &engine.scene, &engine.assets, &mut engine.tweener)
        {
            window.set_cursor(match icon {
                CursorIcon::Pointer => winit::window::CursorIcon::Pointer,
                CursorIcon::Default => winit::window::CursorIcon::Default,
            });
        }

        let mut clicked = false;
        if input.touch_started() {
            clicked = true;
            self.touch_clicked = true;
        } else if input.get_mouse_button_down(MouseButton::Left) {
            self.press_position = Some(input.mouse_position());
        } else if input.get_mouse_button_up(MouseButton::Left) {
            let press = self.press_position.take();
            if std::mem::take(&mut self.touch_clicked) {
                // the touch already clicked when it started
            } else if press.is_some_and(|p| p.distance(input.mouse_position()) < CLICK_SLOP) {
                clicked = true;
            }
        }

        if clicked {
            self.desk
                .click(&ray, &mut engine.scene, &mut engine.assets, &mut engine.tweener);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    App::new().with_title("Coder Desk").run::<DeskApp>()?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() -> anyhow::Result<()> {
    console_error_panic_hook::set_once();
    // a second logger is not an error worth stopping for
    console_log::init_with_level(log::Level::Info).ok();
    App::new().with_canvas_id("desk-canvas").run::<DeskApp>()?;
    Ok(())
}
