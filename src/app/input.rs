//! Platform-agnostic input system
//!
//! Pointer-centric state container. Platform adapters (winit natively, DOM
//! events in the browser) translate their events into `inject_*` calls.

use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};

/// Mouse button enumeration
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Platform-agnostic input state container
#[derive(Debug, Clone, Default)]
pub struct Input {
    pressed_mouse: FxHashSet<MouseButton>,
    just_pressed_mouse: FxHashSet<MouseButton>,
    just_released_mouse: FxHashSet<MouseButton>,

    mouse_position: Vec2,
    has_position: bool,
    mouse_delta: Vec2,
    scroll_delta: Vec2,

    touches: FxHashMap<u64, Vec2>,
    touch_started: bool,

    screen_size: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== System API (called by Engine/Adapter) ==========

    /// Clears transient state at the start of each frame (just pressed,
    /// just released, deltas).
    pub fn start_frame(&mut self) {
        self.just_pressed_mouse.clear();
        self.just_released_mouse.clear();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
        self.touch_started = false;
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                if self.pressed_mouse.insert(button) {
                    self.just_pressed_mouse.insert(button);
                }
            }
            ButtonState::Released => {
                if self.pressed_mouse.remove(&button) {
                    self.just_released_mouse.insert(button);
                }
            }
        }
    }

    pub fn inject_mouse_position(&mut self, x: f32, y: f32) {
        let new_pos = Vec2::new(x, y);
        if self.has_position {
            self.mouse_delta += new_pos - self.mouse_position;
        }
        self.mouse_position = new_pos;
        self.has_position = true;
    }

    pub fn inject_scroll(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll_delta += Vec2::new(delta_x, delta_y);
    }

    /// Touches drive the pointer: the first finger moves the cursor and
    /// counts as a held left button, so orbiting and picking work unchanged.
    pub fn inject_touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) {
        match phase {
            TouchPhase::Started => {
                let first = self.touches.is_empty();
                self.touches.insert(id, Vec2::new(x, y));
                if first {
                    // jump without producing a drag delta
                    self.mouse_position = Vec2::new(x, y);
                    self.has_position = true;
                    self.touch_started = true;
                    self.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
                }
            }
            TouchPhase::Moved => {
                if self.touches.contains_key(&id) {
                    self.touches.insert(id, Vec2::new(x, y));
                    if self.touches.len() == 1 {
                        self.inject_mouse_position(x, y);
                    }
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                if self.touches.is_empty() {
                    self.inject_mouse_button(MouseButton::Left, ButtonState::Released);
                }
            }
        }
    }

    pub fn inject_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    // ========== User API ==========

    #[must_use]
    pub fn get_mouse_button(&self, button: MouseButton) -> bool {
        self.pressed_mouse.contains(&button)
    }

    #[must_use]
    pub fn get_mouse_button_down(&self, button: MouseButton) -> bool {
        self.just_pressed_mouse.contains(&button)
    }

    #[must_use]
    pub fn get_mouse_button_up(&self, button: MouseButton) -> bool {
        self.just_released_mouse.contains(&button)
    }

    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    #[must_use]
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    #[must_use]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Whether a first finger landed this frame.
    #[must_use]
    pub fn touch_started(&self) -> bool {
        self.touch_started
    }

    /// Whether the pointer moved this frame.
    #[must_use]
    pub fn pointer_moved(&self) -> bool {
        self.mouse_delta != Vec2::ZERO
    }

    /// Pointer position in normalized device coordinates.
    ///
    /// `x = px / w * 2 - 1`, `y = -(py / h) * 2 + 1`. Returns `None` before the
    /// first resize event (zero-sized screen).
    #[must_use]
    pub fn pointer_ndc(&self) -> Option<Vec2> {
        pixels_to_ndc(self.mouse_position, self.screen_size)
    }
}

#[must_use]
pub fn pixels_to_ndc(position: Vec2, size: Vec2) -> Option<Vec2> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        position.x / size.x * 2.0 - 1.0,
        -(position.y / size.y) * 2.0 + 1.0,
    ))
}
