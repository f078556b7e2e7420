//! Engine Core Module
//!
//! [`Engine`] owns everything a frame needs: the renderer, the single scene,
//! its assets, input state and the tween scheduler. It has no window logic,
//! so it can be driven by the winit frontend, the browser, or a test.
//!
//! # Example
//!
//! ```rust,ignore
//! use coder_desk::{Engine, RenderSettings};
//!
//! let mut engine = Engine::new(RenderSettings::default());
//! engine.init(window, 1280, 720).await?;
//!
//! loop {
//!     engine.update(dt);
//!     engine.render_active_scene();
//! }
//! ```

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::animation::Tweener;
use crate::app::input::Input;
use crate::assets::AssetServer;
use crate::renderer::Renderer;
use crate::renderer::settings::RenderSettings;
use crate::scene::Scene;

/// The core engine instance.
///
/// # Lifecycle
///
/// 1. Create with [`Engine::new`] or [`Engine::default`]
/// 2. Initialize the GPU with [`Engine::init`]
/// 3. Each frame: [`Engine::update`], then [`Engine::render_active_scene`]
pub struct Engine {
    pub renderer: Renderer,
    pub scene: Scene,
    pub assets: AssetServer,
    pub input: Input,
    pub tweener: Tweener,

    time: f64,
    frame_count: u64,
    scale_factor: f32,
}

impl Engine {
    /// Creates the engine. GPU resources are not allocated until
    /// [`init`](Self::init) is called, so scene building can happen first.
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            renderer: Renderer::new(settings),
            scene: Scene::new(),
            assets: AssetServer::new(),
            input: Input::new(),
            tweener: Tweener::new(),
            time: 0.0,
            frame_count: 0,
            scale_factor: 1.0,
        }
    }

    /// Initializes GPU resources for the given window.
    ///
    /// # Errors
    ///
    /// Fails when no compatible adapter or device is available, or the
    /// surface cannot be created.
    pub async fn init<W>(&mut self, window: W, width: u32, height: u32) -> crate::errors::Result<()>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        self.renderer.init(window, width, height).await?;
        self.resize(width, height, self.scale_factor);
        Ok(())
    }

    /// Seconds since startup, accumulated from `update` deltas.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    #[must_use]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Handles surface size changes: reconfigures the renderer, records the
    /// new size for input and fixes the camera aspect.
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f32) {
        self.scale_factor = scale_factor;
        self.renderer.resize(width, height);
        self.input.inject_resize(width, height);

        if width > 0
            && height > 0
            && let Some(camera) = self.scene.main_camera_mut()
        {
            camera.set_aspect(width as f32, height as f32);
        }
    }

    /// Advances the frame: tweens, world matrices and the camera's
    /// view-projection, then resets per-frame input.
    pub fn update(&mut self, dt: f32) {
        self.time += f64::from(dt);
        self.frame_count += 1;

        self.tweener.update(dt, &mut self.scene, &mut self.assets);
        self.scene.update_matrix_world();
        if let Some((transform, camera)) = self.scene.query_main_camera_bundle() {
            let world = *transform.world_matrix();
            camera.update_view_projection(&world);
        }

        self.input.start_frame();
    }

    /// Returns `true` if a frame was presented.
    pub fn render_active_scene(&mut self) -> bool {
        self.renderer.render(&self.scene, &self.assets)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

/// Per-frame timing handed to application callbacks.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Seconds since startup.
    pub time: f64,
    /// Seconds since the previous frame.
    pub dt: f32,
    pub frame_count: u64,
}
