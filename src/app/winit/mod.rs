//! Winit-based Application Framework
//!
//! - [`App`]: builder for configuring and launching the application
//! - [`AppHandler`]: trait the application implements
//! - `AppRunner`: internal event loop handler
//!
//! # Example
//!
//! ```rust,ignore
//! use coder_desk::app::winit::{App, AppHandler};
//! use coder_desk::engine::{Engine, FrameState};
//! use std::sync::Arc;
//! use winit::window::Window;
//!
//! struct Viewer;
//!
//! impl AppHandler for Viewer {
//!     fn init(engine: &mut Engine, window: &Arc<Window>) -> Self {
//!         Viewer
//!     }
//! }
//!
//! fn main() -> coder_desk::errors::Result<()> {
//!     App::new().with_title("Viewer").run::<Viewer>()
//! }
//! ```

use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
pub use winit::window::{Window, WindowId};

use crate::engine::{Engine, FrameState};
use crate::renderer::settings::RenderSettings;

pub mod input_adapter;

/// Application behavior.
///
/// # Lifecycle
///
/// 1. [`init`](Self::init) once the window and renderer exist
/// 2. [`on_event`](Self::on_event) for each window event
/// 3. [`update`](Self::update) once per frame, before the engine update
pub trait AppHandler: Sized + 'static {
    fn init(engine: &mut Engine, window: &Arc<Window>) -> Self;

    /// Called before the engine processes `event`. Returning `true` skips
    /// the default input translation (resize and redraw still happen).
    #[allow(unused_variables)]
    fn on_event(&mut self, engine: &mut Engine, window: &Arc<Window>, event: &WindowEvent) -> bool {
        false
    }

    #[allow(unused_variables)]
    fn update(&mut self, engine: &mut Engine, window: &Arc<Window>, frame: &FrameState) {}
}

/// Application builder.
///
/// ```rust,ignore
/// App::new()
///     .with_title("Desk")
///     .with_settings(RenderSettings { vsync: true, ..Default::default() })
///     .run::<MyHandler>()?;
/// ```
pub struct App {
    title: String,
    render_settings: RenderSettings,
    #[cfg(target_arch = "wasm32")]
    canvas_id: Option<String>,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Coder Desk".into(),
            render_settings: RenderSettings::default(),
            #[cfg(target_arch = "wasm32")]
            canvas_id: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.render_settings = settings;
        self
    }

    /// Sets the id of the canvas element to render into (WASM only).
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn with_canvas_id(mut self, id: impl Into<String>) -> Self {
        self.canvas_id = Some(id.into());
        self
    }

    /// Runs the event loop on the current thread until the window closes.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run<H: AppHandler>(self) -> crate::errors::Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::<H>::new(self.title, self.render_settings);
        event_loop.run_app(&mut runner)?;
        Ok(())
    }

    /// Spawns the event loop and returns immediately; frames are driven by
    /// `requestAnimationFrame`.
    #[cfg(target_arch = "wasm32")]
    pub fn run<H: AppHandler>(self) -> crate::errors::Result<()> {
        use winit::platform::web::EventLoopExtWebSys;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let runner = AppRunner::<H>::new(self.title, self.render_settings, self.canvas_id);
        event_loop.spawn_app(runner);

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

struct AppRunner<H: AppHandler> {
    title: String,
    render_settings: RenderSettings,

    #[cfg(target_arch = "wasm32")]
    canvas_id: Option<String>,

    window: Option<Arc<Window>>,
    engine: Option<Engine>,
    user_state: Option<H>,

    start_time: Instant,
    last_loop_time: Instant,

    /// Filled by the async initialization task in the browser.
    #[cfg(target_arch = "wasm32")]
    pending: std::rc::Rc<std::cell::RefCell<Option<(Engine, H)>>>,
}

impl<H: AppHandler> AppRunner<H> {
    fn new(
        title: String,
        render_settings: RenderSettings,
        #[cfg(target_arch = "wasm32")] canvas_id: Option<String>,
    ) -> Self {
        let now = Instant::now();
        Self {
            title,
            render_settings,
            #[cfg(target_arch = "wasm32")]
            canvas_id,
            window: None,
            engine: None,
            user_state: None,
            start_time: now,
            last_loop_time: now,
            #[cfg(target_arch = "wasm32")]
            pending: std::rc::Rc::new(std::cell::RefCell::new(None)),
        }
    }

    fn update_and_render(&mut self) {
        let now = Instant::now();
        let total = now.duration_since(self.start_time).as_secs_f64();
        // clamp stalls (background tabs) so tweens do not jump
        let dt = now.duration_since(self.last_loop_time).as_secs_f32().min(0.1);
        self.last_loop_time = now;

        let (Some(window), Some(engine), Some(user_state)) =
            (&self.window, &mut self.engine, &mut self.user_state)
        else {
            return;
        };

        let frame = FrameState {
            time: total,
            dt,
            frame_count: engine.frame_count(),
        };

        user_state.update(engine, window, &frame);
        engine.update(dt);
        engine.render_active_scene();
        window.request_redraw();
    }

    /// Moves a finished browser initialization into place.
    #[cfg(target_arch = "wasm32")]
    fn poll_pending(&mut self) {
        if self.engine.is_some() {
            return;
        }
        let Ok(mut slot) = self.pending.try_borrow_mut() else {
            return;
        };
        let Some((mut engine, user_state)) = slot.take() else {
            return;
        };
        if let Some(window) = &self.window {
            let size = window.inner_size();
            engine.resize(size.width.max(1), size.height.max(1), window.scale_factor() as f32);
        }
        self.engine = Some(engine);
        self.user_state = Some(user_state);
        log::info!("Engine initialization completed, starting render loop");
    }
}

impl<H: AppHandler> ApplicationHandler for AppRunner<H> {
    #[cfg(not(target_arch = "wasm32"))]
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(&self.title)
            .with_transparent(true)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("Initializing renderer backend...");

        let mut engine = Engine::new(self.render_settings.clone());
        let size = window.inner_size();

        if let Err(e) = pollster::block_on(engine.init(window.clone(), size.width, size.height)) {
            log::error!("Fatal renderer error: {e}");
            event_loop.exit();
            return;
        }
        engine.resize(size.width, size.height, window.scale_factor() as f32);

        self.user_state = Some(H::init(&mut engine, &window));
        self.engine = Some(engine);

        let now = Instant::now();
        self.start_time = now;
        self.last_loop_time = now;
    }

    #[cfg(target_arch = "wasm32")]
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        use wasm_bindgen::JsCast;
        use winit::platform::web::WindowAttributesExtWebSys;

        if self.window.is_some() {
            return;
        }

        let canvas_id = self.canvas_id.as_deref().unwrap_or("desk-canvas");
        let Some(web_window) = web_sys::window() else {
            log::error!("No browser window");
            return;
        };
        let canvas = web_window
            .document()
            .and_then(|d| d.get_element_by_id(canvas_id))
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            log::warn!("Canvas element '{canvas_id}' not found");
            return;
        };

        let dpr = web_window.device_pixel_ratio();
        canvas.set_width((f64::from(canvas.client_width()) * dpr) as u32);
        canvas.set_height((f64::from(canvas.client_height()) * dpr) as u32);

        let attributes = Window::default_attributes()
            .with_title(&self.title)
            .with_canvas(Some(canvas));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("Initializing WebGPU renderer backend...");

        let render_settings = self.render_settings.clone();
        let pending = self.pending.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let mut engine = Engine::new(render_settings);
            let size = window.inner_size();
            match engine.init(window.clone(), size.width.max(1), size.height.max(1)).await {
                Ok(()) => {
                    let user_state = H::init(&mut engine, &window);
                    *pending.borrow_mut() = Some((engine, user_state));
                    window.request_redraw();
                }
                Err(e) => log::error!("Fatal renderer error: {e}"),
            }
        });

        let now = Instant::now();
        self.start_time = now;
        self.last_loop_time = now;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        #[cfg(target_arch = "wasm32")]
        self.poll_pending();

        let (Some(window), Some(engine), Some(user_state)) =
            (&self.window, &mut self.engine, &mut self.user_state)
        else {
            return;
        };

        if !user_state.on_event(engine, window, &event) {
            input_adapter::process_window_event(&mut engine.input, &event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let scale_factor = window.scale_factor() as f32;
                engine.resize(size.width, size.height, scale_factor);
                log::info!("Resized to {}x{}", size.width, size.height);
            }
            WindowEvent::RedrawRequested => self.update_and_render(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.engine.is_some()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}
