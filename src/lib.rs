#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod app;
pub mod assets;
pub mod desk;
pub mod engine;
pub mod errors;
pub mod page;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{Ease, Timeline, Tween, TweenTarget, Tweener};
pub use assets::{AssetServer, GeometryHandle, MaterialHandle, TextureHandle};
pub use desk::{DeskConfig, DeskScene, Hotspot};
pub use engine::{Engine, FrameState};
pub use errors::{DeskError, Result};
pub use renderer::Renderer;
pub use renderer::settings::RenderSettings;
pub use resources::primitives::*;
pub use resources::{Geometry, Material, Mesh, Side, Texture};
pub use scene::{Camera, Light, Node, NodeHandle, Scene};
pub use utils::orbit_control::OrbitControls;

#[cfg(feature = "winit")]
pub use app::winit::{App, AppHandler};
