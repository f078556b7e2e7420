//! Scene graph
//!
//! - [`Node`]: hierarchy entry with a [`Transform`] and component keys
//! - [`Scene`]: node storage plus mesh, camera and light components
//! - [`Camera`], [`Light`], [`Environment`]
//! - [`raycast`]: ray picking
//! - [`transform_system`]: world matrix propagation

pub mod camera;
pub mod environment;
pub mod light;
pub mod node;
pub mod raycast;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use camera::{Camera, Frustum};
pub use environment::Environment;
pub use light::{Light, LightKind};
pub use node::Node;
pub use raycast::{Culling, Intersection, Ray, Raycaster};
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
}
