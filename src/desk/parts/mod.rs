//! Procedural construction of the desk setup.
//!
//! Each submodule builds one object into the scene and returns the handles
//! the interaction and ambient code needs afterwards.

pub mod chair;
pub mod furniture;
pub mod helpers;
pub mod keyboard;
pub mod monitor;
pub mod mouse;
pub mod pc_case;

pub use chair::Chair;
pub use furniture::Furniture;
pub use helpers::DebugHelpers;
pub use keyboard::Keyboard;
pub use monitor::Monitor;
pub use mouse::ComputerMouse;
pub use pc_case::PcCase;

use crate::assets::{AssetServer, GeometryHandle, MaterialHandle};
use crate::resources::{Geometry, Material, Mesh};
use crate::scene::{NodeBuilder, NodeHandle, Scene};

/// Shorthand for adding meshes and groups while building a part.
pub struct PartBuilder<'a> {
    pub scene: &'a mut Scene,
    pub assets: &'a mut AssetServer,
}

impl<'a> PartBuilder<'a> {
    pub fn new(scene: &'a mut Scene, assets: &'a mut AssetServer) -> Self {
        Self { scene, assets }
    }

    pub fn geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        self.assets.add_geometry(geometry)
    }

    pub fn material(&mut self, material: Material) -> MaterialHandle {
        self.assets.add_material(material)
    }

    /// Empty transform node under `parent`.
    pub fn group(&mut self, name: &str, parent: NodeHandle) -> NodeBuilder<'_> {
        self.scene.build_node(name).with_parent(parent)
    }

    /// Mesh node under `parent`. Everything in the setup casts and receives
    /// shadows.
    pub fn mesh(
        &mut self,
        name: &str,
        geometry: GeometryHandle,
        material: MaterialHandle,
        parent: NodeHandle,
    ) -> NodeBuilder<'_> {
        let mut mesh = Mesh::new(geometry, material).with_name(name);
        mesh.cast_shadow = true;
        mesh.receive_shadow = true;
        self.scene.build_node(name).with_mesh(mesh).with_parent(parent)
    }

    /// Adds `geometry` and a mesh node using it in one go.
    pub fn mesh_with(
        &mut self,
        name: &str,
        geometry: Geometry,
        material: MaterialHandle,
        parent: NodeHandle,
    ) -> NodeBuilder<'_> {
        let geometry = self.assets.add_geometry(geometry);
        self.mesh(name, geometry, material, parent)
    }
}
