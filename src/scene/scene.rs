use glam::{Affine3A, Vec3, Vec4};
use slotmap::SlotMap;

use crate::assets::AssetServer;
use crate::resources::geometry::BoundingBox;
use crate::resources::mesh::Mesh;
use crate::scene::camera::Camera;
use crate::scene::environment::Environment;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::transform_system;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

/// Scene graph: node hierarchy plus mesh, camera and light components.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,

    pub environment: Environment,

    /// Clear color; `None` keeps the renderer's (transparent) default.
    pub background: Option<Vec4>,

    pub active_camera: Option<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            environment: Environment::new(),
            background: None,
            active_camera: None,
        }
    }

    /// Starts building a node.
    pub fn build_node(&mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Creates an empty group node at the root.
    pub fn create_node(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// Adds a node at the root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        self.root_nodes.push(handle);
        self.attach(handle, parent);
        handle
    }

    /// Removes a node, its subtree and their components.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.remove_node(child);
        }

        self.detach(handle);

        if let Some(node) = self.nodes.remove(handle) {
            if let Some(key) = node.mesh {
                self.meshes.remove(key);
            }
            if let Some(key) = node.camera {
                self.cameras.remove(key);
            }
            if let Some(key) = node.light {
                self.lights.remove(key);
            }
        }

        if self.active_camera == Some(handle) {
            self.active_camera = None;
        }
    }

    /// Re-parents `child` under `parent`, keeping its local transform.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if self.is_descendant_of(parent, child) {
            log::warn!("Cannot attach a node below its own descendant");
            return;
        }
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            log::error!("Node not found during attach!");
            return;
        }

        self.detach(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Unlinks a node from its parent (or the root list) without removing it.
    fn detach(&mut self, handle: NodeHandle) {
        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        match parent {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(p) {
                    parent.children.retain(|&c| c != handle);
                }
            }
            None => self.root_nodes.retain(|&r| r != handle),
        }
        if let Some(node) = self.nodes.get_mut(handle) {
            node.parent = None;
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// First node with `name`, depth first from the roots.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.root_nodes
            .iter()
            .find_map(|&root| self.find_by_name_in(root, name))
    }

    /// First node with `name` in the subtree of `root` (inclusive).
    #[must_use]
    pub fn find_by_name_in(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut found = None;
        self.traverse(root, &mut |handle, node| {
            if found.is_none() && node.name == name {
                found = Some(handle);
            }
        });
        found
    }

    /// Whether `ancestor` is `node` itself or one of its ancestors.
    #[must_use]
    pub fn is_descendant_of(&self, node: NodeHandle, ancestor: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    /// Visits `root` and its subtree depth first, parents before children.
    pub fn traverse(&self, root: NodeHandle, f: &mut dyn FnMut(NodeHandle, &Node)) {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            f(handle, node);
            stack.extend(node.children.iter().rev());
        }
    }

    /// Like [`Scene::traverse`], skipping hidden nodes and their subtrees.
    pub fn traverse_visible(&self, root: NodeHandle, f: &mut dyn FnMut(NodeHandle, &Node)) {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            f(handle, node);
            stack.extend(node.children.iter().rev());
        }
    }

    /// Whether the node and all of its ancestors are visible.
    #[must_use]
    pub fn is_visible_in_world(&self, handle: NodeHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            let Some(node) = self.nodes.get(h) else {
                return false;
            };
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    // ========================================================================
    // Component queries
    // ========================================================================

    /// `(Transform, Camera)` of the active camera node.
    pub fn query_main_camera_bundle(&mut self) -> Option<(&mut Transform, &mut Camera)> {
        let node_id = self.active_camera?;
        self.query_camera_bundle(node_id)
    }

    pub fn query_camera_bundle(&mut self, node_id: NodeHandle) -> Option<(&mut Transform, &mut Camera)> {
        let camera_key = self.nodes.get(node_id)?.camera?;
        let camera = self.cameras.get_mut(camera_key)?;
        let transform = &mut self.nodes.get_mut(node_id)?.transform;
        Some((transform, camera))
    }

    #[must_use]
    pub fn main_camera(&self) -> Option<&Camera> {
        let key = self.nodes.get(self.active_camera?)?.camera?;
        self.cameras.get(key)
    }

    pub fn main_camera_mut(&mut self) -> Option<&mut Camera> {
        let key = self.nodes.get(self.active_camera?)?.camera?;
        self.cameras.get_mut(key)
    }

    #[must_use]
    pub fn get_light(&self, node_id: NodeHandle) -> Option<&Light> {
        self.lights.get(self.nodes.get(node_id)?.light?)
    }

    pub fn get_light_mut(&mut self, node_id: NodeHandle) -> Option<&mut Light> {
        let key = self.nodes.get(node_id)?.light?;
        self.lights.get_mut(key)
    }

    #[must_use]
    pub fn get_mesh(&self, node_id: NodeHandle) -> Option<&Mesh> {
        self.meshes.get(self.nodes.get(node_id)?.mesh?)
    }

    pub fn get_mesh_mut(&mut self, node_id: NodeHandle) -> Option<&mut Mesh> {
        let key = self.nodes.get(node_id)?.mesh?;
        self.meshes.get_mut(key)
    }

    /// Lights whose node is visible in the world, with their world matrices.
    pub fn iter_active_lights(&self) -> impl Iterator<Item = (&Light, &Affine3A)> {
        self.nodes.iter().filter_map(move |(handle, node)| {
            let light = self.lights.get(node.light?)?;
            self.is_visible_in_world(handle)
                .then_some((light, &node.transform.world_matrix))
        })
    }

    // ========================================================================
    // Matrix update
    // ========================================================================

    /// Propagates transforms to world matrices. Call once per frame before
    /// rendering or raycasting.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, &mut self.cameras, &self.root_nodes);
    }

    // ========================================================================
    // Component creation
    // ========================================================================

    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_node(node)
    }

    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_to_parent(node, parent)
    }

    /// Adds a camera node at the root and makes it active if none is.
    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let mut node = Node::new("Camera");
        node.camera = Some(self.cameras.insert(camera));
        let handle = self.add_node(node);
        if self.active_camera.is_none() {
            self.active_camera = Some(handle);
        }
        handle
    }

    pub fn add_light(&mut self, light: Light) -> NodeHandle {
        let mut node = Node::new("Light");
        node.light = Some(self.lights.insert(light));
        self.add_node(node)
    }

    pub fn add_light_to_parent(&mut self, light: Light, parent: NodeHandle) -> NodeHandle {
        let mut node = Node::new("Light");
        node.light = Some(self.lights.insert(light));
        self.add_to_parent(node, parent)
    }

    // ========================================================================
    // Bounds
    // ========================================================================

    fn get_bbox_of_one_node(&self, node_id: NodeHandle, assets: &AssetServer) -> Option<BoundingBox> {
        let node = self.get_node(node_id)?;
        let mesh = self.meshes.get(node.mesh?)?;
        let geometry = assets.get_geometry(mesh.geometry)?;
        Some(geometry.bounding_box()?.transform(&node.transform.world_matrix))
    }

    /// World-space bounds of a subtree. Requires up-to-date world matrices.
    #[must_use]
    pub fn get_bbox_of_node(&self, node_id: NodeHandle, assets: &AssetServer) -> Option<BoundingBox> {
        let mut combined: Option<BoundingBox> = None;
        self.traverse(node_id, &mut |handle, _| {
            if let Some(b) = self.get_bbox_of_one_node(handle, assets) {
                combined = Some(match combined {
                    Some(existing) => existing.union(&b),
                    None => b,
                });
            }
        });
        combined
    }
}

/// Fluent node construction.
///
/// ```rust,ignore
/// let pc = scene
///     .build_node("pc_case")
///     .with_position(0.5, 0.99, 0.2)
///     .with_scale(0.8)
///     .with_parent(setup)
///     .build();
/// ```
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<NodeHandle>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            node: Node::new(name),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.position = Vec3::new(x, y, z);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.set_rotation_euler(x, y, z);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.transform.scale = Vec3::splat(s);
        self
    }

    #[must_use]
    pub fn with_scale_xyz(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.scale = Vec3::new(x, y, z);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.node.mesh = Some(self.scene.meshes.insert(mesh));
        self
    }

    #[must_use]
    pub fn with_light(mut self, light: Light) -> Self {
        self.node.light = Some(self.scene.lights.insert(light));
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.node.visible = visible;
        self
    }

    /// Inserts the node and returns its handle.
    pub fn build(self) -> NodeHandle {
        match self.parent {
            Some(parent) => self.scene.add_to_parent(self.node, parent),
            None => self.scene.add_node(self.node),
        }
    }
}
