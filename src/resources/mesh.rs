use crate::assets::{GeometryHandle, MaterialHandle};

/// A drawable pairing of geometry and material, attached to a scene node.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    pub geometry: GeometryHandle,
    pub material: MaterialHandle,

    pub cast_shadow: bool,
    pub receive_shadow: bool,

    /// Drawn later when larger, inside the same opaque/transparent bucket.
    pub render_order: i32,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material,
            cast_shadow: false,
            receive_shadow: false,
            render_order: 0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
