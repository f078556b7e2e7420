//! CPU-side resources: geometry, 2D shapes and 3D curves, materials and
//! textures. Nothing in here touches the GPU.

pub mod curve;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod shape;
pub mod texture;

pub use curve::{CatmullRomCurve3, CubicBezierCurve3, Curve3};
pub use geometry::{BoundingBox, BoundingSphere, Geometry};
pub use material::{Blending, Material, MaterialKind, Side};
pub use mesh::Mesh;
pub use shape::{Path, Shape};
pub use texture::{Texture, WrapMode};
