//! Procedural geometry generators following the usual three.js parameter
//! conventions (Y up, counter-clockwise front faces).

pub mod box_shape;
pub mod circle;
pub mod cylinder;
pub mod extrude;
pub mod plane;
pub mod sphere;
pub mod torus;
pub mod tube;

pub use box_shape::create_box;
pub use circle::{create_circle, create_ring};
pub use cylinder::{create_cylinder, CylinderOptions};
pub use extrude::{create_extrude, ExtrudeOptions};
pub use plane::{create_plane, PlaneOptions};
pub use sphere::{create_sphere, SphereOptions};
pub use torus::create_torus;
pub use tube::{compute_frames, create_tube};
