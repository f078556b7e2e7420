//! Scene lights. All of them hang off the scene root so that scaling the
//! setup for mobile doesn't move them.

use crate::scene::{Light, NodeHandle, Scene};

#[derive(Debug, Clone, Copy)]
pub struct DeskLights {
    pub ambient: NodeHandle,
    pub directional: NodeHandle,
    /// Blue fill light above the desk.
    pub point: NodeHandle,
    /// RGB light over the keyboard, recolored every frame.
    pub keyboard: NodeHandle,
}

impl DeskLights {
    pub fn build(scene: &mut Scene, root: NodeHandle) -> Self {
        let ambient = scene
            .build_node("ambient_light")
            .with_light(Light::new_ambient(0xff_ffff, 0.4))
            .with_parent(root)
            .build();

        let directional = scene
            .build_node("directional_light")
            .with_light(Light::new_directional(0xff_ffff, 0.8).with_shadows(true))
            .with_position(1.0, 2.0, 4.0)
            .with_parent(root)
            .build();

        let point = scene
            .build_node("fill_light")
            .with_light(Light::new_point(0x25_63eb, 0.8, 10.0))
            .with_position(0.0, 2.0, 2.0)
            .with_parent(root)
            .build();

        let keyboard = scene
            .build_node("keyboard_light")
            .with_light(Light::new_point(0xff_0000, 0.5, 1.0))
            .with_position(0.0, 0.85, 0.2)
            .with_parent(root)
            .build();

        Self {
            ambient,
            directional,
            point,
            keyboard,
        }
    }
}
