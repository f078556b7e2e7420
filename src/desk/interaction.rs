//! Hover and click targets.
//!
//! Picking walks the ray hits nearest first and maps each hit mesh to the
//! interactive group it belongs to. Hits on scenery (the desk, its legs)
//! are skipped, so a hotspot partly hidden behind the desk top can still be
//! hovered through it.

use std::f32::consts::PI;

use crate::animation::{Axis, Tween, TweenTarget};
use crate::scene::{Intersection, NodeHandle, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hotspot {
    Pc,
    Keyboard,
    Mouse,
    Monitor,
    Chair,
}

impl Hotspot {
    /// Hover priority when a hit belongs to more than one group.
    pub const ALL: [Hotspot; 5] = [Self::Pc, Self::Keyboard, Self::Mouse, Self::Monitor, Self::Chair];

    /// Whether clicking this hotspot does anything. The monitor only reacts
    /// to hovering.
    #[must_use]
    pub fn is_clickable(self) -> bool {
        !matches!(self, Self::Monitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Pointer,
}

/// What a pointer ray found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerHit {
    /// The ray missed the setup entirely.
    Nothing,
    /// Only non-interactive geometry.
    Scenery,
    Hotspot(Hotspot),
}

/// Nodes that hover and click effects act on.
#[derive(Debug, Clone, Copy)]
pub struct HotspotNodes {
    pub pc: NodeHandle,
    pub keyboard: NodeHandle,
    pub mouse: NodeHandle,
    pub monitor: NodeHandle,
    pub chair: NodeHandle,

    pub pc_light: NodeHandle,
    pub keyboard_light: NodeHandle,
    pub mouse_light: NodeHandle,
}

impl HotspotNodes {
    #[must_use]
    pub fn root(&self, hotspot: Hotspot) -> NodeHandle {
        match hotspot {
            Hotspot::Pc => self.pc,
            Hotspot::Keyboard => self.keyboard,
            Hotspot::Mouse => self.mouse,
            Hotspot::Monitor => self.monitor,
            Hotspot::Chair => self.chair,
        }
    }

    /// The hotspot whose subtree contains `node`.
    #[must_use]
    pub fn classify(&self, scene: &Scene, node: NodeHandle) -> Option<Hotspot> {
        Hotspot::ALL
            .into_iter()
            .find(|&h| scene.is_descendant_of(node, self.root(h)))
    }

    /// First hovered hotspot along the hits.
    #[must_use]
    pub fn hover_hit(&self, scene: &Scene, hits: &[Intersection]) -> PointerHit {
        if hits.is_empty() {
            return PointerHit::Nothing;
        }
        hits.iter()
            .find_map(|hit| self.classify(scene, hit.node))
            .map_or(PointerHit::Scenery, PointerHit::Hotspot)
    }

    /// First clickable hotspot along the hits.
    #[must_use]
    pub fn click_hit(&self, scene: &Scene, hits: &[Intersection]) -> Option<Hotspot> {
        hits.iter()
            .filter_map(|hit| self.classify(scene, hit.node))
            .find(|h| h.is_clickable())
    }

    /// Highlight tweens for entering `hotspot`.
    #[must_use]
    pub fn hover_tweens(&self, hotspot: Hotspot, duration: f32) -> Vec<Tween> {
        match hotspot {
            Hotspot::Pc => vec![
                Tween::to(TweenTarget::NodePosition(self.pc, Axis::Y), 1.02, duration),
                Tween::to(TweenTarget::LightIntensity(self.pc_light), light_intensity(hotspot, true), duration),
            ],
            Hotspot::Keyboard => vec![
                Tween::to(TweenTarget::NodePosition(self.keyboard, Axis::Y), 0.835, duration),
                Tween::to(TweenTarget::LightIntensity(self.keyboard_light), light_intensity(hotspot, true), duration),
            ],
            Hotspot::Mouse => vec![Tween::to(
                TweenTarget::LightIntensity(self.mouse_light),
                light_intensity(hotspot, true),
                duration,
            )],
            Hotspot::Monitor => vec![Tween::to(TweenTarget::NodePosition(self.monitor, Axis::Y), 0.835, duration)],
            Hotspot::Chair => vec![
                Tween::to(TweenTarget::NodeRotation(self.chair, Axis::Z), PI / 24.0, duration),
                Tween::to(TweenTarget::NodePosition(self.chair, Axis::Y), 0.05, duration),
            ],
        }
    }

    /// Tweens back to the resting pose after leaving `hotspot`.
    #[must_use]
    pub fn reset_tweens(&self, hotspot: Hotspot, duration: f32) -> Vec<Tween> {
        match hotspot {
            Hotspot::Pc => vec![
                Tween::to(TweenTarget::NodePosition(self.pc, Axis::Y), 0.99, duration),
                Tween::to(TweenTarget::LightIntensity(self.pc_light), light_intensity(hotspot, false), duration),
            ],
            Hotspot::Keyboard => vec![
                Tween::to(TweenTarget::NodePosition(self.keyboard, Axis::Y), 0.825, duration),
                Tween::to(TweenTarget::LightIntensity(self.keyboard_light), light_intensity(hotspot, false), duration),
            ],
            Hotspot::Mouse => vec![Tween::to(
                TweenTarget::LightIntensity(self.mouse_light),
                light_intensity(hotspot, false),
                duration,
            )],
            Hotspot::Monitor => vec![Tween::to(TweenTarget::NodePosition(self.monitor, Axis::Y), 0.825, duration)],
            Hotspot::Chair => vec![
                Tween::to(TweenTarget::NodeRotation(self.chair, Axis::Z), 0.0, duration),
                Tween::to(TweenTarget::NodePosition(self.chair, Axis::Y), 0.0, duration),
            ],
        }
    }
}

/// Intensity of the light a hotspot owns, highlighted or at rest. Hotspots
/// without a light report 0.
#[must_use]
pub fn light_intensity(hotspot: Hotspot, hovered: bool) -> f32 {
    match (hotspot, hovered) {
        (Hotspot::Pc, true) => 1.5,
        (Hotspot::Pc, false) => 0.8,
        (Hotspot::Keyboard | Hotspot::Mouse, true) => 1.0,
        (Hotspot::Keyboard | Hotspot::Mouse, false) => 0.5,
        (Hotspot::Monitor | Hotspot::Chair, _) => 0.0,
    }
}

/// Hover state: which hotspot is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    pub current: Option<Hotspot>,
}

/// What to do after a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverChange {
    pub reset: Option<Hotspot>,
    pub highlight: Option<Hotspot>,
    pub cursor: Option<CursorIcon>,
}

impl HoverState {
    /// Advances the state for a new pointer hit.
    ///
    /// Hitting only scenery keeps the current highlight.
    pub fn transition(&mut self, hit: PointerHit) -> HoverChange {
        match hit {
            PointerHit::Hotspot(h) if self.current != Some(h) => {
                let reset = self.current.replace(h);
                HoverChange {
                    reset,
                    highlight: Some(h),
                    cursor: Some(CursorIcon::Pointer),
                }
            }
            PointerHit::Nothing => match self.current.take() {
                Some(previous) => HoverChange {
                    reset: Some(previous),
                    highlight: None,
                    cursor: Some(CursorIcon::Default),
                },
                None => HoverChange::default(),
            },
            _ => HoverChange::default(),
        }
    }
}
