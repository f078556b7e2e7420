use crate::animation::easing::Ease;
use crate::animation::values::AnimValue;
use crate::assets::{AssetServer, MaterialHandle};
use crate::scene::{NodeHandle, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// How a tween behaves once its first pass completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play once.
    #[default]
    Once,
    /// Restart from the start value for every repeat.
    Loop,
    /// Alternate direction on every repeat (yoyo).
    PingPong,
}

/// The property a tween writes to.
///
/// Rotation targets go through the transform's Euler angles, so a spin
/// around Y and a tilt around Z can run at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    NodePosition(NodeHandle, Axis),
    NodeRotation(NodeHandle, Axis),
    LightIntensity(NodeHandle),
    LightColor(NodeHandle),
    MaterialColor(MaterialHandle),
    MaterialOpacity(MaterialHandle),
}

impl TweenTarget {
    /// Reads the current value, `None` if the target no longer exists.
    #[must_use]
    pub fn read(&self, scene: &Scene, assets: &AssetServer) -> Option<AnimValue> {
        match *self {
            Self::NodePosition(node, axis) => {
                let node = scene.get_node(node)?;
                Some(AnimValue::Scalar(node.transform.position[axis.index()]))
            }
            Self::NodeRotation(node, axis) => {
                let node = scene.get_node(node)?;
                Some(AnimValue::Scalar(node.transform.rotation_euler()[axis.index()]))
            }
            Self::LightIntensity(node) => scene.get_light(node).map(|l| AnimValue::Scalar(l.intensity)),
            Self::LightColor(node) => scene.get_light(node).map(|l| AnimValue::Color(l.color)),
            Self::MaterialColor(handle) => {
                assets.get_material(handle).map(|m| AnimValue::Color(m.color))
            }
            Self::MaterialOpacity(handle) => {
                assets.get_material(handle).map(|m| AnimValue::Scalar(m.opacity))
            }
        }
    }

    /// Writes `value`. Returns `false` when the target is gone or the value
    /// kind doesn't match the property.
    pub fn write(&self, value: AnimValue, scene: &mut Scene, assets: &mut AssetServer) -> bool {
        match *self {
            Self::NodePosition(node, axis) => {
                let (Some(node), Some(v)) = (scene.get_node_mut(node), value.as_scalar()) else {
                    return false;
                };
                node.transform.position[axis.index()] = v;
                node.transform.mark_dirty();
            }
            Self::NodeRotation(node, axis) => {
                let (Some(node), Some(v)) = (scene.get_node_mut(node), value.as_scalar()) else {
                    return false;
                };
                node.transform.set_rotation_axis(axis.index(), v);
                node.transform.mark_dirty();
            }
            Self::LightIntensity(node) => {
                let (Some(light), Some(v)) = (scene.get_light_mut(node), value.as_scalar()) else {
                    return false;
                };
                light.intensity = v;
            }
            Self::LightColor(node) => {
                let (Some(light), Some(v)) = (scene.get_light_mut(node), value.as_color()) else {
                    return false;
                };
                light.color = v;
            }
            Self::MaterialColor(handle) => {
                let (Some(material), Some(v)) = (assets.get_material_mut(handle), value.as_color())
                else {
                    return false;
                };
                material.set_color(v);
            }
            Self::MaterialOpacity(handle) => {
                let (Some(material), Some(v)) =
                    (assets.get_material_mut(handle), value.as_scalar())
                else {
                    return false;
                };
                material.set_opacity(v);
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum EndValue {
    Absolute(AnimValue),
    Relative(AnimValue),
}

/// Result of advancing a tween by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenStatus {
    /// Still inside its delay; nothing written.
    Waiting,
    Running,
    Finished,
    /// The target disappeared.
    Dead,
}

/// A single property animation.
///
/// The start value is read from the target the first time the tween leaves
/// its delay, unless [`Tween::from_to`] supplied one. Sequenced tweens
/// therefore pick up where their predecessors left off.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
    pub loop_mode: LoopMode,
    /// Number of extra passes after the first.
    pub repeat: u32,

    from: Option<AnimValue>,
    end: EndValue,

    elapsed: f32,
    start: Option<AnimValue>,
    resolved_end: Option<AnimValue>,
}

impl Tween {
    fn new(target: TweenTarget, from: Option<AnimValue>, end: EndValue, duration: f32) -> Self {
        Self {
            target,
            duration: duration.max(0.0),
            delay: 0.0,
            ease: Ease::default(),
            loop_mode: LoopMode::Once,
            repeat: 0,
            from,
            end,
            elapsed: 0.0,
            start: None,
            resolved_end: None,
        }
    }

    /// Animates from the current value to `value`.
    #[must_use]
    pub fn to(target: TweenTarget, value: impl Into<AnimValue>, duration: f32) -> Self {
        Self::new(target, None, EndValue::Absolute(value.into()), duration)
    }

    /// Animates from `from` to `to`, writing `from` as soon as it starts.
    #[must_use]
    pub fn from_to(
        target: TweenTarget,
        from: impl Into<AnimValue>,
        to: impl Into<AnimValue>,
        duration: f32,
    ) -> Self {
        Self::new(target, Some(from.into()), EndValue::Absolute(to.into()), duration)
    }

    /// Animates by `delta` relative to the value at start time.
    #[must_use]
    pub fn by(target: TweenTarget, delta: impl Into<AnimValue>, duration: f32) -> Self {
        Self::new(target, None, EndValue::Relative(delta.into()), duration)
    }

    /// Writes `value` once, when the delay expires.
    #[must_use]
    pub fn set(target: TweenTarget, value: impl Into<AnimValue>) -> Self {
        Self::to(target, value, 0.0)
    }

    /// Keeps writing `value` for `duration`, overriding anything else that
    /// touches the property in the meantime.
    #[must_use]
    pub fn hold(target: TweenTarget, value: impl Into<AnimValue>, duration: f32) -> Self {
        let value = value.into();
        Self::from_to(target, value, value, duration)
    }

    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    #[must_use]
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Plays back and forth, `repeat` extra passes.
    #[must_use]
    pub fn yoyo(self, repeat: u32) -> Self {
        self.with_loop(LoopMode::PingPong, repeat)
    }

    #[must_use]
    pub fn with_loop(mut self, mode: LoopMode, repeat: u32) -> Self {
        self.loop_mode = mode;
        self.repeat = if mode == LoopMode::Once { 0 } else { repeat };
        self
    }

    /// Delay plus every pass.
    #[must_use]
    pub fn total_duration(&self) -> f32 {
        self.delay + self.active_duration()
    }

    fn active_duration(&self) -> f32 {
        self.duration * (self.repeat + 1) as f32
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// Advances by `dt` seconds and writes the new value to the target.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene, assets: &mut AssetServer) -> TweenStatus {
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.delay {
            return TweenStatus::Waiting;
        }

        let (start, end) = match (self.start, self.resolved_end) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                let Some(start) = self.from.or_else(|| self.target.read(scene, assets)) else {
                    return TweenStatus::Dead;
                };
                let end = match self.end {
                    EndValue::Absolute(v) => v,
                    EndValue::Relative(delta) => start.offset(delta),
                };
                self.start = Some(start);
                self.resolved_end = Some(end);
                (start, end)
            }
        };

        let local = self.elapsed - self.delay;
        let finished = local >= self.active_duration();
        let progress = if finished {
            self.final_progress()
        } else {
            self.progress_at(local)
        };

        let value = AnimValue::lerp(start, end, self.ease.apply(progress));
        if !self.target.write(value, scene, assets) {
            return TweenStatus::Dead;
        }

        if finished { TweenStatus::Finished } else { TweenStatus::Running }
    }

    /// Linear progress inside the current pass, direction applied.
    fn progress_at(&self, local: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let pass = ((local / self.duration).floor() as u32).min(self.repeat);
        let t = ((local - pass as f32 * self.duration) / self.duration).clamp(0.0, 1.0);
        if self.loop_mode == LoopMode::PingPong && pass % 2 == 1 {
            1.0 - t
        } else {
            t
        }
    }

    fn final_progress(&self) -> f32 {
        if self.loop_mode == LoopMode::PingPong && self.repeat % 2 == 1 {
            0.0
        } else {
            1.0
        }
    }
}
