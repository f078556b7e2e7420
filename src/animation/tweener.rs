use crate::animation::timeline::Timeline;
use crate::animation::tween::{Tween, TweenStatus, TweenTarget};
use crate::assets::AssetServer;
use crate::scene::Scene;

/// Owns the running tweens and advances them once per frame.
///
/// Tweens are applied in the order they were added, so when two of them
/// drive the same property in the same frame the newer one wins.
#[derive(Debug, Default)]
pub struct Tweener {
    tweens: Vec<Tween>,
}

impl Tweener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    pub fn add_timeline(&mut self, timeline: Timeline) {
        self.tweens.extend(timeline.into_tweens());
    }

    /// Drops every tween driving `target`, leaving the property where it is.
    pub fn kill_target(&mut self, target: TweenTarget) {
        self.tweens.retain(|t| t.target != target);
    }

    #[must_use]
    pub fn is_animating(&self, target: TweenTarget) -> bool {
        self.tweens.iter().any(|t| t.target == target)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene, assets: &mut AssetServer) {
        self.tweens.retain_mut(|tween| match tween.tick(dt, scene, assets) {
            TweenStatus::Waiting | TweenStatus::Running => true,
            TweenStatus::Finished => false,
            TweenStatus::Dead => {
                log::debug!("Dropping tween for missing target {:?}", tween.target);
                false
            }
        });
    }
}
