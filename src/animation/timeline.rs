use crate::animation::tween::Tween;

/// Sequences tweens on a shared clock.
///
/// Positions are offsets in seconds from the moment the timeline is handed
/// to the [`Tweener`](crate::animation::Tweener).
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<(f32, Tween)>,
    end: f32,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `tween` after everything added so far.
    #[must_use]
    pub fn then(self, tween: Tween) -> Self {
        let at = self.end;
        self.with(tween, at)
    }

    /// Places `tween` at an absolute offset.
    #[must_use]
    pub fn with(mut self, tween: Tween, at: f32) -> Self {
        let at = at.max(0.0);
        self.end = self.end.max(at + tween.total_duration());
        self.entries.push((at, tween));
        self
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens into standalone tweens with the offsets folded into their
    /// delays, in insertion order.
    #[must_use]
    pub fn into_tweens(self) -> Vec<Tween> {
        self.entries
            .into_iter()
            .map(|(at, tween)| {
                let delay = tween.delay + at;
                tween.with_delay(delay)
            })
            .collect()
    }
}
