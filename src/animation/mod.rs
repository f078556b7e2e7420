//! Property tweening.
//!
//! A [`Tween`] interpolates one scalar or color property of a node, light or
//! material over time. [`Timeline`] sequences tweens and the [`Tweener`]
//! advances everything on the frame clock.

pub mod easing;
pub mod timeline;
pub mod tween;
pub mod tweener;
pub mod values;

pub use easing::Ease;
pub use timeline::Timeline;
pub use tween::{Axis, LoopMode, Tween, TweenStatus, TweenTarget};
pub use tweener::Tweener;
pub use values::{AnimValue, Interpolatable};
