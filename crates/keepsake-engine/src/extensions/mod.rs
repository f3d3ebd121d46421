// extensions/mod.rs
//
// Animation helpers layered on the scene. Nothing in the engine ticks them:
// each stage view owns a TweenState and advances it from its own update.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec2, ease, ease_vec2};
pub use tween::{TweenState, Tween, TweenTarget, TweenLoop};
