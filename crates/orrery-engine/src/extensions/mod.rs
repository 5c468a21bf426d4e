// extensions/mod.rs
//
// Interpolation helpers used by the camera rig. Independent of Scene and
// Entity; anything that needs eased motion can use them directly.

pub mod easing;
pub mod tween;

pub use easing::{ease_vec3, lerp_vec3, Easing};
pub use tween::Tween;
