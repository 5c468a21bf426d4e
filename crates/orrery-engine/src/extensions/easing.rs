// extensions/easing.rs
//
// Easing curves for camera transitions.
// Pure math, no Entity or Scene access.

use glam::Vec3;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Slow start and end. Used for every camera flight.
    #[default]
    QuadInOut,
}

impl Easing {
    /// Map normalized time `t` (clamped to [0, 1]) onto eased progress in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::QuadInOut] {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
        }
    }

    #[test]
    fn quad_in_out_is_symmetric() {
        assert!((Easing::QuadInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::QuadInOut.apply(0.25) - 0.125).abs() < 1e-6);
        assert!((Easing::QuadInOut.apply(0.75) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_time_is_clamped() {
        assert_eq!(Easing::QuadInOut.apply(-3.0), 0.0);
        assert_eq!(Easing::QuadInOut.apply(7.0), 1.0);
    }

    #[test]
    fn ease_vec3_lands_on_target() {
        let a = Vec3::new(10.0, 0.0, 90.0);
        let b = Vec3::new(105.0, 5.0, 15.0);
        assert_eq!(ease_vec3(a, b, 1.0, Easing::QuadInOut), b);
        let mid = ease_vec3(a, b, 0.5, Easing::QuadInOut);
        assert!((mid - (a + b) * 0.5).length() < 1e-4);
        assert!((ease_vec3(a, b, 0.5, Easing::Linear) - (a + b) * 0.5).length() < 1e-4);
    }
}
