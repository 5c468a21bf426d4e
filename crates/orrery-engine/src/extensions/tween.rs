// extensions/tween.rs
//
// Time-based Vec3 tweens. The camera rig drives two of these (position and
// look-target) per flight; the end point may be moved while running so a
// flight can land on a body that keeps orbiting.
//
// Usage:
//   let mut t = Tween::new(from, to, 1500.0, Easing::QuadInOut);
//   let value = t.advance(frame_ms);

use glam::Vec3;

use super::easing::{ease_vec3, Easing};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Vec3,
    pub to: Vec3,
    /// Duration in milliseconds.
    pub duration: f32,
    /// Elapsed milliseconds, never beyond `duration`.
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress in [0, 1]. Zero-length tweens are complete at once.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> Vec3 {
        ease_vec3(self.from, self.to, self.progress(), self.easing)
    }

    /// Advance by `dt` milliseconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    /// Move the end point without restarting the curve.
    pub fn retarget(&mut self, to: Vec3) {
        self.to = to;
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_reaches_end_and_stops() {
        let mut t = Tween::new(Vec3::ZERO, Vec3::splat(10.0), 100.0, Easing::Linear);
        let mid = t.advance(50.0);
        assert!((mid.x - 5.0).abs() < 1e-5);
        assert!(!t.is_finished());
        let end = t.advance(80.0);
        assert_eq!(end, Vec3::splat(10.0));
        assert!(t.is_finished());
        assert_eq!(t.elapsed, 100.0);
    }

    #[test]
    fn retarget_keeps_progress() {
        let mut t = Tween::new(Vec3::ZERO, Vec3::X * 10.0, 100.0, Easing::Linear);
        t.advance(50.0);
        t.retarget(Vec3::X * 20.0);
        assert!((t.value().x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn zero_duration_is_immediate() {
        let t = Tween::new(Vec3::ZERO, Vec3::ONE, 0.0, Easing::QuadInOut);
        assert!(t.is_finished());
        assert_eq!(t.value(), Vec3::ONE);
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut t = Tween::new(Vec3::ZERO, Vec3::ONE, 10.0, Easing::Linear);
        t.advance(-5.0);
        assert_eq!(t.elapsed, 0.0);
    }
}
