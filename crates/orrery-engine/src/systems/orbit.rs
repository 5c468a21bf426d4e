//! Focus-centred elliptical orbits.
//!
//! Pure f64 math, no scene access. The orbited body sits at one focus of
//! the ellipse, so `x` is shifted by `semi_major * e` relative to the
//! ellipse centre. Positions lie in the x/z plane; `y` is left to callers.

use std::f64::consts::TAU;

use glam::Vec3;

use crate::error::EngineError;

/// Largest eccentricity accepted by [`OrbitParams::new`]; keeps the orbit closed.
pub const MAX_ECCENTRICITY: f64 = 0.99;

/// Parameters of one parametric ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Semi-major axis in world units.
    pub semi_major: f64,
    /// Eccentricity in [0, MAX_ECCENTRICITY].
    pub eccentricity: f64,
    /// Radians per millisecond of clock time.
    pub angular_speed: f64,
    /// Angle at t = 0.
    pub phase: f64,
}

impl OrbitParams {
    /// Build parameters, clamping eccentricity into the closed-orbit range.
    pub fn new(semi_major: f64, eccentricity: f64, angular_speed: f64) -> Self {
        let eccentricity = if eccentricity.is_finite() {
            eccentricity.clamp(0.0, MAX_ECCENTRICITY)
        } else {
            0.0
        };
        Self {
            semi_major,
            eccentricity,
            angular_speed,
            phase: 0.0,
        }
    }

    /// Strict constructor: rejects parameters instead of clamping them.
    pub fn try_new(
        semi_major: f64,
        eccentricity: f64,
        angular_speed: f64,
    ) -> Result<Self, EngineError> {
        let valid = semi_major.is_finite()
            && semi_major >= 0.0
            && eccentricity.is_finite()
            && (0.0..1.0).contains(&eccentricity)
            && angular_speed.is_finite();
        if !valid {
            return Err(EngineError::InvalidOrbit { semi_major, eccentricity });
        }
        Ok(Self {
            semi_major,
            eccentricity,
            angular_speed,
            phase: 0.0,
        })
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// b = a * sqrt(1 - e²)
    pub fn semi_minor(&self) -> f64 {
        self.semi_major * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Parametric angle at clock time `t_ms`.
    pub fn angle_at(&self, t_ms: f64) -> f64 {
        t_ms * self.angular_speed + self.phase
    }

    /// Time for one full revolution, in the same unit as `angular_speed`.
    pub fn period(&self) -> f64 {
        if self.angular_speed == 0.0 {
            f64::INFINITY
        } else {
            TAU / self.angular_speed.abs()
        }
    }

    /// Position (x, z) relative to the focus at parametric angle `angle`.
    pub fn position_at_angle(&self, angle: f64) -> (f64, f64) {
        let x = self.semi_major * angle.cos() - self.semi_major * self.eccentricity;
        let z = self.semi_minor() * angle.sin();
        (x, z)
    }

    /// Position (x, z) relative to the focus at clock time `t_ms`.
    pub fn position(&self, t_ms: f64) -> (f64, f64) {
        self.position_at_angle(self.angle_at(t_ms))
    }

    /// Same as [`position`](Self::position), lifted into the x/z plane of a `Vec3`.
    pub fn offset(&self, t_ms: f64) -> Vec3 {
        let (x, z) = self.position(t_ms);
        Vec3::new(x as f32, 0.0, z as f32)
    }

    /// Polar distance from the focus at true anomaly `theta`:
    /// r(θ) = a(1 - e²) / (1 + e cos θ).
    pub fn radius_at(&self, theta: f64) -> f64 {
        let e = self.eccentricity;
        self.semi_major * (1.0 - e * e) / (1.0 + e * theta.cos())
    }

    /// Closest approach to the focus.
    pub fn perihelion(&self) -> f64 {
        self.semi_major * (1.0 - self.eccentricity)
    }

    /// Closed polyline around the focus, `segments + 1` points (first == last).
    pub fn path(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let angle = i as f64 / segments as f64 * TAU;
                let (x, z) = self.position_at_angle(angle);
                Vec3::new(x as f32, 0.0, z as f32)
            })
            .collect()
    }
}

/// Angle of the point (x, z) as seen from the focus, i.e. its true anomaly.
/// Periapsis lies on the +x axis in this parameterisation.
pub fn true_anomaly(x: f64, z: f64) -> f64 {
    z.atan2(x)
}
