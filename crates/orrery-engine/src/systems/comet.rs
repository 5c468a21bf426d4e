//! Comets: bodies on long ellipses whose angle advances a fixed amount per
//! frame, each dragging a short trail.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::entity::Drawable;
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::systems::orbit::OrbitParams;
use crate::systems::rng::Rng;

/// Comets never get closer to circular than this cap allows.
pub const MAX_COMET_ECCENTRICITY: f64 = 0.95;

/// Parameters for scattering a belt of comets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CometBelt {
    pub count: usize,
    pub inner_radius: f64,
    pub width: f64,
    /// Semi-major axes are raised until perihelion reaches this distance.
    pub min_perihelion: f64,
    pub eccentricity: (f64, f64),
    /// Radians per frame.
    pub speed: (f64, f64),
    pub thickness: f32,
}

impl Default for CometBelt {
    fn default() -> Self {
        Self {
            count: 20,
            inner_radius: 120.0,
            width: 80.0,
            min_perihelion: 30.0,
            eccentricity: (0.6, 1.2),
            speed: (0.0003, 0.0005),
            thickness: 1.5,
        }
    }
}

/// Orbit and starting state of one comet, before it is placed in a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometOrbit {
    /// `angular_speed` is per frame, not per millisecond.
    pub params: OrbitParams,
    pub theta: f64,
    pub height: f32,
}

impl CometBelt {
    pub fn generate(&self, seed: u64) -> Vec<CometOrbit> {
        let mut rng = Rng::new(seed);
        (0..self.count)
            .map(|_| {
                let semi_major = self.inner_radius + rng.next_f64() * self.width;
                let (e_lo, e_hi) = self.eccentricity;
                let eccentricity = (e_lo + rng.next_f64() * (e_hi - e_lo)).min(MAX_COMET_ECCENTRICITY);
                let semi_major = semi_major.max(self.min_perihelion / (1.0 - eccentricity));
                let theta = rng.next_f64() * std::f64::consts::TAU;
                let height = rng.centered(self.thickness);
                let (s_lo, s_hi) = self.speed;
                let speed = s_lo + rng.next_f64() * (s_hi - s_lo);
                CometOrbit {
                    params: OrbitParams::new(semi_major, eccentricity, speed),
                    theta,
                    height,
                }
            })
            .collect()
    }
}

/// A comet registered in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comet {
    pub body: EntityId,
    /// Entity holding the [`Drawable::Trail`].
    pub tail: EntityId,
    pub orbit: CometOrbit,
}

impl Comet {
    pub fn position(&self) -> Vec3 {
        let (x, z) = self.orbit.params.position_at_angle(self.orbit.theta);
        Vec3::new(x as f32, self.orbit.height, z as f32)
    }

    /// Advance one frame and return the new position.
    pub fn step(&mut self) -> Vec3 {
        self.orbit.theta += self.orbit.params.angular_speed;
        self.position()
    }
}

/// Move every comet one frame along its ellipse and shift its trail.
pub fn advance_comets(scene: &mut Scene, comets: &mut [Comet]) -> Result<(), EngineError> {
    for comet in comets.iter_mut() {
        let pos = comet.step();
        if !pos.is_finite() {
            return Err(EngineError::NonFinite {
                entity: comet.body,
                what: "comet position",
            });
        }
        scene.entity_mut(comet.body)?.pos = pos;
        if let Drawable::Trail(trail) = &mut scene.entity_mut(comet.tail)?.drawable {
            trail.push(pos);
        }
    }
    Ok(())
}
