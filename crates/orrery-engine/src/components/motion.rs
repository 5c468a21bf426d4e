use glam::Vec3;

use crate::api::types::EntityId;
use crate::systems::orbit::OrbitParams;

/// Per-entity update record, applied uniformly by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub orbit: Option<OrbitMotion>,
    /// Euler increment (radians) added to the rotation every frame.
    pub spin: Vec3,
}

impl Motion {
    pub fn orbiting(orbit: OrbitMotion) -> Self {
        Self {
            orbit: Some(orbit),
            spin: Vec3::ZERO,
        }
    }

    pub fn spinning(spin: Vec3) -> Self {
        Self { orbit: None, spin }
    }

    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }
}

/// Orbit of one body around a focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitMotion {
    pub params: OrbitParams,
    /// Body sitting at the focus. `None` means the world origin.
    /// Moons use the focus body's *current* position, not its orbit focus.
    pub focus: Option<EntityId>,
    /// Height above the focus plane.
    pub height: f32,
    /// Vertical bob amplitude: `y += bob * sin(angle)`.
    pub bob: f32,
}

impl OrbitMotion {
    pub fn around_origin(params: OrbitParams) -> Self {
        Self {
            params,
            focus: None,
            height: 0.0,
            bob: 0.0,
        }
    }

    pub fn around(focus: EntityId, params: OrbitParams) -> Self {
        Self {
            params,
            focus: Some(focus),
            height: 0.0,
            bob: 0.0,
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_bob(mut self, bob: f32) -> Self {
        self.bob = bob;
        self
    }

    /// Position relative to the focus at clock time `t_ms`.
    pub fn offset(&self, t_ms: f64) -> Vec3 {
        let angle = self.params.angle_at(t_ms);
        let (x, z) = self.params.position_at_angle(angle);
        let y = self.height + self.bob * angle.sin() as f32;
        Vec3::new(x as f32, y, z as f32)
    }
}
