//! A meteor crossing the scene on a straight line, restarting at the far end.

use glam::Vec3;

use crate::api::types::EntityId;
use crate::components::entity::Drawable;
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::extensions::easing::lerp_vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meteor {
    pub body: EntityId,
    /// Entity holding the [`Drawable::Trail`].
    pub trail: EntityId,
    pub start: Vec3,
    pub end: Vec3,
    /// Fraction of the path covered, in [0, 1].
    pub progress: f32,
    /// Progress per frame.
    pub speed: f32,
    /// Euler increment per frame.
    pub spin: Vec3,
}

impl Meteor {
    pub fn new(body: EntityId, trail: EntityId, start: Vec3, end: Vec3) -> Self {
        Self {
            body,
            trail,
            start,
            end,
            progress: 0.0,
            speed: 0.0008,
            spin: Vec3::splat(0.015),
        }
    }

    pub fn position(&self) -> Vec3 {
        lerp_vec3(self.start, self.end, self.progress)
    }

    /// Advance one frame, wrapping to the start after passing the end.
    pub fn step(&mut self) -> Vec3 {
        self.progress += self.speed;
        if self.progress > 1.0 {
            self.progress = 0.0;
        }
        self.position()
    }

    /// Move the body, tumble it and shift its trail.
    pub fn advance(&mut self, scene: &mut Scene) -> Result<(), EngineError> {
        let pos = self.step();
        let body = scene.entity_mut(self.body)?;
        body.pos = pos;
        body.rotation += self.spin;
        if let Drawable::Trail(trail) = &mut scene.entity_mut(self.trail)?.drawable {
            trail.push(pos);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Vec3 = Vec3::new(-250.0, 10.0, 50.0);
    const END: Vec3 = Vec3::new(250.0, -10.0, 50.0);

    #[test]
    fn crosses_then_wraps() {
        let mut m = Meteor::new(EntityId(1), EntityId(2), START, END);
        // 1 / 0.0008 = 1250 frames to cross.
        for _ in 0..625 {
            m.step();
        }
        let mid = (START + END) * 0.5;
        assert!((m.position() - mid).length() < 1.0, "midpoint {:?}", m.position());
        for _ in 0..626 {
            m.step();
        }
        assert!(m.progress < 0.01, "progress after wrap {}", m.progress);
        assert!((m.position() - START).length() < 5.0);
    }
}
