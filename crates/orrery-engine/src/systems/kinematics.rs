//! Per-entity motion: orbit position from the clock, then self-rotation.
//!
//! Runs in spawn order, so a moon (spawned after its planet) reads the
//! planet's position from this same frame.

use crate::core::scene::Scene;
use crate::error::EngineError;

/// Advance every entity carrying a [`Motion`](crate::components::motion::Motion).
///
/// A non-finite result leaves that entity untouched and is reported after
/// the rest of the scene has been updated.
pub fn advance_bodies(scene: &mut Scene, time_ms: f64) -> Result<usize, EngineError> {
    let mut moved = 0;
    let mut first_error = None;

    for slot in 0..scene.len() {
        let entity = scene.at(slot);
        let Some(motion) = entity.motion else { continue };
        let id = entity.id;

        let pos = match motion.orbit {
            Some(orbit) => {
                let focus = match orbit.focus {
                    Some(f) => scene.world_position(f)?,
                    None => glam::Vec3::ZERO,
                };
                Some(focus + orbit.offset(time_ms))
            }
            None => None,
        };

        let entity = scene.at_mut(slot);
        if let Some(pos) = pos {
            if !pos.is_finite() {
                first_error.get_or_insert(EngineError::NonFinite { entity: id, what: "orbit position" });
                continue;
            }
            entity.pos = pos;
        }
        let rotation = entity.rotation + motion.spin;
        if rotation.is_finite() {
            entity.rotation = rotation;
        } else {
            first_error.get_or_insert(EngineError::NonFinite { entity: id, what: "rotation" });
            continue;
        }
        moved += 1;
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(moved),
    }
}
