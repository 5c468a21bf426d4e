/// Point lights and ambient term for the 3D scene.
///
/// Lights are persistent: they stay until explicitly removed. A light may
/// follow an entity, in which case the frame loop copies the entity's world
/// position into it after bodies have moved.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::types::EntityId;
use crate::components::material::Color;
use crate::core::scene::Scene;
use crate::error::EngineError;

/// A point light with position, color, intensity and range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    /// Falloff distance in world units. 0 = infinite.
    pub range: f32,
    /// Entity whose world position this light tracks.
    pub follow: Option<EntityId>,
}

/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightRecord {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

impl LightRecord {
    pub const FLOATS: usize = 8;
}

impl PointLight {
    /// Create a new point light at the given position.
    pub fn new(position: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            range,
            follow: None,
        }
    }

    /// Track an entity's world position every frame.
    pub fn following(mut self, entity: EntityId) -> Self {
        self.follow = Some(entity);
        self
    }

    pub fn record(&self) -> LightRecord {
        LightRecord {
            position: self.position.to_array(),
            color: self.color.rgb(),
            intensity: self.intensity,
            range: self.range,
        }
    }
}

/// Manages active lights and ambient color for the scene.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
    ambient_intensity: f32,
    records: Vec<LightRecord>,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: Color::WHITE,
            ambient_intensity: 1.0,
            records: Vec::with_capacity(max_lights),
        }
    }

    /// Add a point light to the scene. Returns its index.
    pub fn add(&mut self, light: PointLight) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&PointLight> {
        self.lights.get(index)
    }

    /// Remove all lights.
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// Get an iterator over active lights.
    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient light color and strength.
    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    /// Ambient color pre-multiplied by its intensity.
    pub fn ambient(&self) -> [f32; 3] {
        let [r, g, b] = self.ambient.rgb();
        let k = self.ambient_intensity;
        [r * k, g * k, b * k]
    }

    /// Copy followed entities' world positions into their lights.
    pub fn follow(&mut self, scene: &Scene) -> Result<(), EngineError> {
        for light in self.lights.iter_mut() {
            if let Some(id) = light.follow {
                light.position = scene.world_position(id)?;
            }
        }
        Ok(())
    }

    /// Refresh and return the packed light buffer.
    pub fn records(&mut self) -> &[LightRecord] {
        self.records.clear();
        self.records.extend(self.lights.iter().map(PointLight::record));
        &self.records
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn light_state_add_and_count() {
        let mut state = LightState::new();
        assert_eq!(state.count(), 0);
        state.add(PointLight::new(Vec3::ZERO, Color::from_hex(0xFFD700), 2.0, 200.0));
        state.add(PointLight::new(Vec3::X, Color::WHITE, 1.0, 0.0));
        assert_eq!(state.count(), 2);
        state.clear();
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn ambient_is_premultiplied() {
        let mut state = LightState::new();
        state.set_ambient(Color::WHITE, 0.1);
        let a = state.ambient();
        assert!((a[0] - 0.1).abs() < 1e-6 && (a[2] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn followed_light_tracks_entity() {
        let mut scene = Scene::new();
        let meteor = EntityId(3);
        scene.spawn(Entity::new(meteor).with_pos(Vec3::new(-250.0, 10.0, 50.0))).unwrap();

        let mut state = LightState::new();
        let idx = state.add(PointLight::new(Vec3::ZERO, Color::WHITE, 2.0, 25.0).following(meteor));
        scene.get_mut(meteor).unwrap().pos = Vec3::new(0.0, 0.0, 50.0);
        state.follow(&scene).unwrap();
        assert_eq!(state.get(idx).unwrap().position, Vec3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn record_is_8_floats() {
        assert_eq!(std::mem::size_of::<LightRecord>(), LightRecord::FLOATS * 4);
        let mut state = LightState::new();
        state.add(PointLight::new(Vec3::new(1.0, 2.0, 3.0), Color::WHITE, 2.0, 25.0));
        let recs = state.records();
        assert_eq!(recs[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(recs[0].range, 25.0);
    }
}
