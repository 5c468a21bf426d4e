//! Animated shader uniforms.
//!
//! The clock updates each uniform once per frame; materials and particle
//! fields subscribe by entity and the substrate reads the shared values,
//! so adding a layer never means adding another per-frame assignment.

use std::collections::BTreeSet;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::types::EntityId;

/// Index of a uniform in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniformId(pub u32);

/// Elapsed clock time in seconds (`time_ms * 0.001`).
pub const TIME: UniformId = UniformId(0);
/// Camera world position.
pub const CAMERA_POSITION: UniformId = UniformId(1);

/// How a uniform's value is derived each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformSource {
    ClockSeconds,
    CameraPosition,
    /// Adds a constant every logical frame, independent of the clock.
    FrameStep(f32),
}

/// Wire format (4 floats). Scalars use `x`, vectors `xyz`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct UniformValue(pub [f32; 4]);

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    source: UniformSource,
}

#[derive(Debug, Clone)]
pub struct UniformRegistry {
    slots: Vec<Slot>,
    values: Vec<UniformValue>,
    subscriptions: BTreeSet<(EntityId, UniformId)>,
}

impl UniformRegistry {
    /// Registry with the shared time and camera-position uniforms.
    pub fn new() -> Self {
        let mut registry = Self {
            slots: Vec::new(),
            values: Vec::new(),
            subscriptions: BTreeSet::new(),
        };
        registry.register("time", UniformSource::ClockSeconds);
        registry.register("camera_position", UniformSource::CameraPosition);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, source: UniformSource) -> UniformId {
        let id = UniformId(self.slots.len() as u32);
        self.slots.push(Slot {
            name: name.into(),
            source,
        });
        self.values.push(UniformValue::default());
        id
    }

    pub fn find(&self, name: &str) -> Option<UniformId> {
        self.slots
            .iter()
            .position(|s| s.name == name)
            .map(|i| UniformId(i as u32))
    }

    pub fn subscribe(&mut self, entity: EntityId, uniform: UniformId) {
        self.subscriptions.insert((entity, uniform));
    }

    /// Subscribe to both shared uniforms.
    pub fn subscribe_shared(&mut self, entity: EntityId) {
        self.subscribe(entity, TIME);
        self.subscribe(entity, CAMERA_POSITION);
    }

    pub fn is_subscribed(&self, entity: EntityId, uniform: UniformId) -> bool {
        self.subscriptions.contains(&(entity, uniform))
    }

    /// Uniforms an entity reads.
    pub fn subscriptions_of(&self, entity: EntityId) -> impl Iterator<Item = UniformId> + '_ {
        self.subscriptions
            .range((entity, UniformId(0))..=(entity, UniformId(u32::MAX)))
            .map(|&(_, u)| u)
    }

    /// Recompute every uniform for one logical frame.
    pub fn update(&mut self, time_ms: f64, camera_position: Vec3) {
        for (slot, value) in self.slots.iter().zip(self.values.iter_mut()) {
            match slot.source {
                UniformSource::ClockSeconds => value.0[0] = (time_ms * 0.001) as f32,
                UniformSource::CameraPosition => value.0 = camera_position.extend(0.0).to_array(),
                UniformSource::FrameStep(step) => value.0[0] += step,
            }
        }
    }

    pub fn value(&self, uniform: UniformId) -> Option<UniformValue> {
        self.values.get(uniform.0 as usize).copied()
    }

    pub fn scalar(&self, uniform: UniformId) -> f32 {
        self.value(uniform).map_or(0.0, |v| v.0[0])
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.values)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for UniformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
