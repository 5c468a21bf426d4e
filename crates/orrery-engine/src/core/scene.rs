use std::collections::HashMap;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::api::types::EntityId;
use crate::components::entity::{Entity, Overlay};
use crate::error::EngineError;

/// Deepest parent chain walked before a cycle is assumed.
const MAX_DEPTH: usize = 32;

/// Entity registry: flat storage plus id and identifier indices.
/// Owns every entity for the whole session; callers hold `EntityId`s.
pub struct Scene {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
    names: HashMap<String, EntityId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            names: HashMap::new(),
        }
    }

    /// Register an entity. Parents, anchors and orbit foci must already be
    /// registered, so per-frame updates can run in spawn order.
    pub fn spawn(&mut self, entity: Entity) -> Result<EntityId, EngineError> {
        let id = entity.id;
        let referenced = entity
            .parent
            .into_iter()
            .chain(entity.anchor.map(|a| a.target))
            .chain(entity.motion.and_then(|m| m.orbit).and_then(|o| o.focus));
        for dep in referenced {
            if !self.index.contains_key(&dep) {
                return Err(EngineError::UnknownEntity(dep));
            }
        }
        if let Some(name) = &entity.name {
            if self.names.contains_key(name) {
                return Err(EngineError::DuplicateIdentifier(name.clone()));
            }
            self.names.insert(name.clone(), id);
        }
        self.index.insert(id, self.entities.len());
        self.entities.push(entity);
        Ok(id)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.index.get(&id) {
            Some(&i) => Some(&mut self.entities[i]),
            None => None,
        }
    }

    /// Like [`get`](Self::get), but an unknown handle is an error.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, EngineError> {
        self.get(id).ok_or(EngineError::UnknownEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, EngineError> {
        self.get_mut(id).ok_or(EngineError::UnknownEntity(id))
    }

    /// Handle registered under an identifier.
    pub fn lookup(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<EntityId, EngineError> {
        self.lookup(name)
            .ok_or_else(|| EngineError::UnknownIdentifier(name.to_string()))
    }

    /// Iterate over all entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Entity at a storage slot (spawn order).
    pub(crate) fn at(&self, slot: usize) -> &Entity {
        &self.entities[slot]
    }

    pub(crate) fn at_mut(&mut self, slot: usize) -> &mut Entity {
        &mut self.entities[slot]
    }

    /// Local-to-parent transform of one entity.
    pub fn local_matrix(entity: &Entity) -> Mat4 {
        let r = entity.rotation;
        let rotation = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        Mat4::from_scale_rotation_translation(entity.scale, rotation, entity.pos)
    }

    /// Local-to-world transform, composed up the parent chain.
    pub fn world_matrix(&self, id: EntityId) -> Result<Mat4, EngineError> {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(id);
        let mut depth = 0;
        while let Some(cid) = current {
            let entity = self.entity(cid)?;
            matrix = Self::local_matrix(entity) * matrix;
            current = entity.parent;
            depth += 1;
            if depth > MAX_DEPTH {
                return Err(EngineError::UnknownEntity(cid));
            }
        }
        Ok(matrix)
    }

    /// World-space position of an entity's origin.
    pub fn world_position(&self, id: EntityId) -> Result<Vec3, EngineError> {
        let entity = self.entity(id)?;
        match entity.parent {
            None => Ok(entity.pos),
            Some(_) => Ok(self.world_matrix(id)?.transform_point3(Vec3::ZERO)),
        }
    }

    /// Whether the entity and every ancestor are visible.
    pub fn is_visible(&self, id: EntityId) -> bool {
        let mut current = Some(id);
        let mut depth = 0;
        while let Some(cid) = current {
            match self.get(cid) {
                Some(e) if e.visible => current = e.parent,
                _ => return false,
            }
            depth += 1;
            if depth > MAX_DEPTH {
                return false;
            }
        }
        true
    }

    /// Walk from `id` up through parents to the first entity with a
    /// non-empty identifier.
    pub fn named_ancestor(&self, id: EntityId) -> Option<(EntityId, &str)> {
        let mut current = Some(id);
        let mut depth = 0;
        while let Some(cid) = current {
            let entity = self.get(cid)?;
            if let Some(name) = entity.name.as_deref().filter(|n| !n.is_empty()) {
                return Some((cid, name));
            }
            current = entity.parent;
            depth += 1;
            if depth > MAX_DEPTH {
                return None;
            }
        }
        None
    }

    /// Show or hide every entity tagged with `overlay`.
    pub fn set_overlay_visible(&mut self, overlay: Overlay, visible: bool) -> usize {
        let mut changed = 0;
        for entity in self.entities.iter_mut().filter(|e| e.overlay == Some(overlay)) {
            entity.visible = visible;
            changed += 1;
        }
        changed
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::material::{Color, Material};

    #[test]
    fn spawn_and_lookup() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene
            .spawn(Entity::new(id).with_name("earth").with_pos(Vec3::new(90.0, 0.0, 0.0)))
            .unwrap();
        assert_eq!(scene.lookup("earth"), Some(id));
        assert_eq!(scene.get(id).unwrap().pos, Vec3::new(90.0, 0.0, 0.0));
        assert!(scene.require("pluto").is_err());
    }

    #[test]
    fn duplicate_identifier_rejected() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_name("sun")).unwrap();
        let err = scene.spawn(Entity::new(EntityId(2)).with_name("sun")).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateIdentifier(ref n) if n == "sun"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn parent_must_exist_first() {
        let mut scene = Scene::new();
        let err = scene
            .spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)))
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownEntity(EntityId(1))));
    }

    #[test]
    fn named_ancestor_credits_parent_of_shell() {
        let mut scene = Scene::new();
        let earth = EntityId(1);
        let shell = EntityId(2);
        scene
            .spawn(Entity::new(earth).with_name("earth").with_sphere(6.0, Material::solid(Color::WHITE)))
            .unwrap();
        scene
            .spawn(Entity::new(shell).with_parent(earth).with_sphere(6.2, Material::solid(Color::WHITE)))
            .unwrap();
        assert_eq!(scene.named_ancestor(shell), Some((earth, "earth")));
    }

    #[test]
    fn world_position_composes_group_transform() {
        let mut scene = Scene::new();
        let group = EntityId(1);
        let child = EntityId(2);
        scene
            .spawn(
                Entity::new(group)
                    .with_pos(Vec3::new(100.0, 0.0, 0.0))
                    .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0)),
            )
            .unwrap();
        scene
            .spawn(Entity::new(child).with_parent(group).with_pos(Vec3::new(10.0, 0.0, 0.0)))
            .unwrap();
        let p = scene.world_position(child).unwrap();
        // +x rotated a quarter turn about y lands on -z.
        assert!((p - Vec3::new(100.0, 0.0, -10.0)).length() < 1e-4, "got {:?}", p);
    }

    #[test]
    fn hidden_parent_hides_child() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).hidden()).unwrap();
        scene.spawn(Entity::new(EntityId(2)).with_parent(EntityId(1))).unwrap();
        assert!(!scene.is_visible(EntityId(2)));
    }

    #[test]
    fn overlay_toggle_touches_only_tagged() {
        let mut scene = Scene::new();
        scene
            .spawn(Entity::new(EntityId(1)).with_overlay(Overlay::Label, false))
            .unwrap();
        scene
            .spawn(Entity::new(EntityId(2)).with_overlay(Overlay::OrbitPath, true))
            .unwrap();
        assert_eq!(scene.set_overlay_visible(Overlay::Label, true), 1);
        assert!(scene.get(EntityId(1)).unwrap().visible);
        assert!(scene.get(EntityId(2)).unwrap().visible);
    }
}
