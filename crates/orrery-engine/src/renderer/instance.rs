use bytemuck::{Pod, Zeroable};

use crate::components::entity::Drawable;
use crate::components::material::MaterialState;
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::systems::trail::TrailPoint;
use crate::systems::uniforms::UniformRegistry;

/// Drawable kinds as written into [`DrawInstance::kind`].
pub const KIND_SPHERE: f32 = 1.0;
pub const KIND_RING: f32 = 2.0;
pub const KIND_POINTS: f32 = 3.0;
pub const KIND_LINE: f32 = 4.0;
pub const KIND_TRAIL: f32 = 5.0;
pub const KIND_LABEL: f32 = 6.0;

/// Per-instance draw record handed to the substrate.
/// Must match the TypeScript protocol: 28 floats = 112 bytes stride.
///
/// `params` depends on `kind`:
/// sphere `[radius, 0]`, ring `[inner, outer]`, points `[field id, 0]`,
/// line/trail `[first vertex, vertex count]`, label `[size, 0]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Column-major local-to-world matrix.
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub opacity: f32,
    pub entity: f32,
    pub kind: f32,
    pub params: [f32; 2],
    /// 0 = placeholder, 1 = textured, 2 = fallback.
    pub material_state: f32,
    /// 1 when the entity reads the shared time/camera uniforms.
    pub animated: f32,
    pub emissive: f32,
    pub _pad: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Packed frame: one instance per visible drawable plus the vertices of
/// every line and trail.
pub struct FrameBuffer {
    pub instances: Vec<DrawInstance>,
    pub vertices: Vec<TrailPoint>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity * 4),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.vertices.clear();
    }

    /// Rebuild from the scene. Hidden subtrees and transform-only groups
    /// produce nothing.
    pub fn pack(&mut self, scene: &Scene, uniforms: &UniformRegistry) -> Result<(), EngineError> {
        self.clear();
        for entity in scene.iter() {
            if matches!(entity.drawable, Drawable::Group) || !scene.is_visible(entity.id) {
                continue;
            }
            let model = scene.world_matrix(entity.id)?;
            let mut inst = DrawInstance {
                model: model.to_cols_array_2d(),
                opacity: 1.0,
                entity: entity.id.0 as f32,
                animated: if uniforms.subscriptions_of(entity.id).next().is_some() { 1.0 } else { 0.0 },
                ..DrawInstance::default()
            };
            if let Some(material) = entity.material() {
                inst.color = material.color.rgb();
                inst.opacity = material.opacity;
                inst.material_state = match material.state {
                    MaterialState::Placeholder => 0.0,
                    MaterialState::Textured => 1.0,
                    MaterialState::Fallback => 2.0,
                };
                inst.emissive = material.emissive.map_or(0.0, |(_, k)| k);
            }
            match &entity.drawable {
                Drawable::Group => continue,
                Drawable::Sphere { radius, .. } => {
                    inst.kind = KIND_SPHERE;
                    inst.params = [*radius, 0.0];
                }
                Drawable::Ring { inner, outer, .. } => {
                    inst.kind = KIND_RING;
                    inst.params = [*inner, *outer];
                }
                Drawable::Points { field } => {
                    inst.kind = KIND_POINTS;
                    inst.params = [field.0 as f32, 0.0];
                }
                Drawable::Line { points, color, opacity } => {
                    inst.kind = KIND_LINE;
                    inst.color = color.rgb();
                    inst.opacity = *opacity;
                    inst.params = [self.vertices.len() as f32, points.len() as f32];
                    self.vertices.extend(points.iter().map(|p| TrailPoint {
                        position: p.to_array(),
                        opacity: *opacity,
                    }));
                }
                Drawable::Trail(trail) => {
                    inst.kind = KIND_TRAIL;
                    inst.color = trail.color.rgb();
                    inst.params = [self.vertices.len() as f32, trail.len() as f32];
                    self.vertices.extend_from_slice(trail.points());
                }
                Drawable::Label { size, .. } => {
                    inst.kind = KIND_LABEL;
                    inst.params = [*size, 0.0];
                }
            }
            self.instances.push(inst);
        }
        Ok(())
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for buffer reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EntityId, FieldId};
    use crate::components::entity::Entity;
    use crate::components::material::{Color, Material};
    use glam::Vec3;

    #[test]
    fn draw_instance_is_28_floats() {
        assert_eq!(std::mem::size_of::<DrawInstance>(), DrawInstance::STRIDE_BYTES);
    }

    #[test]
    fn pack_skips_groups_and_hidden() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_pos(Vec3::X)).unwrap();
        scene
            .spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)).with_sphere(2.0, Material::solid(Color::WHITE)))
            .unwrap();
        scene
            .spawn(Entity::new(EntityId(3)).with_drawable(Drawable::Points { field: FieldId(0) }).hidden())
            .unwrap();
        let mut buf = FrameBuffer::new();
        buf.pack(&scene, &UniformRegistry::new()).unwrap();
        assert_eq!(buf.instance_count(), 1);
        let inst = buf.instances[0];
        assert_eq!(inst.kind, KIND_SPHERE);
        assert_eq!(inst.entity, 2.0);
        // Translation inherited from the group.
        assert_eq!(inst.model[3][0], 1.0);
    }

    #[test]
    fn lines_append_vertices() {
        let mut scene = Scene::new();
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Z];
        scene
            .spawn(Entity::new(EntityId(1)).with_drawable(Drawable::Line { points, color: Color::WHITE, opacity: 0.6 }))
            .unwrap();
        let mut buf = FrameBuffer::new();
        buf.pack(&scene, &UniformRegistry::new()).unwrap();
        assert_eq!(buf.vertex_count(), 3);
        assert_eq!(buf.instances[0].params, [0.0, 3.0]);
        assert!((buf.vertices[1].opacity - 0.6).abs() < 1e-6);
    }
}
