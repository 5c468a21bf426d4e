//! Screen-point to named-entity resolution.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::renderer::camera::{PerspectiveCamera, Ray};

/// One ray/bounding-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub entity: EntityId,
    pub distance: f32,
}

/// A resolved selection: the named entity credited for a hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub entity: EntityId,
    pub identifier: String,
    /// Entity the ray actually struck (may be an unnamed child shell).
    pub hit: EntityId,
    pub distance: f32,
}

/// Intersect a ray with every visible pickable entity, nearest first.
/// Bounding spheres sit at each entity's world origin, scaled by the
/// largest axis of its world transform.
pub fn intersect(scene: &Scene, ray: &Ray) -> Vec<Hit> {
    let mut hits: Vec<Hit> = scene
        .iter()
        .filter_map(|e| e.pick_radius.map(|r| (e.id, r)))
        .filter(|&(id, _)| scene.is_visible(id))
        .filter_map(|(id, radius)| {
            let world = scene.world_matrix(id).ok()?;
            let center = world.transform_point3(glam::Vec3::ZERO);
            let (scale, _, _) = world.to_scale_rotation_translation();
            let radius = radius * scale.abs().max_element();
            ray.intersect_sphere(center, radius)
                .map(|distance| Hit { entity: id, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Cast through `ndc`, take the nearest hit and credit its named ancestor.
pub fn resolve(scene: &Scene, camera: &PerspectiveCamera, ndc: Vec2) -> Option<Pick> {
    let ray = camera.ray_from_ndc(ndc);
    let nearest = intersect(scene, &ray).into_iter().next()?;
    let (entity, identifier) = scene.named_ancestor(nearest.entity)?;
    Some(Pick {
        entity,
        identifier: identifier.to_string(),
        hit: nearest.entity,
        distance: nearest.distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::material::{Color, Material};
    use glam::Vec3;

    fn camera_looking_down_z() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(95.0, 1.0, 0.5, 10_000.0);
        cam.position = Vec3::new(0.0, 0.0, 50.0);
        cam.target = Vec3::ZERO;
        cam
    }

    fn sphere() -> Material {
        Material::solid(Color::WHITE)
    }

    #[test]
    fn nearest_named_body_wins() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_name("sun").with_sphere(5.0, sphere())).unwrap();
        scene
            .spawn(Entity::new(EntityId(2)).with_name("earth").with_pos(Vec3::new(0.0, 0.0, 20.0)).with_sphere(2.0, sphere()))
            .unwrap();
        let pick = resolve(&scene, &camera_looking_down_z(), Vec2::ZERO).unwrap();
        assert_eq!(pick.identifier, "earth");
        assert!((pick.distance - 28.0).abs() < 1e-3);
    }

    #[test]
    fn shell_hit_credits_parent() {
        let mut scene = Scene::new();
        let earth = EntityId(1);
        scene.spawn(Entity::new(earth).with_name("earth").with_sphere(2.0, sphere())).unwrap();
        scene
            .spawn(Entity::new(EntityId(2)).with_parent(earth).with_sphere(2.2, sphere().with_opacity(0.3)))
            .unwrap();
        let pick = resolve(&scene, &camera_looking_down_z(), Vec2::ZERO).unwrap();
        assert_eq!(pick.entity, earth);
        assert_eq!(pick.hit, EntityId(2));
    }

    #[test]
    fn hidden_and_unpickable_are_skipped() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_name("ghost").with_sphere(5.0, sphere()).hidden()).unwrap();
        scene.spawn(Entity::new(EntityId(2)).with_name("group")).unwrap();
        assert!(resolve(&scene, &camera_looking_down_z(), Vec2::ZERO).is_none());
    }

    #[test]
    fn miss_is_none() {
        let mut scene = Scene::new();
        scene
            .spawn(Entity::new(EntityId(1)).with_name("mars").with_pos(Vec3::new(40.0, 0.0, 0.0)).with_sphere(1.0, sphere()))
            .unwrap();
        assert!(resolve(&scene, &camera_looking_down_z(), Vec2::ZERO).is_none());
    }

    #[test]
    fn group_scale_grows_pick_sphere() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_scale(Vec3::splat(4.0))).unwrap();
        scene
            .spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)).with_name("moon").with_pick_radius(1.0))
            .unwrap();
        let ray = Ray::new(Vec3::new(3.0, 0.0, 50.0), Vec3::NEG_Z);
        let hits = intersect(&scene, &ray);
        assert_eq!(hits.len(), 1);
    }
}
