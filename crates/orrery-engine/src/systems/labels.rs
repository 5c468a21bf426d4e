use glam::{EulerRot, Quat};

use crate::components::entity::{Drawable, Overlay};
use crate::core::scene::Scene;
use crate::error::EngineError;

/// Move every anchored entity to its target's world position plus offset.
/// `labels` selects whether label overlays or everything else is updated,
/// since orbit paths follow their planet before bodies move and labels
/// follow their body after.
pub fn follow_anchors(scene: &mut Scene, labels: bool) -> Result<(), EngineError> {
    for slot in 0..scene.len() {
        let entity = scene.at(slot);
        let Some(anchor) = entity.anchor else { continue };
        if (entity.overlay == Some(Overlay::Label)) != labels {
            continue;
        }
        let target = scene.world_position(anchor.target)?;
        scene.at_mut(slot).pos = target + anchor.offset;
    }
    Ok(())
}

/// Turn every label sprite to face the camera.
pub fn face_camera(scene: &mut Scene, orientation: Quat) {
    let (x, y, z) = orientation.to_euler(EulerRot::XYZ);
    for entity in scene.iter_mut() {
        if matches!(entity.drawable, Drawable::Label { .. }) {
            entity.rotation = glam::Vec3::new(x, y, z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::entity::Entity;
    use glam::Vec3;

    #[test]
    fn label_tracks_body_at_height() {
        let mut scene = Scene::new();
        let earth = EntityId(1);
        let label = EntityId(2);
        let path = EntityId(3);
        scene.spawn(Entity::new(earth).with_name("earth").with_pos(Vec3::new(90.0, 0.0, 0.0))).unwrap();
        scene
            .spawn(
                Entity::new(label)
                    .with_drawable(Drawable::Label { text: "Earth".into(), size: 0.5 })
                    .with_overlay(Overlay::Label, false)
                    .with_anchor(earth, Vec3::new(0.0, 8.0, 0.0)),
            )
            .unwrap();
        scene
            .spawn(Entity::new(path).with_overlay(Overlay::OrbitPath, true).with_anchor(earth, Vec3::ZERO))
            .unwrap();

        scene.get_mut(earth).unwrap().pos = Vec3::new(80.0, 0.0, 30.0);
        follow_anchors(&mut scene, false).unwrap();
        assert_eq!(scene.get(path).unwrap().pos, Vec3::new(80.0, 0.0, 30.0));
        assert_eq!(scene.get(label).unwrap().pos, Vec3::ZERO);

        follow_anchors(&mut scene, true).unwrap();
        assert_eq!(scene.get(label).unwrap().pos, Vec3::new(80.0, 8.0, 30.0));
    }

    #[test]
    fn labels_copy_camera_orientation() {
        let mut scene = Scene::new();
        scene
            .spawn(Entity::new(EntityId(1)).with_drawable(Drawable::Label { text: "Sun".into(), size: 2.0 }))
            .unwrap();
        scene.spawn(Entity::new(EntityId(2))).unwrap();
        let q = Quat::from_rotation_y(0.7);
        face_camera(&mut scene, q);
        let r = scene.get(EntityId(1)).unwrap().rotation;
        assert!((r.y - 0.7).abs() < 1e-5 && r.x.abs() < 1e-5, "rotation {:?}", r);
        assert_eq!(scene.get(EntityId(2)).unwrap().rotation, Vec3::ZERO);
    }
}
