use glam::Vec3;

use crate::api::types::{EntityId, FieldId};
use crate::components::material::{Color, Material};
use crate::components::motion::Motion;
use crate::systems::trail::Trail;

/// What an entity draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    /// Transform-only node (galaxy groups, anchors).
    Group,
    Sphere { radius: f32, material: Material },
    /// Flat annulus in the local x/z plane (planetary rings).
    Ring { inner: f32, outer: f32, material: Material },
    /// A procedural particle field owned by the engine's field store.
    Points { field: FieldId },
    /// Static polyline in local space (orbit paths).
    Line { points: Vec<Vec3>, color: Color, opacity: f32 },
    /// World-space trail whose buffer the frame loop shifts.
    Trail(Trail),
    /// Camera-facing text sprite of `size * 4` by `size * 2` world units.
    Label { text: String, size: f32 },
}

/// Overlay category, toggled as a group from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    OrbitPath,
    Label,
}

/// Keeps an entity at `target`'s world position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub target: EntityId,
    pub offset: Vec3,
}

/// Fat entity: one struct with optional parts.
/// Suited to a few thousand scene nodes, not millions.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    /// Identifier used for selection and info lookup. Unnamed children
    /// (atmosphere shells, rings) credit their nearest named ancestor.
    pub name: Option<String>,
    /// Scene-graph parent; local transform is relative to it.
    pub parent: Option<EntityId>,
    pub visible: bool,
    pub pos: Vec3,
    /// Euler angles (XYZ order), radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub drawable: Drawable,
    /// Bounding-sphere radius for picking. `None` = not pickable.
    pub pick_radius: Option<f32>,
    pub overlay: Option<Overlay>,
    pub motion: Option<Motion>,
    pub anchor: Option<Anchor>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: None,
            parent: None,
            visible: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            drawable: Drawable::Group,
            pick_radius: None,
            overlay: None,
            motion: None,
            anchor: None,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_drawable(mut self, drawable: Drawable) -> Self {
        self.drawable = drawable;
        self
    }

    /// Sphere mesh, pickable at its own radius.
    pub fn with_sphere(mut self, radius: f32, material: Material) -> Self {
        self.drawable = Drawable::Sphere { radius, material };
        self.pick_radius = Some(radius);
        self
    }

    pub fn with_pick_radius(mut self, radius: f32) -> Self {
        self.pick_radius = Some(radius);
        self
    }

    pub fn with_overlay(mut self, overlay: Overlay, visible: bool) -> Self {
        self.overlay = Some(overlay);
        self.visible = visible;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn with_anchor(mut self, target: EntityId, offset: Vec3) -> Self {
        self.anchor = Some(Anchor { target, offset });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Material of a mesh drawable, if it has one.
    pub fn material_mut(&mut self) -> Option<&mut Material> {
        match &mut self.drawable {
            Drawable::Sphere { material, .. } | Drawable::Ring { material, .. } => Some(material),
            _ => None,
        }
    }

    pub fn material(&self) -> Option<&Material> {
        match &self.drawable {
            Drawable::Sphere { material, .. } | Drawable::Ring { material, .. } => Some(material),
            _ => None,
        }
    }
}
