use bytemuck::{Pod, Zeroable};

/// Unique handle for an entity in the scene registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Handle for a procedural particle field owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub u32);

/// A game event communicated from Rust to TypeScript.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

// ── Engine-level event kinds ────────────────────────────────────────
// Games use kinds >= 100 for their own events.

/// Loading progress changed: `a` = resolved, `b` = total.
pub const EVENT_LOADING_PROGRESS: f32 = 1.0;
/// Loading screen hidden: the reveal delay has started.
pub const EVENT_LOADING_HIDDEN: f32 = 2.0;
/// Scene is running: `a` = 1.0 when the transition was forced by the timeout.
pub const EVENT_RUNNING: f32 = 3.0;
/// Rendering context lost.
pub const EVENT_CONTEXT_LOST: f32 = 4.0;
/// Rendering context restored.
pub const EVENT_CONTEXT_RESTORED: f32 = 5.0;
/// No graphics capability; the session cannot start.
pub const EVENT_GRAPHICS_UNAVAILABLE: f32 = 6.0;
/// Camera finished an eased transition: `a` = followed entity id (0 = none).
pub const EVENT_TRANSITION_DONE: f32 = 7.0;
