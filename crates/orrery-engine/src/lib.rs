pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{CameraConfig, EngineConfig, EngineContext, FrameStats, Game, Overlays};
pub use api::types::{EntityId, FieldId, GameEvent};
pub use assets::loader::{AssetLoader, QueuedLoader, TextureTracker};
pub use assets::manifest::TextureManifest;
pub use components::entity::{Anchor, Drawable, Entity, Overlay};
pub use components::material::{Color, Material, MaterialState};
pub use components::motion::{Motion, OrbitMotion};
pub use core::clock::{AnimationClock, LoadPhase, LoadTransition};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use error::EngineError;
pub use input::picking::Pick;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{PerspectiveCamera, Ray};
pub use renderer::instance::{DrawInstance, FrameBuffer};
pub use renderer::traits::{FrameData, LoadingFrame, RecordingSubstrate, RenderSubstrate};
pub use systems::camera::CameraController;
pub use systems::comet::{Comet, CometBelt};
pub use systems::field::{generate_field, ColorRule, LayerSpec, ParticleField, Placement, SizeRule, SpiralArms, StarSample};
pub use systems::lighting::{LightState, PointLight};
pub use systems::meteor::Meteor;
pub use systems::orbit::OrbitParams;
pub use systems::selection::{Selection, SelectionChange};
pub use systems::trail::{Trail, TrailFade};

// Extensions
pub use extensions::{ease_vec3, lerp_vec3, Easing, Tween};
