use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::types::{EntityId, FieldId, GameEvent};
use crate::assets::loader::TextureTracker;
use crate::components::entity::{Drawable, Entity, Overlay};
use crate::core::clock::AnimationClock;
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::input::gesture::TapDetector;
use crate::input::picking::{self, Pick};
use crate::input::queue::InputQueue;
use crate::renderer::camera::pixel_to_ndc;
use crate::systems::camera::CameraController;
use crate::systems::comet::Comet;
use crate::systems::field::ParticleField;
use crate::systems::lighting::LightState;
use crate::systems::loading::LoadingScreen;
use crate::systems::meteor::Meteor;
use crate::systems::selection::Selection;
use crate::systems::uniforms::UniformRegistry;

/// Camera projection, start pose and manipulation limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub start_position: [f32; 3],
    pub start_target: [f32; 3],
    /// Fraction of queued rotation/zoom/pan applied (and bled off) per frame.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 95.0,
            near: 0.5,
            far: 10_000.0,
            start_position: [10.0, 0.0, 90.0],
            start_target: [0.0, 0.0, 0.0],
            damping: 0.05,
            min_distance: 2.0,
            max_distance: 10_000.0,
        }
    }
}

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum logical frames per host callback.
    pub max_steps: u32,
    /// Longest the loading screen may stay up, in milliseconds.
    pub loading_timeout_ms: f64,
    /// Delay between hiding the loading screen and starting the scene.
    pub reveal_delay_ms: f64,
    /// Pointer travel below which a press counts as a tap, in pixels.
    pub tap_max_distance: f32,
    pub tap_max_duration_ms: f64,
    pub camera: CameraConfig,
    pub focus_duration_ms: f32,
    pub overview_duration_ms: f32,
    pub show_orbits: bool,
    pub show_labels: bool,
    /// Initial viewport in pixels, until the host reports a resize.
    pub viewport: [f32; 2],
    /// Seed for every procedural field.
    pub seed: u64,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps: 10,
            loading_timeout_ms: 10_000.0,
            reveal_delay_ms: 1_000.0,
            tap_max_distance: 50.0,
            tap_max_duration_ms: 500.0,
            camera: CameraConfig::default(),
            focus_duration_ms: 1_500.0,
            overview_duration_ms: 2_000.0,
            show_orbits: true,
            show_labels: false,
            viewport: [1280.0, 720.0],
            seed: 42,
            max_events: 32,
        }
    }
}

impl EngineConfig {
    /// Parse overrides from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The core contract every scene must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
    }

    /// Compose the scene: spawn bodies, fields, labels and lights.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError>;

    /// Once per logical frame, before the engine's update steps.
    /// Handle UI commands and picked entities here.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) -> Result<(), EngineError>;
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames_submitted: u64,
    pub frames_failed: u64,
    /// Frames computed while submission was suspended.
    pub frames_suspended: u64,
}

/// Current visibility of the overlay groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlays {
    pub orbits: bool,
    pub labels: bool,
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub clock: AnimationClock,
    pub camera: CameraController,
    pub lights: LightState,
    pub uniforms: UniformRegistry,
    pub loading: LoadingScreen,
    pub textures: TextureTracker,
    pub selection: Selection,
    pub comets: Vec<Comet>,
    pub meteor: Option<Meteor>,
    pub events: Vec<GameEvent>,
    pub stats: FrameStats,
    pub(crate) gesture: TapDetector,
    fields: Vec<ParticleField>,
    picks: Vec<Pick>,
    overlays: Overlays,
    viewport: Vec2,
    config: EngineConfig,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &EngineConfig) -> Self {
        let [w, h] = config.viewport;
        let aspect = if h > 0.0 { w / h } else { 1.0 };
        Self {
            scene: Scene::new(),
            clock: AnimationClock::new(config.loading_timeout_ms, config.reveal_delay_ms),
            camera: CameraController::new(&config.camera, aspect),
            lights: LightState::new(),
            uniforms: UniformRegistry::new(),
            loading: LoadingScreen::new(config.seed),
            textures: TextureTracker::new(),
            selection: Selection::new(),
            comets: Vec::new(),
            meteor: None,
            events: Vec::with_capacity(config.max_events),
            stats: FrameStats::default(),
            gesture: TapDetector::new(config.tap_max_distance, config.tap_max_duration_ms),
            fields: Vec::new(),
            picks: Vec::new(),
            overlays: Overlays {
                orbits: config.show_orbits,
                labels: config.show_labels,
            },
            viewport: Vec2::new(w, h),
            config: config.clone(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register an entity. Texture requests are tracked, overlay visibility
    /// follows the current toggles, and animated materials and particle
    /// fields subscribe to the shared uniforms.
    pub fn spawn(&mut self, mut entity: Entity) -> Result<EntityId, EngineError> {
        match entity.overlay {
            Some(Overlay::OrbitPath) => entity.visible = self.overlays.orbits,
            Some(Overlay::Label) => entity.visible = self.overlays.labels,
            None => {}
        }
        let texture = entity.material().and_then(|m| m.texture.clone());
        let animated = entity.material().is_some_and(|m| m.animated)
            || matches!(entity.drawable, Drawable::Points { .. });
        let id = self.scene.spawn(entity)?;
        if let Some(url) = texture {
            self.textures.track(&mut self.scene, id, &url)?;
        }
        if animated {
            self.uniforms.subscribe_shared(id);
        }
        Ok(id)
    }

    /// Spawn with a fresh id.
    pub fn spawn_new(&mut self, build: impl FnOnce(Entity) -> Entity) -> Result<EntityId, EngineError> {
        let id = self.next_id();
        self.spawn(build(Entity::new(id)))
    }

    /// Store a generated particle field; its sample count is fixed from here on.
    pub fn add_field(&mut self, field: ParticleField) -> FieldId {
        self.fields.push(field);
        FieldId(self.fields.len() as u32 - 1)
    }

    pub fn field(&self, id: FieldId) -> Option<&ParticleField> {
        self.fields.get(id.0 as usize)
    }

    pub fn fields(&self) -> &[ParticleField] {
        &self.fields
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        } else {
            log::warn!("event buffer full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    // ── Viewport & overlays ─────────────────────────────────────────────

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.camera.resize(width, height);
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    pub fn set_overlays(&mut self, overlays: Overlays) {
        self.overlays = overlays;
        self.scene.set_overlay_visible(Overlay::OrbitPath, overlays.orbits);
        self.scene.set_overlay_visible(Overlay::Label, overlays.labels);
    }

    /// Flip orbit paths and labels together. Returns the new state.
    pub fn toggle_overlays(&mut self) -> Overlays {
        let next = Overlays {
            orbits: !self.overlays.orbits,
            labels: !self.overlays.labels,
        };
        self.set_overlays(next);
        next
    }

    // ── Camera commands ─────────────────────────────────────────────────

    /// Fly to and follow the body registered as `identifier`.
    pub fn focus_on(&mut self, identifier: &str, offset: Vec3) -> Result<EntityId, EngineError> {
        let id = self.scene.require(identifier)?;
        let duration = self.config.focus_duration_ms;
        self.camera.focus_on(&self.scene, id, offset, duration)?;
        Ok(id)
    }

    /// Unfollow and fly to an absolute framing.
    pub fn fly_to(&mut self, position: Vec3, target: Vec3) {
        let duration = self.config.overview_duration_ms;
        self.camera.fly_to(position, target, duration);
    }

    // ── Picking ─────────────────────────────────────────────────────────

    /// Resolve a pixel position to a named entity and queue it for the game.
    /// Ignored while loading or while the user drives the camera.
    pub fn select_at(&mut self, px: Vec2) -> Option<&Pick> {
        if self.clock.is_loading() || self.camera.is_user_driving() {
            log::debug!("select suppressed at {:?}", px);
            return None;
        }
        let ndc = pixel_to_ndc(px, self.viewport);
        let pick = picking::resolve(&self.scene, &self.camera.camera, ndc)?;
        log::debug!("picked {} ({})", pick.identifier, pick.entity.0);
        self.picks.push(pick);
        self.picks.last()
    }

    /// Entities picked since the last call.
    pub fn take_picks(&mut self) -> Vec<Pick> {
        std::mem::take(&mut self.picks)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
