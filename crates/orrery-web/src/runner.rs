use orrery_engine::api::types::{EVENT_CONTEXT_LOST, EVENT_CONTEXT_RESTORED, EVENT_GRAPHICS_UNAVAILABLE};
use orrery_engine::core::frame;
use orrery_engine::{
    EngineConfig, EngineContext, EngineError, FieldId, FixedTimestep, FrameBuffer, FrameStats, Game, GameEvent,
    InputEvent, InputQueue, QueuedLoader, RenderSubstrate,
};

/// Generic scene runner that wires up the engine loop.
///
/// Each concrete scene (e.g., `solar-system`) creates a `thread_local!`
/// runner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct SceneRunner<G: Game, R: RenderSubstrate> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Stays empty: later logical steps of one tick see no input.
    idle: InputQueue,
    buffer: FrameBuffer,
    substrate: R,
    loader: QueuedLoader,
    timestep: FixedTimestep,
    /// Events raised between ticks, delivered with the next tick's events.
    pending: Vec<GameEvent>,
    initialized: bool,
    suspended: bool,
}

impl<G: Game, R: RenderSubstrate> SceneRunner<G, R> {
    pub fn new(game: G, substrate: R) -> Self {
        let config = game.config();
        Self::with_config(game, substrate, &config)
    }

    fn with_config(game: G, substrate: R, config: &EngineConfig) -> Self {
        Self {
            game,
            ctx: EngineContext::new(config),
            input: InputQueue::new(),
            idle: InputQueue::new(),
            buffer: FrameBuffer::new(),
            substrate,
            loader: QueuedLoader::default(),
            timestep: FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps),
            pending: Vec::new(),
            initialized: false,
            suspended: false,
        }
    }

    /// Compose the scene and request its textures. Call once after construction.
    pub fn init(&mut self) -> Result<(), EngineError> {
        log::info!("composing scene on '{}' substrate", self.substrate.backend());
        self.game.init(&mut self.ctx)?;
        let requested = self.ctx.textures.dispatch(&mut self.loader);
        log::info!("scene composed: {} entities, {} textures requested", self.ctx.scene.len(), requested);
        let [w, h] = self.ctx.config().viewport;
        self.substrate.resize(w as u32, h as u32);
        self.initialized = true;
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: zero or more logical steps, then one submission.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        for event in self.pending.drain(..) {
            self.ctx.emit_event(event);
        }

        if self.suspended {
            self.ctx.stats.frames_suspended += 1;
            return;
        }

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.idle };
            if let Err(e) = frame::advance(&mut self.ctx, &mut self.game, input) {
                log::error!("frame {} update failed: {}", self.ctx.clock.frame(), e);
                self.ctx.stats.frames_failed += 1;
            }
        }

        // Drain input after update; a tick with no steps keeps it queued.
        if steps > 0 {
            self.input.drain();
        }

        // Bodies spawned after init still get their textures requested.
        self.ctx.textures.dispatch(&mut self.loader);

        match frame::submit(&mut self.ctx, &mut self.buffer, &mut self.substrate) {
            Ok(()) => self.ctx.stats.frames_submitted += 1,
            Err(e) => {
                log::error!("frame submission failed: {}", e);
                self.ctx.stats.frames_failed += 1;
            }
        }
    }

    // ---- Host lifecycle ----

    /// The rendering context went away. Simulation state is kept as-is;
    /// nothing is advanced or submitted until [`Self::context_restored`].
    pub fn context_lost(&mut self) {
        if self.suspended {
            return;
        }
        log::error!("rendering context lost; suspending frames");
        self.suspended = true;
        self.pending.push(GameEvent::new(EVENT_CONTEXT_LOST, 0.0, 0.0, 0.0));
    }

    /// Resume the loop without recomposing the scene.
    pub fn context_restored(&mut self) {
        if !self.suspended {
            return;
        }
        log::info!("rendering context restored; resuming at frame {}", self.ctx.clock.frame());
        self.suspended = false;
        self.timestep.reset();
        self.pending.push(GameEvent::new(EVENT_CONTEXT_RESTORED, 0.0, 0.0, 0.0));
    }

    /// No graphics capability at all. The session never starts.
    pub fn graphics_unavailable(&mut self) {
        log::error!("graphics unavailable; the scene cannot be shown");
        self.suspended = true;
        self.pending.push(GameEvent::new(EVENT_GRAPHICS_UNAVAILABLE, 0.0, 0.0, 0.0));
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Viewport changed: aspect ratio and substrate output follow.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("ignoring degenerate resize {}x{}", width, height);
            return;
        }
        self.ctx.resize(width, height);
        self.substrate.resize(width as u32, height as u32);
    }

    /// Outcome of a texture request from the host.
    pub fn texture_resolved(&mut self, url: &str, loaded: bool) {
        if let Err(e) = self.ctx.textures.resolve(&mut self.ctx.scene, url, loaded) {
            log::error!("applying texture {} failed: {}", url, e);
        }
    }

    /// URLs requested since the last call, for the host to fetch.
    pub fn take_texture_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.loader.requested)
    }

    // ---- State access ----

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn substrate(&self) -> &R {
        &self.substrate
    }

    pub fn stats(&self) -> FrameStats {
        self.ctx.stats
    }

    // ---- Pointer accessors for wasm memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.buffer.instance_count()
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.buffer.vertices_ptr()
    }

    pub fn vertex_count(&self) -> u32 {
        self.buffer.vertex_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn uniforms_ptr(&self) -> *const f32 {
        self.ctx.uniforms.as_floats().as_ptr()
    }

    pub fn uniform_count(&self) -> u32 {
        self.ctx.uniforms.len() as u32
    }

    pub fn field_count(&self) -> u32 {
        self.ctx.fields().len() as u32
    }

    /// Null when `index` is out of range.
    pub fn field_ptr(&self, index: u32) -> *const f32 {
        self.ctx
            .field(FieldId(index))
            .map_or(std::ptr::null(), |f| f.as_floats().as_ptr())
    }

    pub fn field_len(&self, index: u32) -> u32 {
        self.ctx.field(FieldId(index)).map_or(0, |f| f.len() as u32)
    }

    pub fn loading_ring_ptr(&self) -> *const f32 {
        self.ctx.loading.as_floats().as_ptr()
    }

    pub fn is_loading(&self) -> bool {
        self.ctx.clock.is_loading()
    }

    pub fn selected_identifier(&self) -> Option<String> {
        self.ctx.selection.current().map(str::to_string)
    }
}
