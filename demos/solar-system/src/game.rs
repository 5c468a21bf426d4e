use glam::Vec3;
use orrery_engine::systems::rng::Rng;
use orrery_engine::systems::uniforms::UniformSource;
use orrery_engine::*;

use crate::bodies::{self, BodySpec, BODIES, NAV_PRESETS};
use crate::galaxies::{self, GalaxyPreset};
use crate::info::{InfoEntry, InfoStore};

// ── Custom event kinds (from the UI) ──
/// Fly to and follow a body: `a` = navigation preset index.
pub const CMD_FOCUS: u32 = 1;
/// Unfollow and frame the Milky Way.
pub const CMD_OVERVIEW: u32 = 2;
/// Orbit paths and labels together.
pub const CMD_TOGGLE_OVERLAYS: u32 = 3;
pub const CMD_TOGGLE_MENU: u32 = 4;
/// Close the info panel without picking anything.
pub const CMD_CLOSE_INFO: u32 = 5;

// ── Game event kinds (to the UI) ──
/// `a` = info entry ordinal, `b` = entity id.
pub const EVENT_INFO_SHOWN: f32 = 100.0;
pub const EVENT_INFO_HIDDEN: f32 = 101.0;
/// `a` = 1.0 when the navigation menu is open.
pub const EVENT_MENU: f32 = 102.0;
/// `a` = orbit paths visible, `b` = labels visible.
pub const EVENT_OVERLAYS: f32 = 103.0;

// Seed offsets so each procedural layer draws its own sequence.
const SEED_ASTEROIDS: u64 = 0x5eed_0001;
const SEED_COMETS: u64 = 0x5eed_0002;
const SEED_STARS: u64 = 0x5eed_0003;
const SEED_GALAXIES: u64 = 0x5eed_0100;

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

pub struct SolarSystem {
    info: InfoStore,
    textures: TextureManifest,
    menu_open: bool,
}

impl SolarSystem {
    pub fn new() -> Self {
        let info = InfoStore::builtin().unwrap_or_else(|e| {
            log::error!("info store unreadable, panel disabled: {}", e);
            InfoStore::default()
        });
        let textures = TextureManifest::from_json(include_str!("../assets/textures.json")).unwrap_or_else(|e| {
            log::error!("texture manifest unreadable, using solid colors: {}", e);
            TextureManifest::default()
        });
        Self::with_assets(info, textures)
    }

    /// Compose with a custom info store and texture manifest.
    pub fn with_assets(info: InfoStore, textures: TextureManifest) -> Self {
        Self {
            info,
            textures,
            menu_open: false,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Entry on the open info panel, if any.
    pub fn shown_info<'a>(&'a self, ctx: &EngineContext) -> Option<&'a InfoEntry> {
        ctx.selection.current().and_then(|id| self.info.lookup(id))
    }

    pub fn shown_info_json(&self, ctx: &EngineContext) -> Option<String> {
        self.shown_info(ctx).and_then(|entry| serde_json::to_string(entry).ok())
    }

    fn material(&self, color: u32, emissive: Option<(u32, f32)>, texture_key: &str) -> Material {
        let mut material = Material::solid(Color::from_hex(color));
        if let Some((glow, intensity)) = emissive {
            material = material.with_emissive(Color::from_hex(glow), intensity);
        }
        if let Some(url) = self.textures.url_for(texture_key) {
            material = material.with_texture(url);
        }
        material
    }

    // ── Composition ──

    fn spawn_body(&self, ctx: &mut EngineContext, spec: &BodySpec) -> Result<EntityId, EngineError> {
        let focus = spec.parent.map(|p| ctx.scene.require(p)).transpose()?;
        let focus_pos = match focus {
            Some(f) => ctx.scene.world_position(f)?,
            None => Vec3::ZERO,
        };
        let spin = Vec3::new(0.0, spec.spin, 0.0);

        let (motion, pos) = match spec.orbit {
            Some(o) => {
                let params = OrbitParams::new(o.semi_major, o.eccentricity, o.speed);
                let orbit = match focus {
                    Some(f) => OrbitMotion::around(f, params),
                    None => OrbitMotion::around_origin(params),
                }
                .with_bob(spec.bob);
                (Motion::orbiting(orbit).with_spin(spin), focus_pos + orbit.offset(0.0))
            }
            None => (Motion::spinning(spin), focus_pos),
        };

        let material = self.material(spec.color, spec.emissive, spec.id);
        let body = ctx.spawn_new(|e| {
            e.with_name(spec.id)
                .with_pos(pos)
                .with_sphere(spec.radius, material)
                .with_motion(motion)
        })?;

        if let Some(atm) = spec.atmosphere {
            let color = Color::from_hex(atm.color);
            let shell = Material::solid(color)
                .with_emissive(color, atm.intensity)
                .with_opacity(0.3)
                .animated();
            ctx.spawn_new(|e| {
                e.with_parent(body)
                    .with_drawable(Drawable::Sphere { radius: atm.radius, material: shell })
                    .with_pick_radius(atm.radius)
            })?;
        }

        if let Some(o) = spec.orbit {
            let points = OrbitParams::new(o.semi_major, o.eccentricity, o.speed).path(bodies::PATH_SEGMENTS);
            let line = Drawable::Line {
                points,
                color: Color::from_hex(o.path_color),
                opacity: bodies::PATH_OPACITY,
            };
            ctx.spawn_new(|e| {
                let e = e.with_pos(focus_pos).with_drawable(line).with_overlay(Overlay::OrbitPath, true);
                match focus {
                    Some(f) => e.with_anchor(f, Vec3::ZERO),
                    None => e,
                }
            })?;
        }

        let lift = Vec3::new(0.0, spec.label_height, 0.0);
        ctx.spawn_new(|e| {
            e.with_pos(pos + lift)
                .with_drawable(Drawable::Label { text: spec.label.to_string(), size: spec.label_size })
                .with_overlay(Overlay::Label, true)
                .with_anchor(body, lift)
        })?;

        Ok(body)
    }

    fn spawn_ring(&self, ctx: &mut EngineContext, saturn: EntityId) -> Result<(), EngineError> {
        let material = self
            .material(bodies::RING_COLOR, None, "saturn_ring")
            .with_opacity(bodies::RING_OPACITY);
        ctx.spawn_new(|e| {
            e.with_parent(saturn)
                .with_rotation(Vec3::new(bodies::RING_TILT, 0.0, 0.0))
                .with_scale(Vec3::new(1.0, bodies::RING_SQUASH, 1.0))
                .with_drawable(Drawable::Ring {
                    inner: bodies::RING_INNER,
                    outer: bodies::RING_OUTER,
                    material,
                })
                .with_pick_radius(bodies::RING_OUTER)
        })?;
        Ok(())
    }

    fn spawn_asteroids(&self, ctx: &mut EngineContext, seed: u64) -> Result<(), EngineError> {
        let time = ctx
            .uniforms
            .register("asteroid_time", UniformSource::FrameStep(bodies::ASTEROID_TIME_STEP));
        let mut rng = Rng::new(seed);
        let width = bodies::ASTEROID_OUTER - bodies::ASTEROID_INNER;

        for i in 0..bodies::ASTEROID_COUNT {
            let semi_major = bodies::ASTEROID_INNER + rng.next_f64() * width;
            let eccentricity = 0.05 + rng.next_f64() * 0.1;
            let speed = 0.0002 + rng.next_f64() * 0.0003;
            let phase = rng.next_f64() * std::f64::consts::TAU;
            let height = rng.centered(bodies::ASTEROID_HEIGHT);
            let radius = 0.5 + rng.next_f32() * 1.5;
            let tumble = Vec3::new(rng.centered(0.02), rng.centered(0.02), rng.centered(0.02));

            let orbit = OrbitMotion::around_origin(OrbitParams::new(semi_major, eccentricity, speed).with_phase(phase))
                .with_height(height);
            let material = Material::solid(Color::from_hex(bodies::ASTEROID_COLOR))
                .with_emissive(Color::from_hex(bodies::ASTEROID_GLOW.0), bodies::ASTEROID_GLOW.1)
                .animated();
            let id = ctx.spawn_new(|e| {
                e.with_name(format!("asteroid{}", i + 1))
                    .with_pos(orbit.offset(0.0))
                    .with_sphere(radius, material)
                    .with_motion(Motion::orbiting(orbit).with_spin(tumble))
            })?;
            ctx.uniforms.subscribe(id, time);
        }

        for radius in [bodies::ASTEROID_INNER, bodies::ASTEROID_OUTER] {
            let points = OrbitParams::new(radius, bodies::BELT_PATH_ECCENTRICITY, 0.0).path(bodies::PATH_SEGMENTS);
            let line = Drawable::Line {
                points,
                color: Color::from_hex(bodies::BELT_PATH_COLOR),
                opacity: bodies::PATH_OPACITY,
            };
            ctx.spawn_new(|e| e.with_drawable(line).with_overlay(Overlay::OrbitPath, true))?;
        }
        ctx.spawn_new(|e| {
            e.with_pos(Vec3::new(300.0, 10.0, 0.0))
                .with_drawable(Drawable::Label { text: "Asteroid Belt".to_string(), size: 2.0 })
                .with_overlay(Overlay::Label, true)
        })?;
        Ok(())
    }

    fn spawn_comets(&self, ctx: &mut EngineContext, seed: u64) -> Result<(), EngineError> {
        let color = Color::from_hex(bodies::COMET_COLOR);
        let (glow, intensity) = bodies::COMET_GLOW;
        for (i, orbit) in CometBelt::default().generate(seed).into_iter().enumerate() {
            let comet = Comet {
                body: ctx.next_id(),
                tail: ctx.next_id(),
                orbit,
            };
            let pos = comet.position();
            let material = Material::solid(color).with_emissive(Color::from_hex(glow), intensity);
            ctx.spawn(
                Entity::new(comet.body)
                    .with_name(format!("comet{}", i + 1))
                    .with_pos(pos)
                    .with_sphere(bodies::COMET_RADIUS, material),
            )?;
            let tail = Trail::new(
                bodies::COMET_TAIL_SEGMENTS,
                pos,
                TrailFade::Linear { floor: 0.1 },
                Color::from_hex(glow),
            )
            .with_point_size(bodies::COMET_RADIUS);
            ctx.spawn(Entity::new(comet.tail).with_drawable(Drawable::Trail(tail)))?;
            ctx.comets.push(comet);
        }
        Ok(())
    }

    fn spawn_meteor(&self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        let meteor = Meteor::new(ctx.next_id(), ctx.next_id(), bodies::METEOR_START, bodies::METEOR_END);
        let pos = meteor.position();
        let material = self.material(bodies::METEOR_COLOR, Some(bodies::METEOR_GLOW), "meteor");
        let mut body = Entity::new(meteor.body)
            .with_pos(pos)
            .with_sphere(bodies::METEOR_RADIUS, material);
        body.pick_radius = None;
        ctx.spawn(body)?;
        let trail = Trail::new(
            bodies::METEOR_TRAIL_POINTS,
            pos,
            TrailFade::Geometric(bodies::METEOR_TRAIL_DECAY),
            Color::from_hex(bodies::METEOR_GLOW.0),
        )
        .with_point_size(2.0);
        ctx.spawn(Entity::new(meteor.trail).with_drawable(Drawable::Trail(trail)))?;

        let (color, intensity, range) = bodies::METEOR_LIGHT;
        ctx.lights
            .add(PointLight::new(pos, Color::from_hex(color), intensity, range).following(meteor.body));
        ctx.meteor = Some(meteor);
        Ok(())
    }

    fn spawn_galaxy(&self, ctx: &mut EngineContext, preset: &GalaxyPreset, seed: u64) -> Result<usize, EngineError> {
        let group = ctx.spawn_new(|e| {
            let mut e = e.with_pos(preset.position).with_rotation(preset.tilt);
            if preset.spin != 0.0 {
                e = e.with_motion(Motion::spinning(Vec3::new(0.0, preset.spin, 0.0)));
            }
            match preset.identifier {
                Some(id) => e.with_name(id).with_pick_radius(preset.pick_radius),
                None => e,
            }
        })?;

        let mut stars = 0;
        for (k, layer) in preset.layers.iter().enumerate() {
            let field = generate_field(layer, seed.wrapping_add(k as u64));
            stars += field.len();
            let field = ctx.add_field(field);
            ctx.spawn_new(|e| e.with_parent(group).with_drawable(Drawable::Points { field }))?;
        }

        ctx.spawn_new(|e| {
            e.with_pos(preset.position + preset.label_offset)
                .with_drawable(Drawable::Label { text: preset.label.to_string(), size: galaxies::LABEL_SIZE })
                .with_overlay(Overlay::Label, true)
        })?;
        Ok(stars)
    }

    // ── Commands ──

    fn handle_command(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) -> Result<(), EngineError> {
        match kind {
            CMD_FOCUS => match NAV_PRESETS.get(a as usize) {
                Some(preset) if a >= 0.0 => {
                    ctx.focus_on(preset.body, preset.offset)?;
                }
                _ => log::warn!("no navigation preset {}", a),
            },
            CMD_OVERVIEW => ctx.fly_to(bodies::OVERVIEW_POSITION, bodies::OVERVIEW_TARGET),
            CMD_TOGGLE_OVERLAYS => {
                let now = ctx.toggle_overlays();
                ctx.emit_event(GameEvent::new(EVENT_OVERLAYS, flag(now.orbits), flag(now.labels), 0.0));
            }
            CMD_TOGGLE_MENU => {
                self.menu_open = !self.menu_open;
                ctx.emit_event(GameEvent::new(EVENT_MENU, flag(self.menu_open), 0.0, 0.0));
            }
            CMD_CLOSE_INFO => {
                if ctx.selection.clear().is_some() {
                    ctx.emit_event(GameEvent::new(EVENT_INFO_HIDDEN, 0.0, 0.0, 0.0));
                }
            }
            other => log::debug!("ignoring command {}", other),
        }
        Ok(())
    }

    fn handle_pick(&mut self, ctx: &mut EngineContext, pick: Pick) {
        let Some(ordinal) = self.info.index_of(&pick.identifier) else {
            log::debug!("no info for {}", pick.identifier);
            return;
        };
        match ctx.selection.toggle(pick.entity, &pick.identifier) {
            SelectionChange::Opened { entity, identifier } => {
                log::info!("info panel: {}", identifier);
                ctx.emit_event(GameEvent::new(EVENT_INFO_SHOWN, ordinal as f32, entity.0 as f32, 0.0));
            }
            SelectionChange::Closed => {
                ctx.emit_event(GameEvent::new(EVENT_INFO_HIDDEN, 0.0, 0.0, 0.0));
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        let seed = ctx.config().seed;

        ctx.lights.set_ambient(Color::WHITE, bodies::AMBIENT_INTENSITY);
        let (color, intensity, range) = bodies::SUN_LIGHT;
        ctx.lights.add(PointLight::new(Vec3::ZERO, Color::from_hex(color), intensity, range));

        for spec in BODIES.iter() {
            let id = self.spawn_body(ctx, spec)?;
            if spec.id == "saturn" {
                self.spawn_ring(ctx, id)?;
            }
        }

        self.spawn_asteroids(ctx, seed ^ SEED_ASTEROIDS)?;
        self.spawn_comets(ctx, seed ^ SEED_COMETS)?;
        self.spawn_meteor(ctx)?;

        let field = ctx.add_field(generate_field(&galaxies::star_field(), seed ^ SEED_STARS));
        ctx.spawn_new(|e| e.with_drawable(Drawable::Points { field }))?;

        let mut stars = 0;
        for (k, preset) in [galaxies::milky_way(), galaxies::andromeda()].iter().enumerate() {
            stars += self.spawn_galaxy(ctx, preset, (seed ^ SEED_GALAXIES).wrapping_add(16 * k as u64))?;
        }

        log::info!(
            "solar system composed: {} bodies, {} asteroids, {} comets, {} galaxy stars",
            BODIES.len(),
            bodies::ASTEROID_COUNT,
            ctx.comets.len(),
            stars
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) -> Result<(), EngineError> {
        for (kind, a, _, _) in input.commands() {
            self.handle_command(ctx, kind, a)?;
        }
        for pick in ctx.take_picks() {
            self.handle_pick(ctx, pick);
        }
        Ok(())
    }
}
