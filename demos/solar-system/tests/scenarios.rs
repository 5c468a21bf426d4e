//! End-to-end runs of the solar system through the scene runner and a
//! recording substrate.

use std::f64::consts::TAU;

use glam::Vec3;
use orrery_engine::api::types::{
    EVENT_CONTEXT_LOST, EVENT_CONTEXT_RESTORED, EVENT_LOADING_HIDDEN, EVENT_RUNNING,
};
use orrery_engine::{EngineConfig, EngineContext, EngineError, EntityId, Game, InputEvent, InputQueue, RecordingSubstrate};
use orrery_web::SceneRunner;
use solar_system::bodies::NAV_PRESETS;
use solar_system::game::{
    SolarSystem, CMD_FOCUS, CMD_OVERVIEW, CMD_TOGGLE_OVERLAYS, EVENT_INFO_HIDDEN, EVENT_INFO_SHOWN, EVENT_OVERLAYS,
};

const DT: f32 = 1.0 / 60.0;
const CENTRE: (f32, f32) = (640.0, 360.0);

/// The solar system with a custom engine configuration.
struct Tuned {
    inner: SolarSystem,
    config: EngineConfig,
}

impl Game for Tuned {
    fn config(&self) -> EngineConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        self.inner.init(ctx)
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) -> Result<(), EngineError> {
        self.inner.update(ctx, input)
    }
}

/// Compose, resolve every texture and tick until the clock runs.
fn start<G: Game>(game: G) -> SceneRunner<G, RecordingSubstrate> {
    let mut r = SceneRunner::new(game, RecordingSubstrate::default());
    r.init().expect("scene composes");
    for url in r.take_texture_requests() {
        r.texture_resolved(&url, true);
    }
    let dt = r.context().config().fixed_dt;
    for _ in 0..600 {
        if r.context().clock.is_running() {
            break;
        }
        r.tick(dt);
    }
    assert!(r.context().clock.is_running(), "scene never started");
    r
}

fn running() -> SceneRunner<SolarSystem, RecordingSubstrate> {
    start(SolarSystem::new())
}

fn ticks<G: Game>(r: &mut SceneRunner<G, RecordingSubstrate>, n: usize) {
    for _ in 0..n {
        r.tick(DT);
    }
}

fn position<G: Game>(r: &SceneRunner<G, RecordingSubstrate>, id: EntityId) -> Vec3 {
    r.context().scene.world_position(id).unwrap()
}

fn body<G: Game>(r: &SceneRunner<G, RecordingSubstrate>, name: &str) -> EntityId {
    r.context().scene.require(name).unwrap()
}

fn command<G: Game>(r: &mut SceneRunner<G, RecordingSubstrate>, kind: u32, a: f32) {
    r.push_input(InputEvent::Custom { kind, a, b: 0.0, c: 0.0 });
    r.tick(DT);
}

fn tap<G: Game>(r: &mut SceneRunner<G, RecordingSubstrate>, at: (f32, f32), time_ms: f64) {
    let (x, y) = at;
    r.push_input(InputEvent::PointerDown { x, y, button: 0, time_ms });
    r.push_input(InputEvent::PointerUp { x, y, time_ms: time_ms + 100.0 });
    r.tick(DT);
}

fn has_event<G: Game>(r: &SceneRunner<G, RecordingSubstrate>, kind: f32) -> bool {
    r.context().events.iter().any(|e| e.kind == kind)
}

fn preset_index(name: &str) -> f32 {
    NAV_PRESETS.iter().position(|p| p.body == name).unwrap() as f32
}

// ── Start-up ────────────────────────────────────────────────────────

#[test]
fn bodies_hold_still_until_textures_resolve() {
    let mut r = SceneRunner::new(SolarSystem::new(), RecordingSubstrate::default());
    r.init().unwrap();
    let mercury = body(&r, "mercury");
    let before = position(&r, mercury);

    ticks(&mut r, 30);
    assert!(r.is_loading());
    assert_eq!(position(&r, mercury), before);
    assert_eq!(r.substrate().loading_frames, 30);

    for url in r.take_texture_requests() {
        r.texture_resolved(&url, false);
    }
    r.tick(DT);
    assert!(has_event(&r, EVENT_LOADING_HIDDEN));
    ticks(&mut r, 70);
    assert!(r.context().clock.is_running());
    assert_ne!(position(&r, mercury), before);
}

#[test]
fn loading_times_out_when_textures_never_answer() {
    let mut r = SceneRunner::new(SolarSystem::new(), RecordingSubstrate::default());
    r.init().unwrap();
    let mut forced = None;
    for _ in 0..700 {
        r.tick(DT);
        if let Some(e) = r.context().events.iter().find(|e| e.kind == EVENT_RUNNING) {
            forced = Some(e.a);
            break;
        }
    }
    assert_eq!(forced, Some(1.0));
}

// ── Orbits ──────────────────────────────────────────────────────────

#[test]
fn mercury_returns_after_one_period_and_earth_does_not() {
    let period_ms = TAU / 0.0009;
    let steps = 420u64;
    let config = EngineConfig {
        fixed_dt: (period_ms / steps as f64 / 1000.0) as f32,
        ..EngineConfig::default()
    };
    let mut r = start(Tuned { inner: SolarSystem::new(), config });
    let dt = r.context().config().fixed_dt;

    let mercury = body(&r, "mercury");
    let earth = body(&r, "earth");
    let (m0, e0) = (position(&r, mercury), position(&r, earth));
    let (t0, f0) = (r.context().clock.time_ms(), r.context().clock.frame());

    while r.context().clock.frame() < f0 + steps {
        r.tick(dt);
    }

    let elapsed = r.context().clock.time_ms() - t0;
    assert!((elapsed - period_ms).abs() < 0.01, "elapsed {} vs period {}", elapsed, period_ms);
    let drift = (position(&r, mercury) - m0).length();
    assert!(drift < 1e-3, "mercury drifted {} after one period", drift);
    let moved = (position(&r, earth) - e0).length();
    assert!(moved > 50.0, "earth only moved {}", moved);
}

#[test]
fn moons_track_their_planet() {
    let mut r = running();
    let earth = body(&r, "earth");
    let moon = body(&r, "moon");
    for _ in 0..120 {
        r.tick(DT);
        let d = (position(&r, moon) - position(&r, earth)).length();
        assert!(d > 8.0 && d < 10.0, "moon strayed to {} from earth", d);
    }
}

// ── Camera ──────────────────────────────────────────────────────────

#[test]
fn focus_lands_on_the_moving_body_and_follows_it() {
    let mut r = running();
    let earth = body(&r, "earth");
    command(&mut r, CMD_FOCUS, preset_index("earth"));
    ticks(&mut r, 100);

    let cam = r.context().camera.camera;
    assert_eq!(r.context().camera.followed(), Some(earth));
    assert_eq!(cam.target, position(&r, earth));
    assert_eq!(cam.position, position(&r, earth) + Vec3::new(15.0, 5.0, 15.0));

    for _ in 0..30 {
        r.tick(DT);
        let cam = r.context().camera.camera;
        let offset = r.context().camera.offset();
        assert_eq!(cam.position, position(&r, earth) + offset);
        assert_eq!(cam.target, position(&r, earth));
    }
}

#[test]
fn releasing_a_drag_keeps_the_new_viewpoint() {
    let mut r = running();
    let earth = body(&r, "earth");
    command(&mut r, CMD_FOCUS, preset_index("earth"));
    ticks(&mut r, 100);
    let preset = r.context().camera.offset();

    let (x, y) = CENTRE;
    r.push_input(InputEvent::PointerDown { x, y, button: 0, time_ms: 5_000.0 });
    r.push_input(InputEvent::PointerMove { x: x + 120.0, y: y + 30.0 });
    ticks(&mut r, 20);
    r.push_input(InputEvent::PointerUp { x: x + 120.0, y: y + 30.0, time_ms: 6_000.0 });
    r.tick(DT);

    let offset = r.context().camera.offset();
    assert!((offset - preset).length() > 0.01, "drag did not change the offset");
    let live = r.context().camera.camera.position - position(&r, earth);
    assert!((live - offset).length() < 1e-3, "offset {:?} vs live {:?}", offset, live);
    assert_eq!(r.context().camera.followed(), Some(earth));

    ticks(&mut r, 10);
    let cam = r.context().camera.camera;
    assert_eq!(cam.position, position(&r, earth) + r.context().camera.offset());
}

#[test]
fn overview_unfollows_and_frames_the_galaxy() {
    let mut r = running();
    command(&mut r, CMD_FOCUS, preset_index("mars"));
    ticks(&mut r, 100);
    command(&mut r, CMD_OVERVIEW, 0.0);
    ticks(&mut r, 130);
    let cam = r.context().camera.camera;
    assert!(r.context().camera.followed().is_none());
    assert!((cam.position - Vec3::new(3100.0, 60.0, 60.0)).length() < 1e-2);
    assert!((cam.target - Vec3::new(3500.0, 0.0, 0.0)).length() < 1e-2);
}

// ── Selection ───────────────────────────────────────────────────────

#[test]
fn tapping_the_same_body_twice_closes_its_panel() {
    let mut r = running();
    command(&mut r, CMD_FOCUS, preset_index("sun"));
    ticks(&mut r, 100);

    tap(&mut r, CENTRE, 10_000.0);
    assert!(has_event(&r, EVENT_INFO_SHOWN));
    assert_eq!(r.selected_identifier().as_deref(), Some("sun"));
    let info = r.game().shown_info(r.context()).unwrap();
    assert_eq!(info.name, "Sun");

    tap(&mut r, CENTRE, 11_000.0);
    assert!(has_event(&r, EVENT_INFO_HIDDEN));
    assert!(r.selected_identifier().is_none());
    assert!(r.game().shown_info_json(r.context()).is_none());
}

#[test]
fn tapping_another_body_replaces_the_panel() {
    let mut r = running();
    command(&mut r, CMD_FOCUS, preset_index("sun"));
    ticks(&mut r, 100);
    tap(&mut r, CENTRE, 10_000.0);
    assert_eq!(r.selected_identifier().as_deref(), Some("sun"));

    command(&mut r, CMD_FOCUS, preset_index("earth"));
    ticks(&mut r, 100);
    tap(&mut r, CENTRE, 20_000.0);
    assert_eq!(r.selected_identifier().as_deref(), Some("earth"));
    assert!(has_event(&r, EVENT_INFO_SHOWN));
    assert!(!has_event(&r, EVENT_INFO_HIDDEN));
}

#[test]
fn a_drag_never_selects() {
    let mut r = running();
    command(&mut r, CMD_FOCUS, preset_index("sun"));
    ticks(&mut r, 100);
    let (x, y) = CENTRE;
    r.push_input(InputEvent::PointerDown { x, y, button: 0, time_ms: 1_000.0 });
    r.push_input(InputEvent::PointerUp { x, y, time_ms: 2_000.0 });
    r.tick(DT);
    assert!(r.selected_identifier().is_none());
}

// ── Overlays & host lifecycle ───────────────────────────────────────

#[test]
fn overlay_toggle_round_trips() {
    let mut r = running();
    command(&mut r, CMD_TOGGLE_OVERLAYS, 0.0);
    assert!(has_event(&r, EVENT_OVERLAYS));
    assert!(r.context().overlays().labels);
    assert!(!r.context().overlays().orbits);
    command(&mut r, CMD_TOGGLE_OVERLAYS, 0.0);
    assert!(!r.context().overlays().labels);
    assert!(r.context().overlays().orbits);
}

#[test]
fn context_loss_pauses_and_restoration_resumes_without_recompose() {
    let mut r = running();
    ticks(&mut r, 5);
    let entities = r.context().scene.len();
    let fields = r.context().fields().len();
    let submitted = r.substrate().frames;
    let t = r.context().clock.time_ms();

    r.context_lost();
    r.tick(DT);
    assert!(has_event(&r, EVENT_CONTEXT_LOST));
    ticks(&mut r, 10);
    assert_eq!(r.substrate().frames, submitted);
    assert_eq!(r.context().clock.time_ms(), t);

    r.context_restored();
    r.tick(DT);
    assert!(has_event(&r, EVENT_CONTEXT_RESTORED));
    assert_eq!(r.substrate().frames, submitted + 1);
    assert!(r.context().clock.time_ms() > t);
    assert_eq!(r.context().scene.len(), entities);
    assert_eq!(r.context().fields().len(), fields);
    assert!(r.take_texture_requests().is_empty());
}

#[test]
fn resize_reaches_camera_and_substrate() {
    let mut r = running();
    r.resize(800.0, 400.0);
    assert!((r.context().camera.camera.aspect - 2.0).abs() < 1e-6);
    assert_eq!(r.substrate().size, (800, 400));
}
