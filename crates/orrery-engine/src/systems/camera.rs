//! Camera rig: free orbit/zoom/pan with damping, body following with a
//! constant offset, and eased flights between framings.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::api::game::CameraConfig;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::extensions::easing::Easing;
use crate::extensions::tween::Tween;
use crate::renderer::camera::PerspectiveCamera;

/// Keeps the polar angle away from the poles.
const POLAR_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flight {
    position: Tween,
    target: Tween,
    /// Body the flight lands on; its live position moves the end points.
    follow: Option<EntityId>,
}

/// Camera state plus the rules that move it.
#[derive(Debug, Clone)]
pub struct CameraController {
    pub camera: PerspectiveCamera,
    followed: Option<EntityId>,
    /// position - target, captured when following starts or a drag ends.
    offset: Vec3,
    user_driving: bool,
    flight: Option<Flight>,
    // Pending manipulation, bled off by `damp`.
    spin: Vec2,
    dolly: f32,
    pan: Vec2,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
    last_good: (Vec3, Vec3),
}

impl CameraController {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = PerspectiveCamera::new(config.fov_deg, aspect, config.near, config.far);
        camera.position = Vec3::from_array(config.start_position);
        camera.target = Vec3::from_array(config.start_target);
        Self {
            camera,
            followed: None,
            offset: camera.position - camera.target,
            user_driving: false,
            flight: None,
            spin: Vec2::ZERO,
            dolly: 0.0,
            pan: Vec2::ZERO,
            damping: config.damping,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            last_good: (camera.position, camera.target),
        }
    }

    pub fn followed(&self) -> Option<EntityId> {
        self.followed
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn is_user_driving(&self) -> bool {
        self.user_driving
    }

    pub fn in_flight(&self) -> bool {
        self.flight.is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────────

    /// Start following `body` at `offset`, flying there over `duration_ms`.
    pub fn focus_on(
        &mut self,
        scene: &Scene,
        body: EntityId,
        offset: Vec3,
        duration_ms: f32,
    ) -> Result<(), EngineError> {
        let body_pos = scene.world_position(body)?;
        self.followed = Some(body);
        self.offset = offset;
        self.flight = Some(Flight {
            position: Tween::new(self.camera.position, body_pos + offset, duration_ms, Easing::QuadInOut),
            target: Tween::new(self.camera.target, body_pos, duration_ms, Easing::QuadInOut),
            follow: Some(body),
        });
        log::info!("camera: following entity {} at offset {:?}", body.0, offset);
        Ok(())
    }

    /// Stop following and fly to an absolute framing.
    pub fn fly_to(&mut self, position: Vec3, target: Vec3, duration_ms: f32) {
        self.followed = None;
        self.offset = position - target;
        self.flight = Some(Flight {
            position: Tween::new(self.camera.position, position, duration_ms, Easing::QuadInOut),
            target: Tween::new(self.camera.target, target, duration_ms, Easing::QuadInOut),
            follow: None,
        });
    }

    /// The user grabbed the view.
    pub fn begin_drag(&mut self) {
        self.user_driving = true;
    }

    /// The user let go: re-derive the follow offset from the live pose.
    /// A flight still in progress keeps the offset it is landing at.
    pub fn end_drag(&mut self, scene: &Scene) -> Result<(), EngineError> {
        self.user_driving = false;
        if self.flight.is_some() {
            return Ok(());
        }
        match self.followed {
            Some(body) => {
                let body_pos = scene.world_position(body)?;
                self.offset = self.camera.position - body_pos;
            }
            None => self.offset = self.camera.position - self.camera.target,
        }
        Ok(())
    }

    /// Queue an orbit around the target, in pixels of pointer travel.
    /// Manual manipulation abandons a running flight.
    pub fn rotate(&mut self, delta_px: Vec2, viewport_height: f32) {
        self.flight = None;
        let h = viewport_height.max(1.0);
        self.spin += Vec2::new(TAU * delta_px.x / h, TAU * delta_px.y / h);
    }

    /// Queue a zoom; positive moves away from the target.
    pub fn zoom(&mut self, amount: f32) {
        if self.followed.is_some() {
            // Following overwrites the position each frame, so scale the
            // offset. A flight onto the body picks it up through `retarget`.
            let len = self.offset.length();
            let scaled = (len * (1.0 + amount)).clamp(self.min_distance, self.max_distance);
            self.offset = self.offset.normalize_or_zero() * scaled;
        } else {
            self.flight = None;
            self.dolly += amount;
        }
    }

    /// Queue a pan in screen-space pixels.
    pub fn pan(&mut self, delta_px: Vec2, viewport_height: f32) {
        self.flight = None;
        self.pan += delta_px / viewport_height.max(1.0);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    // ── Per-frame ────────────────────────────────────────────────────────

    /// Apply queued manipulation and bleed it off by the damping factor.
    pub fn damp(&mut self) {
        let pending = self.spin.length_squared() > 1e-12 || self.dolly.abs() > 1e-6 || self.pan.length_squared() > 1e-12;
        if !pending {
            self.spin = Vec2::ZERO;
            self.dolly = 0.0;
            self.pan = Vec2::ZERO;
            return;
        }

        let k = self.damping.clamp(0.0, 1.0);
        let rel = self.camera.position - self.camera.target;
        let radius = rel.length().max(1e-6);
        let mut azimuth = rel.x.atan2(rel.z);
        let mut polar = (rel.y / radius).clamp(-1.0, 1.0).acos();

        azimuth -= self.spin.x * k;
        polar = (polar - self.spin.y * k).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        let radius = (radius * (1.0 + self.dolly * k)).clamp(self.min_distance, self.max_distance);

        // Pan along the camera's screen axes, scaled by distance.
        let forward = (-rel).normalize_or_zero();
        let right = forward.cross(self.camera.up).normalize_or_zero();
        let up = right.cross(forward);
        let shift = (right * -self.pan.x + up * self.pan.y) * radius * k;
        self.camera.target += shift;

        let sin_p = polar.sin();
        let offset = Vec3::new(radius * sin_p * azimuth.sin(), radius * polar.cos(), radius * sin_p * azimuth.cos());
        self.camera.position = self.camera.target + offset;

        self.spin *= 1.0 - k;
        self.dolly *= 1.0 - k;
        self.pan *= 1.0 - k;
    }

    /// Recompute the pose from the followed body or the running flight.
    /// Returns `true` on the frame a flight lands.
    pub fn update(&mut self, scene: &Scene, dt_ms: f32) -> Result<bool, EngineError> {
        let landed = self.step(scene, dt_ms)?;
        let pose_ok = self.camera.position.is_finite() && self.camera.target.is_finite();
        if !pose_ok {
            // Fall back to the last sane pose so the next frame starts clean.
            (self.camera.position, self.camera.target) = self.last_good;
            self.flight = None;
            self.spin = Vec2::ZERO;
            self.dolly = 0.0;
            self.pan = Vec2::ZERO;
            return Err(EngineError::NonFinite {
                entity: self.followed.unwrap_or(EntityId(0)),
                what: "camera pose",
            });
        }
        self.last_good = (self.camera.position, self.camera.target);
        Ok(landed)
    }

    fn step(&mut self, scene: &Scene, dt_ms: f32) -> Result<bool, EngineError> {
        if let Some(flight) = self.flight.as_mut() {
            if let Some(body) = flight.follow {
                let body_pos = scene.world_position(body)?;
                flight.position.retarget(body_pos + self.offset);
                flight.target.retarget(body_pos);
            }
            self.camera.position = flight.position.advance(dt_ms);
            self.camera.target = flight.target.advance(dt_ms);
            if flight.position.is_finished() && flight.target.is_finished() {
                self.flight = None;
                return Ok(true);
            }
            return Ok(false);
        }

        if let Some(body) = self.followed {
            let body_pos = scene.world_position(body)?;
            if !self.user_driving {
                self.camera.position = body_pos + self.offset;
            }
            self.camera.target = body_pos;
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    fn scene_with_body(pos: Vec3) -> (Scene, EntityId) {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_name("earth").with_pos(pos)).unwrap();
        (scene, id)
    }

    fn controller() -> CameraController {
        CameraController::new(&CameraConfig::default(), 16.0 / 9.0)
    }

    #[test]
    fn starts_free_at_configured_pose() {
        let cam = controller();
        assert_eq!(cam.followed(), None);
        assert_eq!(cam.camera.position, Vec3::new(10.0, 0.0, 90.0));
        assert_eq!(cam.camera.target, Vec3::ZERO);
    }

    #[test]
    fn focus_flight_lands_on_moving_body() {
        let (mut scene, earth) = scene_with_body(Vec3::new(90.0, 0.0, 0.0));
        let mut cam = controller();
        let offset = Vec3::new(15.0, 5.0, 15.0);
        cam.focus_on(&scene, earth, offset, 1500.0).unwrap();

        let mut landed = false;
        for frame in 0..100 {
            scene.get_mut(earth).unwrap().pos = Vec3::new(90.0, 0.0, frame as f32 * 0.1);
            landed |= cam.update(&scene, 1000.0 / 60.0).unwrap();
        }
        assert!(landed);
        assert!(!cam.in_flight());
        let body = scene.get(earth).unwrap().pos;
        assert_eq!(cam.camera.target, body);
        assert_eq!(cam.camera.position, body + offset);
    }

    #[test]
    fn following_recomputes_position_exactly() {
        let (mut scene, earth) = scene_with_body(Vec3::new(90.0, 0.0, 0.0));
        let mut cam = controller();
        let offset = Vec3::new(15.0, 5.0, 15.0);
        cam.focus_on(&scene, earth, offset, 0.0).unwrap();
        cam.update(&scene, 16.0).unwrap();
        for i in 0..10 {
            let p = Vec3::new(90.0 * (i as f32 * 0.1).cos(), 0.0, 88.0 * (i as f32 * 0.1).sin());
            scene.get_mut(earth).unwrap().pos = p;
            cam.update(&scene, 16.0).unwrap();
            assert_eq!(cam.camera.position, p + offset);
            assert_eq!(cam.camera.target, p);
        }
    }

    #[test]
    fn drag_pins_target_and_release_recaptures_offset() {
        let (mut scene, earth) = scene_with_body(Vec3::new(90.0, 0.0, 0.0));
        let mut cam = controller();
        cam.focus_on(&scene, earth, Vec3::new(15.0, 5.0, 15.0), 0.0).unwrap();
        cam.update(&scene, 16.0).unwrap();

        cam.begin_drag();
        cam.rotate(Vec2::new(120.0, 30.0), 600.0);
        for _ in 0..5 {
            cam.damp();
            scene.get_mut(earth).unwrap().pos.z += 0.5;
            cam.update(&scene, 16.0).unwrap();
            assert_eq!(cam.camera.target, scene.get(earth).unwrap().pos);
        }
        let dragged_pos = cam.camera.position;
        cam.end_drag(&scene).unwrap();
        let live = dragged_pos - scene.get(earth).unwrap().pos;
        assert_eq!(cam.offset(), live);

        scene.get_mut(earth).unwrap().pos.x += 3.0;
        cam.update(&scene, 16.0).unwrap();
        assert_eq!(cam.camera.position, scene.get(earth).unwrap().pos + live);
    }

    #[test]
    fn release_during_flight_keeps_landing_offset() {
        let (mut scene, earth) = scene_with_body(Vec3::new(90.0, 0.0, 0.0));
        let mut cam = controller();
        let offset = Vec3::new(15.0, 5.0, 15.0);
        cam.focus_on(&scene, earth, offset, 1500.0).unwrap();
        for _ in 0..30 {
            cam.update(&scene, 1000.0 / 60.0).unwrap();
        }
        cam.begin_drag();
        cam.end_drag(&scene).unwrap();
        assert!(cam.in_flight());
        assert_eq!(cam.offset(), offset);

        for frame in 0..200 {
            scene.get_mut(earth).unwrap().pos.z = frame as f32 * 0.1;
            cam.update(&scene, 1000.0 / 60.0).unwrap();
        }
        let body = scene.get(earth).unwrap().pos;
        assert_eq!(cam.offset(), offset);
        assert_eq!(cam.camera.position, body + offset);
    }

    #[test]
    fn zoom_during_flight_keeps_easing() {
        let (scene, earth) = scene_with_body(Vec3::new(90.0, 0.0, 0.0));
        let mut cam = controller();
        cam.focus_on(&scene, earth, Vec3::new(15.0, 5.0, 15.0), 1500.0).unwrap();
        for _ in 0..10 {
            cam.update(&scene, 1000.0 / 60.0).unwrap();
        }
        cam.zoom(0.1);
        assert!(cam.in_flight());
        let before = cam.camera.position;
        let landing = scene.get(earth).unwrap().pos + cam.offset();
        cam.update(&scene, 1000.0 / 60.0).unwrap();
        let moved = (cam.camera.position - before).length();
        assert!(moved < (landing - before).length() * 0.5, "jumped {}", moved);

        for _ in 0..100 {
            cam.update(&scene, 1000.0 / 60.0).unwrap();
        }
        assert!(!cam.in_flight());
        assert_eq!(cam.camera.position, landing);
        assert!((cam.offset().length() - Vec3::new(15.0, 5.0, 15.0).length() * 1.1).abs() < 1e-3);
    }

    #[test]
    fn fly_to_unfollows() {
        let (scene, earth) = scene_with_body(Vec3::new(90.0, 0.0, 0.0));
        let mut cam = controller();
        cam.focus_on(&scene, earth, Vec3::ONE, 0.0).unwrap();
        cam.fly_to(Vec3::new(3100.0, 60.0, 60.0), Vec3::new(3500.0, 0.0, 0.0), 2000.0);
        assert_eq!(cam.followed(), None);
        for _ in 0..200 {
            cam.update(&scene, 1000.0 / 60.0).unwrap();
        }
        assert_eq!(cam.camera.position, Vec3::new(3100.0, 60.0, 60.0));
        assert_eq!(cam.camera.target, Vec3::new(3500.0, 0.0, 0.0));
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut cam = controller();
        cam.zoom(-1000.0);
        for _ in 0..50 {
            cam.damp();
        }
        let d = (cam.camera.position - cam.camera.target).length();
        assert!(d >= 2.0 - 1e-3, "distance {}", d);
    }

    #[test]
    fn damping_bleeds_off_spin() {
        let mut cam = controller();
        cam.rotate(Vec2::new(100.0, 0.0), 600.0);
        let mut last = cam.camera.position;
        let mut step = f32::MAX;
        for _ in 0..20 {
            cam.damp();
            let moved = (cam.camera.position - last).length();
            assert!(moved <= step + 1e-4);
            step = moved;
            last = cam.camera.position;
        }
        let d = (cam.camera.position - cam.camera.target).length();
        assert!((d - Vec3::new(10.0, 0.0, 90.0).length()).abs() < 1e-2);
    }

    #[test]
    fn missing_followed_body_is_an_error() {
        let (scene, _) = scene_with_body(Vec3::ZERO);
        let mut cam = controller();
        assert!(cam.focus_on(&scene, EntityId(42), Vec3::ONE, 100.0).is_err());
    }
}
