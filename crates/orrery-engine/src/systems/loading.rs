//! Loading screen: a ring of points that lights up as textures resolve.

use std::f32::consts::TAU;

use crate::systems::field::StarSample;
use crate::systems::rng::Rng;

pub const RING_POINTS: usize = 600;
pub const RING_RADIUS: f32 = 1.5;

#[derive(Debug, Clone)]
pub struct LoadingScreen {
    /// Ring in the x/y plane; `size` holds the lit opacity (0 or 1).
    points: Vec<StarSample>,
    lit: usize,
    /// Ring rotation about its axis, radians.
    pub spin: f32,
    /// Drives the twinkle and the pulse.
    pub time: f32,
    visible: bool,
}

impl LoadingScreen {
    pub fn new(seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let points = (0..RING_POINTS)
            .map(|i| {
                let angle = i as f32 / RING_POINTS as f32 * TAU;
                StarSample {
                    position: [angle.cos() * RING_RADIUS, angle.sin() * RING_RADIUS, rng.centered(0.1)],
                    color: [1.0, 0.83, 1.0],
                    size: 0.0,
                    phase: rng.angle(),
                }
            })
            .collect();
        Self {
            points,
            lit: 0,
            spin: 0.0,
            time: 0.0,
            visible: true,
        }
    }

    /// Light the first `floor(600 * progress)` points.
    pub fn set_progress(&mut self, progress: f32) {
        let progress = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
        self.lit = (RING_POINTS as f32 * progress).floor() as usize;
        for (i, p) in self.points.iter_mut().enumerate() {
            p.size = if i < self.lit { 1.0 } else { 0.0 };
        }
    }

    /// One logical frame of ring animation.
    pub fn tick(&mut self) {
        if !self.visible {
            return;
        }
        self.time += 0.02;
        self.spin += 0.015;
    }

    /// Uniform scale of the ring this frame.
    pub fn pulse(&self) -> f32 {
        1.0 + 0.1 * self.time.sin()
    }

    pub fn lit(&self) -> usize {
        self.lit
    }

    pub fn hide(&mut self) {
        if self.visible {
            log::info!("loading screen hidden");
        }
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }
}
