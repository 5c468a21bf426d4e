//! Fixed-length trail buffers for comets and the meteor.
//!
//! The newest sample is written at index 0 and older samples shift toward
//! the tail; the buffer never grows or shrinks after construction.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::components::material::Color;

/// Wire format (4 floats): `[x, y, z, opacity]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TrailPoint {
    pub position: [f32; 3],
    pub opacity: f32,
}

/// Opacity profile from head (index 0) to tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrailFade {
    /// opacity[i] = ratio^i
    Geometric(f32),
    /// opacity[i] = 1 - (1 - floor) * i / (len - 1)
    Linear { floor: f32 },
}

impl TrailFade {
    fn opacity(self, index: usize, len: usize) -> f32 {
        match self {
            TrailFade::Geometric(ratio) => ratio.powi(index as i32),
            TrailFade::Linear { floor } => {
                if len <= 1 {
                    1.0
                } else {
                    1.0 - (1.0 - floor) * index as f32 / (len - 1) as f32
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: Vec<TrailPoint>,
    pub color: Color,
    pub point_size: f32,
}

impl Trail {
    /// A trail of `len` samples, all starting at `origin`.
    pub fn new(len: usize, origin: Vec3, fade: TrailFade, color: Color) -> Self {
        let len = len.max(1);
        let points = (0..len)
            .map(|i| TrailPoint {
                position: origin.to_array(),
                opacity: fade.opacity(i, len),
            })
            .collect();
        Self {
            points,
            color,
            point_size: 0.2,
        }
    }

    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    /// Shift every sample one slot toward the tail and write `head` at index 0.
    pub fn push(&mut self, head: Vec3) {
        for i in (1..self.points.len()).rev() {
            self.points[i].position = self.points[i - 1].position;
        }
        self.points[0].position = head.to_array();
    }

    pub fn head(&self) -> Vec3 {
        Vec3::from_array(self.points[0].position)
    }

    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_shifts_history_toward_tail() {
        let mut trail = Trail::new(4, Vec3::ZERO, TrailFade::Geometric(0.95), Color::WHITE);
        trail.push(Vec3::X);
        trail.push(Vec3::Y);
        trail.push(Vec3::Z);
        let p = trail.points();
        assert_eq!(p[0].position, [0.0, 0.0, 1.0]);
        assert_eq!(p[1].position, [0.0, 1.0, 0.0]);
        assert_eq!(p[2].position, [1.0, 0.0, 0.0]);
        assert_eq!(p[3].position, [0.0, 0.0, 0.0]);
        assert_eq!(trail.len(), 4);
    }

    #[test]
    fn geometric_fade_decays_per_sample() {
        let trail = Trail::new(100, Vec3::ZERO, TrailFade::Geometric(0.95), Color::WHITE);
        let p = trail.points();
        assert_eq!(p[0].opacity, 1.0);
        for i in 1..p.len() {
            let ratio = p[i].opacity / p[i - 1].opacity;
            assert!((ratio - 0.95).abs() < 1e-4, "ratio at {} was {}", i, ratio);
        }
    }

    #[test]
    fn linear_fade_reaches_floor() {
        let trail = Trail::new(12, Vec3::ZERO, TrailFade::Linear { floor: 0.1 }, Color::WHITE);
        let p = trail.points();
        assert!((p[0].opacity - 1.0).abs() < 1e-6);
        assert!((p[11].opacity - 0.1).abs() < 1e-6);
    }
}
