//! Render substrate contract.
//!
//! The engine never draws. Once per host frame it hands a [`FrameData`] to
//! whatever implements [`RenderSubstrate`]: today the WASM bridge's buffer
//! substrate (read by a WebGL renderer in TypeScript), in tests a recorder.

use super::camera::{PerspectiveCamera, Ray};
use super::instance::DrawInstance;
use crate::core::scene::Scene;
use crate::error::EngineError;
use crate::input::picking::{self, Hit};
use crate::systems::lighting::LightRecord;
use crate::systems::trail::TrailPoint;
use crate::systems::uniforms::UniformValue;

/// Loading-screen state for a frame drawn while Loading.
#[derive(Debug, Clone, Copy)]
pub struct LoadingFrame<'a> {
    /// Ring points (8 floats each, size = lit opacity).
    pub ring: &'a [f32],
    pub spin: f32,
    pub pulse: f32,
    pub time: f32,
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    pub frame: u64,
    /// The positioned drawable tree, for substrates that walk it directly.
    pub scene: &'a Scene,
    pub camera: &'a PerspectiveCamera,
    /// Flattened instances, for substrates that read packed buffers.
    pub instances: &'a [DrawInstance],
    pub vertices: &'a [TrailPoint],
    pub lights: &'a [LightRecord],
    pub ambient: [f32; 3],
    pub uniforms: &'a [UniformValue],
    /// Present while the loading screen is up.
    pub loading: Option<LoadingFrame<'a>>,
}

/// What the engine needs from a renderer.
pub trait RenderSubstrate {
    /// Backend identifier (e.g., "webgl", "buffer", "recording").
    fn backend(&self) -> &'static str;

    /// Draw one frame. A failure is logged by the caller and the next
    /// frame is attempted as usual.
    fn submit_frame(&mut self, frame: &FrameData) -> Result<(), EngineError>;

    /// Ray hits against the drawn scene, nearest first. The default tests
    /// bounding spheres of visible pickable entities.
    fn intersect(&self, scene: &Scene, ray: &Ray) -> Vec<Hit> {
        picking::intersect(scene, ray)
    }

    /// Output dimensions changed.
    fn resize(&mut self, width: u32, height: u32);
}

/// Substrate that keeps a summary of every submitted frame.
#[derive(Debug, Default, Clone)]
pub struct RecordingSubstrate {
    pub frames: u64,
    pub last_frame: u64,
    pub last_instances: usize,
    pub last_camera: Option<PerspectiveCamera>,
    pub loading_frames: u64,
    pub size: (u32, u32),
    /// When set, every submission fails with this error.
    pub fail_with: Option<fn() -> EngineError>,
}

impl RenderSubstrate for RecordingSubstrate {
    fn backend(&self) -> &'static str {
        "recording"
    }

    fn submit_frame(&mut self, frame: &FrameData) -> Result<(), EngineError> {
        if let Some(make) = self.fail_with {
            return Err(make());
        }
        self.frames += 1;
        self.last_frame = frame.frame;
        self.last_instances = frame.instances.len();
        self.last_camera = Some(*frame.camera);
        if frame.loading.is_some() {
            self.loading_frames += 1;
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_frame<'a>(scene: &'a Scene, camera: &'a PerspectiveCamera) -> FrameData<'a> {
        FrameData {
            frame: 3,
            scene,
            camera,
            instances: &[],
            vertices: &[],
            lights: &[],
            ambient: [0.1; 3],
            uniforms: &[],
            loading: None,
        }
    }

    #[test]
    fn recorder_counts_frames() {
        let scene = Scene::new();
        let camera = PerspectiveCamera::new(95.0, 1.0, 0.5, 10_000.0);
        let mut sub = RecordingSubstrate::default();
        sub.submit_frame(&empty_frame(&scene, &camera)).unwrap();
        assert_eq!(sub.frames, 1);
        assert_eq!(sub.last_frame, 3);
        sub.resize(800, 600);
        assert_eq!(sub.size, (800, 600));
    }

    #[test]
    fn recorder_can_fail() {
        let scene = Scene::new();
        let camera = PerspectiveCamera::new(95.0, 1.0, 0.5, 10_000.0);
        let mut sub = RecordingSubstrate {
            fail_with: Some(|| EngineError::ContextLost),
            ..Default::default()
        };
        assert!(sub.submit_frame(&empty_frame(&scene, &camera)).is_err());
        assert_eq!(sub.frames, 0);
    }
}
