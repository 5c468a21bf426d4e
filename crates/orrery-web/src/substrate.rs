use orrery_engine::renderer::camera::CameraUniform;
use orrery_engine::systems::lighting::LightRecord;
use orrery_engine::{EngineError, FrameData, RenderSubstrate};

/// Floats per loading-screen record: `[visible, spin, pulse, time]`.
pub const LOADING_FLOATS: usize = 4;

/// Substrate for the browser: keeps the per-frame values the WebGL renderer
/// reads through wasm memory. Instance and vertex buffers are read straight
/// from the runner's [`orrery_engine::FrameBuffer`]; this only holds what is
/// not already laid out flat.
#[derive(Debug, Clone)]
pub struct BufferSubstrate {
    camera: CameraUniform,
    lights: Vec<LightRecord>,
    ambient: [f32; 3],
    loading: [f32; LOADING_FLOATS],
    frame: u64,
    size: (u32, u32),
}

impl BufferSubstrate {
    pub fn new() -> Self {
        Self {
            camera: bytemuck::Zeroable::zeroed(),
            lights: Vec::with_capacity(8),
            ambient: [0.0; 3],
            loading: [0.0; LOADING_FLOATS],
            frame: 0,
            size: (0, 0),
        }
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }

    pub fn light_count(&self) -> u32 {
        self.lights.len() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    pub fn loading_ptr(&self) -> *const f32 {
        self.loading.as_ptr()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl Default for BufferSubstrate {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSubstrate for BufferSubstrate {
    fn backend(&self) -> &'static str {
        "buffer"
    }

    fn submit_frame(&mut self, frame: &FrameData) -> Result<(), EngineError> {
        self.camera = frame.camera.uniform();
        self.lights.clear();
        self.lights.extend_from_slice(frame.lights);
        self.ambient = frame.ambient;
        self.loading = match frame.loading {
            Some(l) => [1.0, l.spin, l.pulse, l.time],
            None => [0.0; LOADING_FLOATS],
        };
        self.frame = frame.frame;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}
