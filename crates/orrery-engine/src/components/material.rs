use serde::{Deserialize, Serialize};

/// Linear RGB color, components nominally in [0, 1] (may exceed 1 for glow).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color(pub [f32; 3]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0]);

    /// Decode a 0xRRGGBB literal.
    pub const fn from_hex(hex: u32) -> Self {
        Color([
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
        ])
    }

    /// 0-255 channel triple.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
    }

    pub fn rgb(self) -> [f32; 3] {
        self.0
    }
}

/// Where a material's appearance currently comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialState {
    /// Solid color while a texture request is in flight (or none was made).
    #[default]
    Placeholder,
    /// The texture resolved and replaced the placeholder.
    Textured,
    /// The texture failed; the solid color is permanent.
    Fallback,
}

/// Surface appearance of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Placeholder / fallback color.
    pub color: Color,
    /// Texture URL requested for this surface, if any.
    pub texture: Option<String>,
    pub state: MaterialState,
    pub emissive: Option<(Color, f32)>,
    pub opacity: f32,
    /// Reads the shared time/camera uniforms (glow and atmosphere shaders).
    pub animated: bool,
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            texture: None,
            state: MaterialState::Placeholder,
            emissive: None,
            opacity: 1.0,
            animated: false,
        }
    }

    pub fn with_texture(mut self, url: impl Into<String>) -> Self {
        self.texture = Some(url.into());
        self
    }

    pub fn with_emissive(mut self, color: Color, intensity: f32) -> Self {
        self.emissive = Some((color, intensity));
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn animated(mut self) -> Self {
        self.animated = true;
        self
    }

    /// Apply the outcome of this material's texture request.
    /// Only a pending placeholder changes; repeated callbacks are ignored.
    pub fn resolve(&mut self, loaded: bool) {
        if self.state != MaterialState::Placeholder || self.texture.is_none() {
            return;
        }
        self.state = if loaded {
            MaterialState::Textured
        } else {
            MaterialState::Fallback
        };
    }
}
