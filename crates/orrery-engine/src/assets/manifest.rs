use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Texture manifest: which image each body wears.
/// Loaded from a JSON file at runtime; bodies without an entry stay solid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureManifest {
    /// Prefix joined to every relative path.
    #[serde(default)]
    pub base_url: String,
    /// Body identifier → texture.
    #[serde(default)]
    pub textures: HashMap<String, TextureDescriptor>,
}

/// Describes one texture request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Relative path to the image (e.g., "textures/earth.jpg").
    pub path: String,
    /// Optional alpha map (e.g. for ring transparency).
    #[serde(default)]
    pub alpha: Option<String>,
}

impl TextureManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Full URL of the texture for `identifier`, if one is listed.
    pub fn url_for(&self, identifier: &str) -> Option<String> {
        self.textures
            .get(identifier)
            .map(|t| join_url(&self.base_url, &t.path))
    }

    pub fn alpha_url_for(&self, identifier: &str) -> Option<String> {
        self.textures
            .get(identifier)
            .and_then(|t| t.alpha.as_deref())
            .map(|p| join_url(&self.base_url, p))
    }
}

fn join_url(base: &str, path: &str) -> String {
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
