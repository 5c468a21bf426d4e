//! Texture requests and their asynchronous outcomes.
//!
//! Bodies are spawned with a solid placeholder; the tracker records which
//! entities wait on which URL, hands URLs to the host's loader, and applies
//! each outcome to the registry entries once. Outcomes never touch position
//! or orbit state.

use std::collections::HashMap;

use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::error::EngineError;

/// Host-side fetcher. `load` starts a request; the outcome comes back later
/// through [`TextureTracker::resolve`].
pub trait AssetLoader {
    fn load(&mut self, url: &str);
}

/// Loader that only remembers what it was asked for (headless runs, tests,
/// hosts that poll the list).
#[derive(Debug, Default, Clone)]
pub struct QueuedLoader {
    pub requested: Vec<String>,
}

impl AssetLoader for QueuedLoader {
    fn load(&mut self, url: &str) {
        self.requested.push(url.to_string());
    }
}

#[derive(Debug, Clone)]
struct Request {
    url: String,
    waiting: Vec<EntityId>,
    outcome: Option<bool>,
    dispatched: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TextureTracker {
    requests: Vec<Request>,
    by_url: HashMap<String, usize>,
}

impl TextureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `entity` wears `url`. One request per distinct URL; a
    /// URL whose outcome is already known resolves the entity right away.
    pub fn track(&mut self, scene: &mut Scene, entity: EntityId, url: &str) -> Result<(), EngineError> {
        match self.by_url.get(url) {
            Some(&i) => {
                let req = &mut self.requests[i];
                req.waiting.push(entity);
                if let Some(loaded) = req.outcome {
                    if let Some(material) = scene.entity_mut(entity)?.material_mut() {
                        material.resolve(loaded);
                    }
                }
            }
            None => {
                self.by_url.insert(url.to_string(), self.requests.len());
                self.requests.push(Request {
                    url: url.to_string(),
                    waiting: vec![entity],
                    outcome: None,
                    dispatched: false,
                });
            }
        }
        Ok(())
    }

    /// Hand every not-yet-started request to the loader.
    pub fn dispatch(&mut self, loader: &mut dyn AssetLoader) -> usize {
        let mut started = 0;
        for req in self.requests.iter_mut().filter(|r| !r.dispatched) {
            loader.load(&req.url);
            req.dispatched = true;
            started += 1;
        }
        started
    }

    /// Apply a load outcome. Returns `false` for unknown or already-resolved
    /// URLs, which are ignored.
    pub fn resolve(&mut self, scene: &mut Scene, url: &str, loaded: bool) -> Result<bool, EngineError> {
        let Some(&i) = self.by_url.get(url) else {
            log::warn!("texture outcome for unrequested url {}", url);
            return Ok(false);
        };
        let req = &mut self.requests[i];
        if req.outcome.is_some() {
            return Ok(false);
        }
        req.outcome = Some(loaded);
        if !loaded {
            log::warn!("texture failed, keeping placeholder: {}", url);
        }
        for &id in &req.waiting {
            if let Some(material) = scene.entity_mut(id)?.material_mut() {
                material.resolve(loaded);
            }
        }
        Ok(true)
    }

    /// `(resolved, total)`.
    pub fn progress(&self) -> (usize, usize) {
        let resolved = self.requests.iter().filter(|r| r.outcome.is_some()).count();
        (resolved, self.requests.len())
    }

    pub fn fraction(&self) -> f32 {
        match self.progress() {
            (_, 0) => 1.0,
            (done, total) => done as f32 / total as f32,
        }
    }

    pub fn all_resolved(&self) -> bool {
        self.requests.iter().all(|r| r.outcome.is_some())
    }
}
