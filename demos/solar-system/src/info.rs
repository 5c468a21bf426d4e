//! Info panel text for every selectable kind of object.

use std::collections::BTreeMap;

use orrery_engine::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoEntry {
    pub name: String,
    pub description: String,
    pub fact: String,
}

/// Keyed by family identifier (`asteroid`, not `asteroid17`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct InfoStore {
    entries: BTreeMap<String, InfoEntry>,
}

impl InfoStore {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The store shipped with the demo.
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_json(include_str!("../assets/info.json"))
    }

    /// Case-insensitive, ignoring any trailing instance number.
    pub fn lookup(&self, identifier: &str) -> Option<&InfoEntry> {
        self.entries.get(&family_key(identifier))
    }

    /// Stable ordinal of the entry `identifier` resolves to.
    pub fn index_of(&self, identifier: &str) -> Option<usize> {
        let key = family_key(identifier);
        self.entries.keys().position(|k| *k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn family_key(identifier: &str) -> String {
    identifier
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_lowercase()
}
