//! Engine error type.
//!
//! Every fallible engine operation returns `Result<_, EngineError>`. Only the
//! frame loop boundary swallows these (logging them) so one bad frame never
//! stops the next one.

use std::fmt;

use crate::api::types::EntityId;

#[derive(Debug)]
pub enum EngineError {
    /// A handle that is not (or no longer) in the scene registry.
    UnknownEntity(EntityId),
    /// No entity is registered under this identifier.
    UnknownIdentifier(String),
    /// Composition tried to register the same identifier twice.
    DuplicateIdentifier(String),
    /// Orbital parameters outside the closed-ellipse domain.
    InvalidOrbit { semi_major: f64, eccentricity: f64 },
    /// A frame produced NaN or infinite state for this entity.
    NonFinite { entity: EntityId, what: &'static str },
    /// The render substrate lost its context; frames are suspended.
    ContextLost,
    /// The host has no usable graphics context. Fatal for the session.
    GraphicsUnavailable,
    /// Config, manifest or info-store JSON failed to parse.
    Parse(serde_json::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownEntity(id) => write!(f, "unknown entity {}", id.0),
            EngineError::UnknownIdentifier(name) => write!(f, "no entity named '{name}'"),
            EngineError::DuplicateIdentifier(name) => {
                write!(f, "identifier '{name}' is already registered")
            }
            EngineError::InvalidOrbit { semi_major, eccentricity } => write!(
                f,
                "invalid orbit: semi-major {semi_major}, eccentricity {eccentricity}"
            ),
            EngineError::NonFinite { entity, what } => {
                write!(f, "non-finite {what} on entity {}", entity.0)
            }
            EngineError::ContextLost => write!(f, "rendering context lost"),
            EngineError::GraphicsUnavailable => write!(f, "no compatible graphics context"),
            EngineError::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Parse(err)
    }
}
