//! # Scene Errors
//!
//! Error types for script component operations on the `World`.

use bevy::prelude::Entity;
use thiserror::Error;

/// Failures of script-list and property operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Entity {0:?} does not exist")]
    NoSuchEntity(Entity),

    #[error("Entity {0:?} has no script component")]
    MissingComponent(Entity),

    #[error("Script index {index} out of range ({count} scripts)")]
    ScriptIndexOutOfRange { index: usize, count: usize },

    #[error("Property '{0}' not found")]
    PropertyNotFound(String),

    #[error("Property '{name}' expects {expected}, got {found}")]
    PropertyTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
