//! # Editor Errors

use lantern_common::SceneError;
use thiserror::Error;

/// Errors surfaced by editor commands, the console, and asset editing.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Script error: {0}")]
    Script(#[from] mlua::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown command type: {0}")]
    UnknownCommand(String),
}

impl EditorError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        EditorError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
