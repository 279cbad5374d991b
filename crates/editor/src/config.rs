//! # Script Editor Configuration
//!
//! Settings for completion, the script console, and script asset handling.
//! Stored as TOML next to the project (`lantern-editor.toml` by default).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use lantern_common::DEFAULT_MAX_DEPTH;

use crate::error::EditorError;

pub const DEFAULT_CONFIG_FILE: &str = "lantern-editor.toml";

// ============================================================================
// Script Editor Config
// ============================================================================

/// Script editor configuration
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptEditorConfig {
    pub completion: CompletionConfig,
    pub console: ConsoleConfig,
    pub assets: AssetConfig,
}

impl ScriptEditorConfig {
    /// Load from file or create default
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(target: "lantern::config", "Ignoring {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

/// Console autocomplete limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Maximum number of dotted segments walked per query
    pub max_depth: usize,
    /// Longest query (in bytes) taken from before the cursor
    pub max_query_len: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_query_len: 127,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Chunk name reported in script error messages
    pub chunk_name: String,
    pub open_on_start: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            chunk_name: "console".to_string(),
            open_on_start: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Extensions (without the dot) handled as script sources
    pub extensions: Vec<String>,
    /// Resource type name given to script sources
    pub resource_type: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["lua".to_string(), "luau".to_string()],
            resource_type: "script".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ScriptEditorConfig = toml::from_str(
            r#"
            [completion]
            max_depth = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.completion.max_depth, 8);
        assert_eq!(config.completion.max_query_len, 127);
        assert_eq!(config.console, ConsoleConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let mut config = ScriptEditorConfig::default();
        config.console.open_on_start = true;
        config.assets.extensions.push("script".to_string());
        config.save(&path).unwrap();

        assert_eq!(ScriptEditorConfig::load_or_default(&path), config);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert_eq!(
            ScriptEditorConfig::load_or_default(&missing),
            ScriptEditorConfig::default()
        );

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "completion = 3").unwrap();
        assert!(matches!(
            ScriptEditorConfig::load(&broken),
            Err(EditorError::Config(_))
        ));
        assert_eq!(
            ScriptEditorConfig::load_or_default(&broken),
            ScriptEditorConfig::default()
        );
    }
}
