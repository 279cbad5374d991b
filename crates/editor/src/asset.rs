//! # Script Asset Editor
//!
//! Asset browser hook for script sources: recognises script files, keeps an
//! edit buffer for the selected script, and writes it back on save.

use std::path::Path;
use tracing::warn;

use crate::config::AssetConfig;
use crate::error::EditorError;

/// Edit buffer for the script selected in the asset browser
#[derive(Debug, Clone, Default)]
pub struct ScriptAssetEditor {
    config: AssetConfig,
    buffer: String,
}

impl ScriptAssetEditor {
    pub fn new(config: AssetConfig) -> Self {
        Self {
            config,
            buffer: String::new(),
        }
    }

    fn is_script_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.config
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Whether the browser should list a file with `extension` under `resource_type`
    pub fn accepts_extension(&self, extension: &str, resource_type: &str) -> bool {
        resource_type == self.config.resource_type && self.is_script_extension(extension)
    }

    pub fn resource_type_for_extension(&self, extension: &str) -> Option<&str> {
        self.is_script_extension(extension)
            .then_some(self.config.resource_type.as_str())
    }

    /// Buffer for editing `source`. The source is copied in only when the
    /// buffer is empty, so edits survive while the same script stays selected.
    pub fn edit(&mut self, source: &str) -> &mut String {
        if self.buffer.is_empty() {
            self.buffer.push_str(source);
        }
        &mut self.buffer
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn on_resource_unloaded(&mut self) {
        self.buffer.clear();
    }

    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        std::fs::write(path, &self.buffer).map_err(|e| {
            warn!(target: "lantern::asset", "Could not save {}", path.display());
            EditorError::io(path, e)
        })
    }

    pub fn open_in_external_editor(&self, path: &Path) -> Result<(), EditorError> {
        open::that(path).map_err(|e| {
            warn!(target: "lantern::asset", "Failed to open {} externally: {}", path.display(), e);
            EditorError::io(path, e)
        })
    }
}
