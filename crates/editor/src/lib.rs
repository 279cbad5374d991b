//! # Lantern Editor
//!
//! Editor tooling for the Lantern script component.
//!
//! ## Modules
//!
//! - `commands`: undoable add/remove/move/set-property commands over script lists
//! - `inspector`: property-grid rows for scripts and the commands their edits produce
//! - `console`: Luau console with dotted-path completion
//! - `asset`: script source editing for the asset browser
//! - `attach`: add-component flow (empty, existing, or new script)
//! - `config`: TOML-backed editor settings
//! - `plugin`: Bevy plugin wiring resources, messages, and systems

pub mod asset;
pub mod attach;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod inspector;
pub mod plugin;

pub use asset::ScriptAssetEditor;
pub use attach::{attach_script, ScriptChoice};
pub use commands::{
    run_command, AddScriptCommand, MoveScriptCommand, RemoveScriptCommand, ScriptCommand,
    ScriptField, SetPropertyCommand,
};
pub use config::ScriptEditorConfig;
pub use console::{CompletionPopup, ConsoleInput, PopupKey, ScriptConsole};
pub use error::EditorError;
pub use inspector::{InspectorAction, PropertyField, PropertyWidget, ScriptInspector, ScriptSection};
pub use plugin::{ExecuteScriptCommand, ScriptCommandExecuted, ScriptEditorPlugin, ToggleScriptConsole};
