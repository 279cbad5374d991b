//! # Script Editor Plugin
//!
//! Registers the script editor resources and messages with a Bevy `App`.

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use std::path::PathBuf;
use tracing::{error, info};

use crate::commands::{run_command, ScriptCommand};
use crate::config::{ScriptEditorConfig, DEFAULT_CONFIG_FILE};
use crate::console::ScriptConsole;

// ============================================================================
// Messages
// ============================================================================

/// Request to apply a script command to the world
#[derive(Message, Debug, Clone)]
pub struct ExecuteScriptCommand(pub ScriptCommand);

/// A command that was applied; the host pushes it onto its undo stack
#[derive(Message, Debug, Clone)]
pub struct ScriptCommandExecuted(pub ScriptCommand);

/// Show or hide the script console
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ToggleScriptConsole;

// ============================================================================
// Plugin
// ============================================================================

pub struct ScriptEditorPlugin {
    pub config_path: PathBuf,
}

impl Default for ScriptEditorPlugin {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }
}

impl Plugin for ScriptEditorPlugin {
    fn build(&self, app: &mut App) {
        info!(target: "lantern::plugin", "Registering script editor ({})", self.config_path.display());
        let config = ScriptEditorConfig::load_or_default(&self.config_path);

        match ScriptConsole::new(&config) {
            Ok(console) => {
                app.insert_resource(console);
            }
            Err(e) => error!(target: "lantern::plugin", "Script console unavailable: {}", e),
        }

        app.insert_resource(config)
            .add_message::<ExecuteScriptCommand>()
            .add_message::<ScriptCommandExecuted>()
            .add_message::<ToggleScriptConsole>()
            .add_systems(Update, (apply_script_commands, toggle_script_console));
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Run queued script commands and report the ones that succeeded
fn apply_script_commands(world: &mut World) {
    let pending: Vec<ScriptCommand> =
        match world.get_resource_mut::<Messages<ExecuteScriptCommand>>() {
            Some(mut queued) => queued.drain().map(|message| message.0).collect(),
            None => return,
        };

    for command in pending {
        // Failures are logged by run_command
        if let Ok(executed) = run_command(world, command) {
            world.write_message(ScriptCommandExecuted(executed));
        }
    }
}

fn toggle_script_console(
    mut toggles: MessageReader<ToggleScriptConsole>,
    console: Option<ResMut<ScriptConsole>>,
) {
    let Some(mut console) = console else {
        toggles.clear();
        return;
    };
    for _ in toggles.read() {
        console.toggle();
    }
}
