//! Script component commands for undo/redo
//!
//! Every edit the inspector, console, or add-component menu makes to a script
//! list goes through a [`ScriptCommand`]. The host editor owns the undo stack;
//! commands only know how to apply and revert themselves and how to round-trip
//! through JSON under their type name.

pub mod property_command;
pub mod script_commands;

pub use property_command::{ScriptField, SetPropertyCommand};
pub use script_commands::{AddScriptCommand, MoveScriptCommand, RemoveScriptCommand};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Type names commands are registered under
pub const COMMAND_TYPES: [&str; 4] = [
    "add_script",
    "remove_script",
    "move_script",
    "set_script_property",
];

/// Represents any script command that can be undone/redone
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScriptCommand {
    #[serde(rename = "add_script")]
    Add(AddScriptCommand),
    #[serde(rename = "remove_script")]
    Remove(RemoveScriptCommand),
    #[serde(rename = "move_script")]
    Move(MoveScriptCommand),
    #[serde(rename = "set_script_property")]
    SetProperty(SetPropertyCommand),
}

impl ScriptCommand {
    pub fn execute(&mut self, world: &mut World) -> Result<(), EditorError> {
        match self {
            ScriptCommand::Add(cmd) => cmd.execute(world),
            ScriptCommand::Remove(cmd) => cmd.execute(world),
            ScriptCommand::Move(cmd) => cmd.execute(world),
            ScriptCommand::SetProperty(cmd) => cmd.execute(world),
        }
    }

    pub fn undo(&mut self, world: &mut World) -> Result<(), EditorError> {
        match self {
            ScriptCommand::Add(cmd) => cmd.undo(world),
            ScriptCommand::Remove(cmd) => cmd.undo(world),
            ScriptCommand::Move(cmd) => cmd.undo(world),
            ScriptCommand::SetProperty(cmd) => cmd.undo(world),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptCommand::Add(_) => COMMAND_TYPES[0],
            ScriptCommand::Remove(_) => COMMAND_TYPES[1],
            ScriptCommand::Move(_) => COMMAND_TYPES[2],
            ScriptCommand::SetProperty(_) => COMMAND_TYPES[3],
        }
    }

    pub fn description(&self) -> String {
        match self {
            ScriptCommand::Add(cmd) => cmd.description(),
            ScriptCommand::Remove(cmd) => cmd.description(),
            ScriptCommand::Move(cmd) => cmd.description(),
            ScriptCommand::SetProperty(cmd) => cmd.description(),
        }
    }

    /// Fold `other` into this command if both edit the same script field.
    /// Returns whether the merge happened.
    pub fn merge(&mut self, other: &ScriptCommand) -> bool {
        match (self, other) {
            (ScriptCommand::SetProperty(cmd), ScriptCommand::SetProperty(next))
                if cmd.can_merge(next) =>
            {
                cmd.merge(next);
                true
            }
            _ => false,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, EditorError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a command from its JSON form, e.g. when replaying a session
    pub fn from_json(value: serde_json::Value) -> Result<Self, EditorError> {
        let type_name = value
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        if !COMMAND_TYPES.contains(&type_name.as_str()) {
            return Err(EditorError::UnknownCommand(type_name));
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl From<AddScriptCommand> for ScriptCommand {
    fn from(cmd: AddScriptCommand) -> Self {
        ScriptCommand::Add(cmd)
    }
}

impl From<RemoveScriptCommand> for ScriptCommand {
    fn from(cmd: RemoveScriptCommand) -> Self {
        ScriptCommand::Remove(cmd)
    }
}

impl From<MoveScriptCommand> for ScriptCommand {
    fn from(cmd: MoveScriptCommand) -> Self {
        ScriptCommand::Move(cmd)
    }
}

impl From<SetPropertyCommand> for ScriptCommand {
    fn from(cmd: SetPropertyCommand) -> Self {
        ScriptCommand::SetProperty(cmd)
    }
}

/// Execute `command` against `world`, logging failures
pub fn run_command(world: &mut World, mut command: ScriptCommand) -> Result<ScriptCommand, EditorError> {
    match command.execute(world) {
        Ok(()) => {
            tracing::debug!(target: "lantern::commands", "{} ({})", command.description(), command.type_name());
            Ok(command)
        }
        Err(e) => {
            tracing::error!(target: "lantern::commands", "{} failed: {}", command.description(), e);
            Err(e)
        }
    }
}
