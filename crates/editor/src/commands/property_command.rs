//! Property Command - Undo/Redo for script source and property edits

use bevy::prelude::*;
use lantern_common::{PropertyValue, SceneError, ScriptScene};
use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Which part of a script an edit targets
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptField {
    /// The script's source path
    Source,
    /// A named script property
    Property(String),
}

impl std::fmt::Display for ScriptField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptField::Source => write!(f, "source"),
            ScriptField::Property(name) => write!(f, "{}", name),
        }
    }
}

/// Command for changing a script's source or one of its properties
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetPropertyCommand {
    #[serde(rename = "component")]
    pub entity: Entity,
    pub script_index: usize,
    #[serde(rename = "property")]
    pub field: ScriptField,
    pub value: PropertyValue,
    pub old_value: PropertyValue,
}

impl SetPropertyCommand {
    /// Create a new edit, reading the current value from `world` as the undo value
    pub fn new(
        world: &World,
        entity: Entity,
        script_index: usize,
        field: ScriptField,
        value: PropertyValue,
    ) -> Result<Self, EditorError> {
        let old_value = read_field(world, entity, script_index, &field)?;
        Ok(Self {
            entity,
            script_index,
            field,
            value,
            old_value,
        })
    }

    /// Shorthand for pointing a script at a new source file
    pub fn set_source(
        world: &World,
        entity: Entity,
        script_index: usize,
        path: impl Into<String>,
    ) -> Result<Self, EditorError> {
        Self::new(
            world,
            entity,
            script_index,
            ScriptField::Source,
            PropertyValue::Resource(path.into()),
        )
    }

    pub fn description(&self) -> String {
        format!("Change {}", self.field)
    }

    /// Execute the command (apply new value)
    pub fn execute(&self, world: &mut World) -> Result<(), EditorError> {
        write_field(world, self.entity, self.script_index, &self.field, self.value.clone())
    }

    /// Undo the command (restore old value)
    pub fn undo(&self, world: &mut World) -> Result<(), EditorError> {
        write_field(world, self.entity, self.script_index, &self.field, self.old_value.clone())
    }

    /// Check if this command can be merged with another
    pub fn can_merge(&self, other: &SetPropertyCommand) -> bool {
        self.entity == other.entity
            && self.script_index == other.script_index
            && self.field == other.field
    }

    /// Merge with another command (used for continuous edits like drags)
    pub fn merge(&mut self, other: &SetPropertyCommand) {
        // Keep old_value from first command, value from last command
        self.value = other.value.clone();
    }
}

fn read_field(
    world: &World,
    entity: Entity,
    index: usize,
    field: &ScriptField,
) -> Result<PropertyValue, EditorError> {
    Ok(match field {
        ScriptField::Source => PropertyValue::Resource(world.script_path(entity, index)?),
        ScriptField::Property(name) => world.property_value(entity, index, name)?,
    })
}

fn write_field(
    world: &mut World,
    entity: Entity,
    index: usize,
    field: &ScriptField,
    value: PropertyValue,
) -> Result<(), EditorError> {
    match field {
        ScriptField::Source => {
            let path = match value {
                PropertyValue::Resource(path) | PropertyValue::Text(path) => path,
                other => {
                    return Err(SceneError::PropertyTypeMismatch {
                        name: "source".to_string(),
                        expected: "resource",
                        found: other.kind_name(),
                    }
                    .into())
                }
            };
            world.set_script_path(entity, index, path)?;
        }
        ScriptField::Property(name) => world.set_property_value(entity, index, name, value)?,
    }
    Ok(())
}
