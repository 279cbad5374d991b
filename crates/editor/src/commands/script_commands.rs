//! Script List Commands - Add, Remove, Move

use bevy::prelude::*;
use lantern_common::{ScriptInstance, ScriptScene};
use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Command to append an empty script to an entity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddScriptCommand {
    #[serde(rename = "component")]
    pub entity: Entity,
    /// Index the script landed at; recomputed on every execute
    #[serde(skip)]
    pub index: Option<usize>,
}

impl AddScriptCommand {
    pub fn new(entity: Entity) -> Self {
        Self { entity, index: None }
    }

    pub fn description(&self) -> String {
        "Add script".to_string()
    }

    pub fn execute(&mut self, world: &mut World) -> Result<(), EditorError> {
        self.index = Some(world.add_script(self.entity)?);
        Ok(())
    }

    pub fn undo(&mut self, world: &mut World) -> Result<(), EditorError> {
        if let Some(index) = self.index.take() {
            world.remove_script(self.entity, index)?;
        }
        Ok(())
    }
}

/// Command to remove a script; the removed instance is kept for undo
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoveScriptCommand {
    #[serde(rename = "component")]
    pub entity: Entity,
    #[serde(rename = "scr_index")]
    pub index: usize,
    #[serde(skip)]
    pub removed: Option<ScriptInstance>,
}

impl RemoveScriptCommand {
    pub fn new(entity: Entity, index: usize) -> Self {
        Self {
            entity,
            index,
            removed: None,
        }
    }

    pub fn description(&self) -> String {
        format!("Remove script {}", self.index)
    }

    pub fn execute(&mut self, world: &mut World) -> Result<(), EditorError> {
        self.removed = Some(world.remove_script(self.entity, self.index)?);
        Ok(())
    }

    pub fn undo(&mut self, world: &mut World) -> Result<(), EditorError> {
        if let Some(script) = self.removed.take() {
            world.insert_script(self.entity, self.index, script)?;
        }
        Ok(())
    }
}

/// Command to swap a script with its upper or lower neighbour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveScriptCommand {
    #[serde(rename = "component")]
    pub entity: Entity,
    #[serde(rename = "scr_index")]
    pub index: usize,
    pub up: bool,
    /// False when execute hit the end of the list and changed nothing
    #[serde(skip)]
    pub moved: bool,
}

impl MoveScriptCommand {
    pub fn new(entity: Entity, index: usize, up: bool) -> Self {
        Self {
            entity,
            index,
            up,
            moved: false,
        }
    }

    pub fn description(&self) -> String {
        let direction = if self.up { "up" } else { "down" };
        format!("Move script {} {}", self.index, direction)
    }

    pub fn execute(&mut self, world: &mut World) -> Result<(), EditorError> {
        self.moved = world.move_script(self.entity, self.index, self.up)?;
        Ok(())
    }

    pub fn undo(&mut self, world: &mut World) -> Result<(), EditorError> {
        if !self.moved {
            return Ok(());
        }
        // The script now sits at its neighbour's old slot
        let position = if self.up { self.index - 1 } else { self.index + 1 };
        world.move_script(self.entity, position, !self.up)?;
        self.moved = false;
        Ok(())
    }
}
