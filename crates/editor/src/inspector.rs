//! # Script Inspector
//!
//! Property-grid model for entities carrying a `ScriptComponent`. The grid
//! widgets themselves belong to the editor shell; this module decides what
//! rows exist for each script and turns widget edits into undoable commands.

use bevy::prelude::*;
use lantern_common::{PropertyKind, PropertyValue, ScriptComponent};
use std::path::Path;

use crate::commands::{
    AddScriptCommand, MoveScriptCommand, RemoveScriptCommand, ScriptCommand, ScriptField,
    SetPropertyCommand,
};
use crate::error::EditorError;

/// Widget used to edit one property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyWidget {
    Checkbox(bool),
    DragFloat(f32),
    EntityPicker(Option<Entity>),
    TextInput(String),
    ResourcePicker { resource_type: String, path: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyField {
    pub name: String,
    pub widget: PropertyWidget,
}

/// Collapsible section for one script in the list
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptSection {
    pub index: usize,
    /// File stem of the source, or the index for a script without one
    pub header: String,
    /// Stable widget id, unaffected by header text
    pub id: String,
    pub source: String,
    pub fields: Vec<PropertyField>,
}

/// User actions on the script inspector
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorAction {
    AddScript,
    RemoveScript(usize),
    MoveUp(usize),
    MoveDown(usize),
    SetSource { index: usize, path: String },
    SetProperty { index: usize, name: String, value: PropertyValue },
}

pub struct ScriptInspector;

impl ScriptInspector {
    /// Sections for every script on `entity`; empty when it has no script component
    pub fn sections(world: &World, entity: Entity) -> Vec<ScriptSection> {
        let Some(component) = world.get::<ScriptComponent>(entity) else {
            return Vec::new();
        };

        component
            .scripts
            .iter()
            .enumerate()
            .map(|(index, script)| ScriptSection {
                index,
                header: section_header(&script.path, index),
                id: format!("script-{}", index),
                source: script.path.clone(),
                fields: script
                    .properties
                    .iter()
                    .map(|property| PropertyField {
                        name: property.name.clone(),
                        widget: widget_for(&property.kind, &property.value),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Build the command for `action`, capturing current values for undo
    pub fn command_for(
        world: &World,
        entity: Entity,
        action: InspectorAction,
    ) -> Result<ScriptCommand, EditorError> {
        Ok(match action {
            InspectorAction::AddScript => AddScriptCommand::new(entity).into(),
            InspectorAction::RemoveScript(index) => RemoveScriptCommand::new(entity, index).into(),
            InspectorAction::MoveUp(index) => MoveScriptCommand::new(entity, index, true).into(),
            InspectorAction::MoveDown(index) => MoveScriptCommand::new(entity, index, false).into(),
            InspectorAction::SetSource { index, path } => {
                SetPropertyCommand::set_source(world, entity, index, path)?.into()
            }
            InspectorAction::SetProperty { index, name, value } => SetPropertyCommand::new(
                world,
                entity,
                index,
                ScriptField::Property(name),
                value,
            )?
            .into(),
        })
    }
}

fn section_header(path: &str, index: usize) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| index.to_string())
}

fn widget_for(kind: &PropertyKind, value: &PropertyValue) -> PropertyWidget {
    match (kind, value) {
        (PropertyKind::Boolean, PropertyValue::Bool(b)) => PropertyWidget::Checkbox(*b),
        (PropertyKind::Float, PropertyValue::Float(f)) => PropertyWidget::DragFloat(*f),
        (PropertyKind::Entity, PropertyValue::Entity(e)) => PropertyWidget::EntityPicker(*e),
        (PropertyKind::Resource(resource_type), PropertyValue::Resource(path)) => {
            PropertyWidget::ResourcePicker {
                resource_type: resource_type.clone(),
                path: path.clone(),
            }
        }
        // String and untyped properties edit as text
        (_, value) => PropertyWidget::TextInput(value.to_string()),
    }
}
