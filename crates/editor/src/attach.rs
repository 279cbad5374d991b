//! Add-component flow for scripts: attach an empty, existing, or freshly
//! created script to an entity through undoable commands.

use bevy::prelude::*;
use lantern_common::ScriptScene;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::commands::{run_command, AddScriptCommand, ScriptCommand, SetPropertyCommand};
use crate::error::EditorError;

/// What the new script slot should point at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptChoice {
    /// A slot with no source
    Empty,
    /// A project-relative script path picked from the asset list
    Existing(String),
    /// A script file to create at this absolute path
    New(PathBuf),
}

/// Attach a script to `target`, or to a newly spawned entity when `target` is `None`.
///
/// Returns the entity and the commands that were executed, in order, so the
/// caller can push them onto its undo stack.
pub fn attach_script(
    world: &mut World,
    target: Option<Entity>,
    choice: ScriptChoice,
    project_root: &Path,
) -> Result<(Entity, Vec<ScriptCommand>), EditorError> {
    let source = match choice {
        ScriptChoice::Empty => None,
        ScriptChoice::Existing(path) => Some(path),
        ScriptChoice::New(path) => Some(create_script_file(&path, project_root)?),
    };

    let entity = match target {
        Some(entity) => entity,
        None => world.spawn_empty().id(),
    };
    world.ensure_script_component(entity)?;

    let mut executed = vec![run_command(world, AddScriptCommand::new(entity).into())?];
    if let Some(source) = source {
        let index = world.script_count(entity)? - 1;
        let command = SetPropertyCommand::set_source(world, entity, index, source)?;
        executed.push(run_command(world, command.into())?);
    }
    Ok((entity, executed))
}

/// Create `path` if missing (existing content is kept) and return it relative to the project
fn create_script_file(path: &Path, project_root: &Path) -> Result<String, EditorError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            error!(target: "lantern::asset", "Failed to create {}", path.display());
            EditorError::io(path, e)
        })?;
    Ok(make_relative(path, project_root))
}

fn make_relative(path: &Path, project_root: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
