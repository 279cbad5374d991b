//! End-to-end: script defined in the console, completed, attached to an
//! entity, edited through the inspector, and undone.

use bevy::prelude::*;
use lantern_common::{PropertyKind, PropertyValue, ScriptComponent, ScriptScene};
use lantern_editor::{
    attach_script, InspectorAction, PopupKey, ScriptChoice, ScriptCommand, ScriptConsole,
    ScriptEditorConfig, ScriptInspector,
};
use std::path::Path;

#[test]
fn test_console_completion_of_nested_tables() {
    let mut console = ScriptConsole::new(&ScriptEditorConfig::default()).unwrap();
    console
        .execute("game = { workspace = { door = {}, dome = {} }, lighting = {} }")
        .unwrap();

    console.input.set_text("local d = game.workspace.do");
    assert_eq!(console.complete(), 2);
    assert_eq!(console.input.popup.candidates, vec!["dome", "door"]);

    console.input.popup.open_if_requested();
    console.input.popup.handle_key(PopupKey::Down);
    console.input.popup.handle_key(PopupKey::Enter);
    assert!(console.input.apply_pending_insert());
    assert_eq!(console.input.text(), "local d = game.workspace.door");

    console.execute_buffer().unwrap();
}

#[test]
fn test_self_referential_globals_terminate() {
    let mut console = ScriptConsole::new(&ScriptEditorConfig::default()).unwrap();
    console.execute("a = { b = 1 } a.self = a").unwrap();

    console.input.set_text("a.self.self.self.b");
    assert_eq!(console.complete(), 1);
    assert_eq!(console.input.popup.candidates, vec!["b"]);
}

#[test]
fn test_attach_edit_and_undo() {
    let mut world = World::new();
    let (entity, mut history) = attach_script(
        &mut world,
        None,
        ScriptChoice::Existing("scripts/door.lua".into()),
        Path::new("/project"),
    )
    .unwrap();

    // Properties come from the script runtime; declare one by hand here
    world
        .get_mut::<ScriptComponent>(entity)
        .unwrap()
        .scripts[0]
        .declare_property("speed", PropertyKind::Float);

    let mut edit = ScriptInspector::command_for(
        &world,
        entity,
        InspectorAction::SetProperty {
            index: 0,
            name: "speed".into(),
            value: PropertyValue::Float(2.5),
        },
    )
    .unwrap();
    edit.execute(&mut world).unwrap();
    history.push(edit);

    let section = &ScriptInspector::sections(&world, entity)[0];
    assert_eq!(section.header, "door");
    assert_eq!(
        world.property_value(entity, 0, "speed").unwrap(),
        PropertyValue::Float(2.5)
    );

    // Commands survive a trip through their JSON form
    let saved: Vec<serde_json::Value> = history.iter().map(|c| c.to_json().unwrap()).collect();
    let restored: Vec<ScriptCommand> = saved
        .into_iter()
        .map(|v| ScriptCommand::from_json(v).unwrap())
        .collect();
    assert_eq!(restored.len(), 3);

    for command in history.iter_mut().rev() {
        command.undo(&mut world).unwrap();
    }
    assert_eq!(world.script_count(entity).unwrap(), 0);
}
