//! # Script Component
//!
//! Per-entity script lists as the editor sees them. Each entity carrying a
//! [`ScriptComponent`] owns an ordered list of script instances; each instance
//! points at a source file and holds the editable properties the runtime has
//! reflected from it.
//!
//! [`ScriptScene`] is the set of list and property operations the editor
//! commands are built from.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

// ============================================================================
// Properties
// ============================================================================

/// Declared type of a script property, which selects its editor widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    Boolean,
    Float,
    Entity,
    String,
    /// A resource reference; the payload is the resource type name.
    Resource(String),
    /// Not yet typed by the runtime. Accepts any value.
    Any,
}

impl PropertyKind {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Boolean => "boolean",
            PropertyKind::Float => "float",
            PropertyKind::Entity => "entity",
            PropertyKind::String => "string",
            PropertyKind::Resource(_) => "resource",
            PropertyKind::Any => "any",
        }
    }

    /// Whether a value of this shape may be stored in a property of this kind.
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        matches!(
            (self, value),
            (PropertyKind::Any, _)
                | (PropertyKind::Boolean, PropertyValue::Bool(_))
                | (PropertyKind::Float, PropertyValue::Float(_))
                | (PropertyKind::Entity, PropertyValue::Entity(_))
                | (PropertyKind::String, PropertyValue::Text(_))
                | (PropertyKind::Resource(_), PropertyValue::Resource(_))
        )
    }
}

/// Current value of a script property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Float(f32),
    Entity(Option<Entity>),
    Text(String),
    /// Path of the referenced resource; empty when unset.
    Resource(String),
}

impl PropertyValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "boolean",
            PropertyValue::Float(_) => "float",
            PropertyValue::Entity(_) => "entity",
            PropertyValue::Text(_) => "string",
            PropertyValue::Resource(_) => "resource",
        }
    }

    /// Default value for a freshly declared property of `kind`.
    pub fn default_for(kind: &PropertyKind) -> Self {
        match kind {
            PropertyKind::Boolean => PropertyValue::Bool(false),
            PropertyKind::Float => PropertyValue::Float(0.0),
            PropertyKind::Entity => PropertyValue::Entity(None),
            PropertyKind::String | PropertyKind::Any => PropertyValue::Text(String::new()),
            PropertyKind::Resource(_) => PropertyValue::Resource(String::new()),
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Float(v) => write!(f, "{:.5}", v),
            PropertyValue::Entity(Some(e)) => write!(f, "{}", e.to_bits()),
            PropertyValue::Entity(None) => write!(f, "none"),
            PropertyValue::Text(s) | PropertyValue::Resource(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptProperty {
    pub name: String,
    pub kind: PropertyKind,
    pub value: PropertyValue,
}

// ============================================================================
// Script instances
// ============================================================================

/// One script attached to an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptInstance {
    /// Project-relative source path; empty for a script with no source yet.
    pub path: String,
    pub properties: Vec<ScriptProperty>,
}

impl ScriptInstance {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            properties: Vec::new(),
        }
    }

    /// Declare a property with the default value for its kind. Redeclaring an
    /// existing name updates its kind and keeps a compatible value.
    pub fn declare_property(&mut self, name: impl Into<String>, kind: PropertyKind) -> &mut Self {
        let name = name.into();
        if let Some(existing) = self.properties.iter_mut().find(|p| p.name == name) {
            if !kind.accepts(&existing.value) {
                existing.value = PropertyValue::default_for(&kind);
            }
            existing.kind = kind;
        } else {
            let value = PropertyValue::default_for(&kind);
            self.properties.push(ScriptProperty { name, kind, value });
        }
        self
    }

    pub fn property(&self, name: &str) -> Option<&ScriptProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut ScriptProperty> {
        self.properties.iter_mut().find(|p| p.name == name)
    }
}

/// Ordered script list of one entity.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptComponent {
    pub scripts: Vec<ScriptInstance>,
}

impl ScriptComponent {
    fn script(&self, index: usize) -> Result<&ScriptInstance, SceneError> {
        let count = self.scripts.len();
        self.scripts
            .get(index)
            .ok_or(SceneError::ScriptIndexOutOfRange { index, count })
    }

    fn script_mut(&mut self, index: usize) -> Result<&mut ScriptInstance, SceneError> {
        let count = self.scripts.len();
        self.scripts
            .get_mut(index)
            .ok_or(SceneError::ScriptIndexOutOfRange { index, count })
    }
}

// ============================================================================
// World operations
// ============================================================================

/// Script-list and property operations on entities with a [`ScriptComponent`].
pub trait ScriptScene {
    fn script_count(&self, entity: Entity) -> Result<usize, SceneError>;

    /// Insert an empty `ScriptComponent` unless one exists. Returns whether it was added.
    fn ensure_script_component(&mut self, entity: Entity) -> Result<bool, SceneError>;

    /// Append an empty script and return its index.
    fn add_script(&mut self, entity: Entity) -> Result<usize, SceneError>;

    /// Insert `script` at `index`, shifting later scripts down.
    fn insert_script(
        &mut self,
        entity: Entity,
        index: usize,
        script: ScriptInstance,
    ) -> Result<(), SceneError>;

    /// Remove the script at `index`, keeping the order of the others.
    fn remove_script(&mut self, entity: Entity, index: usize) -> Result<ScriptInstance, SceneError>;

    /// Swap the script at `index` with its neighbour. Returns `false` when the
    /// script is already first (`up`) or last (`!up`).
    fn move_script(&mut self, entity: Entity, index: usize, up: bool) -> Result<bool, SceneError>;

    fn script_snapshot(&self, entity: Entity, index: usize) -> Result<ScriptInstance, SceneError>;

    /// Replace the script at `index` wholesale.
    fn restore_script(
        &mut self,
        entity: Entity,
        index: usize,
        script: ScriptInstance,
    ) -> Result<(), SceneError>;

    fn script_path(&self, entity: Entity, index: usize) -> Result<String, SceneError>;

    fn set_script_path(
        &mut self,
        entity: Entity,
        index: usize,
        path: impl Into<String>,
    ) -> Result<(), SceneError>;

    fn property_value(
        &self,
        entity: Entity,
        index: usize,
        name: &str,
    ) -> Result<PropertyValue, SceneError>;

    fn set_property_value(
        &mut self,
        entity: Entity,
        index: usize,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), SceneError>;
}

fn component(world: &World, entity: Entity) -> Result<&ScriptComponent, SceneError> {
    world
        .get::<ScriptComponent>(entity)
        .ok_or(SceneError::MissingComponent(entity))
}

fn component_mut(world: &mut World, entity: Entity) -> Result<Mut<'_, ScriptComponent>, SceneError> {
    world
        .get_mut::<ScriptComponent>(entity)
        .ok_or(SceneError::MissingComponent(entity))
}

impl ScriptScene for World {
    fn script_count(&self, entity: Entity) -> Result<usize, SceneError> {
        Ok(component(self, entity)?.scripts.len())
    }

    fn ensure_script_component(&mut self, entity: Entity) -> Result<bool, SceneError> {
        let mut entity_mut = self
            .get_entity_mut(entity)
            .map_err(|_| SceneError::NoSuchEntity(entity))?;
        if entity_mut.contains::<ScriptComponent>() {
            return Ok(false);
        }
        entity_mut.insert(ScriptComponent::default());
        Ok(true)
    }

    fn add_script(&mut self, entity: Entity) -> Result<usize, SceneError> {
        let mut scripts = component_mut(self, entity)?;
        scripts.scripts.push(ScriptInstance::default());
        Ok(scripts.scripts.len() - 1)
    }

    fn insert_script(
        &mut self,
        entity: Entity,
        index: usize,
        script: ScriptInstance,
    ) -> Result<(), SceneError> {
        let mut scripts = component_mut(self, entity)?;
        let count = scripts.scripts.len();
        if index > count {
            return Err(SceneError::ScriptIndexOutOfRange { index, count });
        }
        scripts.scripts.insert(index, script);
        Ok(())
    }

    fn remove_script(&mut self, entity: Entity, index: usize) -> Result<ScriptInstance, SceneError> {
        let mut scripts = component_mut(self, entity)?;
        let count = scripts.scripts.len();
        if index >= count {
            return Err(SceneError::ScriptIndexOutOfRange { index, count });
        }
        Ok(scripts.scripts.remove(index))
    }

    fn move_script(&mut self, entity: Entity, index: usize, up: bool) -> Result<bool, SceneError> {
        let mut scripts = component_mut(self, entity)?;
        let count = scripts.scripts.len();
        if index >= count {
            return Err(SceneError::ScriptIndexOutOfRange { index, count });
        }
        let other = if up {
            match index.checked_sub(1) {
                Some(other) => other,
                None => return Ok(false),
            }
        } else {
            if index + 1 >= count {
                return Ok(false);
            }
            index + 1
        };
        scripts.scripts.swap(index, other);
        Ok(true)
    }

    fn script_snapshot(&self, entity: Entity, index: usize) -> Result<ScriptInstance, SceneError> {
        component(self, entity)?.script(index).cloned()
    }

    fn restore_script(
        &mut self,
        entity: Entity,
        index: usize,
        script: ScriptInstance,
    ) -> Result<(), SceneError> {
        let mut scripts = component_mut(self, entity)?;
        *scripts.script_mut(index)? = script;
        Ok(())
    }

    fn script_path(&self, entity: Entity, index: usize) -> Result<String, SceneError> {
        Ok(component(self, entity)?.script(index)?.path.clone())
    }

    fn set_script_path(
        &mut self,
        entity: Entity,
        index: usize,
        path: impl Into<String>,
    ) -> Result<(), SceneError> {
        let mut scripts = component_mut(self, entity)?;
        scripts.script_mut(index)?.path = path.into();
        Ok(())
    }

    fn property_value(
        &self,
        entity: Entity,
        index: usize,
        name: &str,
    ) -> Result<PropertyValue, SceneError> {
        component(self, entity)?
            .script(index)?
            .property(name)
            .map(|p| p.value.clone())
            .ok_or_else(|| SceneError::PropertyNotFound(name.to_string()))
    }

    fn set_property_value(
        &mut self,
        entity: Entity,
        index: usize,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), SceneError> {
        let mut scripts = component_mut(self, entity)?;
        let property = scripts
            .script_mut(index)?
            .property_mut(name)
            .ok_or_else(|| SceneError::PropertyNotFound(name.to_string()))?;
        if !property.kind.accepts(&value) {
            return Err(SceneError::PropertyTypeMismatch {
                name: name.to_string(),
                expected: property.kind.name(),
                found: value.kind_name(),
            });
        }
        property.value = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_scripts(paths: &[&str]) -> (World, Entity) {
        let mut world = World::new();
        let component = ScriptComponent {
            scripts: paths.iter().map(|p| ScriptInstance::with_path(*p)).collect(),
        };
        let entity = world.spawn(component).id();
        (world, entity)
    }

    fn paths(world: &World, entity: Entity) -> Vec<String> {
        world
            .get::<ScriptComponent>(entity)
            .unwrap()
            .scripts
            .iter()
            .map(|s| s.path.clone())
            .collect()
    }

    #[test]
    fn test_ensure_script_component() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        assert_eq!(world.ensure_script_component(entity), Ok(true));
        world.add_script(entity).unwrap();
        assert_eq!(world.ensure_script_component(entity), Ok(false));
        assert_eq!(world.script_count(entity), Ok(1));

        world.despawn(entity);
        assert_eq!(
            world.ensure_script_component(entity),
            Err(SceneError::NoSuchEntity(entity))
        );
    }

    #[test]
    fn test_add_and_count() {
        let (mut world, entity) = world_with_scripts(&[]);
        assert_eq!(world.script_count(entity), Ok(0));
        assert_eq!(world.add_script(entity), Ok(0));
        assert_eq!(world.add_script(entity), Ok(1));
        assert_eq!(world.script_count(entity), Ok(2));
    }

    #[test]
    fn test_missing_component() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        assert_eq!(
            world.add_script(entity),
            Err(SceneError::MissingComponent(entity))
        );
    }

    #[test]
    fn test_remove_keeps_order() {
        let (mut world, entity) = world_with_scripts(&["a.lua", "b.lua", "c.lua"]);
        let removed = world.remove_script(entity, 0).unwrap();
        assert_eq!(removed.path, "a.lua");
        assert_eq!(paths(&world, entity), vec!["b.lua", "c.lua"]);

        world.insert_script(entity, 0, removed).unwrap();
        assert_eq!(paths(&world, entity), vec!["a.lua", "b.lua", "c.lua"]);
    }

    #[test]
    fn test_move_at_boundaries_is_noop() {
        let (mut world, entity) = world_with_scripts(&["a.lua", "b.lua"]);
        assert_eq!(world.move_script(entity, 0, true), Ok(false));
        assert_eq!(world.move_script(entity, 1, false), Ok(false));
        assert_eq!(paths(&world, entity), vec!["a.lua", "b.lua"]);

        assert_eq!(world.move_script(entity, 1, true), Ok(true));
        assert_eq!(paths(&world, entity), vec!["b.lua", "a.lua"]);
    }

    #[test]
    fn test_index_out_of_range() {
        let (mut world, entity) = world_with_scripts(&["a.lua"]);
        assert_eq!(
            world.script_path(entity, 3),
            Err(SceneError::ScriptIndexOutOfRange { index: 3, count: 1 })
        );
        assert!(world.insert_script(entity, 2, ScriptInstance::default()).is_err());
        assert!(world.insert_script(entity, 1, ScriptInstance::default()).is_ok());
    }

    #[test]
    fn test_property_kind_is_enforced() {
        let (mut world, entity) = world_with_scripts(&["player.lua"]);
        world
            .get_mut::<ScriptComponent>(entity)
            .unwrap()
            .scripts[0]
            .declare_property("speed", PropertyKind::Float)
            .declare_property("label", PropertyKind::Any);

        world
            .set_property_value(entity, 0, "speed", PropertyValue::Float(4.5))
            .unwrap();
        assert_eq!(
            world.property_value(entity, 0, "speed"),
            Ok(PropertyValue::Float(4.5))
        );

        let err = world
            .set_property_value(entity, 0, "speed", PropertyValue::Bool(true))
            .unwrap_err();
        assert!(matches!(err, SceneError::PropertyTypeMismatch { .. }));

        world
            .set_property_value(entity, 0, "label", PropertyValue::Bool(true))
            .unwrap();
        assert_eq!(
            world.property_value(entity, 0, "missing"),
            Err(SceneError::PropertyNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_redeclare_resets_incompatible_value() {
        let mut script = ScriptInstance::with_path("door.lua");
        script.declare_property("open", PropertyKind::Boolean);
        script.property_mut("open").unwrap().value = PropertyValue::Bool(true);

        script.declare_property("open", PropertyKind::Boolean);
        assert_eq!(script.property("open").unwrap().value, PropertyValue::Bool(true));

        script.declare_property("open", PropertyKind::Float);
        assert_eq!(script.property("open").unwrap().value, PropertyValue::Float(0.0));
        assert_eq!(script.properties.len(), 1);
    }
}
