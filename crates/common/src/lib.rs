//! # Lantern Common
//!
//! Shared types for the Lantern script component and its editor tooling.
//!
//! ## Modules
//!
//! - `autocomplete`: dotted-path completion over a live script namespace
//! - `namespace`: read-only namespace adapters (Luau tables, JSON snapshots)
//! - `script`: `ScriptComponent` data and `World` script-list operations
//! - `error`: scene error types

pub mod autocomplete;
pub mod error;
pub mod namespace;
pub mod script;

pub use autocomplete::{AutocompleteResolver, DEFAULT_MAX_DEPTH};
pub use error::SceneError;
pub use namespace::{LuaNamespace, NamespaceNode};
pub use script::{
    PropertyKind, PropertyValue, ScriptComponent, ScriptInstance, ScriptProperty, ScriptScene,
};
