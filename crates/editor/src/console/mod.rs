//! # Script Console
//!
//! Interactive Luau console docked in the editor. Runs snippets or whole
//! files against the console's Luau state and completes dotted paths from its
//! global namespace.

pub mod input;

pub use input::{CompletionPopup, ConsoleInput, PopupKey};

use bevy::prelude::*;
use lantern_common::{AutocompleteResolver, LuaNamespace};
use mlua::{Function, Lua, Value, Variadic};
use std::path::Path;
use tracing::{debug, error, info};

use crate::config::ScriptEditorConfig;
use crate::error::EditorError;

/// Console window state and the Luau state it evaluates in
#[derive(Resource)]
pub struct ScriptConsole {
    lua: Lua,
    pub input: ConsoleInput,
    open: bool,
    chunk_name: String,
    resolver: AutocompleteResolver,
    max_query_len: usize,
}

impl ScriptConsole {
    pub fn new(config: &ScriptEditorConfig) -> Result<Self, EditorError> {
        Self::with_lua(Lua::new(), config)
    }

    /// Wrap an existing Luau state, routing its `print` into the editor log
    pub fn with_lua(lua: Lua, config: &ScriptEditorConfig) -> Result<Self, EditorError> {
        install_print(&lua)?;
        Ok(Self {
            lua,
            input: ConsoleInput::new(),
            open: config.console.open_on_start,
            chunk_name: config.console.chunk_name.clone(),
            resolver: AutocompleteResolver::new(config.completion.max_depth),
            max_query_len: config.completion.max_query_len,
        })
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        if !self.open {
            self.input.popup.close();
        }
    }

    /// Run a chunk of Luau source
    pub fn execute(&self, source: &str) -> Result<(), EditorError> {
        self.lua
            .load(source)
            .set_name(self.chunk_name.as_str())
            .exec()
            .map_err(|e| {
                error!(target: "lantern::console", "{}", e);
                EditorError::from(e)
            })
    }

    /// Run whatever is in the input buffer
    pub fn execute_buffer(&self) -> Result<(), EditorError> {
        self.execute(self.input.text())
    }

    pub fn execute_file(&self, path: &Path) -> Result<(), EditorError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            error!(target: "lantern::console", "Failed to open file {}", path.display());
            EditorError::io(path, e)
        })?;
        self.lua
            .load(source.as_str())
            .set_name(format!("@{}", path.display()))
            .exec()
            .map_err(|e| {
                error!(target: "lantern::console", "{}", e);
                EditorError::from(e)
            })
    }

    /// Resolve the path before the cursor against the Luau globals and hand
    /// the candidates to the popup. Returns the candidate count.
    pub fn complete(&mut self) -> usize {
        let query = self.input.completion_query(self.max_query_len).to_string();
        let globals = LuaNamespace::globals(&self.lua);
        let candidates = self.resolver.resolve(&globals, &query);
        debug!(target: "lantern::console", "'{}' -> {} candidates", query, candidates.len());

        let count = candidates.len();
        self.input.popup.set_candidates(candidates);
        count
    }
}

fn install_print(lua: &Lua) -> Result<(), EditorError> {
    let tostring: Function = lua.globals().get("tostring")?;
    let print = lua.create_function(move |_, args: Variadic<Value>| {
        let mut parts = Vec::with_capacity(args.len());
        for value in args.iter() {
            let text: String = tostring.call(value.clone())?;
            parts.push(text);
        }
        info!(target: "lantern::console", "{}", parts.join("\t"));
        Ok(())
    })?;
    lua.globals().set("print", print)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn console() -> ScriptConsole {
        ScriptConsole::new(&ScriptEditorConfig::default()).unwrap()
    }

    #[test]
    fn test_execute_defines_globals() {
        let console = console();
        console.execute("answer = 40 + 2").unwrap();
        let answer: i64 = console.lua().globals().get("answer").unwrap();
        assert_eq!(answer, 42);
    }

    #[test]
    fn test_execute_reports_errors() {
        let console = console();
        assert!(matches!(
            console.execute("this is not luau"),
            Err(EditorError::Script(_))
        ));
        assert!(matches!(
            console.execute("error('boom')"),
            Err(EditorError::Script(_))
        ));
    }

    #[test]
    fn test_print_is_captured() {
        let console = console();
        console.execute("print('hello', 1, nil, true)").unwrap();
    }

    #[test]
    fn test_execute_file() {
        let console = console();
        let mut file = tempfile::Builder::new().suffix(".lua").tempfile().unwrap();
        writeln!(file, "from_file = 'yes'").unwrap();

        console.execute_file(file.path()).unwrap();
        let value: String = console.lua().globals().get("from_file").unwrap();
        assert_eq!(value, "yes");
    }

    #[test]
    fn test_execute_missing_file() {
        let console = console();
        let dir = tempfile::tempdir().unwrap();
        let result = console.execute_file(&dir.path().join("missing.lua"));
        assert!(matches!(result, Err(EditorError::Io { .. })));
    }

    #[test]
    fn test_complete_against_globals() {
        let mut console = console();
        console.execute("a = { b = 1, bc = 2 } x = 3").unwrap();

        console.input.set_text("print(a.b");
        assert_eq!(console.complete(), 2);
        assert_eq!(console.input.popup.candidates, vec!["b", "bc"]);
        assert!(console.input.popup.open_if_requested());

        console.input.popup.handle_key(PopupKey::Down);
        console.input.popup.handle_key(PopupKey::Enter);
        assert!(console.input.apply_pending_insert());
        assert_eq!(console.input.text(), "print(a.bc");
    }

    #[test]
    fn test_complete_unknown_path() {
        let mut console = console();
        console.input.set_text("z.b");
        assert_eq!(console.complete(), 0);
        assert!(!console.input.popup.open_if_requested());
    }

    #[test]
    fn test_toggle() {
        let mut console = console();
        assert!(!console.is_open());
        console.toggle();
        assert!(console.is_open());
    }
}
