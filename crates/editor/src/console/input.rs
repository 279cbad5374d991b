//! Console text buffer and the completion popup state
//!
//! The buffer cursor is a byte offset. Completion only ever looks at ASCII
//! word characters and `.`, so the offsets it computes always sit on char
//! boundaries.

/// Keys the completion popup reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Candidate list shown under the cursor after a completion request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionPopup {
    pub candidates: Vec<String>,
    pub selected: usize,
    /// Set when a resolution produced candidates; cleared once the popup opens
    pub open_requested: bool,
    /// Candidate chosen for insertion, consumed by [`ConsoleInput::apply_pending_insert`]
    pub pending_insert: Option<String>,
    open: bool,
}

impl CompletionPopup {
    /// Replace the candidate list with a fresh resolution
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.selected = 0;
        self.pending_insert = None;
        self.open_requested = !candidates.is_empty();
        self.candidates = candidates;
        if !self.open_requested {
            self.open = false;
        }
    }

    /// Open the popup if a resolution asked for it
    pub fn open_if_requested(&mut self) -> bool {
        if self.open_requested {
            self.open = true;
            self.open_requested = false;
        }
        // A lone candidate needs no choosing
        if self.open && self.candidates.len() == 1 {
            self.pending_insert = Some(self.candidates[0].clone());
        }
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
        self.open_requested = false;
    }

    pub fn handle_key(&mut self, key: PopupKey) {
        if !self.open {
            return;
        }
        match key {
            PopupKey::Up => self.selected = self.selected.saturating_sub(1),
            PopupKey::Down => self.selected += 1,
            PopupKey::Enter => {
                self.clamp_selection();
                self.pending_insert = self.candidates.get(self.selected).cloned();
            }
            PopupKey::Escape => self.close(),
        }
        self.clamp_selection();
    }

    /// Click on a candidate row
    pub fn select(&mut self, index: usize) {
        if let Some(candidate) = self.candidates.get(index) {
            self.selected = index;
            self.pending_insert = Some(candidate.clone());
        }
    }

    pub fn selected_candidate(&self) -> Option<&str> {
        self.candidates.get(self.selected).map(String::as_str)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.candidates.len().saturating_sub(1));
    }
}

/// Console input buffer with cursor and its completion popup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleInput {
    buffer: String,
    cursor: usize,
    pub popup: CompletionPopup,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the buffer, leaving the cursor at the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    /// Move the cursor, clamped to the buffer and snapped back to a char boundary
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.buffer.len());
        while !self.buffer.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    pub fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.popup.close();
    }

    /// The dotted path being typed before the cursor, e.g. `math.fl` in `x = math.fl`.
    /// At most `max_len` bytes are taken, counted from the start of the path.
    pub fn completion_query(&self, max_len: usize) -> &str {
        let start = self.word_start(|c| is_word_char(c) || c == b'.');
        let end = self.cursor.min(start + max_len);
        &self.buffer[start..end]
    }

    /// Insert the rest of the pending candidate after the typed part of the
    /// last segment. Returns whether anything was inserted.
    pub fn apply_pending_insert(&mut self) -> bool {
        let Some(candidate) = self.popup.pending_insert.take() else {
            return false;
        };
        let typed = self.cursor - self.word_start(is_word_char);
        self.popup.close();

        match candidate.get(typed..) {
            Some(rest) if !rest.is_empty() => {
                self.insert_str(rest);
                true
            }
            _ => false,
        }
    }

    fn word_start(&self, accept: impl Fn(u8) -> bool) -> usize {
        let bytes = self.buffer.as_bytes();
        let mut start = self.cursor;
        while start > 0 && accept(bytes[start - 1]) {
            start -= 1;
        }
        start
    }
}

fn is_word_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> ConsoleInput {
        let mut input = ConsoleInput::new();
        input.set_text(text);
        input
    }

    #[test]
    fn test_completion_query_walks_back_to_path_start() {
        assert_eq!(input("x = math.fl").completion_query(127), "math.fl");
        assert_eq!(input("print(a.b.").completion_query(127), "a.b.");
        assert_eq!(input("foo ").completion_query(127), "");
        assert_eq!(input("").completion_query(127), "");
    }

    #[test]
    fn test_completion_query_uses_cursor_position() {
        let mut console = input("game.Work + 1");
        console.set_cursor(9);
        assert_eq!(console.completion_query(127), "game.Work");
    }

    #[test]
    fn test_completion_query_truncated() {
        let long = "a".repeat(300);
        assert_eq!(input(&long).completion_query(127).len(), 127);
    }

    #[test]
    fn test_set_cursor_snaps_to_char_boundary() {
        let mut console = input("é");
        console.set_cursor(1);
        assert_eq!(console.cursor(), 0);
        console.set_cursor(99);
        assert_eq!(console.cursor(), 2);
    }

    #[test]
    fn test_popup_keys_clamp_selection() {
        let mut popup = CompletionPopup::default();
        popup.set_candidates(vec!["b".into(), "bc".into(), "bd".into()]);
        assert!(popup.open_if_requested());
        assert_eq!(popup.selected, 0);

        popup.handle_key(PopupKey::Up);
        assert_eq!(popup.selected, 0);
        for _ in 0..5 {
            popup.handle_key(PopupKey::Down);
        }
        assert_eq!(popup.selected, 2);

        popup.handle_key(PopupKey::Enter);
        assert_eq!(popup.pending_insert.as_deref(), Some("bd"));

        popup.handle_key(PopupKey::Escape);
        assert!(!popup.is_open());
    }

    #[test]
    fn test_new_resolution_resets_selection() {
        let mut popup = CompletionPopup::default();
        popup.set_candidates(vec!["a".into(), "b".into()]);
        popup.open_if_requested();
        popup.handle_key(PopupKey::Down);
        assert_eq!(popup.selected, 1);

        popup.set_candidates(vec!["c".into(), "d".into()]);
        assert_eq!(popup.selected, 0);
        assert_eq!(popup.selected_candidate(), Some("c"));
    }

    #[test]
    fn test_empty_resolution_does_not_open() {
        let mut popup = CompletionPopup::default();
        popup.set_candidates(Vec::new());
        assert!(!popup.open_if_requested());
    }

    #[test]
    fn test_single_candidate_auto_inserts() {
        let mut console = input("str");
        console.popup.set_candidates(vec!["string".into()]);
        console.popup.open_if_requested();

        assert!(console.apply_pending_insert());
        assert_eq!(console.text(), "string");
        assert!(!console.popup.is_open());
    }

    #[test]
    fn test_insert_after_typed_segment() {
        let mut console = input("print(a.b) -- a.b");
        console.set_cursor(9);
        console.popup.set_candidates(vec!["b".into(), "bc".into()]);
        console.popup.open_if_requested();
        console.popup.select(1);

        assert!(console.apply_pending_insert());
        assert_eq!(console.text(), "print(a.bc) -- a.b");
        assert_eq!(console.cursor(), 10);
    }

    #[test]
    fn test_insert_after_trailing_dot() {
        let mut console = input("a.");
        console.popup.set_candidates(vec!["b".into(), "bc".into()]);
        console.popup.open_if_requested();
        console.popup.handle_key(PopupKey::Enter);

        assert!(console.apply_pending_insert());
        assert_eq!(console.text(), "a.b");
    }

    #[test]
    fn test_nothing_pending_nothing_inserted() {
        let mut console = input("abc");
        assert!(!console.apply_pending_insert());
        assert_eq!(console.text(), "abc");
    }
}
