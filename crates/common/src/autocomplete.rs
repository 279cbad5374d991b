//! # Autocomplete
//!
//! Completion candidates for a partially typed dotted identifier.
//!
//! The query `"foo.bar.ba"` is split at its last `.`: `foo.bar` is walked
//! segment by segment with exact matches, then every child of the node reached
//! whose name starts with `ba` is a candidate. Any miss along the way produces an
//! empty list; there is no error channel.

use crate::namespace::NamespaceNode;

/// Default limit on the number of traversal segments in one query.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Resolves dotted partial identifiers against a namespace.
#[derive(Debug, Clone, Copy)]
pub struct AutocompleteResolver {
    max_depth: usize,
}

impl Default for AutocompleteResolver {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AutocompleteResolver {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sorted candidate names for `query`, starting from `root`.
    pub fn resolve<N: NamespaceNode>(&self, root: &N, query: &str) -> Vec<String> {
        let (head, prefix) = match query.rfind('.') {
            Some(dot) => (Some(&query[..dot]), &query[dot + 1..]),
            None => (None, query),
        };

        let mut current: Option<N> = None;
        if let Some(head) = head {
            for (depth, segment) in head.split('.').enumerate() {
                // Self-referencing tables can make any query walkable;
                // the depth cap keeps pathological input bounded.
                if depth >= self.max_depth {
                    tracing::trace!(target: "lantern::autocomplete", "depth limit hit for '{}'", query);
                    return Vec::new();
                }
                if segment.is_empty() {
                    return Vec::new();
                }
                let next = match &current {
                    Some(node) => node.child(segment),
                    None => root.child(segment),
                };
                match next {
                    Some(node) => current = Some(node),
                    None => return Vec::new(),
                }
            }
        }

        let terminal = current.as_ref().unwrap_or(root);
        let mut candidates: Vec<String> = terminal
            .child_names()
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect();
        candidates.sort();
        candidates
    }
}
