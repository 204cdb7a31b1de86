//! Heading context types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The set of headings active at a point in document order.
///
/// Maps heading level to heading text. Snapshots are copied, never
/// aliased, when attached to a flattened item, so later heading changes
/// cannot retroactively alter earlier items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSnapshot {
    levels: BTreeMap<u32, String>,
}

impl HeaderSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heading at `level`, dropping all deeper headings.
    ///
    /// A heading at level L closes any sub-tree below it, so entries
    /// with level > L go out of scope.
    pub fn observe(&mut self, level: u32, text: impl Into<String>) {
        self.levels.insert(level, text.into());
        self.levels.retain(|&l, _| l <= level);
    }

    /// Check if no headings are active.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The deepest (numerically largest) active level, or None.
    pub fn deepest_level(&self) -> Option<u32> {
        self.levels.keys().next_back().copied()
    }

    /// Heading texts in level order (title first).
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.levels.values().map(|s| s.as_str())
    }

    /// The full heading path joined with `", "`, e.g. `"Policy, Scope"`.
    pub fn path_line(&self) -> String {
        self.levels
            .values()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}
