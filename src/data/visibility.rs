//! Legend-driven show/hide state shared by both charts.

use std::collections::HashMap;

/// Series name → visible. Names never toggled are visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityFilter {
    selection: HashMap<String, bool>,
}

impl VisibilityFilter {
    pub fn is_visible(&self, name: &str) -> bool {
        self.selection.get(name).copied().unwrap_or(true)
    }

    /// Returns `true` when the visibility of `name` changed.
    pub fn set(&mut self, name: &str, visible: bool) -> bool {
        let before = self.is_visible(name);
        self.selection.insert(name.to_string(), visible);
        before != visible
    }

    pub fn show_all(&mut self) {
        self.selection.clear();
    }
}
