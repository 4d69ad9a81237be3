//! Display type table.
//!
//! Maps display-type ids (e.g. "slideshow", "line") to human-readable labels
//! for configuration UIs. The table is advisory: a section may declare any
//! display type, registered or not.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display type every section falls back to when its own is unsupported.
pub const FALLBACK_DISPLAY_TYPE: &str = "traditional";

/// Registry of display-type labels, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayTypeTable {
    types: HashMap<String, String>,
}

impl DisplayTypeTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display type, replacing any existing label.
    pub fn register(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.types.insert(id.into(), label.into());
    }

    /// Remove a display type. Absent ids are ignored.
    pub fn unregister(&mut self, id: &str) -> Option<String> {
        self.types.remove(id)
    }

    /// All registered display types.
    pub fn list(&self) -> &HashMap<String, String> {
        &self.types
    }

    /// Display types sorted by id, for populating a selection UI.
    pub fn choices(&self) -> Vec<(&str, &str)> {
        let mut choices: Vec<_> = self
            .types
            .iter()
            .map(|(id, label)| (id.as_str(), label.as_str()))
            .collect();
        choices.sort_unstable_by_key(|(id, _)| *id);
        choices
    }

    /// Look up the label of a display type.
    pub fn label(&self, id: &str) -> Option<&str> {
        self.types.get(id).map(String::as_str)
    }

    /// Check whether a display type is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Return the number of registered display types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
