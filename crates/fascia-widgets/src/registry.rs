//! Widget registry for looking up descriptors by name.
//!
//! Built once at startup, before the server accepts work, and shared
//! read-only afterwards. Registration has no failure path: a duplicate name
//! simply replaces the earlier descriptor.

use std::collections::HashMap;

use crate::descriptor::WidgetDescriptor;

/// A registry of widget descriptors.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    /// Descriptors by name (lowercase)
    widgets: HashMap<String, WidgetDescriptor>,
}

impl WidgetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget descriptor.
    pub fn register(&mut self, descriptor: WidgetDescriptor) {
        // Store by lowercase name for case-insensitive lookup
        self.widgets
            .insert(descriptor.name.to_lowercase(), descriptor);
    }

    /// Look up a widget by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&WidgetDescriptor> {
        self.widgets.get(&name.to_lowercase())
    }

    /// Check if a widget is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.widgets.contains_key(&name.to_lowercase())
    }

    /// Get all registered widget names.
    pub fn names(&self) -> Vec<&str> {
        self.widgets.values().map(|w| w.name.as_str()).collect()
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
