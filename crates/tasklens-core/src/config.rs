//! Read-only configuration lookup.
//!
//! Configuration is injected as a capability rather than read from a
//! process-wide singleton; components that need settings take a
//! `&dyn ConfigLookup` (or a generic bound) explicitly.

use std::collections::BTreeMap;

/// Read-only access to configuration settings.
pub trait ConfigLookup {
    /// Returns the value for `key`, or `None` when unset.
    fn get(&self, key: &str) -> Option<String>;
}

/// An in-memory configuration backed by a map.
///
/// Useful for tests and for embedding when settings come from somewhere
/// other than a configuration file.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    entries: BTreeMap<String, String>,
}

impl MapConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl ConfigLookup for MapConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
