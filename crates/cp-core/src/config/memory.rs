//! In-memory settings store

use super::store::{Layers, SettingScope, SettingsStore};
use crate::error::Result;

/// Settings held only for the lifetime of the process
///
/// Useful for embedders that persist settings themselves, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    layers: Layers,
    writes: Vec<(String, String, SettingScope)>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without recording it as a write
    pub fn with(mut self, key: &str, value: &str, scope: SettingScope) -> Self {
        self.layers
            .scope_mut(scope)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Value stored at exactly `scope`, ignoring the other layer
    pub fn get_scoped(&self, key: &str, scope: SettingScope) -> Option<&str> {
        match scope {
            SettingScope::Global => self.layers.global.get(key),
            SettingScope::Folder => self.layers.folder.get(key),
        }
        .map(String::as_str)
    }

    /// Every `set` call in order
    pub fn writes(&self) -> &[(String, String, SettingScope)] {
        &self.writes
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.get(key)
    }

    fn set(&mut self, key: &str, value: &str, scope: SettingScope) -> Result<()> {
        self.layers
            .scope_mut(scope)
            .insert(key.to_string(), value.to_string());
        self.writes
            .push((key.to_string(), value.to_string(), scope));
        Ok(())
    }

    fn unset(&mut self, key: &str, scope: SettingScope) -> Result<()> {
        self.layers.scope_mut(scope).remove(key);
        Ok(())
    }
}
