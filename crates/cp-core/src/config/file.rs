//! YAML-backed settings store
//!
//! Global settings live in `$CP_SETTINGS_HOME/settings.yaml` (or
//! `~/.config/cp-tools/settings.yaml`); folder settings live next to the
//! templates in `<workspace>/.cp/settings.yaml`. Both files are flat
//! `key: value` maps.

use super::store::{Layers, SettingScope, SettingsStore};
use crate::error::{CpError, Result};
use crate::templates::TEMPLATE_DIR;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name used for both scopes
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Environment variable overriding the global settings directory
pub const SETTINGS_HOME_ENV: &str = "CP_SETTINGS_HOME";

/// Settings persisted as YAML files, one per scope
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    global_path: PathBuf,
    folder_path: Option<PathBuf>,
    layers: Layers,
}

impl FileSettingsStore {
    /// Load settings from explicit file locations
    ///
    /// Missing files are treated as empty.
    pub fn open(global_path: PathBuf, folder_path: Option<PathBuf>) -> Result<Self> {
        let global = load(&global_path)?;
        let folder = match &folder_path {
            Some(path) => load(path)?,
            None => BTreeMap::new(),
        };

        Ok(Self {
            global_path,
            folder_path,
            layers: Layers { global, folder },
        })
    }

    /// Load the global settings plus, when a workspace is open, its folder settings
    pub fn for_workspace(workspace: Option<&Path>) -> Result<Self> {
        let global_path = global_settings_path().ok_or_else(|| CpError::Settings {
            path: PathBuf::from("$HOME"),
            message: format!("neither {} nor HOME is set", SETTINGS_HOME_ENV),
        })?;
        let folder_path = workspace.map(|root| root.join(TEMPLATE_DIR).join(SETTINGS_FILE));
        Self::open(global_path, folder_path)
    }

    pub fn global_path(&self) -> &Path {
        &self.global_path
    }

    pub fn folder_path(&self) -> Option<&Path> {
        self.folder_path.as_deref()
    }

    fn path_for(&self, scope: SettingScope) -> Result<&Path> {
        match scope {
            SettingScope::Global => Ok(&self.global_path),
            SettingScope::Folder => self.folder_path.as_deref().ok_or(CpError::NoWorkspace),
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.get(key)
    }

    fn set(&mut self, key: &str, value: &str, scope: SettingScope) -> Result<()> {
        let path = self.path_for(scope)?.to_path_buf();

        let mut updated = self.layers.scope_mut(scope).clone();
        updated.insert(key.to_string(), value.to_string());
        save(&path, &updated)?;

        *self.layers.scope_mut(scope) = updated;
        Ok(())
    }

    fn unset(&mut self, key: &str, scope: SettingScope) -> Result<()> {
        if !self.layers.scope_mut(scope).contains_key(key) {
            return Ok(());
        }
        let path = self.path_for(scope)?.to_path_buf();

        let mut updated = self.layers.scope_mut(scope).clone();
        updated.remove(key);
        save(&path, &updated)?;

        *self.layers.scope_mut(scope) = updated;
        Ok(())
    }
}

/// Resolve the global settings file from the environment
pub fn global_settings_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(SETTINGS_HOME_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir).join(SETTINGS_FILE));
    }

    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("cp-tools")
                .join(SETTINGS_FILE)
        })
}

fn load(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(CpError::io(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_yaml::from_str(&content).map_err(|e| CpError::Settings {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn save(path: &Path, values: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CpError::io(parent, e))?;
    }

    let content = serde_yaml::to_string(values).map_err(|e| CpError::Settings {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, content).map_err(|e| CpError::io(path, e))
}
