//! Settings store trait and key definitions

use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Absolute path of the template used by `new`
pub const DEFAULT_TEMPLATE_KEY: &str = "cp.defaultTemplate";

/// Prefix of generated file names (`{prefix}-{n}.{ext}`)
pub const FILE_NAME_PREFIX_KEY: &str = "cp.fileNamePrefix";

/// Used when `cp.fileNamePrefix` is unset or blank
pub const DEFAULT_FILE_NAME_PREFIX: &str = "sol";

/// Where a setting is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingScope {
    /// User-wide, shared by every workspace
    Global,
    /// Only the current workspace folder
    Folder,
}

impl fmt::Display for SettingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingScope::Global => write!(f, "global"),
            SettingScope::Folder => write!(f, "folder"),
        }
    }
}

/// Read/write access to settings
///
/// Lookups resolve the folder scope first, then the global scope.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str, scope: SettingScope) -> Result<()>;

    /// Remove `key` from `scope`; removing an absent key is a no-op
    fn unset(&mut self, key: &str, scope: SettingScope) -> Result<()>;

    /// The configured template, if any
    fn default_template(&self) -> Option<PathBuf> {
        self.get(DEFAULT_TEMPLATE_KEY)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }

    /// The generated file name prefix, falling back to [`DEFAULT_FILE_NAME_PREFIX`]
    fn file_name_prefix(&self) -> String {
        self.get(FILE_NAME_PREFIX_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME_PREFIX.to_string())
    }

    fn set_default_template(&mut self, path: &Path, scope: SettingScope) -> Result<()> {
        self.set(DEFAULT_TEMPLATE_KEY, &path.to_string_lossy(), scope)
    }
}

/// Global and folder key/value maps with folder-first lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Layers {
    pub global: BTreeMap<String, String>,
    pub folder: BTreeMap<String, String>,
}

impl Layers {
    pub fn get(&self, key: &str) -> Option<String> {
        self.folder
            .get(key)
            .or_else(|| self.global.get(key))
            .cloned()
    }

    pub fn scope_mut(&mut self, scope: SettingScope) -> &mut BTreeMap<String, String> {
        match scope {
            SettingScope::Global => &mut self.global,
            SettingScope::Folder => &mut self.folder,
        }
    }
}
