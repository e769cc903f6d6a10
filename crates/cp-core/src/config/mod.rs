//! Settings storage
//!
//! Two keys drive the workbench: `cp.defaultTemplate` and `cp.fileNamePrefix`.
//! They live in a [`SettingsStore`] that callers pass around explicitly.

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;
pub use store::{
    SettingScope, SettingsStore, DEFAULT_FILE_NAME_PREFIX, DEFAULT_TEMPLATE_KEY,
    FILE_NAME_PREFIX_KEY,
};
