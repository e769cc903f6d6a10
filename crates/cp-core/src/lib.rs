//! cp-core - Create numbered solution files from templates
//!
//! A workspace keeps its templates in a `.cp/` directory, named
//! `template-<name>.<extension>`. One of them is the default template; each
//! "new file" action copies it byte for byte into the workspace root as the
//! first free `{prefix}-{n}.{extension}`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template scanning, template creation and numbered copies
//! - **Layer 2: Workflow Orchestration** - `Workbench` running user actions against a `Host`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based host (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based terminal host
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use cp_core::{templates, MemorySettingsStore, SettingsStore};
//!
//! let names = templates::scan_templates(&workspace.join(".cp")).await?;
//! let created = templates::materialize(&template, &workspace, "sol").await?;
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod templates;
pub mod workbench;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{FileSettingsStore, MemorySettingsStore, SettingScope, SettingsStore};
pub use error::{CpError, MaterializeError, Result};
pub use host::{Editor, Host, Notifier, Prompter, WorkspaceProvider};
pub use templates::{materialize, scan_templates, TEMPLATE_DIR};
pub use workbench::{Action, Outcome, Workbench, NEW_TEMPLATE_OPTION};

#[cfg(feature = "tui")]
pub use tui::TerminalHost;
