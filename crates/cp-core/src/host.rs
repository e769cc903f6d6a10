//! Host collaborator traits
//!
//! The workbench never talks to a terminal, an editor or the process
//! environment directly. Whatever embeds it (the `cp-tools` binary, an editor
//! plugin, a test) supplies these collaborators.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Blocking, user-cancellable prompts
///
/// Both methods return `Ok(None)` when the user cancels. Cancelling is never
/// an error.
pub trait Prompter {
    /// Ask for a line of free text
    fn ask_text(&mut self, placeholder: &str) -> Result<Option<String>>;

    /// Ask the user to pick one of `options`
    fn ask_choice(&mut self, options: &[String]) -> Result<Option<String>>;
}

/// Opens a file for the user to edit
pub trait Editor {
    fn open_for_editing(&mut self, path: &Path);
}

/// Fire-and-forget user notifications
pub trait Notifier {
    fn report_error(&mut self, message: &str);
}

/// Resolves the open workspace folder
///
/// Only a single root is supported. Hosts with several open folders must pick
/// one (or return `None`) themselves.
pub trait WorkspaceProvider {
    fn current_workspace_folder(&self) -> Option<PathBuf>;
}

/// Everything the workbench needs from its environment
pub trait Host: Prompter + Editor + Notifier + WorkspaceProvider {}

impl<T> Host for T where T: Prompter + Editor + Notifier + WorkspaceProvider {}
