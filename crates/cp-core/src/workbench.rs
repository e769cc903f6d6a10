//! User actions: configure a template, create a template, open a new file
//!
//! The [`Workbench`] owns the host collaborators and the settings store and
//! runs one action to completion per call. Errors are returned to the caller;
//! [`Workbench::report`] turns them into a single notification.

use crate::config::{SettingScope, SettingsStore, DEFAULT_TEMPLATE_KEY};
use crate::error::{CpError, MaterializeError, Result};
use crate::host::Host;
use crate::templates::{self, TEMPLATE_DIR};
use std::path::{Path, PathBuf};

/// Extra entry appended to the template picker
pub const NEW_TEMPLATE_OPTION: &str = "New Template Configuration...";

/// Placeholder shown when asking for a new template's file name
pub const TEMPLATE_NAME_PLACEHOLDER: &str =
    "Please enter the template file name. (Eg: template-<filename>.<extension>)";

/// What the user asked for in the template picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateNew,
    Select(String),
}

impl Action {
    pub fn from_choice(choice: &str) -> Self {
        if choice == NEW_TEMPLATE_OPTION {
            Action::CreateNew
        } else {
            Action::Select(choice.to_string())
        }
    }
}

/// Result of a completed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user dismissed a prompt; nothing changed
    Cancelled,
    Initialized(PathBuf),
    TemplateCreated(PathBuf),
    TemplateSelected(PathBuf),
    FileCreated(PathBuf),
}

pub struct Workbench<H, S> {
    host: H,
    settings: S,
}

impl<H: Host, S: SettingsStore> Workbench<H, S> {
    pub fn new(host: H, settings: S) -> Self {
        Self { host, settings }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn into_parts(self) -> (H, S) {
        (self.host, self.settings)
    }

    /// The open workspace folder
    pub fn workspace_root(&self) -> Result<PathBuf> {
        self.host
            .current_workspace_folder()
            .ok_or(CpError::NoWorkspace)
    }

    /// `<workspace>/.cp`
    pub fn template_dir(&self) -> Result<PathBuf> {
        Ok(self.workspace_root()?.join(TEMPLATE_DIR))
    }

    /// Create the template directory in the workspace
    pub async fn init(&mut self) -> Result<Outcome> {
        let root = self.workspace_root()?;
        let dir = templates::ensure_template_dir(&root).await?;
        Ok(Outcome::Initialized(dir))
    }

    pub async fn list_templates(&self) -> Result<Vec<String>> {
        let dir = self.template_dir()?;
        templates::scan_templates(&dir).await
    }

    /// Let the user pick a template, or create a new one
    pub async fn configure_template(&mut self) -> Result<Outcome> {
        let candidates = self.list_templates().await?;

        let mut options = candidates.clone();
        options.push(NEW_TEMPLATE_OPTION.to_string());

        match self.host.ask_choice(&options)? {
            Some(choice) => self.select_template(&candidates, &choice).await,
            None => Ok(Outcome::Cancelled),
        }
    }

    /// Apply a choice made from `candidates` plus the "new template" entry
    ///
    /// A selected template is stored at folder scope.
    pub async fn select_template(&mut self, candidates: &[String], choice: &str) -> Result<Outcome> {
        let dir = self.template_dir()?;

        match Action::from_choice(choice) {
            Action::CreateNew => {
                let answer = self.host.ask_text(TEMPLATE_NAME_PLACEHOLDER)?;
                self.create_template(&dir, answer.as_deref()).await
            }
            Action::Select(name) => {
                let path = dir.join(&name);
                if !candidates.contains(&name) {
                    return Err(CpError::NotFound(path));
                }

                self.settings
                    .set_default_template(&path, SettingScope::Folder)?;
                Ok(Outcome::TemplateSelected(path))
            }
        }
    }

    /// Create an empty template in `dir`, open it, and make it the default
    ///
    /// `None` or an empty name means the prompt was dismissed; any other input
    /// is validated as typed. The new template is stored at global scope and
    /// any folder-scoped default is cleared so the new template takes effect.
    pub async fn create_template(&mut self, dir: &Path, proposed: Option<&str>) -> Result<Outcome> {
        let name = match proposed {
            None | Some("") => return Ok(Outcome::Cancelled),
            Some(name) => name,
        };

        let path = templates::create_template_file(dir, name).await?;
        self.host.open_for_editing(&path);
        self.settings
            .set_default_template(&path, SettingScope::Global)?;
        self.settings
            .unset(DEFAULT_TEMPLATE_KEY, SettingScope::Folder)?;

        Ok(Outcome::TemplateCreated(path))
    }

    /// Copy the configured template into the next free numbered file
    ///
    /// `prefix` overrides `cp.fileNamePrefix` when given and non-blank.
    pub async fn open_new_file(&mut self, prefix: Option<&str>) -> Result<Outcome> {
        let root = self
            .host
            .current_workspace_folder()
            .ok_or(MaterializeError::NoWorkspace)?;
        let template = self
            .settings
            .default_template()
            .ok_or(MaterializeError::NoTemplateConfigured)?;

        let prefix = prefix
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.file_name_prefix());

        let path = templates::materialize(&template, &root, &prefix).await?;
        self.host.open_for_editing(&path);

        Ok(Outcome::FileCreated(path))
    }

    /// Report an error to the user exactly once
    pub fn report<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.host.report_error(&e.to_string());
                None
            }
        }
    }
}
