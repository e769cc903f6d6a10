//! Charm-style terminal host using cliclack

use crate::error::{CpError, Result};
use crate::host::{Editor, Notifier, Prompter, WorkspaceProvider};
use crate::templates::TEMPLATE_DIR;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable naming the workspace root
pub const WORKSPACE_ENV: &str = "CP_WORKSPACE";

/// Host backed by the current terminal
#[derive(Debug, Clone)]
pub struct TerminalHost {
    workspace: Option<PathBuf>,
}

impl TerminalHost {
    pub fn new(workspace: Option<PathBuf>) -> Self {
        Self { workspace }
    }

    /// Host for the workspace found by [`discover_workspace`]
    pub fn detect(explicit: Option<PathBuf>) -> Self {
        Self::new(discover_workspace(explicit))
    }
}

/// Resolve the workspace root
///
/// Order: `explicit`, then `CP_WORKSPACE`, then the nearest ancestor of the
/// current directory that contains a `.cp/` directory.
pub fn discover_workspace(explicit: Option<PathBuf>) -> Option<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let configured = explicit.or_else(|| {
        std::env::var_os(WORKSPACE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    if let Some(dir) = configured {
        return Some(if dir.is_absolute() {
            dir
        } else {
            current_dir.join(dir)
        });
    }

    current_dir
        .ancestors()
        .find(|dir| dir.join(TEMPLATE_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Map a cliclack result, treating Esc / Ctrl+C as a cancelled prompt
fn cancellable<T>(result: io::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(CpError::Prompt(e)),
    }
}

/// `$VISUAL` or `$EDITOR`, split into program and arguments
fn editor_command() -> Option<(String, Vec<String>)> {
    ["VISUAL", "EDITOR"].iter().find_map(|var| {
        let value = std::env::var(var).ok()?;
        let mut parts = value.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some((program, parts.collect()))
    })
}

impl Prompter for TerminalHost {
    fn ask_text(&mut self, placeholder: &str) -> Result<Option<String>> {
        let answer: Option<String> = cancellable(
            cliclack::input("Template file name")
                .placeholder(placeholder)
                .required(false)
                .interact(),
        )?;

        Ok(answer.filter(|a| !a.is_empty()))
    }

    fn ask_choice(&mut self, options: &[String]) -> Result<Option<String>> {
        if options.is_empty() {
            return Ok(None);
        }

        let mut select = cliclack::select("Select a template");
        for option in options {
            select = select.item(option.clone(), option, "");
        }

        cancellable(select.interact())
    }
}

impl Editor for TerminalHost {
    fn open_for_editing(&mut self, path: &Path) {
        let result = match editor_command() {
            Some((program, args)) => Command::new(&program)
                .args(&args)
                .arg(path)
                .status()
                .and_then(|status| {
                    if status.success() {
                        Ok(())
                    } else {
                        Err(io::Error::other(format!("{} exited with {}", program, status)))
                    }
                }),
            None => open::that(path),
        };

        if let Err(e) = result {
            let message = format!("Could not open {}: {}", path.display(), e);
            if cliclack::log::warning(&message).is_err() {
                eprintln!("{}", message);
            }
        }
    }
}

impl Notifier for TerminalHost {
    fn report_error(&mut self, message: &str) {
        if cliclack::log::error(message).is_err() {
            eprintln!("Error: {}", message);
        }
    }
}

impl WorkspaceProvider for TerminalHost {
    fn current_workspace_folder(&self) -> Option<PathBuf> {
        self.workspace.clone()
    }
}
