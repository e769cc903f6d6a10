//! Error types for template and workspace operations

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while copying a template into a new numbered file
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// `cp.defaultTemplate` is unset or blank
    #[error("Please configure template file path.")]
    NoTemplateConfigured,

    /// `cp.defaultTemplate` points at a file that no longer exists
    #[error("Please configure template file path. ({} does not exist)", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Please open a folder to use cp-tools.")]
    NoWorkspace,

    /// `cp.fileNamePrefix` would place the file outside the target directory
    #[error("File name prefix '{0}' must not contain path separators.")]
    InvalidPrefix(String),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Library-wide error type
#[derive(Debug, Error)]
pub enum CpError {
    /// A template name that does not follow `template-<name>.<extension>`
    #[error("Please follow the naming format for template: template-<name>.<extension> (got '{0}').")]
    Validation(String),

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Please open a folder to use cp-tools.")]
    NoWorkspace,

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The terminal could not show a prompt
    #[error("Prompt failed: {0}")]
    Prompt(#[source] io::Error),

    #[error("Invalid settings file {}: {message}", .path.display())]
    Settings { path: PathBuf, message: String },
}

impl CpError {
    /// Attach a path to an I/O error, folding `NotFound` into its own variant
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            CpError::NotFound(path.to_path_buf())
        } else {
            CpError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

impl MaterializeError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        MaterializeError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T, E = CpError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_io_error_is_folded() {
        let err = CpError::io(
            Path::new("/missing/.cp"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, CpError::NotFound(ref p) if p == Path::new("/missing/.cp")));
    }

    #[test]
    fn test_other_io_errors_keep_their_source() {
        let err = CpError::io(
            Path::new("/locked"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, CpError::Io { .. }));
        assert!(err.to_string().contains("/locked"));
    }

    #[test]
    fn test_unconfigured_template_message() {
        let err: CpError = MaterializeError::NoTemplateConfigured.into();
        assert_eq!(err.to_string(), "Please configure template file path.");
    }
}
