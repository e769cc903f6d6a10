//! Template discovery and creation inside a workspace's `.cp/` directory

use super::TEMPLATE_DIR;
use crate::error::{CpError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;

/// `template-<name>.<extension>`, case-insensitive
static TEMPLATE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^template-.+\..+$").expect("template name pattern is a valid regex")
});

/// Check whether a file name follows the template naming format
pub fn is_template_name(name: &str) -> bool {
    TEMPLATE_NAME.is_match(name) && !name.chars().any(std::path::is_separator)
}

/// List the template files directly inside `dir`
///
/// Names are returned in directory enumeration order, which differs between
/// platforms. A missing directory is reported as [`CpError::NotFound`].
pub async fn scan_templates(dir: &Path) -> Result<Vec<String>> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| CpError::io(dir, e))?;

    let mut templates = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| CpError::io(dir, e))? {
        let file_name = entry.file_name();
        // Non UTF-8 names can never match the pattern
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if is_template_name(name) {
            templates.push(name.to_string());
        }
    }

    Ok(templates)
}

/// Create an empty template file named `name` in `dir`
///
/// An existing file with the same name is truncated.
pub async fn create_template_file(dir: &Path, name: &str) -> Result<PathBuf> {
    if !is_template_name(name) {
        return Err(CpError::Validation(name.to_string()));
    }

    let path = dir.join(name);
    fs::write(&path, b"")
        .await
        .map_err(|e| CpError::io(&path, e))?;

    Ok(path)
}

/// Create `<root>/.cp` if needed and return its path
pub async fn ensure_template_dir(root: &Path) -> Result<PathBuf> {
    let dir = root.join(TEMPLATE_DIR);
    fs::create_dir_all(&dir)
        .await
        .map_err(|e| CpError::io(&dir, e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_name_matching() {
        assert!(is_template_name("template-a.cpp"));
        assert!(is_template_name("Template-B.PY"));
        assert!(is_template_name("TEMPLATE-main.tar.gz"));

        assert!(!is_template_name("foo.txt"));
        assert!(!is_template_name("x.cpp"));
        assert!(!is_template_name("template-.cpp"));
        assert!(!is_template_name("template-cpp"));
        assert!(!is_template_name("template-a."));
        assert!(!is_template_name("my-template-a.cpp"));
        assert!(!is_template_name("template-a/b.cpp"));
    }

    #[tokio::test]
    async fn test_scan_filters_by_name() {
        let dir = TempDir::new().unwrap();
        for name in ["template-a.cpp", "foo.txt", "Template-B.PY", "settings.yaml"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }

        let mut found = scan_templates(dir.path()).await.unwrap();
        // Enumeration order is platform dependent
        found.sort();
        assert_eq!(found, vec!["Template-B.PY", "template-a.cpp"]);
    }

    #[tokio::test]
    async fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(scan_templates(dir.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join(".cp");

        let err = scan_templates(&missing).await.unwrap_err();
        assert!(matches!(err, CpError::NotFound(p) if p == missing));
    }

    #[tokio::test]
    async fn test_create_template_file() {
        let dir = TempDir::new().unwrap();

        let path = create_template_file(dir.path(), "template-x.cpp").await.unwrap();
        assert_eq!(path, dir.path().join("template-x.cpp"));
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[tokio::test]
    async fn test_create_template_file_truncates_existing() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("template-x.cpp");
        std::fs::write(&existing, "int main() {}").unwrap();

        create_template_file(dir.path(), "template-x.cpp").await.unwrap();
        assert_eq!(std::fs::read(&existing).unwrap(), b"");
    }

    #[tokio::test]
    async fn test_create_template_file_rejects_bad_name() {
        let dir = TempDir::new().unwrap();

        let err = create_template_file(dir.path(), "x.cpp").await.unwrap_err();
        assert!(matches!(err, CpError::Validation(ref n) if n == "x.cpp"));
        assert!(!dir.path().join("x.cpp").exists());
    }

    #[tokio::test]
    async fn test_ensure_template_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();

        let first = ensure_template_dir(dir.path()).await.unwrap();
        let second = ensure_template_dir(dir.path()).await.unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
        assert!(first.ends_with(TEMPLATE_DIR));
    }
}
