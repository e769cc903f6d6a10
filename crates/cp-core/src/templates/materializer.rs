//! Copy a template into the next free `{prefix}-{n}.{ext}` file

use crate::error::MaterializeError;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Text after the last `.` of the template's file name
///
/// A name without a dot is returned whole, so `templatefile` produces
/// `sol-1.templatefile`.
pub fn template_extension(template: &Path) -> String {
    let name = template
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| template.to_string_lossy().into_owned());

    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => name,
    }
}

/// A prefix is usable when it keeps the generated name inside the target directory
pub fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.chars().any(std::path::is_separator)
}

/// `{prefix}-{n}.{ext}`
pub fn destination_name(prefix: &str, n: usize, ext: &str) -> String {
    format!("{}-{}.{}", prefix, n, ext)
}

/// Find the lowest `n >= start` whose destination does not exist yet
async fn first_free_from(
    target_dir: &Path,
    prefix: &str,
    ext: &str,
    start: usize,
) -> Result<(usize, PathBuf), MaterializeError> {
    let mut n = start;
    loop {
        let candidate = target_dir.join(destination_name(prefix, n, ext));
        let taken = fs::try_exists(&candidate)
            .await
            .map_err(|e| MaterializeError::io(&candidate, e))?;
        if !taken {
            return Ok((n, candidate));
        }
        n += 1;
    }
}

/// Path the next [`materialize`] call would write, without writing it
pub async fn next_available_path(
    target_dir: &Path,
    prefix: &str,
    ext: &str,
) -> Result<PathBuf, MaterializeError> {
    first_free_from(target_dir, prefix, ext, 1)
        .await
        .map(|(_, path)| path)
}

/// Write `content` to `path`, failing if the file already exists
async fn write_new(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(content).await?;
    file.flush().await
}

/// Copy the template's bytes into the first free numbered file in `target_dir`
///
/// Numbering restarts at 1 on every call, so gaps left by deleted files are
/// reused. The file is created exclusively: if another writer grabs the name
/// between the existence check and the write, the scan continues upwards.
pub async fn materialize(
    template: &Path,
    target_dir: &Path,
    prefix: &str,
) -> Result<PathBuf, MaterializeError> {
    if !is_valid_prefix(prefix) {
        return Err(MaterializeError::InvalidPrefix(prefix.to_string()));
    }

    let content = match fs::read(template).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MaterializeError::TemplateMissing(template.to_path_buf()));
        }
        Err(e) => return Err(MaterializeError::io(template, e)),
    };

    let ext = template_extension(template);

    let mut start = 1;
    loop {
        let (n, path) = first_free_from(target_dir, prefix, &ext, start).await?;
        match write_new(&path, &content).await {
            Ok(()) => return Ok(path),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => start = n + 1,
            Err(e) => return Err(MaterializeError::io(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_template(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_extension_after_last_dot() {
        assert_eq!(template_extension(Path::new("/w/.cp/template-a.cpp")), "cpp");
        assert_eq!(template_extension(Path::new("template-main.tar.gz")), "gz");
        assert_eq!(template_extension(Path::new("Template-B.PY")), "PY");
    }

    #[test]
    fn test_extension_without_dot_is_whole_name() {
        // Dots in parent directories are ignored
        assert_eq!(
            template_extension(Path::new("/w/.cp/templatefile")),
            "templatefile"
        );
        assert_eq!(template_extension(Path::new("templatefile")), "templatefile");
    }

    #[test]
    fn test_destination_name() {
        assert_eq!(destination_name("sol", 1, "cpp"), "sol-1.cpp");
        assert_eq!(destination_name("a", 12, "templatefile"), "a-12.templatefile");
    }

    #[tokio::test]
    async fn test_first_file_is_numbered_one() {
        let templates = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let template = write_template(&templates, "template-a.cpp", b"abc");

        let created = materialize(&template, target.path(), "sol").await.unwrap();

        assert_eq!(created, target.path().join("sol-1.cpp"));
        assert_eq!(std::fs::read(&created).unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_skips_existing_files() {
        let templates = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let template = write_template(&templates, "template-a.cpp", b"abc");

        let first = materialize(&template, target.path(), "sol").await.unwrap();
        let second = materialize(&template, target.path(), "sol").await.unwrap();
        assert_eq!(first, target.path().join("sol-1.cpp"));
        assert_eq!(second, target.path().join("sol-2.cpp"));

        for n in 3..=5 {
            std::fs::write(target.path().join(format!("sol-{}.cpp", n)), "").unwrap();
        }
        let sixth = materialize(&template, target.path(), "sol").await.unwrap();
        assert_eq!(sixth, target.path().join("sol-6.cpp"));
    }

    #[tokio::test]
    async fn test_reuses_lowest_gap() {
        let templates = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let template = write_template(&templates, "template-a.cpp", b"abc");

        for n in [1, 3, 4] {
            std::fs::write(target.path().join(format!("sol-{}.cpp", n)), "old").unwrap();
        }

        let created = materialize(&template, target.path(), "sol").await.unwrap();
        assert_eq!(created, target.path().join("sol-2.cpp"));
        // Existing files are left untouched
        assert_eq!(std::fs::read(target.path().join("sol-3.cpp")).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_other_extensions_do_not_collide() {
        let templates = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let template = write_template(&templates, "template-a.py", b"print()");
        std::fs::write(target.path().join("sol-1.cpp"), "").unwrap();

        let created = materialize(&template, target.path(), "sol").await.unwrap();
        assert_eq!(created, target.path().join("sol-1.py"));
    }

    #[tokio::test]
    async fn test_template_without_extension() {
        let templates = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let template = write_template(&templates, "templatefile", b"x");

        let created = materialize(&template, target.path(), "sol").await.unwrap();
        assert_eq!(created, target.path().join("sol-1.templatefile"));
    }

    #[tokio::test]
    async fn test_binary_content_is_copied_verbatim() {
        let templates = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let bytes = [0u8, 0xff, 0xfe, b'\r', b'\n', 0x80];
        let template = write_template(&templates, "template-bin.dat", &bytes);

        let created = materialize(&template, target.path(), "sol").await.unwrap();
        assert_eq!(std::fs::read(created).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_missing_template_writes_nothing() {
        let templates = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let missing = templates.path().join("template-gone.cpp");

        let err = materialize(&missing, target.path(), "sol").await.unwrap_err();

        assert!(matches!(err, MaterializeError::TemplateMissing(ref p) if p == &missing));
        assert_eq!(std::fs::read_dir(target.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_prefix_validation() {
        assert!(is_valid_prefix("sol"));
        assert!(is_valid_prefix("a.b"));
        assert!(!is_valid_prefix("a/b"));
        assert!(!is_valid_prefix("../x"));
    }

    #[tokio::test]
    async fn test_prefix_with_separator_writes_nothing() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("work");
        std::fs::create_dir(&target).unwrap();
        let template = root.path().join("template-a.cpp");
        std::fs::write(&template, "abc").unwrap();

        let err = materialize(&template, &target, "../x").await.unwrap_err();

        assert!(matches!(err, MaterializeError::InvalidPrefix(ref p) if p == "../x"));
        assert!(!root.path().join("x-1.cpp").exists());
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_name_taken_after_existence_check_moves_on() {
        let templates = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let template = write_template(&templates, "template-a.cpp", b"abc");

        // A dangling symlink looks free to the existence check but blocks create_new
        let link = target.path().join("sol-1.cpp");
        std::os::unix::fs::symlink(target.path().join("nowhere"), &link).unwrap();
        assert!(!fs::try_exists(&link).await.unwrap());

        let created = materialize(&template, target.path(), "sol").await.unwrap();

        assert_eq!(created, target.path().join("sol-2.cpp"));
        assert_eq!(std::fs::read(&created).unwrap(), b"abc");
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(!target.path().join("nowhere").exists());
    }

    #[tokio::test]
    async fn test_next_available_path_does_not_write() {
        let target = TempDir::new().unwrap();
        std::fs::write(target.path().join("sol-1.cpp"), "").unwrap();

        let next = next_available_path(target.path(), "sol", "cpp").await.unwrap();
        assert_eq!(next, target.path().join("sol-2.cpp"));
        assert!(!next.exists());
    }
}
