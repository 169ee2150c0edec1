//! Filesystem primitives shared by install and deploy.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Remove a file or directory tree; a missing path is not an error.
///
/// Returns whether anything was removed.
pub fn remove_path_if_exists(path: &Path) -> std::io::Result<bool> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if metadata.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(true)
}

/// Copy `file` into `dir` under its own file name, creating `dir` if needed.
pub fn copy_into_dir(file: &Path, dir: &Path) -> std::io::Result<PathBuf> {
    let file_name = file.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{}' has no file name", file.display()),
        )
    })?;
    std::fs::create_dir_all(dir)?;
    let dest = dir.join(file_name);
    std::fs::copy(file, &dest)?;
    Ok(dest)
}

/// Replace the contents of `path` via a temp file in the same directory.
///
/// Readers see either the old or the new contents, never a partial write.
/// Permissions of an existing file are kept.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    if let Some(permissions) = permissions {
        std::fs::set_permissions(temp.path(), permissions)?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remove_missing_path_is_noop() {
        let temp = TempDir::new().unwrap();
        assert!(!remove_path_if_exists(&temp.path().join("absent")).unwrap());
    }

    #[test]
    fn remove_directory_tree() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("maven-3.0");
        std::fs::create_dir_all(dir.join("lib")).unwrap();
        std::fs::write(dir.join("lib/a.jar"), b"jar").unwrap();

        assert!(remove_path_if_exists(&dir).unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn remove_single_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("stale.txt");
        std::fs::write(&file, b"x").unwrap();

        assert!(remove_path_if_exists(&file).unwrap());
        assert!(!file.exists());
    }

    #[test]
    fn copy_creates_destination_dir() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("api-1.0.jar");
        std::fs::write(&src, b"jar").unwrap();

        let dest = copy_into_dir(&src, &temp.path().join("distro/ext")).unwrap();

        assert_eq!(dest, temp.path().join("distro/ext/api-1.0.jar"));
        assert_eq!(std::fs::read(dest).unwrap(), b"jar");
    }

    #[test]
    fn copy_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = copy_into_dir(&temp.path().join("nope.jar"), temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("xvn");
        std::fs::write(&file, b"old").unwrap();

        write_atomic(&file, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
        let leftovers = std::fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("xvn");
        std::fs::write(&file, b"#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o755)).unwrap();

        write_atomic(&file, b"#!/bin/sh\necho hi\n").unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
