//! Single deletion feature.
//!
//! This module owns permanent removal of one folder after a precheck.

use super::path_precheck::{precheck_path, PrecheckOutcome};
use crate::error::DeleteError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Already gone by the time we got to it
    SkippedMissing,
}

/// Permanently and recursively delete `path`.
///
/// A symlink is removed as a link; its target is left alone. Nothing here is
/// recoverable.
pub fn delete_folder(path: &Path, protected: &[PathBuf]) -> Result<DeleteOutcome, DeleteError> {
    match precheck_path(path, protected) {
        PrecheckOutcome::Missing => return Ok(DeleteOutcome::SkippedMissing),
        PrecheckOutcome::Protected => {
            return Err(DeleteError::Protected {
                path: path.to_path_buf(),
            })
        }
        PrecheckOutcome::Eligible => {}
    }

    let is_link = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    let result = if is_link || path.is_file() {
        fs::remove_file(path)
    } else {
        fs::remove_dir_all(path)
    };

    match result {
        Ok(()) => {
            log::info!("deleted {}", path.display());
            Ok(DeleteOutcome::Deleted)
        }
        Err(source) => {
            log::warn!("failed to delete {}: {}", path.display(), source);
            Err(DeleteError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_delete_folder_recursive() {
        let temp_dir = create_test_dir();
        let dir = temp_dir.path().join("ghostapp");
        fs::create_dir_all(dir.join("sub").join("deeper")).unwrap();
        fs::write(dir.join("sub").join("settings.ini"), "x=1").unwrap();

        let outcome = delete_folder(&dir, &[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(!dir.exists());
        assert!(temp_dir.path().exists());
    }

    #[test]
    fn test_delete_missing_folder() {
        let temp_dir = create_test_dir();
        let dir = temp_dir.path().join("nonexistent");
        assert_eq!(delete_folder(&dir, &[]).unwrap(), DeleteOutcome::SkippedMissing);
    }

    #[test]
    fn test_delete_protected_refused() {
        let temp_dir = create_test_dir();
        let result = delete_folder(temp_dir.path(), &[temp_dir.path().to_path_buf()]);
        assert!(matches!(result, Err(DeleteError::Protected { .. })));
        assert!(temp_dir.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlink_keeps_target() {
        let temp_dir = create_test_dir();
        let target = temp_dir.path().join("dotfiles").join("app");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("config"), "keep me").unwrap();
        let link = temp_dir.path().join("app");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(delete_folder(&link, &[]).unwrap(), DeleteOutcome::Deleted);
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("config").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_in_read_only_parent_fails() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_dir();
        let parent = temp_dir.path().join("locked");
        let dir = parent.join("app");
        fs::create_dir_all(&dir).unwrap();
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits don't bind root
        if fs::write(parent.join("write-check"), "").is_ok() {
            fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = delete_folder(&dir, &[]);
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(DeleteError::Io { .. })));
        assert!(dir.exists());
    }
}
