//! Shared filesystem helpers

use std::fs;
use std::path::{Path, PathBuf};

/// Calculate the total size of a directory tree.
///
/// Uses an explicit stack rather than recursion. Symlinks are not followed and
/// unreadable entries are skipped. Stops early past a fixed entry budget so a
/// huge folder can't stall the report.
pub fn calculate_dir_size(path: &Path) -> u64 {
    const MAX_ENTRIES: usize = 200_000;

    let mut total = 0u64;
    let mut entries_processed = 0usize;
    let mut dir_stack: Vec<PathBuf> = vec![path.to_path_buf()];

    while let Some(current_dir) = dir_stack.pop() {
        let entries = match fs::read_dir(&current_dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            entries_processed += 1;
            if entries_processed >= MAX_ENTRIES {
                return total;
            }

            let meta = match fs::symlink_metadata(entry.path()) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if meta.is_file() {
                total += meta.len();
            } else if meta.is_dir() {
                dir_stack.push(entry.path());
            }
        }
    }

    total
}

/// True for `/` (or a bare drive/prefix on other platforms)
pub fn is_filesystem_root(path: &Path) -> bool {
    path.parent().is_none()
}
