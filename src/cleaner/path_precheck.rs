//! Path precheck feature.
//!
//! This module owns path eligibility checks prior to deletion.

use crate::utils;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrecheckOutcome {
    Eligible,
    Missing,
    Protected,
}

/// Decide whether `path` may be removed.
///
/// Filesystem roots and anything listed in `protected` (or an ancestor of a
/// protected path) are refused. A path whose metadata can't be read is missing.
pub(crate) fn precheck_path(path: &Path, protected: &[PathBuf]) -> PrecheckOutcome {
    if utils::is_filesystem_root(path) || protected.iter().any(|p| p.starts_with(path)) {
        return PrecheckOutcome::Protected;
    }

    // symlink_metadata so a dangling link still counts as present
    if std::fs::symlink_metadata(path).is_err() {
        return PrecheckOutcome::Missing;
    }

    PrecheckOutcome::Eligible
}
