//! Folder scanner
//!
//! Enumerates top-level config folders and classifies each one. Only the first
//! level under each root is inspected.

use crate::classifier::Classifier;
use crate::ignore::IgnoreList;
use crate::output::{OutputMode, ScanReport};
use crate::progress;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Locations scanned for per-application folders
#[derive(Debug, Clone)]
pub struct ScanRoots {
    pub home: PathBuf,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl ScanRoots {
    /// Roots for the current user.
    ///
    /// Only the home directory is looked up; the config and data roots are
    /// always `~/.config` and `~/.local/share`, whatever `XDG_*` says.
    pub fn for_current_user() -> Result<Self> {
        let base = directories::BaseDirs::new().context("Could not determine home directory")?;
        Ok(Self::under_home(base.home_dir()))
    }

    /// Roots laid out the default XDG way under `home`
    pub fn under_home(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            config_dir: home.join(".config"),
            data_dir: home.join(".local").join("share"),
        }
    }

    /// `~/.config` and `~/.local`, whether or not the roots live there
    fn standard_dirs(&self) -> [PathBuf; 2] {
        [self.home.join(".config"), self.home.join(".local")]
    }

    /// Paths that are never deletable: home, the scan roots and the
    /// standard config and data parents under home
    pub fn protected(&self) -> Vec<PathBuf> {
        let mut paths = vec![
            self.home.clone(),
            self.config_dir.clone(),
            self.data_dir.clone(),
        ];
        paths.extend(self.standard_dirs());
        paths
    }

    /// True if `path` is a root, contains one, or is one of the standard
    /// parents. Such hidden home entries are never candidates themselves.
    fn covers_root(&self, path: &Path) -> bool {
        self.config_dir.starts_with(path)
            || self.data_dir.starts_with(path)
            || self.standard_dirs().iter().any(|dir| dir == path)
    }
}

/// List candidate folders in scan order.
///
/// Immediate subdirectories of the config dir, then of the data dir, then the
/// hidden directories directly under home. Each group is sorted by name.
/// Unreadable roots and entries are skipped.
pub fn candidates(roots: &ScanRoots) -> Vec<PathBuf> {
    let mut found = Vec::new();
    found.extend(list_subdirs(&roots.config_dir, |_| true));
    found.extend(list_subdirs(&roots.data_dir, |_| true));
    found.extend(list_subdirs(&roots.home, |path| {
        let hidden = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(false);
        hidden && !roots.covers_root(path)
    }));
    found
}

fn list_subdirs<F>(dir: &Path, keep: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("skipping unreadable root {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| match e {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                log::debug!("skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|p| p.is_dir())
        .filter(|p| keep(p.as_path()))
        .collect();
    dirs.sort();
    dirs
}

/// Scan every root and classify each surviving folder.
///
/// Ignored folders are dropped before classification. A folder reachable
/// through two roots is classified once.
pub fn scan(
    roots: &ScanRoots,
    classifier: &Classifier<'_>,
    ignore: &IgnoreList,
    mode: OutputMode,
) -> ScanReport {
    let spinner = if mode == OutputMode::Normal {
        Some(progress::create_spinner("Scanning..."))
    } else {
        None
    };

    let mut report = ScanReport::default();
    let mut seen = HashSet::new();

    for folder in candidates(roots) {
        if ignore.is_ignored(&folder) {
            log::debug!("ignored {}", folder.display());
            continue;
        }
        if !seen.insert(folder.clone()) {
            continue;
        }

        match spinner {
            Some(ref sp) => sp.set_message(format!("Checking {}", folder.display())),
            None if mode == OutputMode::Verbose => println!("Checking {}", folder.display()),
            None => {}
        }

        let label = classifier.classify(&folder);
        report.insert(label, folder);
    }

    if let Some(sp) = spinner {
        progress::finish_and_clear(&sp);
    }

    log::info!("scan finished: {} folders classified", report.total());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasTable;
    use crate::classifier::Label;
    use crate::index::InstalledSoftwareIndex;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn create_home() -> (TempDir, ScanRoots) {
        let temp_dir = tempfile::tempdir().unwrap();
        let roots = ScanRoots::under_home(temp_dir.path());
        fs::create_dir_all(&roots.config_dir).unwrap();
        fs::create_dir_all(&roots.data_dir).unwrap();
        (temp_dir, roots)
    }

    #[test]
    fn test_candidates_order_and_filtering() {
        let (_temp, roots) = create_home();
        fs::create_dir(roots.config_dir.join("htop")).unwrap();
        fs::create_dir(roots.config_dir.join("alpha")).unwrap();
        fs::write(roots.config_dir.join("mimeapps.list"), "").unwrap();
        fs::create_dir(roots.data_dir.join("gimp")).unwrap();
        fs::create_dir(roots.home.join(".mozilla")).unwrap();
        fs::create_dir(roots.home.join("Documents")).unwrap();
        fs::write(roots.home.join(".bashrc"), "").unwrap();

        let found = candidates(&roots);
        assert_eq!(
            found,
            vec![
                roots.config_dir.join("alpha"),
                roots.config_dir.join("htop"),
                roots.data_dir.join("gimp"),
                roots.home.join(".mozilla"),
            ]
        );
    }

    #[test]
    fn test_candidates_does_not_recurse() {
        let (_temp, roots) = create_home();
        fs::create_dir_all(roots.config_dir.join("app").join("nested")).unwrap();
        let found = candidates(&roots);
        assert_eq!(found, vec![roots.config_dir.join("app")]);
    }

    #[test]
    fn test_candidates_missing_roots() {
        let temp_dir = tempfile::tempdir().unwrap();
        let roots = ScanRoots::under_home(&temp_dir.path().join("nobody"));
        assert!(candidates(&roots).is_empty());
    }

    #[test]
    fn test_current_user_roots_ignore_xdg_overrides() {
        let roots = ScanRoots::for_current_user().unwrap();
        assert_eq!(roots.config_dir, roots.home.join(".config"));
        assert_eq!(roots.data_dir, roots.home.join(".local").join("share"));
    }

    #[test]
    fn test_standard_dirs_skipped_when_roots_elsewhere() {
        let temp_dir = tempfile::tempdir().unwrap();
        let roots = ScanRoots {
            home: temp_dir.path().join("home"),
            config_dir: temp_dir.path().join("xdg-config"),
            data_dir: temp_dir.path().join("xdg-data"),
        };
        fs::create_dir_all(roots.home.join(".config").join("htop")).unwrap();
        fs::create_dir_all(roots.home.join(".local").join("share")).unwrap();
        fs::create_dir_all(roots.home.join(".mozilla")).unwrap();

        assert_eq!(candidates(&roots), vec![roots.home.join(".mozilla")]);

        let protected = roots.protected();
        assert!(protected.contains(&roots.home.join(".config")));
        assert!(protected.contains(&roots.home.join(".local")));
    }

    #[test]
    fn test_scan_groups_and_ignores() {
        let (_temp, roots) = create_home();
        fs::create_dir(roots.config_dir.join("htop")).unwrap();
        fs::create_dir(roots.config_dir.join("ghostapp")).unwrap();
        fs::create_dir_all(roots.home.join(".cache").join("thumbnails")).unwrap();

        let index = InstalledSoftwareIndex::from_names(
            vec!["htop".into()],
            vec![],
            vec![],
            vec![],
            Box::new(HashSet::<String>::new()),
        );
        let aliases = AliasTable::empty();
        let classifier = Classifier::new(&index, &aliases);
        let ignore = IgnoreList::with_defaults(&roots);

        let report = scan(&roots, &classifier, &ignore, OutputMode::Quiet);
        assert_eq!(report.get(Label::InstalledPackageMatch), &[roots.config_dir.join("htop")]);
        assert_eq!(report.get(Label::Orphaned), &[roots.config_dir.join("ghostapp")]);
        assert_eq!(report.total(), 2);
        assert!(!report
            .iter()
            .any(|(_, p)| p.starts_with(roots.home.join(".cache"))));
    }
}
