//! Ignore filter
//!
//! Paths under well-known cache, trash, credential and runtime directories are
//! never classified or reported.

use crate::scanner::ScanRoots;
use std::path::{Path, PathBuf};

/// Built-in ignore entries relative to the home directory
pub const HOME_IGNORES: &[&str] = &[
    ".cache",
    ".local/state",
    ".ssh",
    ".gnupg",
    ".pki",
    ".dbus",
    ".var",
    ".Trash",
    ".Trash-1000",
];

/// Built-in ignore entries relative to the config root
pub const CONFIG_IGNORES: &[&str] = &["autostart", "systemd", "environment.d"];

/// Built-in ignore entries relative to the data root
pub const DATA_IGNORES: &[&str] = &[
    "Trash",
    "keyrings",
    "applications",
    "icons",
    "fonts",
    "mime",
    "flatpak",
    "recently-used.xbel",
];

/// A set of path prefixes excluded from scanning
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    entries: Vec<PathBuf>,
}

impl IgnoreList {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// The built-in list, each entry anchored at the root it belongs to
    pub fn with_defaults(roots: &ScanRoots) -> Self {
        let anchored = |base: &Path, rels: &[&str]| -> Vec<PathBuf> {
            rels.iter().map(|rel| base.join(rel)).collect()
        };
        let mut entries = anchored(&roots.home, HOME_IGNORES);
        entries.extend(anchored(&roots.config_dir, CONFIG_IGNORES));
        entries.extend(anchored(&roots.data_dir, DATA_IGNORES));
        Self::new(entries)
    }

    pub fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    /// True if `path` equals an entry or lies beneath one.
    ///
    /// Matching is on whole path components, so `~/.cache` does not hide
    /// `~/.cachemanager`.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.entries.iter().any(|entry| path.starts_with(entry))
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

/// Expand a leading `~` against `home`
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_and_descendant_ignored() {
        let roots = ScanRoots::under_home(Path::new("/home/me"));
        let list = IgnoreList::with_defaults(&roots);
        assert!(list.is_ignored(Path::new("/home/me/.cache")));
        assert!(list.is_ignored(Path::new("/home/me/.cache/thumbnails")));
        assert!(list.is_ignored(Path::new("/home/me/.local/share/Trash/files")));
        assert!(list.is_ignored(Path::new("/home/me/.config/autostart")));
    }

    #[test]
    fn test_defaults_follow_relocated_roots() {
        let roots = ScanRoots {
            home: PathBuf::from("/home/me"),
            config_dir: PathBuf::from("/cfg"),
            data_dir: PathBuf::from("/data"),
        };
        let list = IgnoreList::with_defaults(&roots);
        assert!(list.is_ignored(Path::new("/cfg/autostart")));
        assert!(list.is_ignored(Path::new("/data/applications")));
        assert!(list.is_ignored(Path::new("/data/keyrings")));
        assert!(list.is_ignored(Path::new("/home/me/.ssh")));
        assert!(!list.is_ignored(Path::new("/cfg/htop")));
    }

    #[test]
    fn test_prefix_is_per_component() {
        let list = IgnoreList::new(vec![PathBuf::from("/home/me/.cache")]);
        assert!(!list.is_ignored(Path::new("/home/me/.cachemanager")));
        assert!(!list.is_ignored(Path::new("/home/me")));
        assert!(!list.is_ignored(Path::new("/home/me/.config/htop")));
    }

    #[test]
    fn test_extend() {
        let mut list = IgnoreList::default();
        assert!(!list.is_ignored(Path::new("/home/me/Games")));
        list.extend([PathBuf::from("/home/me/Games")]);
        assert!(list.is_ignored(Path::new("/home/me/Games/steam")));
        assert_eq!(list.entries().len(), 1);
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/me");
        assert_eq!(expand_home("~", home), PathBuf::from("/home/me"));
        assert_eq!(expand_home("~/.cache", home), PathBuf::from("/home/me/.cache"));
        assert_eq!(expand_home("/opt/x", home), PathBuf::from("/opt/x"));
        assert_eq!(expand_home("~other", home), PathBuf::from("~other"));
    }
}
