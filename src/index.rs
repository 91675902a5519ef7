//! Installed-software index
//!
//! Built once per run from an [`InventorySource`] and an [`ExecutableLookup`],
//! then shared read-only by every classification. All names are stored
//! normalized.

use crate::error::SourceError;
use crate::normalize::normalize;
use crate::sources::{ExecutableLookup, InventorySource};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Read-only evidence of what is installed
pub struct InstalledSoftwareIndex {
    packages_exact: HashSet<String>,
    packages: Vec<String>,
    sandbox_apps: Vec<String>,
    desktop_entries: Vec<String>,
    portable_bundles: Vec<String>,
    executables: Box<dyn ExecutableLookup>,
}

/// Directories the index reads desktop entries and portable bundles from
#[derive(Debug, Clone, Default)]
pub struct SourceDirs {
    pub desktop_entry_dirs: Vec<PathBuf>,
    pub portable_bundle_dirs: Vec<PathBuf>,
}

impl InstalledSoftwareIndex {
    /// Query every source and build the index.
    ///
    /// A failing source contributes an empty collection; this never fails.
    /// Package and sandbox queries shell out, so they run alongside the
    /// directory listings.
    pub fn build<S: InventorySource>(
        source: &S,
        dirs: &SourceDirs,
        executables: Box<dyn ExecutableLookup>,
    ) -> Self {
        let ((packages, sandbox_apps), (desktop_entries, portable_bundles)) = rayon::join(
            || {
                rayon::join(
                    || or_empty("installed packages", source.installed_packages()),
                    || or_empty("sandbox apps", source.sandbox_apps()),
                )
            },
            || {
                let desktop = dirs
                    .desktop_entry_dirs
                    .iter()
                    .flat_map(|d| or_empty("desktop entries", source.desktop_entries(d)))
                    .collect::<Vec<_>>();
                let bundles = dirs
                    .portable_bundle_dirs
                    .iter()
                    .flat_map(|d| or_empty("portable bundles", source.portable_bundles(d)))
                    .collect::<Vec<_>>();
                (desktop, bundles)
            },
        );

        Self::from_names(
            packages,
            sandbox_apps,
            desktop_entries,
            portable_bundles,
            executables,
        )
    }

    /// Build directly from raw name lists
    pub fn from_names(
        packages: Vec<String>,
        sandbox_apps: Vec<String>,
        desktop_entries: Vec<String>,
        portable_bundles: Vec<String>,
        executables: Box<dyn ExecutableLookup>,
    ) -> Self {
        let packages = normalize_all(packages);
        let packages_exact = packages.iter().cloned().collect();
        let index = Self {
            packages_exact,
            packages,
            sandbox_apps: normalize_all(sandbox_apps),
            desktop_entries: normalize_all(desktop_entries),
            portable_bundles: normalize_all(portable_bundles),
            executables,
        };
        log::info!("index built: {:?}", index);
        index
    }

    pub fn has_exact_package(&self, name: &str) -> bool {
        self.packages_exact.contains(name)
    }

    pub fn is_executable(&self, name: &str) -> bool {
        self.executables.is_executable(name)
    }

    /// True if some package name contains `name`
    pub fn has_partial_package(&self, name: &str) -> bool {
        contains_substring(&self.packages, name)
    }

    pub fn has_sandbox_app(&self, name: &str) -> bool {
        contains_substring(&self.sandbox_apps, name)
    }

    pub fn has_desktop_entry(&self, name: &str) -> bool {
        contains_substring(&self.desktop_entries, name)
    }

    pub fn has_portable_bundle(&self, name: &str) -> bool {
        contains_substring(&self.portable_bundles, name)
    }
}

impl fmt::Debug for InstalledSoftwareIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstalledSoftwareIndex")
            .field("packages", &self.packages.len())
            .field("sandbox_apps", &self.sandbox_apps.len())
            .field("desktop_entries", &self.desktop_entries.len())
            .field("portable_bundles", &self.portable_bundles.len())
            .finish()
    }
}

fn or_empty(what: &str, result: Result<Vec<String>, SourceError>) -> Vec<String> {
    match result {
        Ok(names) => names,
        Err(e) => {
            log::debug!("{} unavailable, treating as empty: {}", what, e);
            Vec::new()
        }
    }
}

fn normalize_all(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| normalize(n.trim()))
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

/// An empty needle never matches; every haystack would contain it.
fn contains_substring(haystack: &[String], needle: &str) -> bool {
    !needle.is_empty() && haystack.iter().any(|entry| entry.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct FakeSource {
        packages: Option<Vec<&'static str>>,
        sandbox: Option<Vec<&'static str>>,
    }

    impl InventorySource for FakeSource {
        fn installed_packages(&self) -> Result<Vec<String>, SourceError> {
            match &self.packages {
                Some(p) => Ok(p.iter().map(|s| s.to_string()).collect()),
                None => Err(SourceError::Unavailable {
                    source_name: "package manager",
                }),
            }
        }

        fn sandbox_apps(&self) -> Result<Vec<String>, SourceError> {
            match &self.sandbox {
                Some(p) => Ok(p.iter().map(|s| s.to_string()).collect()),
                None => Err(SourceError::Unavailable {
                    source_name: "flatpak",
                }),
            }
        }

        fn desktop_entries(&self, dir: &Path) -> Result<Vec<String>, SourceError> {
            Ok(vec![format!("{}-launcher", dir.display())])
        }

        fn portable_bundles(&self, _dir: &Path) -> Result<Vec<String>, SourceError> {
            Err(SourceError::Unavailable {
                source_name: "bundles",
            })
        }
    }

    fn no_executables() -> Box<dyn ExecutableLookup> {
        Box::new(HashSet::<String>::new())
    }

    #[test]
    fn test_names_are_normalized() {
        let index = InstalledSoftwareIndex::from_names(
            vec!["Foo_Bar".into()],
            vec!["org.Mozilla.Firefox".into()],
            vec!["Telegram Desktop".into()],
            vec!["Obsidian.AppImage".into()],
            no_executables(),
        );
        assert!(index.has_exact_package("foo-bar"));
        assert!(!index.has_exact_package("Foo_Bar"));
        assert!(index.has_sandbox_app("firefox"));
        assert!(index.has_desktop_entry("telegram"));
        assert!(index.has_portable_bundle("obsidian-appimage"));
    }

    #[test]
    fn test_partial_direction_is_package_contains_name() {
        let index = InstalledSoftwareIndex::from_names(
            vec!["foo-bar-utils".into()],
            vec![],
            vec![],
            vec![],
            no_executables(),
        );
        assert!(index.has_partial_package("foo-bar"));
        assert!(!index.has_partial_package("foo-bar-utils-extra"));
        assert!(!index.has_exact_package("foo-bar"));
    }

    #[test]
    fn test_empty_name_never_matches() {
        let index = InstalledSoftwareIndex::from_names(
            vec!["htop".into()],
            vec!["org.gnome.Maps".into()],
            vec![],
            vec![],
            no_executables(),
        );
        assert!(!index.has_partial_package(""));
        assert!(!index.has_sandbox_app(""));
    }

    #[test]
    fn test_build_degrades_missing_sources() {
        let source = FakeSource {
            packages: None,
            sandbox: None,
        };
        let dirs = SourceDirs {
            desktop_entry_dirs: vec![PathBuf::from("apps")],
            portable_bundle_dirs: vec![PathBuf::from("bundles")],
        };
        let index = InstalledSoftwareIndex::build(&source, &dirs, no_executables());
        assert!(!index.has_partial_package("htop"));
        assert!(!index.has_sandbox_app("firefox"));
        assert!(index.has_desktop_entry("apps-launcher"));
        assert!(!index.has_portable_bundle("bundles"));
    }

    #[test]
    fn test_build_collects_sources() {
        let source = FakeSource {
            packages: Some(vec!["firefox", "htop"]),
            sandbox: Some(vec!["com.spotify.Client"]),
        };
        let index = InstalledSoftwareIndex::build(&source, &SourceDirs::default(), no_executables());
        assert!(index.has_exact_package("firefox"));
        assert!(index.has_exact_package("htop"));
        assert!(index.has_sandbox_app("spotify"));
        assert!(!index.has_desktop_entry("firefox"));
    }

    #[test]
    fn test_executable_lookup_delegates() {
        let lookup: HashSet<String> = ["nvim".to_string()].into_iter().collect();
        let index =
            InstalledSoftwareIndex::from_names(vec![], vec![], vec![], vec![], Box::new(lookup));
        assert!(index.is_executable("nvim"));
        assert!(!index.is_executable("vim"));
    }
}
