//! Adapters for the inventory sources the index is built from
//!
//! [`HostInventory`] queries the running system: the package manager, flatpak,
//! desktop-entry directories and portable bundle directories. Tests substitute
//! their own [`InventorySource`].

use crate::error::SourceError;
use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

/// Something that can list installed software names
pub trait InventorySource: Sync {
    /// Installed system package names
    fn installed_packages(&self) -> Result<Vec<String>, SourceError>;

    /// Installed sandboxed application ids
    fn sandbox_apps(&self) -> Result<Vec<String>, SourceError>;

    /// Launcher names found in one desktop-entry directory
    fn desktop_entries(&self, dir: &Path) -> Result<Vec<String>, SourceError>;

    /// Bundle names found in one portable-application directory
    fn portable_bundles(&self, dir: &Path) -> Result<Vec<String>, SourceError>;
}

/// Answers whether a name is a runnable command
pub trait ExecutableLookup: Send + Sync {
    fn is_executable(&self, name: &str) -> bool;
}

impl ExecutableLookup for HashSet<String> {
    fn is_executable(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Package manager queries, tried in order until one is present
const PACKAGE_QUERIES: &[(&str, &[&str])] = &[
    ("pacman", &["-Qq"]),
    ("dpkg-query", &["-W", "-f=${Package}\n"]),
    ("rpm", &["-qa", "--qf", "%{NAME}\n"]),
];

/// Inventory of the machine we're running on
#[derive(Debug, Default, Clone, Copy)]
pub struct HostInventory;

impl HostInventory {
    pub fn new() -> Self {
        Self
    }
}

impl InventorySource for HostInventory {
    fn installed_packages(&self) -> Result<Vec<String>, SourceError> {
        for &(program, args) in PACKAGE_QUERIES {
            match run_lines(program, args) {
                Ok(names) => {
                    log::debug!("{} listed {} packages", program, names.len());
                    return Ok(names);
                }
                Err(SourceError::Unavailable { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(SourceError::Unavailable {
            source_name: "package manager",
        })
    }

    fn sandbox_apps(&self) -> Result<Vec<String>, SourceError> {
        run_lines("flatpak", &["list", "--app", "--columns=application"])
    }

    fn desktop_entries(&self, dir: &Path) -> Result<Vec<String>, SourceError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        // Vendor subdirectories (e.g. applications/kde4) hold entries too
        let names = WalkDir::new(dir)
            .max_depth(2)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.path();
                if path.extension().and_then(|x| x.to_str()) != Some("desktop") {
                    return None;
                }
                path.file_stem().map(|s| s.to_string_lossy().into_owned())
            })
            .collect();
        Ok(names)
    }

    fn portable_bundles(&self, dir: &Path) -> Result<Vec<String>, SourceError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(dir).map_err(|source| SourceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let names = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| bundle_name(&e.path()))
            .collect();
        Ok(names)
    }
}

/// Name a portable bundle is known by: the file stem for `*.AppImage`, the
/// full file name otherwise.
fn bundle_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    if file_name.starts_with('.') {
        return None;
    }
    let is_appimage = path
        .extension()
        .map(|x| x.to_string_lossy().eq_ignore_ascii_case("appimage"))
        .unwrap_or(false);
    if is_appimage {
        path.file_stem().map(|s| s.to_string_lossy().into_owned())
    } else {
        Some(file_name.into_owned())
    }
}

/// Run a command and collect the non-empty lines of its stdout
fn run_lines(program: &'static str, args: &[&str]) -> Result<Vec<String>, SourceError> {
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SourceError::Unavailable {
                source_name: program,
            })
        }
        Err(source) => {
            return Err(SourceError::Io {
                path: PathBuf::from(program),
                source,
            })
        }
    };

    if !output.status.success() {
        return Err(SourceError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            status: output.status.to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Executable lookup over the directories of a search path
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Search path taken from `$PATH`; empty if unset
    pub fn from_env() -> Self {
        Self::from_path_var(env::var_os("PATH").unwrap_or_default())
    }

    pub fn from_path_var(value: OsString) -> Self {
        let dirs = env::split_paths(&value)
            .filter(|d| !d.as_os_str().is_empty())
            .collect();
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl ExecutableLookup for SearchPath {
    fn is_executable(&self, name: &str) -> bool {
        if name.is_empty() || name.contains('/') {
            return false;
        }
        self.dirs.iter().any(|dir| is_executable_file(&dir.join(name)))
    }
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
