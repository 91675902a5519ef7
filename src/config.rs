use crate::alias::AliasTable;
use crate::ignore::{expand_home, IgnoreList};
use crate::index::SourceDirs;
use crate::scanner::ScanRoots;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extra folder basename -> canonical application name entries
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    #[serde(default)]
    pub ignore: Ignore,

    #[serde(default)]
    pub sources: Sources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ignore {
    /// Extra ignore prefixes; `~` expands to the home directory
    #[serde(default)]
    pub paths: Vec<String>,

    /// Drop the built-in ignore list and use only `paths`
    #[serde(default)]
    pub replace_defaults: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sources {
    #[serde(default = "default_desktop_entry_dirs")]
    pub desktop_entry_dirs: Vec<String>,

    #[serde(default = "default_portable_bundle_dirs")]
    pub portable_bundle_dirs: Vec<String>,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            desktop_entry_dirs: default_desktop_entry_dirs(),
            portable_bundle_dirs: default_portable_bundle_dirs(),
        }
    }
}

fn default_desktop_entry_dirs() -> Vec<String> {
    [
        "/usr/share/applications",
        "/usr/local/share/applications",
        "~/.local/share/applications",
        "/var/lib/flatpak/exports/share/applications",
        "~/.local/share/flatpak/exports/share/applications",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_portable_bundle_dirs() -> Vec<String> {
    vec!["~/Applications".to_string(), "~/.local/bin".to_string()]
}

impl Config {
    /// Get the config file path: <XDG config dir>/confsweep/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "confsweep")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load config from the default location or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    /// Load config from `path`, falling back to defaults if it is missing or
    /// can't be parsed
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, toml).context("Failed to write config file")?;

        Ok(())
    }

    /// Built-in aliases with the configured ones layered on top
    pub fn alias_table(&self) -> AliasTable {
        let user = AliasTable::from_pairs(self.aliases.clone());
        AliasTable::with_defaults().merged(user)
    }

    pub fn ignore_list(&self, roots: &ScanRoots) -> IgnoreList {
        let mut list = if self.ignore.replace_defaults {
            IgnoreList::default()
        } else {
            IgnoreList::with_defaults(roots)
        };
        list.extend(self.ignore.paths.iter().map(|p| expand_home(p, &roots.home)));
        list
    }

    pub fn source_dirs(&self, home: &Path) -> SourceDirs {
        let expand = |dirs: &[String]| -> Vec<PathBuf> {
            dirs.iter().map(|d| expand_home(d, home)).collect()
        };
        SourceDirs {
            desktop_entry_dirs: expand(&self.sources.desktop_entry_dirs),
            portable_bundle_dirs: expand(&self.sources.portable_bundle_dirs),
        }
    }
}
