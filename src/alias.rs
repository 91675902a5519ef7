//! Alias resolution for folders whose names don't follow their owning package
//!
//! The table is keyed on the literal folder basename (leading dot included) and
//! maps to the canonical application name used for matching.

use crate::normalize::normalize;
use std::collections::BTreeMap;

/// Built-in aliases for well-known irregular folder names
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    (".mozilla", "firefox"),
    (".thunderbird", "thunderbird"),
    (".vscode", "code"),
    (".vscode-oss", "code"),
    ("Code - OSS", "code"),
    ("VSCodium", "vscodium"),
    ("BraveSoftware", "brave"),
    ("google-chrome", "google-chrome"),
    (".steam", "steam"),
    ("Steam", "steam"),
    (".m2", "maven"),
    (".gradle", "gradle"),
    (".rustup", "rustup"),
    (".cargo", "cargo"),
    (".npm", "npm"),
    (".android", "android-tools"),
    (".ipython", "ipython"),
    ("gtk-2.0", "gtk2"),
    ("gtk-3.0", "gtk3"),
    ("gtk-4.0", "gtk4"),
    ("pulse", "pulse"),
    ("obs-studio", "obs"),
    ("Electron", "electron"),
];

/// Immutable mapping from folder basename to canonical application name
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    /// An empty table; every folder goes through dot-stripping and normalization
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table
    pub fn with_defaults() -> Self {
        Self::from_pairs(DEFAULT_ALIASES.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    /// Build a table from `(basename, canonical)` pairs.
    ///
    /// Canonical names are normalized on the way in so that user-supplied values
    /// compare the same way as normalized folder names.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(basename, canonical)| (basename, normalize(&canonical)))
            .collect();
        Self { entries }
    }

    /// Merge `other` over `self`; entries in `other` win
    pub fn merged(mut self, other: AliasTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Canonical name for an exact basename, if aliased
    pub fn resolve(&self, basename: &str) -> Option<&str> {
        self.entries.get(basename).map(String::as_str)
    }

    /// The name a folder is compared under.
    ///
    /// An aliased basename yields its canonical name as-is. Otherwise one leading
    /// `.` is stripped and the remainder normalized.
    pub fn comparison_name(&self, basename: &str) -> String {
        if let Some(canonical) = self.resolve(basename) {
            return canonical.to_string();
        }
        let stripped = basename.strip_prefix('.').unwrap_or(basename);
        normalize(stripped)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
