//! Folder classification
//!
//! A folder's comparison name is checked against the installed-software index
//! by an ordered list of rules. The first rule that matches decides the label;
//! each later rule is weaker evidence of installation than the one before it.

use crate::alias::AliasTable;
use crate::index::InstalledSoftwareIndex;
use std::fmt;
use std::path::Path;

/// Classification outcome for one folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    InstalledPackageMatch,
    InstalledExecutableFound,
    MaybeInstalledPartialPackage,
    InstalledSandboxApp,
    InstalledDesktopEntry,
    InstalledPortableBundle,
    Orphaned,
}

impl Label {
    /// Every label, strongest evidence first
    pub const ALL: [Label; 7] = [
        Label::InstalledPackageMatch,
        Label::InstalledExecutableFound,
        Label::MaybeInstalledPartialPackage,
        Label::InstalledSandboxApp,
        Label::InstalledDesktopEntry,
        Label::InstalledPortableBundle,
        Label::Orphaned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::InstalledPackageMatch => "installed-package-match",
            Label::InstalledExecutableFound => "installed-executable-found",
            Label::MaybeInstalledPartialPackage => "maybe-installed-partial-package",
            Label::InstalledSandboxApp => "installed-sandbox-app",
            Label::InstalledDesktopEntry => "installed-desktop-entry",
            Label::InstalledPortableBundle => "installed-portable-bundle",
            Label::Orphaned => "orphaned",
        }
    }

    /// Section heading used in the report
    pub fn title(&self) -> &'static str {
        match self {
            Label::InstalledPackageMatch => "Installed (package match)",
            Label::InstalledExecutableFound => "Installed (executable found)",
            Label::MaybeInstalledPartialPackage => "Maybe installed (partial package match)",
            Label::InstalledSandboxApp => "Installed (Flatpak app)",
            Label::InstalledDesktopEntry => "Installed (desktop entry)",
            Label::InstalledPortableBundle => "Installed (AppImage / portable)",
            Label::Orphaned => "Orphaned (no owner found)",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single matching rule: predicate over the index and a comparison name
pub type Rule = fn(&InstalledSoftwareIndex, &str) -> bool;

/// The matching policy, evaluated top to bottom. `Orphaned` is the fallthrough
/// and has no rule.
pub const RULES: &[(Label, Rule)] = &[
    (Label::InstalledPackageMatch, InstalledSoftwareIndex::has_exact_package),
    (Label::InstalledExecutableFound, InstalledSoftwareIndex::is_executable),
    (Label::MaybeInstalledPartialPackage, InstalledSoftwareIndex::has_partial_package),
    (Label::InstalledSandboxApp, InstalledSoftwareIndex::has_sandbox_app),
    (Label::InstalledDesktopEntry, InstalledSoftwareIndex::has_desktop_entry),
    (Label::InstalledPortableBundle, InstalledSoftwareIndex::has_portable_bundle),
];

/// Classifies folders against one index and alias table
pub struct Classifier<'a> {
    index: &'a InstalledSoftwareIndex,
    aliases: &'a AliasTable,
}

impl<'a> Classifier<'a> {
    pub fn new(index: &'a InstalledSoftwareIndex, aliases: &'a AliasTable) -> Self {
        Self { index, aliases }
    }

    /// Label a folder by its basename
    pub fn classify(&self, folder: &Path) -> Label {
        let basename = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.classify_name(&basename)
    }

    pub fn classify_name(&self, basename: &str) -> Label {
        let name = self.aliases.comparison_name(basename);
        let label = RULES
            .iter()
            .find(|(_, matches)| matches(self.index, &name))
            .map(|(label, _)| *label)
            .unwrap_or(Label::Orphaned);
        log::trace!("{} -> {} ({})", basename, name, label);
        label
    }
}
