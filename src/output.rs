use crate::classifier::Label;
use crate::disposition::DispositionSummary;
use crate::theme::Theme;
use crate::utils;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,   // No progress, orphaned section only
    Normal,  // Spinner and full report
    Verbose, // One line per folder instead of a spinner
}

impl OutputMode {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            OutputMode::Quiet
        } else if verbose > 0 {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

/// Classified folders grouped by label, in discovery order per label
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    groups: BTreeMap<Label, Vec<PathBuf>>,
}

impl ScanReport {
    pub fn insert(&mut self, label: Label, path: PathBuf) {
        let group = self.groups.entry(label).or_default();
        if !group.contains(&path) {
            group.push(path);
        }
    }

    /// Folders with `label`, in the order they were found
    pub fn get(&self, label: Label) -> &[PathBuf] {
        self.groups.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Folders with `label`, sorted lexicographically
    pub fn sorted(&self, label: Label) -> Vec<PathBuf> {
        let mut paths = self.get(label).to_vec();
        paths.sort();
        paths
    }

    pub fn count(&self, label: Label) -> usize {
        self.get(label).len()
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Every (label, folder) pair, strongest label first
    pub fn iter(&self) -> impl Iterator<Item = (Label, &PathBuf)> {
        self.groups
            .iter()
            .flat_map(|(label, paths)| paths.iter().map(move |p| (*label, p)))
    }

    /// Give up the orphaned group, sorted, for the disposition loop
    pub fn into_orphans(mut self) -> Vec<PathBuf> {
        let mut orphans = self.groups.remove(&Label::Orphaned).unwrap_or_default();
        orphans.sort();
        orphans
    }
}

/// Print the grouped report and per-label summary to stdout
pub fn print_report(report: &ScanReport, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, mode)
}

pub fn write_report<W: Write>(out: &mut W, report: &ScanReport, mode: OutputMode) -> io::Result<()> {
    // Each orphan is measured once; the lines and the total share the result
    let orphan_sizes: Vec<(PathBuf, u64)> = report
        .sorted(Label::Orphaned)
        .into_iter()
        .map(|path| {
            let bytes = utils::calculate_dir_size(&path);
            (path, bytes)
        })
        .collect();

    writeln!(out)?;
    writeln!(out, "{}", Theme::header("Config Folder Report"))?;
    writeln!(out, "{}", Theme::divider_bold(60))?;

    for label in Label::ALL {
        if mode == OutputMode::Quiet && label != Label::Orphaned {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{}", Theme::category(label.title()))?;
        writeln!(out, "{}", Theme::divider(60))?;

        if report.count(label) == 0 {
            writeln!(out, "  {}", Theme::muted("None found."))?;
            continue;
        }
        if label == Label::Orphaned {
            for (path, bytes) in &orphan_sizes {
                writeln!(
                    out,
                    "  {} {} ({})",
                    Theme::muted("•"),
                    Theme::warning(&path.display().to_string()),
                    Theme::size(&bytesize::to_string(*bytes, false))
                )?;
            }
        } else {
            for path in report.sorted(label) {
                writeln!(out, "  {} {}", Theme::muted("•"), path.display())?;
            }
        }
    }

    writeln!(out)?;
    let orphan_bytes: u64 = orphan_sizes.iter().map(|(_, bytes)| bytes).sum();
    write_summary(out, report, orphan_bytes)
}

fn write_summary<W: Write>(out: &mut W, report: &ScanReport, orphan_bytes: u64) -> io::Result<()> {
    writeln!(out, "{}", Theme::header("Summary"))?;
    writeln!(out, "{}", Theme::divider(60))?;
    for label in Label::ALL {
        let count = report.count(label).to_string();
        let line = format!("  {:<42} {:>6}", label.as_str(), count);
        if label == Label::Orphaned && report.count(label) > 0 {
            writeln!(out, "{}", Theme::warning(&line))?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    writeln!(out, "  {:<42} {:>6}", "total", report.total())?;

    if report.count(Label::Orphaned) > 0 {
        writeln!(
            out,
            "  {:<42} {:>6}",
            "orphaned size",
            bytesize::to_string(orphan_bytes, false)
        )?;
    }
    writeln!(out)
}

/// Final (or partial, after quit) disposition counts
pub fn write_disposition_summary<W: Write>(
    out: &mut W,
    summary: &DispositionSummary,
) -> io::Result<()> {
    writeln!(out)?;
    if summary.quit {
        writeln!(out, "{}", Theme::warning("Stopped early. Remaining folders were left untouched."))?;
    }
    writeln!(out, "{}", Theme::header("Cleanup Summary"))?;
    writeln!(out, "{}", Theme::divider(60))?;
    writeln!(out, "  Kept:    {}", Theme::value(&summary.kept.to_string()))?;
    writeln!(out, "  Deleted: {}", Theme::success(&summary.deleted.to_string()))?;
    writeln!(out, "  Skipped: {}", Theme::value(&summary.skipped.to_string()))?;
    if summary.failed > 0 {
        writeln!(out, "  Failed:  {}", Theme::error(&summary.failed.to_string()))?;
    }
    writeln!(out)
}
