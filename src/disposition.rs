//! Interactive disposition of orphaned folders
//!
//! Walks the orphaned folders one at a time and asks what to do with each.
//! Input and output are generic so the loop can be driven from tests.

use crate::cleaner::DeleteOutcome;
use crate::error::DeleteError;
use crate::theme::Theme;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// A choice at the per-folder prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Keep,
    Delete,
    Skip,
    Quit,
}

impl Action {
    /// Parse one line of input; a single letter, any case, surrounding
    /// whitespace ignored.
    pub fn parse(input: &str) -> Option<Action> {
        match input.trim().to_ascii_lowercase().as_str() {
            "k" => Some(Action::Keep),
            "d" => Some(Action::Delete),
            "s" => Some(Action::Skip),
            "q" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Outcome counts for one run of the loop.
///
/// `failed` tallies deletions that did not go through; those folders are not
/// counted as kept, deleted or skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispositionSummary {
    pub kept: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub quit: bool,
}

impl DispositionSummary {
    /// Folders that received a counted outcome
    pub fn decided(&self) -> usize {
        self.kept + self.deleted + self.skipped
    }
}

/// Read one line; `None` at end of input.
fn read_choice<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            log::warn!("failed to read input: {}", e);
            None
        }
    }
}

/// Prompt until a valid action is entered. End of input counts as quit.
fn prompt_action<R: BufRead, W: Write>(
    folder: &Path,
    input: &mut R,
    out: &mut W,
) -> io::Result<Action> {
    loop {
        write!(
            out,
            "{} ",
            Theme::prompt(&format!("Action for: {} [K/D/S/Q]:", folder.display()))
        )?;
        out.flush()?;

        let Some(line) = read_choice(input) else {
            writeln!(out)?;
            return Ok(Action::Quit);
        };
        match Action::parse(&line) {
            Some(action) => return Ok(action),
            None => writeln!(
                out,
                "  {}",
                Theme::error("Invalid choice. Enter K (keep), D (delete), S (skip) or Q (quit).")
            )?,
        }
    }
}

/// Run the loop over `orphans` in the given order.
///
/// `delete` performs the removal; a failure is reported inline and the loop
/// moves on. Quit stops immediately and leaves every remaining folder
/// untouched and uncounted.
pub fn run<R, W, D>(
    orphans: &[PathBuf],
    input: &mut R,
    out: &mut W,
    mut delete: D,
) -> io::Result<DispositionSummary>
where
    R: BufRead,
    W: Write,
    D: FnMut(&Path) -> Result<DeleteOutcome, DeleteError>,
{
    let mut summary = DispositionSummary::default();

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        Theme::header(&format!("Review {} orphaned folder(s)", orphans.len()))
    )?;
    writeln!(
        out,
        "{}",
        Theme::muted("K = keep, D = delete permanently, S = skip, Q = quit")
    )?;

    for (idx, folder) in orphans.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}", Theme::muted(&format!("[{}/{}]", idx + 1, orphans.len())))?;

        match prompt_action(folder, input, out)? {
            Action::Keep => {
                summary.kept += 1;
                writeln!(out, "  Kept {}", folder.display())?;
            }
            Action::Skip => {
                summary.skipped += 1;
                writeln!(out, "  Skipped {}", folder.display())?;
            }
            Action::Delete => match delete(folder) {
                Ok(DeleteOutcome::Deleted) => {
                    summary.deleted += 1;
                    writeln!(out, "  {}", Theme::success(&format!("Deleted {}", folder.display())))?;
                }
                Ok(DeleteOutcome::SkippedMissing) => {
                    writeln!(
                        out,
                        "  {}",
                        Theme::muted(&format!("{} no longer exists", folder.display()))
                    )?;
                }
                Err(e) => {
                    summary.failed += 1;
                    writeln!(out, "  {}", Theme::error(&format!("could not delete: {}", e)))?;
                }
            },
            Action::Quit => {
                summary.quit = true;
                log::info!("quit after {} of {} folders", idx, orphans.len());
                break;
            }
        }
    }

    Ok(summary)
}
