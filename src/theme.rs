//! Terminal styling
//!
//! Colors are dropped automatically when stdout is not a terminal or when
//! `NO_COLOR` is set.

use colored::Colorize;

/// Formatting helpers for CLI output
pub struct Theme;

impl Theme {
    pub fn header(text: &str) -> String {
        text.bold().to_string()
    }

    pub fn category(text: &str) -> String {
        text.cyan().bold().to_string()
    }

    pub fn muted(text: &str) -> String {
        text.dimmed().to_string()
    }

    pub fn value(text: &str) -> String {
        text.bold().to_string()
    }

    pub fn size(text: &str) -> String {
        text.yellow().to_string()
    }

    pub fn success(text: &str) -> String {
        text.green().to_string()
    }

    /// Orphaned folders and other things that need attention
    pub fn warning(text: &str) -> String {
        text.yellow().bold().to_string()
    }

    pub fn error(text: &str) -> String {
        text.red().to_string()
    }

    pub fn prompt(text: &str) -> String {
        text.magenta().bold().to_string()
    }

    pub fn divider(width: usize) -> String {
        "-".repeat(width).dimmed().to_string()
    }

    pub fn divider_bold(width: usize) -> String {
        "=".repeat(width)
    }
}
