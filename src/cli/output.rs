//! Output formatting for the CLI
//!
//! All user-visible output goes through [`OutputFormatter`] so that the
//! `--json` and `--no-color` flags behave consistently across commands.

use colored::Colorize;
use serde::Serialize;

/// Formats command output for the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
    no_color: bool,
}

impl OutputFormatter {
    /// Create a formatter from the global CLI flags
    #[must_use]
    pub const fn new(json: bool, no_color: bool) -> Self {
        Self { json, no_color }
    }

    /// Whether JSON output was requested
    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print a success message (suppressed in JSON mode)
    pub fn success(&self, message: &str) {
        if self.json {
            return;
        }
        if self.no_color {
            println!("{message}");
        } else {
            println!("{}", message.green());
        }
    }

    /// Print an informational message (suppressed in JSON mode)
    pub fn info(&self, message: &str) {
        if self.json {
            return;
        }
        println!("{message}");
    }

    /// Print a warning to stderr
    pub fn warning(&self, message: &str) {
        if self.no_color {
            eprintln!("Warning: {message}");
        } else {
            eprintln!("{} {message}", "Warning:".yellow().bold());
        }
    }

    /// Print an error to stderr
    pub fn error(&self, message: &str) {
        if self.no_color {
            eprintln!("Error: {message}");
        } else {
            eprintln!("{} {message}", "Error:".red().bold());
        }
    }

    /// Print a serializable value as pretty JSON
    pub fn json<T: Serialize>(&self, value: &T) -> crate::error::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a plain line (suppressed in JSON mode)
    pub fn line(&self, message: &str) {
        if self.json {
            return;
        }
        println!("{message}");
    }

    /// Print a dimmed secondary line (suppressed in JSON mode)
    pub fn detail(&self, message: &str) {
        if self.json {
            return;
        }
        if self.no_color {
            println!("  {message}");
        } else {
            println!("  {}", message.dimmed());
        }
    }
}
