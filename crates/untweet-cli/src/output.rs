//! Run summary formatting for the terminal.

use colored::{Color, Colorize};
use untweet_janitor::RunOutcome;

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Summarize a finished run.
    pub fn outcome(&self, outcome: &RunOutcome) -> String {
        match outcome {
            RunOutcome::NothingToDelete { fetched } => self.success(&format!(
                "Checked {} posts, nothing to delete",
                fetched
            )),
            RunOutcome::DryRun {
                fetched,
                scheduled,
                archive,
            } => {
                let mut lines = vec![self.info(&format!(
                    "Dry run: {} of {} posts would be deleted",
                    scheduled, fetched
                ))];
                lines.push(format!("  Archive: {}", archive.display()));
                lines.push("  Run again with --delete to delete them".to_string());
                lines.join("\n")
            }
            RunOutcome::Deleted {
                fetched,
                archive,
                report,
            } => {
                let headline = format!("{} (checked {} posts)", report.summary(), fetched);
                let mut lines = vec![if report.failed() == 0 {
                    self.success(&headline)
                } else {
                    self.warning(&headline)
                }];
                lines.push(format!("  Archive: {}", archive.display()));
                for (id, error) in report.failures() {
                    lines.push(format!("  {}", self.error(&format!("{}: {}", id, error))));
                }
                lines.join("\n")
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), Color::Red)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        text.color(color).to_string()
    }
}
