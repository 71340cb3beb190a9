//! Console status lines.
//!
//! Formatting is a pure function of a style tag and a message, so callers
//! decide where the text goes and tests can inspect it. `colored` handles
//! `NO_COLOR` and non-tty output.

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Success,
    Failure,
    Warning,
    Info,
}

impl Style {
    fn label(self) -> &'static str {
        match self {
            Style::Success => "Installed",
            Style::Failure => "Error:",
            Style::Warning => "Warning:",
            Style::Info => "Created",
        }
    }
}

/// Render `message` behind the style's colored label.
pub fn status(style: Style, message: &str) -> String {
    labelled(style, style.label(), message)
}

/// Like [`status`] but with a caller-chosen label, e.g. `"Skipped"`.
pub fn labelled(style: Style, label: &str, message: &str) -> String {
    let label = match style {
        Style::Success => label.green().bold(),
        Style::Failure => label.red().bold(),
        Style::Warning => label.yellow().bold(),
        Style::Info => label.blue().bold(),
    };
    format!("{} {}", label, message)
}
