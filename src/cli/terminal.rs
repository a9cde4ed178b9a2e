//! Colour and layout helpers for command output.

use owo_colors::{OwoColorize, Style};

/// Columns below which tabular output switches to a stacked layout.
const NARROW_COLUMNS: u16 = 72;

/// Whether stdout is a colour-capable terminal.
pub fn color_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Whether the terminal is too narrow for side-by-side columns.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(w, _)| w.0 < NARROW_COLUMNS)
}

/// Styling for the output roles the commands use.
///
/// Every method degrades to plain text when stdout is piped or the terminal
/// reports no colour support.
pub trait Colorize {
    /// Green, for successful outcomes.
    fn success(&self) -> String;
    /// Yellow, for diagnostics and issue counts.
    fn warning(&self) -> String;
    /// Cyan, for headings and identifiers.
    fn info(&self) -> String;
    /// Dimmed, for secondary detail.
    fn dim(&self) -> String;
}

impl<T: AsRef<str>> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), Style::new().green())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), Style::new().yellow())
    }

    fn info(&self) -> String {
        paint(self.as_ref(), Style::new().cyan())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), Style::new().dimmed())
    }
}

fn paint(text: &str, style: Style) -> String {
    if color_enabled() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painting_without_a_tty_leaves_text_unchanged() {
        // The test harness captures stdout, so colour detection is off here.
        assert_eq!("done".success(), "done");
        assert_eq!(String::from("3 issues").warning(), "3 issues");
    }
}
