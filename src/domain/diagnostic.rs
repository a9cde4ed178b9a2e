use std::fmt;

use serde::Serialize;

/// How serious a diagnostic is.
///
/// Nothing in the pipeline is fatal; errors mark conditions (such as an
/// unreadable file) that affect the process exit code, warnings mark
/// structural issues in otherwise usable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A structural issue that did not prevent processing.
    Warning,
    /// A failure that caused content to be skipped.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A non-fatal message produced during scanning, parsing, or validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,

    /// The source document the diagnostic refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// A human-readable description of the issue.
    pub message: String,
}

impl Diagnostic {
    /// Creates a warning with no source attached.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            source: None,
            message: message.into(),
        }
    }

    /// Creates an error with no source attached.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            source: None,
            message: message.into(),
        }
    }

    /// Attaches the source document the diagnostic refers to.
    #[must_use]
    pub fn for_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}: {}", self.severity, source, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_source_when_present() {
        let diagnostic = Diagnostic::warning("empty explanation").for_source("oop/basics");

        assert_eq!(
            diagnostic.to_string(),
            "warning: oop/basics: empty explanation"
        );
    }

    #[test]
    fn display_without_source() {
        let diagnostic = Diagnostic::error("failed to read file");

        assert_eq!(diagnostic.to_string(), "error: failed to read file");
    }

    #[test]
    fn errors_sort_after_warnings() {
        assert!(Severity::Warning < Severity::Error);
    }
}
