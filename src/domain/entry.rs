use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// A fenced code example attached to a question entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// The language token from the opening fence line.
    ///
    /// When the opening fence carries no language token, this is the
    /// configured fallback language (`"text"` by default).
    pub language: String,

    /// The enclosed source text, verbatim, without the fence lines.
    pub text: String,
}

/// A single parsed question-and-answer unit.
///
/// Entries are created once at parse time and are immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionEntry {
    /// The question number.
    ///
    /// Unique within a well-formed document; the validator warns about
    /// duplicates.
    pub number: NonZeroUsize,

    /// The heading text after the question number.
    pub title: String,

    /// Explanatory prose between the heading and the next question heading,
    /// excluding fenced code blocks.
    pub explanation: String,

    /// Code examples in the order they appear within the entry.
    pub code_blocks: Vec<CodeBlock>,
}

impl QuestionEntry {
    /// Construct a new entry with no explanation or code blocks.
    #[must_use]
    pub fn new(number: NonZeroUsize, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            explanation: String::new(),
            code_blocks: Vec::new(),
        }
    }

    /// Renders the entry back to markdown.
    ///
    /// The heading uses the canonical `## Q<number>. <title>` form, followed
    /// by the explanation and then each code block. Re-parsing the output
    /// yields an equivalent entry.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = if self.title.is_empty() {
            format!("## Q{}.\n", self.number)
        } else {
            format!("## Q{}. {}\n", self.number, self.title)
        };

        if !self.explanation.is_empty() {
            out.push('\n');
            out.push_str(&self.explanation);
            out.push('\n');
        }

        for block in &self.code_blocks {
            out.push('\n');
            out.push_str("```");
            out.push_str(&block.language);
            out.push('\n');
            out.push_str(&block.text);
            out.push_str("\n```\n");
        }

        out
    }
}
