use std::{collections::BTreeSet, num::NonZeroUsize};

use regex::Regex;
use serde::Deserialize;

use crate::domain::{CodeBlock, Config, Diagnostic, Document, QuestionEntry};

/// Parses raw markdown text into structured question documents.
///
/// Parsing never fails: malformed input degrades to warnings and the parser
/// always produces a [`Document`], possibly with no entries.
#[derive(Debug)]
pub struct Parser {
    heading: Regex,
    fallback_language: String,
}

/// The outcome of parsing a single document.
#[derive(Debug)]
pub struct Parsed {
    /// The structured document.
    pub document: Document,
    /// Warnings recorded while parsing.
    pub diagnostics: Vec<Diagnostic>,
}

/// Frontmatter fields recognised at the top of a document.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    tags: BTreeSet<String>,
}

/// A fenced code block in the process of being collected.
#[derive(Debug)]
struct OpenFence {
    language: String,
    lines: Vec<String>,
}

/// A question entry in the process of being collected.
#[derive(Debug)]
struct OpenEntry {
    number: NonZeroUsize,
    title: String,
    prose: Vec<String>,
    code_blocks: Vec<CodeBlock>,
}

impl OpenEntry {
    fn new(number: NonZeroUsize, title: &str) -> Self {
        Self {
            number,
            title: title.to_string(),
            prose: Vec::new(),
            code_blocks: Vec::new(),
        }
    }

    fn finish(self) -> QuestionEntry {
        QuestionEntry {
            number: self.number,
            title: self.title,
            explanation: self.prose.join("\n").trim().to_string(),
            code_blocks: self.code_blocks,
        }
    }
}

impl Parser {
    /// Builds a parser from the corpus configuration.
    ///
    /// # Panics
    ///
    /// Never panics in practice: the configured prefixes are escaped before
    /// the heading pattern is compiled.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let prefixes = config
            .prefixes()
            .iter()
            .map(|prefix| regex::escape(prefix))
            .collect::<Vec<_>>()
            .join("|");

        // A question heading is a markdown heading whose text is an optional
        // prefix, a positive integer, an optional separator, and the title.
        let pattern = if prefixes.is_empty() {
            r"^(#{1,6})\s+(\d+)\s*[.:)]?\s*(.*)$".to_string()
        } else {
            format!(r"^(#{{1,6}})\s+(?:(?i:{prefixes})\s*)?(\d+)\s*[.:)]?\s*(.*)$")
        };

        Self {
            heading: Regex::new(&pattern).expect("escaped prefixes always compile"),
            fallback_language: config.fallback_language().to_string(),
        }
    }

    /// Parses a document's text.
    ///
    /// `source` is the document's path relative to the corpus root, without
    /// the extension; it is used to label diagnostics and name exports.
    #[must_use]
    pub fn parse(&self, source: &str, text: &str) -> Parsed {
        let mut document = Document::new(source);
        let mut diagnostics = Vec::new();

        let lines: Vec<&str> = text.lines().collect();
        let mut idx = read_frontmatter(&lines, &mut document, &mut diagnostics);

        let mut current: Option<OpenEntry> = None;
        let mut fence: Option<OpenFence> = None;

        while idx < lines.len() {
            let line = lines[idx];
            idx += 1;

            if fence.is_some() {
                if is_fence_delimiter(line) {
                    let open = fence.take().expect("fence is open");
                    attach_block(current.as_mut(), open);
                } else if let Some(open) = &mut fence {
                    open.lines.push(line.to_string());
                }
                continue;
            }

            if is_fence_delimiter(line) {
                fence = Some(OpenFence {
                    language: fence_language(line, &self.fallback_language),
                    lines: Vec::new(),
                });
                continue;
            }

            if let Some(entry) = self.question_heading(line) {
                if let Some(finished) = current.take() {
                    document.entries.push(finished.finish());
                }
                current = Some(entry);
                continue;
            }

            // Anything before the first question heading is preamble.
            if let Some(entry) = current.as_mut() {
                entry.prose.push(line.to_string());
            }
        }

        // A fence left open at the end of the file is treated as closed there.
        if let Some(open) = fence.take() {
            diagnostics.push(
                Diagnostic::warning("code fence not closed before end of file")
                    .for_source(source),
            );
            attach_block(current.as_mut(), open);
        }

        if let Some(finished) = current.take() {
            document.entries.push(finished.finish());
        }

        Parsed {
            document,
            diagnostics,
        }
    }

    /// Matches a question heading, returning the new entry if the line is
    /// one.
    ///
    /// Headings with a number of zero are not question headings; the number
    /// must be a positive integer.
    fn question_heading(&self, line: &str) -> Option<OpenEntry> {
        let captures = self.heading.captures(line)?;
        let number: NonZeroUsize = captures[2].parse().ok()?;
        Some(OpenEntry::new(number, captures[3].trim()))
    }
}

/// Consumes YAML frontmatter at the top of the document, if present.
///
/// Returns the index of the first content line. A `---` block that is not
/// terminated is not frontmatter; malformed YAML inside a terminated block
/// produces a warning and the metadata is ignored.
fn read_frontmatter(
    lines: &[&str],
    document: &mut Document,
    diagnostics: &mut Vec<Diagnostic>,
) -> usize {
    if lines.first().is_none_or(|line| line.trim() != "---") {
        return 0;
    }

    let Some(close) = lines.iter().skip(1).position(|line| line.trim() == "---") else {
        return 0;
    };

    let raw = lines[1..=close].join("\n");
    if raw.trim().is_empty() {
        return close + 2;
    }

    match serde_yaml::from_str::<FrontMatter>(&raw) {
        Ok(frontmatter) => {
            document.topic = frontmatter.topic;
            document.tags = frontmatter.tags;
        }
        Err(e) => diagnostics.push(
            Diagnostic::warning(format!("malformed frontmatter ignored: {e}"))
                .for_source(document.source.as_str()),
        ),
    }

    close + 2
}

fn is_fence_delimiter(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

fn fence_language(line: &str, fallback: &str) -> String {
    line.trim_start()
        .trim_start_matches('`')
        .split_whitespace()
        .next()
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}

fn attach_block(entry: Option<&mut OpenEntry>, fence: OpenFence) {
    // Fences in the preamble belong to no entry and are discarded.
    if let Some(entry) = entry {
        entry.code_blocks.push(CodeBlock {
            language: fence.language,
            text: fence.lines.join("\n"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> Parser {
        Parser::new(&Config::default())
    }

    fn number(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn numbered_headings_produce_one_entry_each() {
        let text = "## Q1. What is the CLR?\n\nThe runtime.\n\n## Q2. What is the \
                    CTS?\n\nThe type system.\n\n## Q3. What is the BCL?\n\nThe base \
                    library.\n";

        let parsed = parser().parse("basics", text);

        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.document.entries.len(), 3);
        assert_eq!(parsed.document.entries[0].title, "What is the CLR?");
        assert_eq!(parsed.document.entries[0].explanation, "The runtime.");
        assert_eq!(parsed.document.entries[2].number, number(3));
    }

    #[test]
    fn heading_forms_are_flexible() {
        let text = "# 1: Bare number\n\nA.\n\n### Question 2 Long prefix\n\nB.\n\n## q3) \
                    Lowercase prefix\n\nC.\n";

        let parsed = parser().parse("forms", text);

        let numbers: Vec<usize> = parsed
            .document
            .entries
            .iter()
            .map(|entry| entry.number.get())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(parsed.document.entries[1].title, "Long prefix");
    }

    #[test]
    fn code_fence_is_extracted_with_language() {
        let text = "## Q1. Boxing\n\nBoxing wraps a value type.\n\n```csharp\nobject o = \
                    42;\n```\n\nUnboxing reverses it.\n";

        let parsed = parser().parse("boxing", text);

        let entry = &parsed.document.entries[0];
        assert_eq!(entry.code_blocks.len(), 1);
        assert_eq!(entry.code_blocks[0].language, "csharp");
        assert_eq!(entry.code_blocks[0].text, "object o = 42;");
        assert_eq!(
            entry.explanation,
            "Boxing wraps a value type.\n\n\nUnboxing reverses it."
        );
    }

    #[test]
    fn unlabelled_fence_gets_fallback_language() {
        let text = "## Q1. Output\n\n```\nHello\n```\n";

        let parsed = parser().parse("output", text);

        assert_eq!(parsed.document.entries[0].code_blocks[0].language, "text");
    }

    #[test]
    fn unterminated_fence_is_closed_at_eof_with_warning() {
        let text = "## Q1. Broken\n\nSome prose.\n\n```csharp\nvar x = 1;\n";

        let parsed = parser().parse("broken", text);

        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(
            parsed.diagnostics[0].message,
            "code fence not closed before end of file"
        );

        let entry = &parsed.document.entries[0];
        assert_eq!(entry.explanation, "Some prose.");
        assert_eq!(entry.code_blocks.len(), 1);
        assert_eq!(entry.code_blocks[0].text, "var x = 1;");
    }

    #[test]
    fn heading_inside_fence_is_literal_code() {
        let text = "## Q1. Comments\n\n```markdown\n## Q99. Not a question\n```\n";

        let parsed = parser().parse("comments", text);

        assert_eq!(parsed.document.entries.len(), 1);
        assert_eq!(
            parsed.document.entries[0].code_blocks[0].text,
            "## Q99. Not a question"
        );
    }

    #[test]
    fn duplicate_numbers_keep_all_entries_in_order() {
        let text = "## Q1. First\n\nA.\n\n## Q1. Second\n\nB.\n";

        let parsed = parser().parse("dupes", text);

        assert_eq!(parsed.document.entries.len(), 2);
        // The later entry wins on lookup.
        assert_eq!(parsed.document.entry(number(1)).unwrap().title, "Second");
    }

    #[test]
    fn preamble_before_first_question_is_skipped() {
        let text = "# C# Interview Questions\n\nIntroduction paragraph.\n\n```text\nstray \
                    fence\n```\n\n## Q1. Real question\n\nAnswer.\n";

        let parsed = parser().parse("intro", text);

        assert_eq!(parsed.document.entries.len(), 1);
        let entry = &parsed.document.entries[0];
        assert_eq!(entry.title, "Real question");
        assert_eq!(entry.explanation, "Answer.");
        assert!(entry.code_blocks.is_empty());
    }

    #[test]
    fn answer_subheadings_stay_in_the_explanation() {
        let text = "## Q1. Delegates\n\nA delegate is a type-safe function \
                    pointer.\n\n### Example usage\n\nSee below.\n";

        let parsed = parser().parse("delegates", text);

        assert_eq!(parsed.document.entries.len(), 1);
        assert!(parsed.document.entries[0]
            .explanation
            .contains("### Example usage"));
    }

    #[test]
    fn zero_is_not_a_question_number() {
        let text = "## Q0. Not valid\n\n## Q1. Valid\n\nAnswer.\n";

        let parsed = parser().parse("zero", text);

        assert_eq!(parsed.document.entries.len(), 1);
        assert_eq!(parsed.document.entries[0].number, number(1));
    }

    #[test]
    fn frontmatter_populates_topic_and_tags() {
        let text = "---\ntopic: Collections\ntags:\n- csharp\n- dotnet\n---\n\n## Q1. \
                    Arrays\n\nFixed size.\n";

        let parsed = parser().parse("collections", text);

        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.document.topic.as_deref(), Some("Collections"));
        assert!(parsed.document.tags.contains("dotnet"));
        assert_eq!(parsed.document.entries.len(), 1);
    }

    #[test]
    fn malformed_frontmatter_warns_and_is_ignored() {
        let text = "---\ntopic: [unclosed\n---\n## Q1. Arrays\n\nFixed size.\n";

        let parsed = parser().parse("collections", text);

        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0]
            .message
            .starts_with("malformed frontmatter ignored"));
        assert!(parsed.document.topic.is_none());
        assert_eq!(parsed.document.entries.len(), 1);
    }

    #[test]
    fn unterminated_frontmatter_is_treated_as_content() {
        let text = "---\ntopic: Collections\n\n## Q1. Arrays\n\nFixed size.\n";

        let parsed = parser().parse("collections", text);

        assert!(parsed.document.topic.is_none());
        assert_eq!(parsed.document.entries.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_document() {
        let parsed = parser().parse("empty", "");

        assert!(parsed.document.entries.is_empty());
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn render_then_reparse_round_trips() {
        let text = "---\ntopic: LINQ\n---\n\n## Q1. What is LINQ?\n\nQuery syntax over \
                    collections.\n\n```csharp\nvar q = xs.Where(x => x > 0);\n```\n\n## \
                    Q2. Deferred execution\n\nQueries run on enumeration.\n";

        let p = parser();
        let first = p.parse("linq", text).document;
        let second = p.parse("linq", &first.to_markdown()).document;

        assert_eq!(first, second);
    }
}
