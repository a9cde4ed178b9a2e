use std::{collections::BTreeSet, num::NonZeroUsize};

use serde::{Deserialize, Serialize};

use super::entry::QuestionEntry;

/// A parsed markdown document from the corpus.
///
/// Documents are independent of one another; question numbers are only
/// meaningful within a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The source file, relative to the corpus root, without the `.md`
    /// extension.
    pub source: String,

    /// The topic declared in the document's frontmatter, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Tags declared in the document's frontmatter.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    /// Question entries in document order.
    pub entries: Vec<QuestionEntry>,
}

impl Document {
    /// Creates an empty document for the given source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            topic: None,
            tags: BTreeSet::new(),
            entries: Vec::new(),
        }
    }

    /// Looks up an entry by question number.
    ///
    /// When two entries claim the same number, the later one wins.
    #[must_use]
    pub fn entry(&self, number: NonZeroUsize) -> Option<&QuestionEntry> {
        self.entries.iter().rev().find(|entry| entry.number == number)
    }

    /// Renders the document back to markdown.
    ///
    /// Re-parsing the output yields an equivalent document: same topic and
    /// tags, and the same entries in the same order.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        if self.topic.is_some() || !self.tags.is_empty() {
            let frontmatter = FrontMatter {
                topic: self.topic.as_deref(),
                tags: &self.tags,
            };
            let yaml = serde_yaml::to_string(&frontmatter).expect("this must never fail");
            out.push_str("---\n");
            out.push_str(&yaml);
            out.push_str("---\n");
        }

        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 || !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&entry.to_markdown());
        }

        out
    }
}

/// The serialized frontmatter shape, borrowed from the document.
#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    tags: &'a BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn entry(n: usize, title: &str) -> QuestionEntry {
        QuestionEntry::new(number(n), title)
    }

    #[test]
    fn entry_lookup_prefers_the_later_duplicate() {
        let mut document = Document::new("collections");
        document.entries.push(entry(1, "first"));
        document.entries.push(entry(2, "second"));
        document.entries.push(entry(1, "replacement"));

        let found = document.entry(number(1)).unwrap();
        assert_eq!(found.title, "replacement");
        assert_eq!(document.entries.len(), 3);
    }

    #[test]
    fn entry_lookup_misses_unknown_numbers() {
        let mut document = Document::new("collections");
        document.entries.push(entry(1, "first"));

        assert!(document.entry(number(9)).is_none());
    }

    #[test]
    fn to_markdown_includes_frontmatter_when_metadata_present() {
        let mut document = Document::new("linq");
        document.topic = Some("LINQ".to_string());
        document.tags = BTreeSet::from(["csharp".to_string()]);
        document.entries.push(entry(1, "What is LINQ?"));

        let markdown = document.to_markdown();
        assert!(markdown.starts_with("---\ntopic: LINQ\ntags:\n- csharp\n---\n"));
        assert!(markdown.contains("## Q1. What is LINQ?"));
    }

    #[test]
    fn to_markdown_omits_frontmatter_without_metadata() {
        let mut document = Document::new("linq");
        document.entries.push(entry(1, "What is LINQ?"));

        assert_eq!(document.to_markdown(), "## Q1. What is LINQ?\n");
    }
}
