use std::{collections::HashSet, num::NonZeroUsize};

use super::{Diagnostic, Document};

/// Checks structural invariants across a set of parsed documents.
///
/// Every finding is a warning; validation never halts processing. The checks
/// are:
///
/// - duplicate question numbers within a document (one warning per duplicate
///   occurrence; lookups resolve to the later entry)
/// - entries with an empty explanation
/// - entries with an empty title
#[must_use]
pub fn validate_documents(documents: &[Document]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for document in documents {
        let mut seen: HashSet<NonZeroUsize> = HashSet::new();

        for entry in &document.entries {
            if !seen.insert(entry.number) {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "duplicate question number {}: the later entry wins",
                        entry.number
                    ))
                    .for_source(document.source.as_str()),
                );
            }

            if entry.title.trim().is_empty() {
                diagnostics.push(
                    Diagnostic::warning(format!("question {} has an empty title", entry.number))
                        .for_source(document.source.as_str()),
                );
            }

            if entry.explanation.trim().is_empty() {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "question {} has an empty explanation",
                        entry.number
                    ))
                    .for_source(document.source.as_str()),
                );
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuestionEntry;

    fn entry(n: usize, title: &str, explanation: &str) -> QuestionEntry {
        let mut entry = QuestionEntry::new(NonZeroUsize::new(n).unwrap(), title);
        entry.explanation = explanation.to_string();
        entry
    }

    fn document(source: &str, entries: Vec<QuestionEntry>) -> Document {
        let mut document = Document::new(source);
        document.entries = entries;
        document
    }

    #[test]
    fn clean_document_produces_no_diagnostics() {
        let doc = document(
            "basics",
            vec![
                entry(1, "What is CLR?", "The runtime."),
                entry(2, "What is CTS?", "The type system."),
            ],
        );

        assert!(validate_documents(&[doc]).is_empty());
    }

    #[test]
    fn one_warning_per_duplicate_occurrence() {
        let doc = document(
            "basics",
            vec![
                entry(1, "a", "x"),
                entry(1, "b", "x"),
                entry(1, "c", "x"),
                entry(2, "d", "x"),
            ],
        );

        let diagnostics = validate_documents(&[doc]);
        let duplicates: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.message.contains("duplicate question number 1"))
            .collect();
        assert_eq!(duplicates.len(), 2);
    }

    #[test]
    fn empty_explanation_is_flagged() {
        let doc = document("basics", vec![entry(3, "What is GC?", "  ")]);

        let diagnostics = validate_documents(&[doc]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "question 3 has an empty explanation"
        );
        assert_eq!(diagnostics[0].source.as_deref(), Some("basics"));
    }

    #[test]
    fn empty_title_is_flagged() {
        let doc = document("basics", vec![entry(4, "", "Some answer.")]);

        let diagnostics = validate_documents(&[doc]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "question 4 has an empty title");
    }

    #[test]
    fn duplicate_numbers_in_different_documents_are_independent() {
        let first = document("a", vec![entry(1, "t", "x")]);
        let second = document("b", vec![entry(1, "t", "x")]);

        assert!(validate_documents(&[first, second]).is_empty());
    }
}
