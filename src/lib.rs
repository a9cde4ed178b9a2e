//! Markdown interview Q&A corpus tooling
//!
//! A corpus is a directory of markdown documents, each containing a sequence
//! of numbered question entries with explanatory prose and fenced code
//! examples.

pub mod domain;
pub use domain::{CodeBlock, Config, Diagnostic, Document, QuestionEntry, Severity};

/// Filesystem scanning and markdown parsing for the corpus.
pub mod storage;
pub use storage::{Corpus, ScanError};

/// Export of a parsed corpus to browsable artifacts.
pub mod export;
pub use export::{ExportError, ExportSummary, Format};
