//! Core types for the parsed question corpus.

mod config;
mod diagnostic;
mod document;
mod entry;
mod validate;

pub use config::Config;
pub use diagnostic::{Diagnostic, Severity};
pub use document::Document;
pub use entry::{CodeBlock, QuestionEntry};
pub use validate::validate_documents;
