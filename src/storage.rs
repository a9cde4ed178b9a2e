pub mod corpus;
/// Markdown parsing for corpus documents.
pub mod markdown;

pub use corpus::{Corpus, ScanError};
pub use markdown::{Parsed, Parser};
