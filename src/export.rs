//! Export of a parsed corpus to browsable artifacts
//!
//! Each source document becomes one output file, plus an index covering the
//! whole corpus.

use std::{
    io,
    path::{Path, PathBuf},
};

use crate::Corpus;

mod html;
mod json;

/// The output format of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One JSON document per source file plus `index.json`.
    Json,
    /// One HTML page per source file plus `index.html`.
    Html,
}

/// Errors produced while writing export artifacts.
///
/// A write failure aborts the export call; it does not affect the loaded
/// corpus.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The destination could not be written.
    #[error("failed to write {path}")]
    Write {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Totals reported after a successful export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of documents exported.
    pub documents: usize,
    /// Number of question entries exported.
    pub entries: usize,
}

/// Writes the corpus to `out_dir` in the requested format.
///
/// # Errors
///
/// Returns an [`ExportError`] if the destination is not writable.
pub fn export(corpus: &Corpus, out_dir: &Path, format: Format) -> Result<ExportSummary, ExportError> {
    match format {
        Format::Json => json::export(corpus, out_dir),
        Format::Html => html::export(corpus, out_dir),
    }
}

/// Writes a file, creating parent directories as needed.
fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    let write = || -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };

    write().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
