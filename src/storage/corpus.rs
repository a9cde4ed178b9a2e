//! A filesystem backed corpus of question documents
//!
//! The [`Corpus`] scans a directory tree for markdown files and parses each
//! one independently. Source files are static, so re-running the scan is
//! idempotent.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

use crate::{
    domain::{validate_documents, Config, Diagnostic, Document},
    storage::markdown::{Parsed, Parser},
};

/// A corpus of question documents loaded from a directory tree.
#[derive(Debug)]
pub struct Corpus {
    root: PathBuf,
    config: Config,
    documents: Vec<Document>,
    diagnostics: Vec<Diagnostic>,
    failed_reads: usize,
}

/// Errors that can occur when opening the corpus root.
///
/// Per-file failures are not errors at this level: an unreadable file is
/// recorded as a diagnostic and skipped so one bad file does not halt the
/// scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The corpus root does not exist.
    #[error("corpus root {0} does not exist")]
    NotFound(PathBuf),

    /// The corpus root exists but is not a directory.
    #[error("corpus root {0} is not a directory")]
    NotADirectory(PathBuf),
}

impl Corpus {
    /// Loads every markdown document under `root`.
    ///
    /// Files are parsed in parallel and the results are ordered by path so
    /// repeated scans are deterministic. The `.qbank` metadata directory and
    /// configured ignore names are skipped.
    ///
    /// # Errors
    ///
    /// Fails only if the root itself is missing or not a directory. A file
    /// that cannot be read produces an error diagnostic and is skipped.
    pub fn load(root: PathBuf) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::NotFound(root));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let config = load_config(&root);
        let parser = Parser::new(&config);
        let paths = collect_markdown_paths(&root, &config);

        let results: Vec<_> = paths
            .par_iter()
            .map(|path| load_document(path, &root, &parser))
            .collect();

        let mut documents = Vec::new();
        let mut diagnostics = Vec::new();
        let mut failed_reads = 0;

        for result in results {
            match result {
                Ok(Parsed {
                    document,
                    diagnostics: parse_diagnostics,
                }) => {
                    diagnostics.extend(parse_diagnostics);
                    documents.push(document);
                }
                Err(diagnostic) => {
                    failed_reads += 1;
                    diagnostics.push(diagnostic);
                }
            }
        }

        tracing::info!(
            documents = documents.len(),
            diagnostics = diagnostics.len(),
            failed_reads,
            "loaded corpus"
        );

        Ok(Self {
            root,
            config,
            documents,
            diagnostics,
            failed_reads,
        })
    }

    /// The corpus root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration the corpus was loaded with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The parsed documents, ordered by source path.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Diagnostics recorded while scanning and parsing.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Runs the validator and returns scan, parse, and validation
    /// diagnostics together.
    #[must_use]
    pub fn check(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.clone();
        diagnostics.extend(validate_documents(&self.documents));
        diagnostics
    }

    /// Total number of question entries across all documents.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.documents.iter().map(|doc| doc.entries.len()).sum()
    }

    /// Whether any file failed to read during the scan.
    ///
    /// Commands exit with code 1 when this is set.
    #[must_use]
    pub const fn had_read_failures(&self) -> bool {
        self.failed_reads > 0
    }

    /// Finds a document by its source name.
    #[must_use]
    pub fn document(&self, source: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.source == source)
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join(".qbank").join("config.toml");
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

fn collect_markdown_paths(root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            // Skip the .qbank directory (used for configuration and other
            // metadata)
            !entry.path().components().any(|c| c.as_os_str() == ".qbank")
        })
        .filter(|entry| entry.path().extension() == Some(OsStr::new("md")))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !config.is_ignored(name))
        })
        .map(walkdir::DirEntry::into_path)
        .collect();

    paths.sort();
    paths
}

fn load_document(path: &Path, root: &Path, parser: &Parser) -> Result<Parsed, Diagnostic> {
    let source = source_name(path, root);
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(parser.parse(&source, &text)),
        Err(e) => {
            tracing::debug!("Failed to read {}: {e}", path.display());
            Err(
                Diagnostic::error(format!("failed to read {}: {e}", path.display()))
                    .for_source(source),
            )
        }
    }
}

/// The document's source name: its path relative to the corpus root, with
/// the extension removed and forward slashes regardless of platform.
fn source_name(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .with_extension("")
        .to_string_lossy()
        .replace('\\', "/")
}
