//! JSON export: one serialized document per source file plus an index.

use std::path::Path;

use chrono::Utc;
use serde_json::json;

use super::{write_file, ExportError, ExportSummary};
use crate::Corpus;

pub(super) fn export(corpus: &Corpus, out_dir: &Path) -> Result<ExportSummary, ExportError> {
    for document in corpus.documents() {
        let path = out_dir.join(format!("{}.json", document.source));
        let contents =
            serde_json::to_string_pretty(document).expect("document serialization must not fail");
        write_file(&path, &contents)?;
    }

    let documents: Vec<_> = corpus
        .documents()
        .iter()
        .map(|document| {
            json!({
                "source": document.source,
                "topic": document.topic,
                "tags": document.tags,
                "entries": document.entries.len(),
            })
        })
        .collect();

    let index = json!({
        "generated": Utc::now().to_rfc3339(),
        "documents": documents,
        "total_documents": corpus.documents().len(),
        "total_entries": corpus.entry_count(),
    });

    let contents =
        serde_json::to_string_pretty(&index).expect("index serialization must not fail");
    write_file(&out_dir.join("index.json"), &contents)?;

    Ok(ExportSummary {
        documents: corpus.documents().len(),
        entries: corpus.entry_count(),
    })
}
