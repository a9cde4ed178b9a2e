//! HTML export: one page per source file plus an index page.
//!
//! The markup is deliberately plain; all user content is escaped.

use std::path::Path;

use super::{write_file, ExportError, ExportSummary};
use crate::{domain::Document, Corpus};

pub(super) fn export(corpus: &Corpus, out_dir: &Path) -> Result<ExportSummary, ExportError> {
    for document in corpus.documents() {
        let path = out_dir.join(format!("{}.html", document.source));
        write_file(&path, &render_document(document))?;
    }

    write_file(&out_dir.join("index.html"), &render_index(corpus))?;

    Ok(ExportSummary {
        documents: corpus.documents().len(),
        entries: corpus.entry_count(),
    })
}

fn render_document(document: &Document) -> String {
    let title = document.topic.as_deref().unwrap_or(&document.source);
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", escape(title)));

    if !document.tags.is_empty() {
        body.push_str("<p class=\"tags\">");
        for (i, tag) in document.tags.iter().enumerate() {
            if i > 0 {
                body.push_str(", ");
            }
            body.push_str(&escape(tag));
        }
        body.push_str("</p>\n");
    }

    // Anchor ids carry the entry position so duplicate numbers stay unique.
    for (position, entry) in document.entries.iter().enumerate() {
        body.push_str(&format!(
            "<section id=\"q{}-{}\">\n<h2>Q{}. {}</h2>\n",
            entry.number,
            position,
            entry.number,
            escape(&entry.title)
        ));

        for paragraph in entry.explanation.split("\n\n").filter(|p| !p.trim().is_empty()) {
            body.push_str(&format!("<p>{}</p>\n", escape(paragraph.trim())));
        }

        for block in &entry.code_blocks {
            body.push_str(&format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                escape(&block.language),
                escape(&block.text)
            ));
        }

        body.push_str("</section>\n");
    }

    page(title, &body)
}

fn render_index(corpus: &Corpus) -> String {
    let mut body = String::from("<h1>Question bank</h1>\n<ul>\n");

    for document in corpus.documents() {
        let label = document.topic.as_deref().unwrap_or(&document.source);
        body.push_str(&format!(
            "<li><a href=\"{}.html\">{}</a> ({} questions)</li>\n",
            escape(&document.source),
            escape(label),
            document.entries.len()
        ));
    }

    body.push_str(&format!(
        "</ul>\n<p>{} questions across {} documents.</p>\n",
        corpus.entry_count(),
        corpus.documents().len()
    ));

    page("Question bank", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
