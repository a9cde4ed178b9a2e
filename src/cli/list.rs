use std::{path::PathBuf, process};

use clap::Parser;
use qbank::Corpus;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "List question entries across the corpus")]
pub struct List {
    /// Only list entries from this document (source name, e.g. 'oop/basics')
    #[arg(long)]
    doc: Option<String>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;

        let documents: Vec<_> = corpus
            .documents()
            .iter()
            .filter(|doc| self.doc.as_ref().is_none_or(|name| &doc.source == name))
            .collect();

        if let Some(name) = &self.doc {
            if documents.is_empty() {
                anyhow::bail!("Document '{name}' not found");
            }
        }

        match self.output {
            OutputFormat::Json => {
                use serde_json::json;

                let entries: Vec<_> = documents
                    .iter()
                    .flat_map(|doc| {
                        doc.entries.iter().map(|entry| {
                            json!({
                                "source": doc.source,
                                "number": entry.number,
                                "title": entry.title,
                                "code_blocks": entry.code_blocks.len(),
                            })
                        })
                    })
                    .collect();

                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Table => {
                for doc in &documents {
                    println!("{}", doc.source.info());
                    for entry in &doc.entries {
                        let blocks = if entry.code_blocks.is_empty() {
                            String::new()
                        } else {
                            format!("  [{} code]", entry.code_blocks.len())
                        };
                        println!("  Q{:<4} {}{}", entry.number, entry.title, blocks.dim());
                    }
                    println!();
                }

                let total: usize = documents.iter().map(|doc| doc.entries.len()).sum();
                println!("{total} questions listed");
            }
        }

        if corpus.had_read_failures() {
            process::exit(1);
        }

        Ok(())
    }
}
