use std::{path::PathBuf, process};

use clap::Parser;
use qbank::{Corpus, Severity};
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "Show document, question, and diagnostic counts")]
pub struct Stats {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Stats {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;

        let total_entries = corpus.entry_count();
        let code_blocks: usize = corpus
            .documents()
            .iter()
            .flat_map(|doc| &doc.entries)
            .map(|entry| entry.code_blocks.len())
            .sum();
        let diagnostics = corpus.check();
        let warnings = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        let errors = diagnostics.len() - warnings;

        if corpus.documents().is_empty() && !corpus.had_read_failures() {
            println!("No documents found yet. Add markdown files under the corpus root.");
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => Self::output_json(&corpus, code_blocks, warnings, errors)?,
            OutputFormat::Table => {
                if self.quiet {
                    Self::output_quiet(
                        corpus.documents().len(),
                        total_entries,
                        warnings,
                        errors,
                    );
                } else {
                    Self::output_table(&corpus, code_blocks, warnings, errors);
                }
            }
        }

        if corpus.had_read_failures() {
            process::exit(1);
        }

        Ok(())
    }

    fn output_json(
        corpus: &Corpus,
        code_blocks: usize,
        warnings: usize,
        errors: usize,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let documents: Vec<_> = corpus
            .documents()
            .iter()
            .map(|doc| {
                json!({
                    "source": doc.source,
                    "topic": doc.topic,
                    "entries": doc.entries.len(),
                })
            })
            .collect();

        let output = json!({
            "documents": documents,
            "totals": {
                "documents": corpus.documents().len(),
                "entries": corpus.entry_count(),
                "code_blocks": code_blocks,
            },
            "diagnostics": {
                "warnings": warnings,
                "errors": errors,
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(documents: usize, entries: usize, warnings: usize, errors: usize) {
        println!("documents={documents} entries={entries} warnings={warnings} errors={errors}");
    }

    fn output_table(corpus: &Corpus, code_blocks: usize, warnings: usize, errors: usize) {
        let narrow = is_narrow();

        println!("Corpus contents");
        println!("{}", "───────────────".dim());

        if narrow {
            // Stacked output for narrow terminals
            for doc in corpus.documents() {
                println!("{}: {}", doc.source, doc.entries.len());
            }
        } else {
            println!("{:<30} {:<10}", "Document", "Questions");
            for doc in corpus.documents() {
                println!("{:<30} {:<10}", doc.source, doc.entries.len());
            }
        }

        println!();
        println!(
            "Total: {} questions, {} code examples across {} documents",
            corpus.entry_count(),
            code_blocks,
            corpus.documents().len()
        );

        println!();

        if warnings == 0 && errors == 0 {
            println!("Diagnostics: {} ✅", "0".success());
        } else {
            println!(
                "Diagnostics: {} warnings, {} errors ⚠️",
                warnings.to_string().warning(),
                errors.to_string().warning()
            );
            println!("{}", "Run 'qb check' to investigate.".dim());
        }
    }
}
