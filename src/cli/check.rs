use std::{path::PathBuf, process};

use clap::Parser;
use qbank::{Corpus, Diagnostic};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Parse and validate the corpus, reporting diagnostics")]
pub struct Check {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except the exit code
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;
        let diagnostics = corpus.check();

        match self.output {
            OutputFormat::Table => self.output_table(&corpus, &diagnostics),
            OutputFormat::Json => Self::output_json(&corpus, &diagnostics)?,
            OutputFormat::Summary => Self::output_summary(&diagnostics),
        }

        // Read failures take precedence over structural warnings.
        if corpus.had_read_failures() {
            process::exit(1);
        }
        if !diagnostics.is_empty() {
            process::exit(2);
        }

        Ok(())
    }

    fn output_table(&self, corpus: &Corpus, diagnostics: &[Diagnostic]) {
        if self.quiet {
            return;
        }

        println!(
            "Checked {} questions across {} documents",
            corpus.entry_count(),
            corpus.documents().len()
        );
        println!();

        if diagnostics.is_empty() {
            println!("{}", "Corpus is healthy (0 issues)".success());
            return;
        }

        // Diagnostics go to stderr so piped output stays clean.
        for diagnostic in diagnostics {
            eprintln!("{}", diagnostic.to_string().warning());
        }

        println!();
        println!(
            "{}",
            format!("Summary: {} issues found", diagnostics.len()).warning()
        );
    }

    fn output_json(corpus: &Corpus, diagnostics: &[Diagnostic]) -> anyhow::Result<()> {
        use serde_json::json;

        let output = json!({
            "status": if diagnostics.is_empty() { "healthy" } else { "issues_found" },
            "documents": corpus.documents().len(),
            "entries": corpus.entry_count(),
            "diagnostics": diagnostics,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_summary(diagnostics: &[Diagnostic]) {
        println!("issues={}", diagnostics.len());
    }
}
