use std::{path::PathBuf, process};

use clap::Parser;
use qbank::{Corpus, Format};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Export the corpus to a browsable artifact")]
pub struct Export {
    /// The directory to write the export into
    #[arg(long, short)]
    out: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    format: ExportFormat,

    /// Suppress output
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum ExportFormat {
    #[default]
    Json,
    Html,
}

impl From<ExportFormat> for Format {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Html => Self::Html,
        }
    }
}

impl Export {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;

        // Report what was skipped, but export what parsed.
        for diagnostic in corpus.diagnostics() {
            eprintln!("{}", diagnostic.to_string().warning());
        }

        let summary = qbank::export::export(&corpus, &self.out, self.format.into())?;

        if !self.quiet {
            println!(
                "{}",
                format!(
                    "✅ Exported {} questions from {} documents to {}",
                    summary.entries,
                    summary.documents,
                    self.out.display()
                )
                .success()
            );
        }

        if corpus.had_read_failures() {
            process::exit(1);
        }

        Ok(())
    }
}
