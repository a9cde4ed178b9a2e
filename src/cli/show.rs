use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;
use qbank::Corpus;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Show a single question entry")]
pub struct Show {
    /// The source name of the document (e.g. 'oop/basics')
    doc: String,

    /// The question number
    number: NonZeroUsize,

    /// Print the entry as markdown instead of formatted output
    #[arg(long)]
    markdown: bool,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;

        let Some(document) = corpus.document(&self.doc) else {
            anyhow::bail!("Document '{}' not found", self.doc);
        };

        // Duplicate numbers resolve to the later entry.
        let Some(entry) = document.entry(self.number) else {
            anyhow::bail!("Question {} not found in '{}'", self.number, self.doc);
        };

        if self.markdown {
            print!("{}", entry.to_markdown());
        } else {
            println!("{}", format!("Q{}. {}", entry.number, entry.title).info());
            if let Some(topic) = &document.topic {
                println!("{}", format!("Topic: {topic}").dim());
            }
            println!();

            if entry.explanation.is_empty() {
                println!("{}", "(no explanation)".dim());
            } else {
                println!("{}", entry.explanation);
            }

            for block in &entry.code_blocks {
                println!();
                println!("{}", format!("--- {} ---", block.language).dim());
                println!("{}", block.text);
            }
        }

        // An incomplete scan still renders what it found, but the process
        // must not report success. The propagated error exits with code 1.
        if corpus.had_read_failures() {
            anyhow::bail!("one or more source files could not be read");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn show_known_entry_succeeds() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join("basics.md"),
            "## Q1. What is the CLR?\n\nThe runtime.\n",
        )
        .unwrap();

        let show = Show {
            doc: "basics".to_string(),
            number: NonZeroUsize::new(1).unwrap(),
            markdown: false,
        };

        show.run(tmp.path().to_path_buf())
            .expect("show should find the entry");
    }

    #[test]
    fn show_missing_document_fails() {
        let tmp = tempdir().unwrap();

        let show = Show {
            doc: "missing".to_string(),
            number: NonZeroUsize::new(1).unwrap(),
            markdown: false,
        };

        assert!(show.run(tmp.path().to_path_buf()).is_err());
    }

    #[test]
    fn show_fails_when_a_source_file_is_unreadable() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("basics.md"), "## Q1. A\n\nB.\n").unwrap();
        // A directory with a .md name is picked up by the scan but cannot be
        // read, so the corpus records a read failure.
        fs::create_dir(tmp.path().join("bad.md")).unwrap();

        let show = Show {
            doc: "basics".to_string(),
            number: NonZeroUsize::new(1).unwrap(),
            markdown: true,
        };

        assert!(show.run(tmp.path().to_path_buf()).is_err());
    }

    #[test]
    fn show_missing_number_fails() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("basics.md"), "## Q1. A\n\nB.\n").unwrap();

        let show = Show {
            doc: "basics".to_string(),
            number: NonZeroUsize::new(9).unwrap(),
            markdown: false,
        };

        assert!(show.run(tmp.path().to_path_buf()).is_err());
    }
}
