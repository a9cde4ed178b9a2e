use std::path::{Path, PathBuf};

mod check;
mod export;
mod list;
mod show;
mod stats;
mod terminal;

use check::Check;
use clap::ArgAction;
use export::Export;
use list::List;
use show::Show;
use stats::Stats;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the corpus directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Stats(Stats::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show corpus statistics (default)
    Stats(Stats),

    /// Initialize corpus configuration
    Init,

    /// Parse and validate the corpus, reporting diagnostics
    Check(Check),

    /// List question entries
    List(List),

    /// Show a single question entry
    Show(Show),

    /// Export the corpus to JSON or HTML
    Export(Export),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Stats(command) => command.run(root)?,
            Self::Init => init(&root)?,
            Self::Check(command) => command.run(root)?,
            Self::List(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Export(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[instrument]
fn init(root: &Path) -> anyhow::Result<()> {
    use std::fs;

    let qbank_dir = root.join(".qbank");
    if qbank_dir.exists() {
        anyhow::bail!("Corpus already initialized (found existing .qbank directory)");
    }

    fs::create_dir_all(&qbank_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create .qbank directory: {e}"))?;

    let config_path = qbank_dir.join("config.toml");
    let config = qbank::Config::default();
    config
        .save(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

    println!("Initialized question corpus in {}", root.display());
    println!("  Created: .qbank/config.toml");
    println!();
    println!("Next steps:");
    println!("  qb check        # validate the corpus");
    println!("  qb export --out site --format html");

    Ok(())
}
