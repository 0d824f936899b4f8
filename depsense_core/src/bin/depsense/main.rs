//! `depsense` - ask questions about your Python dependencies in plain English.

mod repl;
mod style;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use depsense_core::{Depsense, FileSnapshotRepository};
use depsense_vocab::{ColorChoice, DepsenseConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::style::Painter;

/// Learn package facts from text and answer questions about them
#[derive(Parser, Debug)]
#[command(name = "depsense", version, about)]
struct Args {
    /// Learn from a text file, save the snapshot, and exit
    #[arg(long, value_name = "FILE", conflicts_with = "query")]
    learn: Option<PathBuf>,

    /// Answer a single question and exit
    #[arg(long, num_args = 1.., value_name = "QUESTION")]
    query: Option<Vec<String>>,

    /// Snapshot file (overrides the config)
    #[arg(long, env = "DEPSENSE_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, default_value = "depsense.toml")]
    config: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

const DEFAULT_LOG_DIRECTIVE: &str = "depsense_core=warn";

/// Filter from a `RUST_LOG` value, falling back to warnings from the library.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(directives.as_deref()))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = DepsenseConfig::load_or_default(Some(args.config.as_path()))
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(snapshot) = args.snapshot {
        config.snapshot.path = snapshot;
    }
    if args.no_color {
        config.display.color = ColorChoice::Never;
    }

    let repository = FileSnapshotRepository::new(&config.snapshot.path)
        .with_pretty(config.snapshot.pretty);
    let painter = Painter::new(config.display.color);
    let mut depsense = Depsense::with_config(&config);

    if let Some(path) = args.learn {
        depsense
            .load(&repository)
            .context("loading existing snapshot")?;
        let count = depsense
            .learn_file(&path)
            .with_context(|| format!("learning from {}", path.display()))?;
        depsense.save(&repository).context("saving snapshot")?;
        println!("✅ {} sentences learned. Snapshot saved.", count);
        return Ok(());
    }

    if let Some(words) = args.query {
        depsense.load(&repository).context("loading snapshot")?;
        println!("{}", painter.response(&depsense.answer(&words.join(" "))));
        return Ok(());
    }

    repl::run(&mut depsense, &repository, &config, &painter)
}
