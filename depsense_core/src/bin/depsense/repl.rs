//! Interactive session.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use depsense_core::{Depsense, SnapshotRepository, StoreStats};
use depsense_vocab::DepsenseConfig;
use tracing::warn;

use crate::style::Painter;

const BANNER: &str = "
╔═══════════════════════════════════════════════════════════╗
║                                                           ║
║   🧠 DEPSENSE                                              ║
║   ──────────────────────────────────────────────────────  ║
║   The dependency helper that understands English.         ║
║                                                           ║
║   Commands: /help, /stats, /quit                          ║
║                                                           ║
╚═══════════════════════════════════════════════════════════╝
";

const HELP: &str = "
📖 HELP
────────────────────────────────────────────────

COMMANDS:
  /help              Show this help
  /stats             Show statistics
  /learn FILE        Learn from a text file
  /save              Save the snapshot
  /quit              Quit

QUESTIONS (in English):
  what is numpy
  what does pytorch depend on
  why does sklearn crash
  are tensorflow and pytorch compatible?
  install keras

LEARNING (example content):
  numpy is a computation module.
  pandas depends on numpy.
  tensorflow and pytorch have a conflict.
  sklearn crashes if scipy is too old.
  To fix sklearn you need scipy.
";

/// A parsed REPL line.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Help,
    Stats,
    Save,
    Quit,
    Learn(Option<&'a str>),
    Unknown(&'a str),
    Question(&'a str),
}

fn parse(input: &str) -> Command<'_> {
    if !input.starts_with('/') {
        return Command::Question(input);
    }
    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, Some(rest.trim())),
        None => (input, None),
    };
    match cmd.to_lowercase().as_str() {
        "/quit" | "/q" => Command::Quit,
        "/help" | "/h" => Command::Help,
        "/stats" => Command::Stats,
        "/save" => Command::Save,
        "/learn" => Command::Learn(
            rest.map(|path| path.trim_matches(|c| c == '"' || c == '\''))
                .filter(|path| !path.is_empty()),
        ),
        _ => Command::Unknown(cmd),
    }
}

fn format_stats(stats: &StoreStats) -> String {
    format!(
        "
📊 DEPSENSE STATS
────────────────────────────
Concepts:            {:>6}
Links:               {:>6}
Relations:           {:>6}
Co-occurrences:      {:>6}
Sequences:           {:>6}
",
        stats.concepts,
        stats.links,
        stats.relations,
        stats.cooccurrence_edges,
        stats.sequence_edges
    )
}

/// Run the interactive loop until `/quit` or end of input.
pub fn run(
    depsense: &mut Depsense,
    repository: &dyn SnapshotRepository,
    config: &DepsenseConfig,
    painter: &Painter,
) -> Result<()> {
    if config.display.banner {
        println!("{}", painter.banner(BANNER));
    }

    match depsense.load(repository) {
        Ok(true) => println!("📂 Snapshot loaded: {} concepts", depsense.stats().concepts),
        Ok(false) => println!(
            "{}",
            painter.hint("💡 Empty base. Use '/learn file.txt' to learn.")
        ),
        Err(err) => {
            warn!(error = %err, "snapshot could not be loaded");
            println!("{}", painter.hint(&format!("⚠️ Could not load snapshot: {}", err)));
        }
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}", painter.prompt("\n> "));
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("\n👋 Bye!");
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse(input) {
            Command::Quit => {
                println!("👋 Bye!");
                break;
            }
            Command::Help => println!("{}", HELP),
            Command::Stats => println!("{}", format_stats(&depsense.stats())),
            Command::Save => match depsense.save(repository) {
                Ok(()) => println!("✅ Snapshot saved."),
                Err(err) => println!("❌ Save failed: {}", err),
            },
            Command::Learn(None) => println!("❌ Usage: /learn filename.txt"),
            Command::Learn(Some(path)) => match depsense.learn_file(path) {
                Ok(count) if config.snapshot.autosave_on_learn => match depsense.save(repository) {
                    Ok(()) => println!("✅ {} sentences learned. Snapshot saved.", count),
                    Err(err) => println!("✅ {} sentences learned. ❌ Save failed: {}", count, err),
                },
                Ok(count) => println!("✅ {} sentences learned.", count),
                Err(err) => println!("❌ {}", err),
            },
            Command::Unknown(cmd) => println!("❓ Unknown command: {}", cmd),
            Command::Question(question) => {
                println!("{}", painter.response(&depsense.answer(question)))
            }
        }
    }

    Ok(())
}
