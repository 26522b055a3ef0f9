use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use judgement_cli::config::TableConfig;
use judgement_cli::input::ConsoleInput;
use judgement_cli::logging::init_logging;
use judgement_cli::observer::{Fanout, JsonlObserver, TerminalObserver};
use judgement_cli::session::run_table;
use judgement_core::AppInfo;

/// Play Judgement against the computer from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "judgement",
    author,
    version,
    about = "Judgement: predict your tricks exactly"
)]
struct Cli {
    /// Path to a YAML table configuration; the classic table is used otherwise.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the RNG seed for shuffling and automated players.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of rounds.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<u8>,

    /// Rotate the opening lead around the table each round.
    #[arg(long)]
    rotate_lead: bool,

    /// Replace human seats with automated players.
    #[arg(long)]
    autoplay: bool,

    /// Write every game event as JSON lines to this file.
    #[arg(long, value_name = "FILE")]
    events: Option<PathBuf>,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => TableConfig::from_path(path)?,
        None => TableConfig::classic(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }

    if cli.rotate_lead {
        config.rotate_opening_lead = true;
    }

    if cli.autoplay {
        config.autoplay();
    }

    if let Some(events) = cli.events {
        config.outputs.events_jsonl = Some(events);
    }

    config.validate()?;

    let seat_count = config.players.len();
    println!(
        "{} {}: {seat_count} players, {} round{}",
        AppInfo::name(),
        AppInfo::version(),
        config.rounds,
        if config.rounds == 1 { "" } else { "s" }
    );

    if cli.validate_only {
        println!("Validation-only mode: no game played.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging)?;
    if let Some(path) = logging_guard.log_path() {
        println!("Structured log: {}", path.display());
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    println!("Seed: {seed}");

    let mut terminal = TerminalObserver::new(io::stdout());
    let mut jsonl = match config.outputs.events_jsonl.as_ref() {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating events directory at {}", dir.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("creating events file at {}", path.display()))?;
            Some(JsonlObserver::new(BufWriter::new(file)))
        }
        None => None,
    };

    let input = config
        .has_human()
        .then(|| ConsoleInput::new(BufReader::new(io::stdin()), io::stdout()));

    let result = {
        let mut fanout = Fanout::new();
        fanout.push(&mut terminal);
        if let Some(jsonl) = jsonl.as_mut() {
            fanout.push(jsonl);
        }
        run_table(&config, seed, input, &mut fanout)
    };

    if let Some(err) = terminal.take_error() {
        return Err(err).context("writing game output");
    }
    if let Some(jsonl) = jsonl {
        let written = jsonl.written();
        jsonl.finish().context("writing events file")?;
        if let Some(path) = config.outputs.events_jsonl.as_ref() {
            println!("Events log: {} ({written} events)", path.display());
        }
    }

    match result {
        Ok(_) => Ok(()),
        Err(err) => bail!("game aborted: {err}"),
    }
}
