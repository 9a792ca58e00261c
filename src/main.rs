//! # Wordtree CLI Entry Point
//!
//! ## Overview
//!
//! Wordtree keeps a personal word list in a compressed prefix tree. It looks
//! words up, lists words by prefix, suggests corrections for misspellings
//! and tracks how often each word is used.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive shell (shows the word of the day first)
//! wordtree
//!
//! # One-shot commands
//! wordtree insert ephemeral
//! wordtree search ephemeral
//! wordtree prefix eph
//! wordtree suggest ephemerl --distance 2
//! wordtree top -n 10
//! wordtree load ./assets/gre.txt
//! wordtree export ./usage.csv
//! wordtree bookmark add ephemeral lasting a very short time
//! ```
//!
//! ## Logging
//!
//! Diagnostics go to stderr. `--verbose` enables debug output for this
//! crate; `RUST_LOG` overrides both.

use wordtree::cli::{execute, run_shell, Commands, StdinReader};
use wordtree::config::{Config, DataPaths};
use wordtree::session::Session;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Wordtree - a personal word store with prefix search and fuzzy suggestions
#[derive(Parser, Debug)]
#[command(name = "wordtree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A personal word store with prefix search and fuzzy suggestions", long_about = None)]
struct Args {
    /// Directory holding words, usage stats and bookmarks
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => config.resolve_data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "opening session");

    let mut session = Session::open(DataPaths::new(data_dir), config.dictionary.as_deref())?;
    let mut stdout = io::stdout();

    match args.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            execute(&mut session, &config, Commands::Daily, &mut stdout)?;
            run_shell(&mut session, &config, &mut StdinReader, &mut stdout)?;
        }
        command => {
            let mutates = command.mutates();
            execute(&mut session, &config, command, &mut stdout)?;
            if mutates {
                session.save()?;
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "wordtree=debug"
    } else {
        "wordtree=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
