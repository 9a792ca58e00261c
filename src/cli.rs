//! # Commands
//!
//! The subcommands shared by the command line and the interactive shell,
//! and the code that runs them against a [`Session`].
//!
//! Output goes to any [`Write`] so the same code drives the terminal and the
//! tests.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::daily::word_of_the_day;
use crate::export::export_csv;
use crate::session::Session;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Insert a word (every insert counts as a use)
    Insert { word: String },

    /// Look up a word, suggesting close matches when it is missing
    Search { word: String },

    /// Remove a word
    Remove { word: String },

    /// Replace a word with another
    Update { old: String, new: String },

    /// List words starting with a prefix
    Prefix {
        #[arg(default_value = "")]
        prefix: String,
    },

    /// List stored words within an edit distance of a word
    Suggest {
        word: String,

        /// Maximum edit distance (defaults to the configured value)
        #[arg(short, long)]
        distance: Option<usize>,
    },

    /// Show the most frequently used words
    Top {
        /// Number of words to show (defaults to the configured value)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Batch-insert words from a word list file or a directory of lists
    Load { path: PathBuf },

    /// Export usage statistics as CSV
    Export { path: Option<PathBuf> },

    /// Manage bookmarked words
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Show the word of the day
    Daily,

    /// Start an interactive shell
    Shell,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BookmarkAction {
    /// Bookmark a word with an optional note
    Add {
        word: String,

        #[arg(trailing_var_arg = true)]
        note: Vec<String>,
    },

    /// List bookmarks
    List,

    /// Remove a bookmark
    Remove { word: String },
}

impl Commands {
    /// Whether running this command can change persisted state
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Self::Prefix { .. }
                | Self::Suggest { .. }
                | Self::Top { .. }
                | Self::Export { .. }
                | Self::Bookmark {
                    action: BookmarkAction::List
                }
        )
    }
}

/// One line typed into the interactive shell
#[derive(Parser, Debug)]
#[command(name = "wordtree", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Strip carriage returns and surrounding whitespace from typed input
pub fn clean_input(input: &str) -> String {
    input.replace('\r', "").trim().to_string()
}

/// Clean a word argument and reject anything that cannot be stored
fn require_word(input: &str) -> Result<String> {
    let word = clean_input(input);
    if word.is_empty() {
        anyhow::bail!("Word cannot be empty");
    }
    if word.chars().any(char::is_whitespace) {
        anyhow::bail!("Word cannot contain whitespace: '{}'", word);
    }
    Ok(word)
}

/// Run a single command against the session
pub fn execute(
    session: &mut Session,
    config: &Config,
    command: Commands,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Insert { word } => {
            let word = require_word(&word)?;
            session.store.insert(&word);
            writeln!(out, "{}", format!("'{}' inserted.", word).green())?;
        }
        Commands::Search { word } => {
            let word = require_word(&word)?;
            if session.store.lookup(&word) {
                writeln!(out, "{}", format!("'{}' found!", word).green())?;
                if let Some(note) = session.bookmarks.get(&word) {
                    writeln!(out, "{} {}", "Bookmarked:".cyan(), note)?;
                }
            } else {
                writeln!(out, "{}", format!("'{}' not found.", word).red())?;
                let suggestions = session.store.suggest(&word, config.suggest_distance);
                if !suggestions.is_empty() {
                    writeln!(out, "{} {}", "Did you mean:".yellow(), suggestions.join(" "))?;
                }
            }
        }
        Commands::Remove { word } => {
            let word = require_word(&word)?;
            session.store.remove(&word);
            writeln!(out, "{}", format!("'{}' removed.", word).green())?;
        }
        Commands::Update { old, new } => {
            let old = require_word(&old)?;
            let new = require_word(&new)?;
            session.store.update(&old, &new);
            writeln!(out, "{}", format!("'{}' replaced by '{}'.", old, new).green())?;
        }
        Commands::Prefix { prefix } => {
            let words = session.store.starts_with(&clean_input(&prefix));
            if words.is_empty() {
                writeln!(out, "{}", "No matches.".red())?;
            } else {
                writeln!(out, "{}", "Matches:".green())?;
                for word in words {
                    writeln!(out, "- {}", word)?;
                }
            }
        }
        Commands::Suggest { word, distance } => {
            let word = require_word(&word)?;
            let max_distance = distance.unwrap_or(config.suggest_distance);
            let found = session.store.tree().suggest_with_distance(&word, max_distance);
            if found.is_empty() {
                writeln!(out, "{}", "No suggestions.".red())?;
            } else {
                for (candidate, distance) in found {
                    writeln!(out, "- {} ({})", candidate, distance)?;
                }
            }
        }
        Commands::Top { count } => {
            let count = count.unwrap_or(config.top_n);
            writeln!(out, "{}", format!("Top {} words:", count).bold().yellow())?;
            for (word, frequency) in session.store.top_n(count) {
                writeln!(out, "- {} ({})", word, frequency)?;
            }
        }
        Commands::Load { path } => {
            let count = session.store.load_words(&path)?;
            writeln!(
                out,
                "{}",
                format!("Loaded {} words from {}", count, path.display()).green()
            )?;
        }
        Commands::Export { path } => {
            let path = path.unwrap_or_else(|| session.paths.export.clone());
            let rows = export_csv(session.store.usage(), &path)?;
            writeln!(
                out,
                "{}",
                format!("Exported {} rows to '{}'.", rows, path.display()).green()
            )?;
        }
        Commands::Bookmark { action } => run_bookmark(session, action, out)?,
        Commands::Daily => {
            match word_of_the_day(session.store.tree(), &session.paths.word_of_day, Utc::now())? {
                Some(word) => {
                    writeln!(out, "{} {}", "Word of the Day:".bold().yellow(), word)?;
                }
                None => writeln!(out, "{}", "No words stored yet.".yellow())?,
            }
        }
        Commands::Shell => anyhow::bail!("Already in the shell"),
    }
    Ok(())
}

fn run_bookmark(session: &mut Session, action: BookmarkAction, out: &mut dyn Write) -> Result<()> {
    match action {
        BookmarkAction::Add { word, note } => {
            let word = require_word(&word)?;
            session.bookmarks.add(&word, &note.join(" "));
            writeln!(out, "{}", format!("Bookmark added for '{}'.", word).green())?;
        }
        BookmarkAction::List => {
            if session.bookmarks.is_empty() {
                writeln!(out, "{}", "You have no bookmarks yet.".yellow())?;
            }
            for (word, note) in session.bookmarks.iter() {
                let note = if note.is_empty() { "(No note)" } else { note };
                writeln!(out, "{} {}", "Word:".cyan(), word)?;
                writeln!(out, "{} {}", "Note:".cyan(), note)?;
            }
        }
        BookmarkAction::Remove { word } => {
            let word = clean_input(&word);
            if session.bookmarks.remove(&word) {
                writeln!(out, "{}", format!("Bookmark for '{}' removed.", word).green())?;
            } else {
                writeln!(out, "{}", format!("Bookmark for '{}' not found.", word).red())?;
            }
        }
    }
    Ok(())
}

/// Source of shell input lines (allows dependency injection for testing)
pub trait LineReader {
    /// Next line, or `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>>;
}

/// Production reader on top of stdin
pub struct StdinReader;

impl LineReader for StdinReader {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok((read > 0).then_some(line))
    }
}

/// Read and run commands until `exit`, `quit` or end of input.
///
/// A failing command is reported and the loop continues. State is saved
/// after every command that may change it.
pub fn run_shell(
    session: &mut Session,
    config: &Config,
    reader: &mut dyn LineReader,
    out: &mut dyn Write,
) -> Result<()> {
    loop {
        write!(out, "{} ", "wordtree>".cyan())?;
        out.flush()?;

        let Some(line) = reader.read_line()? else {
            break;
        };
        let line = clean_input(&line);
        if line.is_empty() {
            continue;
        }
        if matches!(line.as_str(), "exit" | "quit") {
            writeln!(out, "{}", "Goodbye!".bold().blue())?;
            break;
        }

        let command = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                writeln!(out, "{}", err.render())?;
                continue;
            }
        };

        let mutates = command.mutates();
        if let Err(err) = execute(session, config, command, out) {
            writeln!(out, "{}", format!("Error: {:#}", err).red())?;
            continue;
        }
        if mutates {
            session.save()?;
        }
    }
    Ok(())
}
