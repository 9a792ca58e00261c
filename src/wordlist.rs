//! # Word Lists
//!
//! Reading and writing plain word lists: whitespace-separated tokens, usually
//! one word per line.
//!
//! A word list path may name a single file or a directory. For a directory,
//! every `.txt` file up to two levels deep is read in path order, which makes
//! category folders such as `assets/gre.txt`, `assets/medical.txt` loadable in
//! one go.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension recognised when loading a directory of word lists
pub const WORDLIST_EXTENSION: &str = "txt";

/// Read every token from a word list file or directory.
///
/// A missing path yields no tokens rather than an error. Files that cannot
/// be read are skipped with a warning, and bytes that are not valid UTF-8
/// are replaced rather than rejecting the whole list.
pub fn read_words(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "word list not found, nothing to load");
        return Ok(Vec::new());
    }

    let mut words = Vec::new();
    for file in wordlist_files(path)? {
        match read_lossy(&file) {
            Ok(content) => words.extend(content.split_whitespace().map(str::to_string)),
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "skipping unreadable word list");
            }
        }
    }

    tracing::debug!(path = %path.display(), count = words.len(), "read word list");
    Ok(words)
}

fn read_lossy(file: &Path) -> Result<String> {
    let bytes =
        fs::read(file).with_context(|| format!("Failed to read word list: {}", file.display()))?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            tracing::warn!(path = %file.display(), "word list is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// Write `words` one per line, creating parent directories as needed
pub fn save_words<S: AsRef<str>>(path: &Path, words: &[S]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create word list directory: {}", parent.display())
        })?;
    }

    let mut out = String::new();
    for word in words {
        out.push_str(word.as_ref());
        out.push('\n');
    }

    fs::write(path, out)
        .with_context(|| format!("Failed to write word list: {}", path.display()))?;
    Ok(())
}

fn wordlist_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!(
            "Path '{}' is neither a file nor a directory",
            path.display()
        );
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read directory entry");
                None
            }
        })
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.is_file())
        .filter(|p| p.extension().is_some_and(|ext| ext == WORDLIST_EXTENSION))
        .collect();

    files.sort();
    Ok(files)
}
