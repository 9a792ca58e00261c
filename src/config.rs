//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/wordtree/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. Every field has a default, so an empty
//! object (or no file at all) is a valid configuration.
//!
//! ## File Location
//!
//! ```text
//! ~/.config/wordtree/config.json
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! and data directories.
//!
//! ## Data Directory
//!
//! ```text
//! ~/.local/share/wordtree/
//! ├── words.txt        # words added on top of the base dictionary
//! ├── removed.txt      # base dictionary words the user removed
//! ├── stats.txt
//! ├── bookmarks.txt
//! ├── word_of_day.txt
//! └── export.csv
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tree::DEFAULT_SUGGEST_DISTANCE;
use crate::usage::DEFAULT_TOP_N;

const APP_NAME: &str = "wordtree";

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Overrides the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// A base dictionary (file or directory of `.txt` lists) loaded on
    /// every start without counting as usage.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,

    /// Maximum edit distance for "did you mean" suggestions.
    #[serde(default = "default_suggest_distance")]
    pub suggest_distance: usize,

    /// Number of entries in the top words view.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_suggest_distance() -> usize {
    DEFAULT_SUGGEST_DISTANCE
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            dictionary: None,
            suggest_distance: default_suggest_distance(),
            top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "falling back to default configuration");
                Self::default()
            }
        }
    }

    /// Try to load configuration, returning an error on failure.
    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// The configured data directory, or the platform default.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .context("Could not determine application directories")
}

/// Locations of every file the application keeps in its data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root: PathBuf,
    pub words: PathBuf,
    pub removed: PathBuf,
    pub stats: PathBuf,
    pub bookmarks: PathBuf,
    pub word_of_day: PathBuf,
    pub export: PathBuf,
}

impl DataPaths {
    pub fn new(root: PathBuf) -> Self {
        Self {
            words: root.join("words.txt"),
            removed: root.join("removed.txt"),
            stats: root.join("stats.txt"),
            bookmarks: root.join("bookmarks.txt"),
            word_of_day: root.join("word_of_day.txt"),
            export: root.join("export.csv"),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.suggest_distance, 2);
        assert_eq!(config.top_n, 5);
        assert!(config.data_dir.is_none());
        assert!(config.dictionary.is_none());
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{"suggest_distance": 3, "dictionary": "/usr/share/dict/words"}"#;
        let config: Config = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.suggest_distance, 3);
        assert_eq!(config.top_n, 5);
        assert_eq!(
            config.dictionary,
            Some(PathBuf::from("/usr/share/dict/words"))
        );
    }

    #[test]
    fn test_serialize_load_from_roundtrip() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("subdir").join("config.json");

        let config = Config {
            data_dir: Some(temp_dir.path().join("data")),
            dictionary: None,
            suggest_distance: 1,
            top_n: 10,
        };

        fs::create_dir_all(config_path.parent().expect("parent")).expect("create dir");
        let json = serde_json::to_string_pretty(&config).expect("serialize");
        fs::write(&config_path, json).expect("write");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("does_not_exist.json");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_from_invalid_json_is_error() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "not json").expect("write");

        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn test_deny_unknown_fields() {
        let json = r#"{"top_n": 3, "unknown_field": true}"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err(), "should reject unknown fields");
    }

    #[test]
    fn test_resolve_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/wordtree-data")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_data_dir().expect("resolve"),
            PathBuf::from("/tmp/wordtree-data")
        );
    }

    #[test]
    fn test_data_paths_layout() {
        let paths = DataPaths::new(PathBuf::from("/data"));
        assert_eq!(paths.words, PathBuf::from("/data/words.txt"));
        assert_eq!(paths.removed, PathBuf::from("/data/removed.txt"));
        assert_eq!(paths.stats, PathBuf::from("/data/stats.txt"));
        assert_eq!(paths.bookmarks, PathBuf::from("/data/bookmarks.txt"));
        assert_eq!(paths.word_of_day, PathBuf::from("/data/word_of_day.txt"));
        assert_eq!(paths.export, PathBuf::from("/data/export.csv"));
    }
}
