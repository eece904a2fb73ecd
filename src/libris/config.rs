//! # Configuration
//!
//! Libris keeps an optional `config.json` next to its data files. Every key is
//! optional; anything missing falls back to the compiled default.
//!
//! | Key | Default |
//! |-----|---------|
//! | `books_file` | `books.json` |
//! | `users_file` | `users.json` |
//! | `checkouts_file` | `checkouts.json` |
//!
//! ## Data Directory
//!
//! Resolved in priority order:
//! 1. `--data-dir <path>` on the command line
//! 2. `LIBRIS_DATA_DIR` environment variable
//! 3. `--global`: the OS data directory (via the `directories` crate)
//! 4. The current working directory

use crate::error::{LibrisError, Result};
use crate::store::Collection;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
pub const DATA_DIR_ENV: &str = "LIBRIS_DATA_DIR";

const DEFAULT_BOOKS_FILE: &str = "books.json";
const DEFAULT_USERS_FILE: &str = "users.json";
const DEFAULT_CHECKOUTS_FILE: &str = "checkouts.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibrisConfig {
    #[serde(default = "default_books_file")]
    pub books_file: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_checkouts_file")]
    pub checkouts_file: String,
}

fn default_books_file() -> String {
    DEFAULT_BOOKS_FILE.to_string()
}

fn default_users_file() -> String {
    DEFAULT_USERS_FILE.to_string()
}

fn default_checkouts_file() -> String {
    DEFAULT_CHECKOUTS_FILE.to_string()
}

impl Default for LibrisConfig {
    fn default() -> Self {
        Self {
            books_file: default_books_file(),
            users_file: default_users_file(),
            checkouts_file: default_checkouts_file(),
        }
    }
}

impl LibrisConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LibrisError::Io)?;
        let config: LibrisConfig =
            serde_json::from_str(&content).map_err(LibrisError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LibrisError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LibrisError::Serialization)?;
        fs::write(config_path, content).map_err(LibrisError::Io)?;
        Ok(())
    }

    pub fn file_name(&self, collection: Collection) -> &str {
        match collection {
            Collection::Books => &self.books_file,
            Collection::Users => &self.users_file,
            Collection::Checkouts => &self.checkouts_file,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        Some(self.file_name(key_collection(key)?))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let collection = key_collection(key)
            .ok_or_else(|| LibrisError::Api(format!("Unknown config key: {}", key)))?;
        if value.trim().is_empty() || value.contains(|c: char| c == '/' || c == '\\') {
            return Err(LibrisError::Api(format!(
                "Invalid file name for {}: '{}'",
                key, value
            )));
        }
        let taken = [Collection::Books, Collection::Users, Collection::Checkouts]
            .into_iter()
            .filter(|other| *other != collection)
            .any(|other| self.file_name(other) == value);
        if taken || value == CONFIG_FILENAME {
            return Err(LibrisError::Api(format!(
                "File name for {} is already in use: '{}'",
                key, value
            )));
        }
        let slot = match collection {
            Collection::Books => &mut self.books_file,
            Collection::Users => &mut self.users_file,
            Collection::Checkouts => &mut self.checkouts_file,
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn keys() -> [&'static str; 3] {
        ["books-file", "users-file", "checkouts-file"]
    }
}

fn key_collection(key: &str) -> Option<Collection> {
    match key.replace('_', "-").as_str() {
        "books-file" => Some(Collection::Books),
        "users-file" => Some(Collection::Users),
        "checkouts-file" => Some(Collection::Checkouts),
        _ => None,
    }
}

/// Pick the directory holding the JSON files.
///
/// `env_dir` is the value of [`DATA_DIR_ENV`], passed in rather than read here
/// so callers decide where the environment comes from.
pub fn resolve_data_dir(
    explicit: Option<PathBuf>,
    env_dir: Option<OsString>,
    global: bool,
) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if global {
        let dirs = ProjectDirs::from("org", "libris", "libris").ok_or_else(|| {
            LibrisError::Store("Could not determine the user data directory".to_string())
        })?;
        return Ok(dirs.data_dir().to_path_buf());
    }
    std::env::current_dir().map_err(LibrisError::Io)
}
