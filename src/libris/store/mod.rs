//! # Storage Layer
//!
//! Each collection (books, users, checkouts) lives in one JSON document that
//! holds the whole collection as an array of flat records. Every mutation
//! rewrites the full document; there is no append log.
//!
//! The [`StorageBackend`] trait covers the raw document I/O so the managers
//! never touch the filesystem directly:
//!
//! - [`fs::FsBackend`]: production, one file per collection in a data dir
//! - [`memory::MemBackend`]: in-memory, for tests
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── books.json       # [{title, author, isbn, publication, genre, shelf_number, quantity}]
//! ├── users.json       # [{name, user_id}]
//! ├── checkouts.json   # [{user_id, isbn, returned}]
//! └── config.json      # optional file name overrides
//! ```
//!
//! A document that does not exist yet reads as an empty collection.

use crate::error::{LibrisError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub mod fs;
pub mod memory;

/// The three independent documents the library persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    Users,
    Checkouts,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Books => write!(f, "books"),
            Collection::Users => write!(f, "users"),
            Collection::Checkouts => write!(f, "checkouts"),
        }
    }
}

/// Abstract interface for raw document I/O.
pub trait StorageBackend {
    /// Read the raw document for a collection.
    /// Returns Ok(None) if it has never been written.
    fn read_document(&self, collection: Collection) -> Result<Option<String>>;

    /// Replace the document for a collection.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_document(&self, collection: Collection, contents: &str) -> Result<()>;

    /// Load every record of a collection. Missing, blank and `null`
    /// documents all load as an empty list.
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        let Some(raw) = self.read_document(collection)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Option<Vec<T>> =
            serde_json::from_str(&raw).map_err(LibrisError::Serialization)?;
        Ok(records.unwrap_or_default())
    }

    /// Overwrite a collection with a full snapshot.
    fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()>
    where
        Self: Sized,
    {
        let contents = serde_json::to_string_pretty(records).map_err(LibrisError::Serialization)?;
        self.write_document(collection, &contents)
    }
}
