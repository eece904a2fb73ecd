//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use libris::model::BookDraft;
use libris::store::fs::FsBackend;
use tempfile::TempDir;

pub const DUNE: &str = "9780441013593";

/// Three copies of Dune on shelf SF-12.
pub fn dune() -> BookDraft {
    BookDraft {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        isbn: DUNE.to_string(),
        publication: "Ace Books".to_string(),
        genre: "Science Fiction".to_string(),
        shelf_number: "SF-12".to_string(),
        quantity: "3".to_string(),
    }
}

/// A fresh data directory and a backend rooted in it. Keep the `TempDir`
/// alive for as long as the backend is used.
pub fn fs_store() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}
