//! # Libris Architecture
//!
//! Libris is a small library-catalog manager: it tracks books, users and
//! checkout/return transactions, and keeps each collection in its own flat
//! JSON file. The crate is the library; the `libris` binary is one client of
//! it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Subcommands and the numbered interactive menu            │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Library<S>: owns the store and the three managers        │
//! │  - Returns structured Result<CmdResult>                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Managers (catalog.rs, directory.rs, ledger.rs)             │
//! │  - Validation, identifiers, the OnLoan -> Returned rule     │
//! │  - The ledger reaches the catalog only via `Inventory`      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: one JSON document per collection   │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation rewrites the whole affected collection. A missing document
//! reads as an empty collection. There is no locking: one process at a time.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`catalog`]: Books and the [`catalog::Inventory`] seam
//! - [`directory`]: Users and identifier assignment
//! - [`ledger`]: Checkouts and returns
//! - [`model`]: Core data types (`Book`, `User`, `Checkout`)
//! - [`validation`]: Field rules for book records
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: File names and data directory resolution
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod model;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_utils;
