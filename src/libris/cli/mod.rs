//! # CLI Layer
//!
//! One UI client for libris. This is the only place that knows about
//! stdin/stdout/stderr, exit codes and argument parsing.
//!
//! - `setup`: clap definitions
//! - `commands`: context setup, dispatch and per-subcommand handlers
//! - `menu`: the numbered interactive loop (the default when no subcommand is given)
//! - `print`: turns a `CmdResult` into terminal text
//!
//! Output functions take any `Write` so the menu can be driven from tests.

mod commands;
mod menu;
mod print;
mod setup;

pub use commands::run;
