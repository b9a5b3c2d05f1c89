//! query_layer library - storage-agnostic relational queries
//!
//! Provides query models compiled to parameterized SQL, a connection boundary over a
//! pluggable storage engine (SQLite bundled), typed result rows, and the command and
//! output infrastructure behind the `query_layer` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod output;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
