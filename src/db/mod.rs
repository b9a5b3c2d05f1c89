//! Relational query layer over an embedded SQL engine.
//!
//! This module is the only place that reasons about SQL syntax:
//! - `QueryModel` describes a SELECT structurally (columns, tables, joins, filter, ...)
//! - the compiler renders it to SQL text plus positional parameters
//! - `ConnectionBoundary` owns the engine connection and executes statements
//! - `ResultRow` gives typed, fail-fast access to each returned row
//!
//! # Type Decisions
//!
//! **Why a closed `Cell` enum instead of the engine's value type?**
//! Engines return loosely-typed scalars (SQLite has no boolean, and any column may hold
//! any storage class). Converting once into `Cell` at the engine boundary means every
//! typed read afterwards is a variant check, never a guess.
//!
//! **Why key rows by name instead of by index?**
//! The compiler aliases every unaliased column to its own qualified text, so callers read
//! `row.get_int("routes.id")` with the same string they projected. Column positions never
//! leak into call sites.
//!
//! **Why `&mut self` on the boundary?**
//! One boundary owns one engine handle. Requiring exclusive access makes the "serialize
//! access per connection" rule a compile-time property instead of a convention.

mod backend;
mod compiler;
pub mod config;
mod connection;
mod escape;
mod query;
mod row;
mod sqlite;
mod value;

pub use backend::{Engine, EngineError, EngineErrorKind, EngineHandle, OpenMode, RawRow};
pub use compiler::{compile, CompiledStatement};
pub use config::DatabaseConfig;
pub use connection::{ConnectOptions, ConnectionBoundary};
pub use query::{
    ColumnRef, Filter, ModelError, OrderTerm, QueryModel, QueryModelBuilder, SortDirection,
};
pub use row::{FromCell, ResultRow, RowError};
pub use sqlite::SqliteEngine;
pub use value::{Cell, CellType};

use thiserror::Error;

/// Failure to establish a usable connection.
#[derive(Error, Debug)]
pub enum StorageStartingError {
    #[error("Database '{connection}' is inaccessible: {source}")]
    Inaccessible {
        connection: String,
        #[source]
        source: EngineError,
    },

    #[error("Database '{connection}' is not a valid database file: {source}")]
    InvalidFormat {
        connection: String,
        #[source]
        source: EngineError,
    },

    #[error("Database '{connection}' has schema version {found}, but version {required} is required")]
    IncompatibleVersion {
        connection: String,
        required: i64,
        found: i64,
    },
}

/// Connection boundary error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Not connected to a database")]
    NotConnected,

    #[error(transparent)]
    StorageStarting(#[from] StorageStartingError),

    #[error("Query failed: {source}\n  statement: {sql}")]
    QueryFailed {
        sql: String,
        #[source]
        source: EngineError,
    },
}
