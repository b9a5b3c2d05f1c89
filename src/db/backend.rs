//! Engine abstraction consumed by the connection boundary.
//!
//! An `Engine` opens handles; an `EngineHandle` executes parameterized SQL and returns
//! fully materialized rows. The SQLite binding lives in `sqlite.rs`; tests substitute a
//! scripted engine.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use super::value::Cell;

/// How a connection string is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    ReadOnly,
    ReadWriteCreate,
}

impl OpenMode {
    pub fn from_read_only(read_only: bool) -> Self {
        if read_only {
            OpenMode::ReadOnly
        } else {
            OpenMode::ReadWriteCreate
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenMode::ReadOnly => f.write_str("read-only"),
            OpenMode::ReadWriteCreate => f.write_str("read-write"),
        }
    }
}

/// Broad classification of an engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// The resource could not be reached: missing, permission denied, out of resources, busy.
    Unavailable,
    /// The resource exists but is not a valid database file.
    Malformed,
    /// A statement failed to prepare or run.
    Statement,
    /// A result value has no `Cell` representation.
    UnsupportedValue,
}

/// Low-level error reported by an engine binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    pub kind: EngineErrorKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Opens engine resources.
pub trait Engine: Send + Sync {
    /// Open the resource named by `connection_string` in the given mode.
    fn open(
        &self,
        connection_string: &str,
        mode: OpenMode,
    ) -> Result<Box<dyn EngineHandle>, EngineError>;

    /// Engine name for logging.
    fn name(&self) -> &'static str;
}

/// One open engine resource.
pub trait EngineHandle: Send {
    /// Execute `sql` with positional `params` and return every result row.
    fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<Vec<RawRow>, EngineError>;

    /// The caller-managed schema version stored in the resource.
    fn user_version(&mut self) -> Result<i64, EngineError>;

    /// Release the resource.
    fn close(self: Box<Self>) -> Result<(), EngineError>;
}

/// One result row: column identifiers mapped to cells, in column order.
///
/// Keys are unique. When an engine reports the same column name twice, the first
/// occurrence is kept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    entries: Vec<(String, Cell)>,
}

impl RawRow {
    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, cell)| cell)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.entries.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        let mut entries: Vec<(String, Cell)> = Vec::new();
        for (key, cell) in iter {
            let key = key.into();
            if entries.iter().any(|(name, _)| *name == key) {
                tracing::warn!(column = %key, "duplicate column in result row, keeping first");
                continue;
            }
            entries.push((key, cell));
        }
        Self { entries }
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, cell) in &self.entries {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}
