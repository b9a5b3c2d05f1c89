//! Connection lifecycle and statement execution.
//!
//! `ConnectionBoundary` owns at most one engine handle. It starts disconnected, moves to
//! connected on a successful `connect`, and back on `disconnect`. It is not meant to be
//! shared between tasks without external locking: every operation that touches the handle
//! takes `&mut self`.

use tracing::{debug, info, warn};

use super::backend::{Engine, EngineErrorKind, EngineHandle, OpenMode};
use super::compiler::CompiledStatement;
use super::query::QueryModel;
use super::row::ResultRow;
use super::sqlite::SqliteEngine;
use super::{DbError, StorageStartingError};

/// Options for `ConnectionBoundary::connect_with`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    pub read_only: bool,
    /// Schema version the resource must carry, checked against the engine's user version.
    pub required_version: Option<i64>,
}

impl ConnectOptions {
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Default::default()
        }
    }

    pub fn with_required_version(mut self, version: i64) -> Self {
        self.required_version = Some(version);
        self
    }
}

struct ActiveConnection {
    connection_string: String,
    mode: OpenMode,
    handle: Box<dyn EngineHandle>,
}

/// The single owner of an engine connection.
pub struct ConnectionBoundary {
    engine: Box<dyn Engine>,
    active: Option<ActiveConnection>,
}

impl ConnectionBoundary {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            engine,
            active: None,
        }
    }

    /// A boundary over the bundled SQLite engine.
    pub fn sqlite() -> Self {
        Self::new(Box::new(SqliteEngine::new()))
    }

    /// Open `connection_string`, replacing any current connection.
    pub fn connect(
        &mut self,
        connection_string: &str,
        read_only: bool,
    ) -> Result<(), StorageStartingError> {
        let options = ConnectOptions {
            read_only,
            ..Default::default()
        };
        self.connect_with(connection_string, &options)
    }

    /// Open `connection_string` with explicit options.
    ///
    /// The new handle is opened before the old one is released; if opening fails the
    /// current connection, if any, is left untouched.
    pub fn connect_with(
        &mut self,
        connection_string: &str,
        options: &ConnectOptions,
    ) -> Result<(), StorageStartingError> {
        let mode = OpenMode::from_read_only(options.read_only);
        let mut handle = self
            .engine
            .open(connection_string, mode)
            .map_err(|source| match source.kind {
                EngineErrorKind::Malformed => StorageStartingError::InvalidFormat {
                    connection: connection_string.to_string(),
                    source,
                },
                _ => StorageStartingError::Inaccessible {
                    connection: connection_string.to_string(),
                    source,
                },
            })?;

        if let Some(required) = options.required_version {
            let found = match handle.user_version() {
                Ok(found) => found,
                Err(source) => {
                    close_quietly(handle, connection_string);
                    return Err(StorageStartingError::Inaccessible {
                        connection: connection_string.to_string(),
                        source,
                    });
                }
            };
            if found != required {
                close_quietly(handle, connection_string);
                return Err(StorageStartingError::IncompatibleVersion {
                    connection: connection_string.to_string(),
                    required,
                    found,
                });
            }
        }

        self.disconnect();
        info!(
            engine = self.engine.name(),
            connection = connection_string,
            %mode,
            "connected"
        );
        self.active = Some(ActiveConnection {
            connection_string: connection_string.to_string(),
            mode,
            handle,
        });
        Ok(())
    }

    /// Release the current connection. Does nothing when already disconnected.
    pub fn disconnect(&mut self) {
        if let Some(active) = self.active.take() {
            close_quietly(active.handle, &active.connection_string);
            info!(connection = %active.connection_string, "disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.active.is_some()
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.connection_string.as_str())
    }

    pub fn mode(&self) -> Option<OpenMode> {
        self.active.as_ref().map(|a| a.mode)
    }

    /// Compile `query` and return every result row.
    pub fn execute_query(&mut self, query: &QueryModel) -> Result<Vec<ResultRow>, DbError> {
        self.execute_compiled(&query.compile())
    }

    /// Execute an already compiled statement.
    pub fn execute_compiled(
        &mut self,
        statement: &CompiledStatement,
    ) -> Result<Vec<ResultRow>, DbError> {
        let active = self.active.as_mut().ok_or(DbError::NotConnected)?;

        debug!(sql = %statement.sql, params = statement.params.len(), "executing query");
        let rows = active
            .handle
            .execute(&statement.sql, &statement.params)
            .map_err(|source| DbError::QueryFailed {
                sql: statement.sql.clone(),
                source,
            })?;
        debug!(rows = rows.len(), "query complete");

        Ok(rows.into_iter().map(ResultRow::new).collect())
    }
}

impl Drop for ConnectionBoundary {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn close_quietly(handle: Box<dyn EngineHandle>, connection_string: &str) {
    if let Err(e) = handle.close() {
        warn!(connection = connection_string, error = %e, "failed to close connection");
    }
}
