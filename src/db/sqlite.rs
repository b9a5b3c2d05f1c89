//! SQLite engine binding over `rusqlite`.

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, ErrorCode, OpenFlags, params_from_iter};

use super::backend::{Engine, EngineError, EngineErrorKind, EngineHandle, OpenMode, RawRow};
use super::value::Cell;

/// Opens SQLite database files (or `:memory:` / `file:` URIs).
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteEngine;

impl SqliteEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for SqliteEngine {
    fn open(
        &self,
        connection_string: &str,
        mode: OpenMode,
    ) -> Result<Box<dyn EngineHandle>, EngineError> {
        let access = match mode {
            OpenMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
            OpenMode::ReadWriteCreate => {
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
            }
        };
        let flags = access | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(connection_string, flags).map_err(engine_error)?;

        // SQLite defers reading the header until first use; force it so a
        // non-database file fails here rather than on the first query.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(engine_error)?;

        Ok(Box::new(SqliteHandle { conn }))
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

struct SqliteHandle {
    conn: Connection,
}

impl EngineHandle for SqliteHandle {
    fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<Vec<RawRow>, EngineError> {
        let mut stmt = self.conn.prepare(sql).map_err(engine_error)?;

        // (name, declared BOOLEAN) per result column
        let columns: Vec<(String, bool)> = stmt
            .columns()
            .iter()
            .map(|col| {
                let boolean = col
                    .decl_type()
                    .is_some_and(|t| t.eq_ignore_ascii_case("boolean") || t.eq_ignore_ascii_case("bool"));
                (col.name().to_string(), boolean)
            })
            .collect();

        let mut rows = stmt
            .query(params_from_iter(params.iter().map(to_sql_value)))
            .map_err(engine_error)?;

        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(engine_error)? {
            let mut cells = Vec::with_capacity(columns.len());
            for (index, (name, boolean)) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(engine_error)?;
                cells.push((name.clone(), from_value_ref(name, value, *boolean)?));
            }
            result.push(cells.into_iter().collect());
        }
        Ok(result)
    }

    fn user_version(&mut self) -> Result<i64, EngineError> {
        self.conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(engine_error)
    }

    fn close(self: Box<Self>) -> Result<(), EngineError> {
        self.conn.close().map_err(|(_, e)| engine_error(e))
    }
}

fn to_sql_value(cell: &Cell) -> SqlValue {
    match cell {
        Cell::Null => SqlValue::Null,
        Cell::Boolean(b) => SqlValue::Integer(i64::from(*b)),
        Cell::Integer(i) => SqlValue::Integer(*i),
        Cell::Real(r) => SqlValue::Real(*r),
        Cell::Text(s) => SqlValue::Text(s.clone()),
    }
}

fn from_value_ref(column: &str, value: ValueRef<'_>, boolean: bool) -> Result<Cell, EngineError> {
    match value {
        ValueRef::Null => Ok(Cell::Null),
        ValueRef::Integer(i) if boolean && (i == 0 || i == 1) => Ok(Cell::Boolean(i == 1)),
        ValueRef::Integer(i) => Ok(Cell::Integer(i)),
        ValueRef::Real(r) => Ok(Cell::Real(r)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| Cell::Text(s.to_string()))
            .map_err(|e| {
                EngineError::new(
                    EngineErrorKind::UnsupportedValue,
                    format!("column '{}' holds invalid UTF-8 text: {}", column, e),
                )
            }),
        ValueRef::Blob(_) => Err(EngineError::new(
            EngineErrorKind::UnsupportedValue,
            format!("column '{}' holds a BLOB, which has no scalar representation", column),
        )),
    }
}

fn engine_error(err: rusqlite::Error) -> EngineError {
    let kind = match err.sqlite_error_code() {
        Some(
            ErrorCode::CannotOpen
            | ErrorCode::PermissionDenied
            | ErrorCode::OutOfMemory
            | ErrorCode::SystemIoFailure
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked,
        ) => EngineErrorKind::Unavailable,
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => EngineErrorKind::Malformed,
        _ => EngineErrorKind::Statement,
    };
    EngineError::new(kind, err.to_string())
}
