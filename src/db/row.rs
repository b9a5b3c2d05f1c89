//! Typed, fail-fast access to one result row.
//!
//! A missing key and a null value are different failures on purpose. A missing key means
//! the query never projected that column, which is a bug in the caller. A null value is
//! ordinary data, readable through the `get_optional_*` family.

use serde::Serialize;
use thiserror::Error;

use super::backend::RawRow;
use super::value::{Cell, CellType};

/// Errors raised by typed row accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Missing column '{key}' in result row")]
    MissingKey { key: String },

    #[error("Column '{key}' holds {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: CellType,
        found: CellType,
    },
}

/// Rust types a `Cell` can be read as, without coercion.
pub trait FromCell<'a>: Sized {
    const CELL_TYPE: CellType;

    fn from_cell(cell: &'a Cell) -> Option<Self>;
}

impl<'a> FromCell<'a> for bool {
    const CELL_TYPE: CellType = CellType::Boolean;

    fn from_cell(cell: &'a Cell) -> Option<Self> {
        cell.as_bool()
    }
}

impl<'a> FromCell<'a> for i64 {
    const CELL_TYPE: CellType = CellType::Integer;

    fn from_cell(cell: &'a Cell) -> Option<Self> {
        cell.as_i64()
    }
}

impl<'a> FromCell<'a> for f64 {
    const CELL_TYPE: CellType = CellType::Real;

    fn from_cell(cell: &'a Cell) -> Option<Self> {
        cell.as_f64()
    }
}

impl<'a> FromCell<'a> for &'a str {
    const CELL_TYPE: CellType = CellType::Text;

    fn from_cell(cell: &'a Cell) -> Option<Self> {
        cell.as_str()
    }
}

impl<'a> FromCell<'a> for String {
    const CELL_TYPE: CellType = CellType::Text;

    fn from_cell(cell: &'a Cell) -> Option<Self> {
        cell.as_str().map(str::to_string)
    }
}

/// Wraps one `RawRow` and exposes typed getters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultRow {
    row: RawRow,
}

impl ResultRow {
    pub fn new(row: RawRow) -> Self {
        Self { row }
    }

    /// Read `key` as `T`. Null is a type mismatch here.
    pub fn get<'a, T: FromCell<'a>>(&'a self, key: &str) -> Result<T, RowError> {
        let cell = self.cell(key)?;
        T::from_cell(cell).ok_or_else(|| RowError::TypeMismatch {
            key: key.to_string(),
            expected: T::CELL_TYPE,
            found: cell.cell_type(),
        })
    }

    /// Read `key` as `T`, mapping a null cell to `None`.
    pub fn get_optional<'a, T: FromCell<'a>>(&'a self, key: &str) -> Result<Option<T>, RowError> {
        if self.cell(key)?.is_null() {
            return Ok(None);
        }
        self.get(key).map(Some)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, RowError> {
        self.get(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, RowError> {
        self.get(key)
    }

    pub fn get_real(&self, key: &str) -> Result<f64, RowError> {
        self.get(key)
    }

    pub fn get_text(&self, key: &str) -> Result<&str, RowError> {
        self.get(key)
    }

    pub fn get_optional_bool(&self, key: &str) -> Result<Option<bool>, RowError> {
        self.get_optional(key)
    }

    pub fn get_optional_int(&self, key: &str) -> Result<Option<i64>, RowError> {
        self.get_optional(key)
    }

    pub fn get_optional_real(&self, key: &str) -> Result<Option<f64>, RowError> {
        self.get_optional(key)
    }

    pub fn get_optional_text(&self, key: &str) -> Result<Option<&str>, RowError> {
        self.get_optional(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.row.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.row.keys()
    }

    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    pub fn raw(&self) -> &RawRow {
        &self.row
    }

    pub fn into_raw(self) -> RawRow {
        self.row
    }

    fn cell(&self, key: &str) -> Result<&Cell, RowError> {
        self.row.get(key).ok_or_else(|| RowError::MissingKey {
            key: key.to_string(),
        })
    }
}

impl From<RawRow> for ResultRow {
    fn from(row: RawRow) -> Self {
        Self::new(row)
    }
}
