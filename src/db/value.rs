//! Scalar values exchanged with the engine.
//!
//! `Cell` is the only shape a database value takes inside this crate. Engines hand back
//! loosely-typed scalars; the binding converts each one into a `Cell` exactly once and every
//! typed read afterwards is checked against the variant. There is no implicit coercion:
//! an `Integer(1)` is never a `Boolean`, a `Real(2.0)` is never an `Integer`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One scalar database value.
///
/// Serializes untagged, so a row renders as plain JSON scalars and query documents can
/// write parameters as `7`, `"Matterhorn"`, `true` or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

/// The variant tag of a `Cell`, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Null,
    Boolean,
    Integer,
    Real,
    Text,
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::Null => "null",
            CellType::Boolean => "boolean",
            CellType::Integer => "integer",
            CellType::Real => "real",
            CellType::Text => "text",
        };
        f.write_str(name)
    }
}

impl Cell {
    pub fn cell_type(&self) -> CellType {
        match self {
            Cell::Null => CellType::Null,
            Cell::Boolean(_) => CellType::Boolean,
            Cell::Integer(_) => CellType::Integer,
            Cell::Real(_) => CellType::Real,
            Cell::Text(_) => CellType::Text,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Real(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Boolean(b) => write!(f, "{}", b),
            Cell::Integer(i) => write!(f, "{}", i),
            Cell::Real(r) => write!(f, "{}", r),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Real(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Cell::Null, CellType::Null)]
    #[case(Cell::Boolean(false), CellType::Boolean)]
    #[case(Cell::Integer(3), CellType::Integer)]
    #[case(Cell::Real(0.5), CellType::Real)]
    #[case(Cell::Text("x".into()), CellType::Text)]
    fn test_cell_type(#[case] cell: Cell, #[case] expected: CellType) {
        assert_eq!(cell.cell_type(), expected);
    }

    #[test]
    fn test_no_coercion_between_variants() {
        assert_eq!(Cell::Integer(1).as_bool(), None);
        assert_eq!(Cell::Real(2.0).as_i64(), None);
        assert_eq!(Cell::Integer(2).as_f64(), None);
        assert_eq!(Cell::Integer(2).as_str(), None);
        assert_eq!(Cell::Null.as_str(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Cell::from(None::<i64>), Cell::Null);
        assert_eq!(Cell::from(Some("ridge")), Cell::Text("ridge".into()));
    }

    #[test]
    fn test_deserialize_json_scalars() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[null, true, 7, 4.5, "Eiger"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Null,
                Cell::Boolean(true),
                Cell::Integer(7),
                Cell::Real(4.5),
                Cell::Text("Eiger".into()),
            ]
        );
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&vec![Cell::Integer(42), Cell::Null]).unwrap();
        assert_eq!(json, "[42,null]");
    }

    #[test]
    fn test_cell_type_display() {
        assert_eq!(CellType::Text.to_string(), "text");
        assert_eq!(CellType::Null.to_string(), "null");
    }
}
