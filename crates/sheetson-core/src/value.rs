//! Cell values as they arrive from the decoding boundary.
//!
//! A cell is one of text, integer, float, boolean, or date-time; absent
//! cells are represented as `Option<Cell>::None` in a [`Row`]. Whitespace-only
//! text counts as blank everywhere the classifier asks "does this cell carry
//! content".

use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// A single typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text content
    Text(String),
    /// Integer number
    Int(i64),
    /// Floating-point number
    Float(f64),
    /// Boolean flag
    Bool(bool),
    /// Date/time without timezone
    DateTime(NaiveDateTime),
}

/// One cleaned row: leading/trailing absences stripped, interior absences kept
pub type Row = Vec<Option<Cell>>;

impl Cell {
    /// Whether the cell carries no usable content (whitespace-only text)
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Whether the cell is numeric for key-validity purposes.
    ///
    /// Booleans count as numeric here: the source documents use them as
    /// status flags, never as labels.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_) | Cell::Bool(_))
    }

    /// Text rendering used for key/header derivation
    pub fn display_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => {
                if f.fract() == 0.0 {
                    format!("{f:.0}")
                } else {
                    f.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
            Cell::DateTime(dt) => iso8601(dt),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Int(i) => serializer.serialize_i64(*i),
            Cell::Float(f) => serializer.serialize_f64(*f),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::DateTime(dt) => serializer.serialize_str(&iso8601(dt)),
        }
    }
}

/// Format a date-time as ISO-8601, omitting fractional seconds when zero
pub fn iso8601(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}
