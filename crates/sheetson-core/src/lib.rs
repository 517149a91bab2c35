//! sheetson-core - heuristic sheet-to-structure parsing
//!
//! Core library for sheetson: classifies each row of a spreadsheet sheet
//! as a section header, table header, table record, key/value metadata, or
//! fallback-bucket content, and assembles the result into a nested,
//! order-preserving structure ready for JSON serialization.
//!
//! The pass is total: no row shape produces an error, ambiguous rows
//! degrade to the `valores_miscelaneos` or `sin_seccion` buckets.
//!
//! # Example
//!
//! ```
//! use sheetson_core::{parse_sheet, Cell};
//!
//! let rows = vec![
//!     vec![Some(Cell::Text("Equipo".to_string()))],
//!     vec![
//!         Some(Cell::Text("Serie".to_string())),
//!         Some(Cell::Text("S-99".to_string())),
//!     ],
//! ];
//!
//! let sheet = parse_sheet(&rows);
//! assert!(sheet.contains_key("equipo"));
//! ```

pub mod document;
pub mod heuristics;
pub mod parser;
pub mod section;
pub mod value;

// Re-export main types and functions
pub use document::{parse_workbook, DocumentData};
pub use parser::parse_sheet;
pub use section::{BucketEntry, FieldValue, Record, SectionContent, SheetData};
pub use value::{iso8601, Cell, Row};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }
}
