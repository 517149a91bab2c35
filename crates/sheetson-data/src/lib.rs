//! # sheetson-data
//!
//! Workbook ingestion for sheetson - read a fixed window of each sheet of
//! an Excel workbook using `calamine`, clean the rows, and run the
//! `sheetson-core` classifier over them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheetson_data::{read_workbook_path, RowWindow};
//!
//! let doc = read_workbook_path("informe.xlsx", &RowWindow::default())?;
//! let json = serde_json::to_string(&doc)?;
//! ```

pub mod error;
pub mod excel;

// Re-exports
pub use error::{DataError, Result};
pub use excel::{clean_row, ExcelSource, RowWindow};

use std::path::Path;

use sheetson_core::{parse_sheet, DocumentData, Row};

/// Trait for sources that can provide cleaned rows per sheet
pub trait RowSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// The cleaned rows of one sheet, limited to `window`
    fn sheet_rows(&mut self, sheet: &str, window: &RowWindow) -> Result<Vec<Row>>;
}

/// Parse every sheet of a source into the structured document,
/// preserving the workbook's sheet order
pub fn read_workbook(source: &mut impl RowSource, window: &RowWindow) -> Result<DocumentData> {
    let mut doc = DocumentData::new();
    for name in source.sheet_names() {
        let rows = source.sheet_rows(&name, window)?;
        doc.insert(name, parse_sheet(&rows));
    }
    Ok(doc)
}

/// Open an .xlsx file and parse it whole
pub fn read_workbook_path(path: impl AsRef<Path>, window: &RowWindow) -> Result<DocumentData> {
    let mut source = ExcelSource::from_path(path)?;
    read_workbook(&mut source, window)
}

/// Parse an .xlsx workbook held in memory
pub fn read_workbook_bytes(bytes: Vec<u8>, window: &RowWindow) -> Result<DocumentData> {
    let mut source = ExcelSource::from_bytes(bytes)?;
    read_workbook(&mut source, window)
}
