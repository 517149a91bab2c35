//! Excel/XLSX workbook source using calamine.
//!
//! Reads cell values from a fixed row/column window of each sheet, cleans
//! the rows (leading/trailing absences stripped, interior absences kept as
//! `None`), and hands them to `sheetson-core` as typed cell values.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, XlsxError};
use tracing::debug;

use sheetson_core::{Cell, Row};

use crate::error::{DataError, Result};
use crate::RowSource;

/// The window of the source document scanned per sheet (1-based, inclusive).
///
/// The defaults match the document family this extractor was tuned for:
/// two banner rows are skipped and the scan stops at row 214 / column 50.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWindow {
    /// First scanned row (1-based)
    pub first_row: u32,
    /// Last scanned row (1-based, inclusive)
    pub last_row: u32,
    /// Number of columns scanned per row
    pub max_cols: u32,
}

impl Default for RowWindow {
    fn default() -> Self {
        Self {
            first_row: 3,
            last_row: 214,
            max_cols: 50,
        }
    }
}

/// Excel workbook data source, backed by an in-memory buffer
pub struct ExcelSource {
    /// The open workbook
    workbook: Xlsx<Cursor<Vec<u8>>>,
    /// Sheet names in workbook order
    sheet_names: Vec<String>,
}

impl ExcelSource {
    /// Open a workbook from a file path
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();

        if !path.as_ref().exists() {
            return Err(DataError::FileNotFound(path_str));
        }

        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes).map_err(|e| match e {
            DataError::WorkbookOpen(msg) => DataError::WorkbookOpen(format!("{path_str}: {msg}")),
            other => other,
        })
    }

    /// Open a workbook from raw bytes (the base64 transport path never
    /// touches disk)
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e: XlsxError| DataError::WorkbookOpen(e.to_string()))?;

        let sheet_names = workbook.sheet_names().to_vec();
        debug!("workbook opened with {} sheet(s)", sheet_names.len());

        Ok(Self {
            workbook,
            sheet_names,
        })
    }

    /// Extract the cleaned rows of one sheet range within a window
    fn extract_rows(sheet_range: &Range<Data>, window: &RowWindow) -> Vec<Row> {
        let mut rows = Vec::new();

        for row_idx in (window.first_row.saturating_sub(1))..window.last_row {
            let raw: Vec<Option<Cell>> = (0..window.max_cols)
                .map(|col_idx| {
                    sheet_range
                        .get_value((row_idx, col_idx))
                        .and_then(convert_cell)
                })
                .collect();

            if let Some(cleaned) = clean_row(raw) {
                rows.push(cleaned);
            }
        }

        rows
    }
}

impl RowSource for ExcelSource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheet_names.clone()
    }

    fn sheet_rows(&mut self, sheet: &str, window: &RowWindow) -> Result<Vec<Row>> {
        let sheet_range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|e| DataError::SheetNotFound(format!("{sheet}: {e}")))?;

        Ok(Self::extract_rows(&sheet_range, window))
    }
}

/// Convert a calamine cell to a typed core cell; `None` means absent
fn convert_cell(data: &Data) -> Option<Cell> {
    match data {
        Data::Empty => None,
        Data::String(s) => Some(Cell::Text(s.clone())),
        Data::Int(i) => Some(Cell::Int(*i)),
        Data::Float(f) => Some(Cell::Float(*f)),
        Data::Bool(b) => Some(Cell::Bool(*b)),
        // Serial values that cannot map to a calendar date stay numeric
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::DateTime)
            .or(Some(Cell::Float(dt.as_f64()))),
        Data::DateTimeIso(s) => Some(Cell::Text(s.clone())),
        Data::DurationIso(s) => Some(Cell::Text(s.clone())),
        Data::Error(e) => Some(Cell::Text(e.to_string())),
    }
}

/// Clean one raw row: whitespace-only text counts as absent, leading and
/// trailing absences are stripped, interior absences stay as `None`.
/// Returns `None` when nothing with content remains.
pub fn clean_row(cells: Vec<Option<Cell>>) -> Option<Row> {
    let mut cells: Vec<Option<Cell>> = cells
        .into_iter()
        .map(|c| c.filter(|cell| !cell.is_blank()))
        .collect();

    let first = cells.iter().position(Option::is_some)?;
    let last = cells.iter().rposition(Option::is_some)?;
    cells.truncate(last + 1);
    cells.drain(..first);

    Some(cells)
}
