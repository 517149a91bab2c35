//! Document assembly: one parsed result per sheet, in workbook order.

use indexmap::IndexMap;

use crate::parser::parse_sheet;
use crate::section::SheetData;
use crate::value::Row;

/// A whole document's result: sheet name to per-sheet section map
pub type DocumentData = IndexMap<String, SheetData>;

/// Parse every sheet of a workbook, preserving the declared sheet order.
///
/// Sheets are independent; each gets a fresh parser state.
pub fn parse_workbook<I, S>(sheets: I) -> DocumentData
where
    I: IntoIterator<Item = (S, Vec<Row>)>,
    S: Into<String>,
{
    sheets
        .into_iter()
        .map(|(name, rows)| (name.into(), parse_sheet(&rows)))
        .collect()
}
