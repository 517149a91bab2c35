//! Sheet parser: a single-pass row classifier with one row of lookahead.
//!
//! Each cleaned row is routed to exactly one outcome: it opens a new
//! section, fixes a table header, contributes a table record, contributes
//! key/value metadata, lands in a fallback bucket, or is dropped as a blank
//! table row. The pass is deterministic and total; malformed rows degrade
//! to the `valores_miscelaneos` or `sin_seccion` buckets instead of failing.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::heuristics::{
    fold_token, normalize_key, LABEL_SUFFIXES, MAX_KEY_LEN, MISC_VALUES_KEY, NON_KEY_LITERALS,
    NO_SECTION_KEY, TABLE_SECTION_NAMES, VALUES_KEY,
};
use crate::section::{BucketEntry, FieldValue, Record, SectionContent, SheetData};
use crate::value::{Cell, Row};

/// Parse one sheet's cleaned rows into its section map
pub fn parse_sheet(rows: &[Row]) -> SheetData {
    SheetParser::new().run(rows)
}

/// Row-classification state carried across one sheet's pass
struct SheetParser {
    /// Sections assembled so far, in discovery order
    sections: SheetData,
    /// Key of the section currently receiving rows
    current_section: Option<String>,
    /// Counter for disambiguating duplicate section keys
    section_id: u32,
    /// Header names fixed for the current table, empty when not in a table
    table_headers: Vec<String>,
    /// Whether the current section is receiving table records
    in_table: bool,
}

impl SheetParser {
    fn new() -> Self {
        Self {
            sections: IndexMap::new(),
            current_section: None,
            section_id: 1,
            table_headers: Vec::new(),
            in_table: false,
        }
    }

    fn run(mut self, rows: &[Row]) -> SheetData {
        for (i, row) in rows.iter().enumerate() {
            self.process_row(row, rows.get(i + 1));
        }
        self.sections
    }

    fn process_row(&mut self, row: &Row, next: Option<&Row>) {
        // Single-cell rows declare a new section (or feed the bucket when
        // the sentinel shows up before any section exists).
        if row.len() == 1 {
            if let Some(cell) = row[0].clone() {
                self.open_section(&cell, row);
                return;
            }
        }

        // Candidate table header; needs one row of lookahead and consumes
        // the row only on a positive decision.
        if self.try_fix_headers(row, next) {
            return;
        }

        match self.current_section.clone() {
            Some(section) if self.in_table && !self.table_headers.is_empty() => {
                self.append_table_record(&section, row);
            }
            Some(section) => self.append_metadata_pairs(&section, row),
            None => self.append_orphan_row(row),
        }
    }

    fn open_section(&mut self, cell: &Cell, row: &Row) {
        let key = normalize_key(&cell.display_text());

        if key == NO_SECTION_KEY && self.current_section.is_none() {
            debug!("sentinel row kept verbatim in the no-section bucket");
            self.push_bucket(BucketEntry::Row(row.clone()));
            return;
        }

        let key = if self.sections.contains_key(&key) {
            let suffixed = format!("{key}_{}", self.section_id);
            self.section_id += 1;
            suffixed
        } else {
            key
        };

        debug!("new section: {key}");
        self.sections
            .insert(key.clone(), SectionContent::empty_fields());
        self.current_section = Some(key);
        self.table_headers.clear();
        self.in_table = false;
    }

    /// Decide whether `row` is a table header for the open section.
    ///
    /// Requires an open section, more than one cell, all cells text, and a
    /// following row. The decision is positive when the following row looks
    /// like data, or unconditionally for the known table-bearing sections
    /// as long as no header has been fixed yet.
    fn try_fix_headers(&mut self, row: &Row, next: Option<&Row>) -> bool {
        let Some(section) = self.current_section.clone() else {
            return false;
        };
        // Headers are immutable once fixed; rows that look like headers
        // inside a table are plain records.
        if self.in_table {
            return false;
        }
        if row.len() <= 1 || !row.iter().all(|c| matches!(c, Some(Cell::Text(_)))) {
            return false;
        }
        let Some(next_row) = next else {
            return false;
        };

        let forced =
            TABLE_SECTION_NAMES.contains(&section.as_str()) && self.table_headers.is_empty();
        if !lookahead_is_data(next_row) && !forced {
            return false;
        }

        self.table_headers = row
            .iter()
            .flatten()
            .map(|c| normalize_key(&c.display_text()))
            .collect();
        self.in_table = true;

        // Headers reset whatever the section had accumulated; its content
        // is a record sequence from here on.
        let content = self
            .sections
            .entry(section.clone())
            .or_insert_with(SectionContent::empty_fields);
        if !content.is_records() {
            *content = SectionContent::Records(Vec::new());
        }

        debug!("table headers fixed for {section}: {:?}", self.table_headers);
        true
    }

    fn append_table_record(&mut self, section: &str, row: &Row) {
        let mut record = Record::new();
        for (idx, header) in self.table_headers.iter().enumerate() {
            let value = row.get(idx).cloned().flatten();
            record.insert(header.clone(), FieldValue::Scalar(value));
        }

        let has_content = record
            .values()
            .any(|v| matches!(v, FieldValue::Scalar(Some(cell)) if !cell.is_blank()));
        if !has_content {
            debug!("blank table row dropped in {section}");
            return;
        }

        if let Some(SectionContent::Records(records)) = self.sections.get_mut(section) {
            debug!("table record appended to {section}");
            records.push(record);
        }
    }

    /// Walk a metadata row pairwise as (key candidate, value candidate),
    /// two cells at a time; an odd trailing cell pairs with an absent value.
    fn append_metadata_pairs(&mut self, section: &str, row: &Row) {
        let mut idx = 0;
        while idx < row.len() {
            let key_cell = row[idx].clone();
            let value_cell = row.get(idx + 1).cloned().flatten();
            idx += 2;

            match usable_key(key_cell.as_ref(), value_cell.as_ref()) {
                Some(key) => self.set_field(section, key, value_cell),
                None => {
                    warn!("unusable key {key_cell:?} in {section}, routed to misc bucket");
                    self.push_misc(section, key_cell, value_cell);
                }
            }
        }
    }

    fn set_field(&mut self, section: &str, key: String, value: Option<Cell>) {
        match self.sections.get_mut(section) {
            Some(SectionContent::Fields(fields)) => {
                fields.insert(key, FieldValue::Scalar(value));
            }
            // The section already turned into a table: keep the shape
            // uniform by appending a one-entry record.
            Some(SectionContent::Records(records)) => {
                let mut record = Record::new();
                record.insert(key, FieldValue::Scalar(value));
                records.push(record);
            }
            _ => {}
        }
    }

    fn push_misc(&mut self, section: &str, key: Option<Cell>, value: Option<Cell>) {
        match self.sections.get_mut(section) {
            Some(SectionContent::Fields(fields)) => {
                let entry = fields
                    .entry(MISC_VALUES_KEY.to_string())
                    .or_insert_with(|| FieldValue::List(Vec::new()));
                if let FieldValue::List(values) = entry {
                    values.push(key);
                    values.push(value);
                }
            }
            Some(SectionContent::Records(records)) => {
                let mut record = Record::new();
                record.insert(MISC_VALUES_KEY.to_string(), FieldValue::List(vec![key, value]));
                records.push(record);
            }
            _ => {}
        }
    }

    fn append_orphan_row(&mut self, row: &Row) {
        debug!("row outside any section: {row:?}");
        self.push_bucket(orphan_entry(row));
    }

    fn push_bucket(&mut self, entry: BucketEntry) {
        if let SectionContent::Rows(entries) = self
            .sections
            .entry(NO_SECTION_KEY.to_string())
            .or_insert_with(|| SectionContent::Rows(Vec::new()))
        {
            entries.push(entry);
        }
    }
}

/// Whether the lookahead row makes the current row a plausible header:
/// it must carry content and must not itself be a single-cell section
/// declaration (the sentinel does not count as one).
fn lookahead_is_data(next: &Row) -> bool {
    let has_content = next
        .iter()
        .any(|c| c.as_ref().is_some_and(|cell| !cell.is_blank()));
    if !has_content {
        return false;
    }
    let is_section_row = next.len() == 1
        && matches!(&next[0], Some(Cell::Text(text)) if normalize_key(text) != NO_SECTION_KEY);
    !is_section_row
}

/// Validate a key candidate and return its normalized form when usable.
///
/// A candidate is rejected when it is absent or numeric, its text exceeds
/// the length cap, folds to a low-information literal or to nothing, or its
/// paired value is absent without an `_id`/`_name`/`_code` label suffix.
/// A pair whose value folds to a known non-key literal is rejected as well.
fn usable_key(key: Option<&Cell>, value: Option<&Cell>) -> Option<String> {
    let key = key?;
    if key.is_numeric() {
        return None;
    }

    if let Cell::Text(text) = key {
        if text.chars().count() > MAX_KEY_LEN {
            return None;
        }
        let folded = fold_token(text);
        if folded.is_empty() || NON_KEY_LITERALS.contains(&folded.as_str()) {
            return None;
        }
        if value.is_none() && !LABEL_SUFFIXES.iter().any(|s| folded.ends_with(s)) {
            return None;
        }
    }

    if let Some(Cell::Text(text)) = value {
        if NON_KEY_LITERALS.contains(&fold_token(text).as_str()) {
            return None;
        }
    }

    Some(normalize_key(&key.display_text()))
}

/// Classify a row seen before any section header: a clean key/value row
/// (even length, text in every key position) becomes a flat map, anything
/// else is wrapped as `{"valores": <row>}`.
fn orphan_entry(row: &Row) -> BucketEntry {
    if row.len() % 2 == 0 && !row.is_empty() {
        let mut map = IndexMap::new();
        let mut clean = true;
        let mut idx = 0;
        while idx < row.len() {
            match &row[idx] {
                Some(Cell::Text(text)) if !text.trim().is_empty() => {
                    map.insert(
                        normalize_key(text),
                        FieldValue::Scalar(row.get(idx + 1).cloned().flatten()),
                    );
                }
                _ => {
                    clean = false;
                    break;
                }
            }
            idx += 2;
        }
        if clean && !map.is_empty() {
            return BucketEntry::Map(map);
        }
    }

    let mut wrapped = IndexMap::new();
    wrapped.insert(VALUES_KEY.to_string(), FieldValue::List(row.clone()));
    BucketEntry::Map(wrapped)
}
