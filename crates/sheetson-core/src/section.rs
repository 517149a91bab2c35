//! Section content model.
//!
//! A section is either a key/value metadata block or a uniform table, and
//! the classifier actively converts between the two at runtime, so the
//! content is a tagged variant rather than a dynamically-typed container.
//! All maps are insertion-ordered; serialization keeps discovery order.

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::{Cell, Row};

/// A value stored under a section key: a scalar cell or a flat list.
///
/// The list case backs `valores_miscelaneos` and verbatim no-section rows;
/// everything else is a scalar (possibly null).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single cell value, `None` serializing as JSON null
    Scalar(Option<Cell>),
    /// A flat list of cell values
    List(Vec<Option<Cell>>),
}

/// One table record: fixed header names mapped to cell values
pub type Record = IndexMap<String, FieldValue>;

/// An entry in the no-section bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BucketEntry {
    /// A row kept verbatim
    Row(Row),
    /// A row that parsed cleanly as key/value pairs
    Map(IndexMap<String, FieldValue>),
}

/// The content of one logical section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionContent {
    /// Key/value metadata block
    Fields(IndexMap<String, FieldValue>),
    /// Uniform table: an ordered sequence of records
    Records(Vec<Record>),
    /// The no-section bucket: rows seen before any section header
    Rows(Vec<BucketEntry>),
}

/// One sheet's result: section key to section content, in discovery order
pub type SheetData = IndexMap<String, SectionContent>;

impl SectionContent {
    /// Empty metadata block, the state every new section starts in
    pub fn empty_fields() -> Self {
        SectionContent::Fields(IndexMap::new())
    }

    /// Whether this content is a table sequence
    pub fn is_records(&self) -> bool {
        matches!(self, SectionContent::Records(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_serializes_untagged() {
        let scalar = FieldValue::Scalar(Some(Cell::Int(5)));
        assert_eq!(serde_json::to_value(&scalar).unwrap(), json!(5));

        let null = FieldValue::Scalar(None);
        assert_eq!(serde_json::to_value(&null).unwrap(), json!(null));

        let list = FieldValue::List(vec![Some(Cell::Text("a".to_string())), None]);
        assert_eq!(serde_json::to_value(&list).unwrap(), json!(["a", null]));
    }

    #[test]
    fn test_section_content_shapes() {
        let mut fields = IndexMap::new();
        fields.insert(
            "modelo".to_string(),
            FieldValue::Scalar(Some(Cell::Text("X1".to_string()))),
        );
        let section = SectionContent::Fields(fields);
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({"modelo": "X1"})
        );

        let mut record = Record::new();
        record.insert("corriente".to_string(), FieldValue::Scalar(Some(Cell::Int(10))));
        let table = SectionContent::Records(vec![record]);
        assert_eq!(
            serde_json::to_value(&table).unwrap(),
            json!([{"corriente": 10}])
        );
    }

    #[test]
    fn test_bucket_entry_row_is_bare_array() {
        let entry = BucketEntry::Row(vec![Some(Cell::Text("Sin seccion".to_string()))]);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!(["Sin seccion"])
        );
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut fields = IndexMap::new();
        fields.insert("zeta".to_string(), FieldValue::Scalar(Some(Cell::Int(1))));
        fields.insert("alfa".to_string(), FieldValue::Scalar(Some(Cell::Int(2))));
        let json = serde_json::to_string(&SectionContent::Fields(fields)).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alfa").unwrap());
    }
}
