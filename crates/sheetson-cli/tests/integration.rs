//! Integration tests for the sheetson CLI library surface:
//! xlsx file -> JSON, and the base64 transport round-trip.

use std::fs;
use std::io::{Cursor, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use sheetson_cli::{convert_file, list_sheets};
use sheetson_data::RowWindow;

/// Minimal single-sheet workbook with one metadata section
fn create_test_workbook() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#).unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#).unwrap();

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Informe" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#).unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#).unwrap();

    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="3"><c r="A3" t="inlineStr"><is><t>Equipo</t></is></c></row>
    <row r="4"><c r="A4" t="inlineStr"><is><t>Serie</t></is></c><c r="B4" t="inlineStr"><is><t>S-99</t></is></c></row>
  </sheetData>
</worksheet>"#).unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

#[test]
fn test_convert_file_emits_structured_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("informe.xlsx");
    fs::write(&path, create_test_workbook()).unwrap();

    let rendered = convert_file(&path, false, false, false, &RowWindow::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value, json!({"Informe": {"equipo": {"serie": "S-99"}}}));
}

#[test]
fn test_base64_transport_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("informe.b64");
    fs::write(&path, STANDARD.encode(create_test_workbook())).unwrap();

    let rendered = convert_file(&path, true, true, false, &RowWindow::default()).unwrap();
    let decoded = STANDARD.decode(rendered).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&decoded).unwrap();

    assert_eq!(value, json!({"Informe": {"equipo": {"serie": "S-99"}}}));
}

#[test]
fn test_list_sheets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("informe.xlsx");
    fs::write(&path, create_test_workbook()).unwrap();

    assert_eq!(list_sheets(&path).unwrap(), vec!["Informe"]);
}

#[test]
fn test_missing_input_is_a_boundary_error() {
    let err = convert_file(
        std::path::Path::new("no/such/informe.xlsx"),
        false,
        false,
        false,
        &RowWindow::default(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("no/such/informe.xlsx"));
}
