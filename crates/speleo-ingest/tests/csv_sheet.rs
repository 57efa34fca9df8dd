//! Tests for reading and writing sheet CSV files.

use std::fs;

use speleo_ingest::{IngestOptions, read_sheet, read_sheet_from, write_sheet};
use speleo_model::{TableKind, Value};

const LAMINA: &str = "\
Lamina age vs depth: one row per lamina,,
entity_name,depth_lam,lam_age
A,0.5,10
,,
A,1.5, 20
";

#[test]
fn skips_description_and_keeps_row_numbers() {
    let sheet = read_sheet_from(LAMINA.as_bytes(), TableKind::Lamina, IngestOptions::default())
        .expect("parse lamina");
    assert_eq!(sheet.columns(), ["entity_name", "depth_lam", "lam_age"]);
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.rows()[0].number, 3);
    // The blank spreadsheet row 4 is dropped but still counted.
    assert_eq!(sheet.rows()[1].number, 5);
    assert_eq!(sheet.value(0, "lam_age"), &Value::Number(10.0));
    assert_eq!(sheet.value(1, "lam_age"), &Value::Text(" 20".to_string()));
}

#[test]
fn header_only_sheet_is_empty() {
    let input = "description\nentity_name,citation,publication_DOI\n";
    let sheet = read_sheet_from(input.as_bytes(), TableKind::References, IngestOptions::default())
        .expect("parse references");
    assert!(sheet.is_empty());
    assert!(sheet.missing_columns().is_empty());
}

#[test]
fn missing_header_is_an_error() {
    let input = "only a description\n";
    let err = read_sheet_from(input.as_bytes(), TableKind::Site, IngestOptions::default())
        .expect_err("no header");
    assert!(err.to_string().contains("no header row"));
}

#[test]
fn written_sheets_read_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("Lamina age vs depth.csv");
    let original = read_sheet_from(LAMINA.as_bytes(), TableKind::Lamina, IngestOptions::default())
        .expect("parse lamina");

    write_sheet(&path, &original, "normalized").expect("write sheet");
    let text = fs::read_to_string(&path).expect("read back");
    assert!(text.starts_with("normalized\n"));

    let reread = read_sheet(&path, TableKind::Lamina, IngestOptions::default()).expect("reread");
    assert_eq!(reread.len(), 2);
    assert_eq!(reread.value(0, "depth_lam"), &Value::Number(0.5));
    assert_eq!(reread.value(1, "lam_age"), &Value::Text(" 20".to_string()));
}
