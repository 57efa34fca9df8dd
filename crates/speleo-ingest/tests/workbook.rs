//! Tests for loading workbook directories.

use std::fs;
use std::path::Path;

use speleo_ingest::{IngestError, IngestOptions, classify_sheet, list_csv_files, load_workbook};
use speleo_model::{StructuralError, TableKind};

fn write_sheet(dir: &Path, name: &str, kind: TableKind, rows: &[&str]) {
    let mut text = format!("{name} description\n{}\n", kind.required_columns().join(","));
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    fs::write(dir.join(format!("{name}.csv")), text).expect("write sheet");
}

fn write_workbook(dir: &Path) {
    write_sheet(dir, "Site metadata", TableKind::Site, &["Cave,10,20,100,limestone,Holocene,no"]);
    write_sheet(dir, "Entity metadata", TableKind::Entity, &["A", "B"]);
    write_sheet(dir, "References", TableKind::References, &["A,Smith 2020,10.1000/x"]);
    write_sheet(dir, "Dating information", TableKind::Dating, &[]);
    write_sheet(dir, "Lamina age vs depth", TableKind::Lamina, &[]);
    write_sheet(dir, "Sample data", TableKind::Sample, &["A,1.5"]);
    fs::write(dir.join("Notes.csv"), "free text\n").expect("write notes");
}

#[test]
fn loads_a_workbook_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_workbook(dir.path());

    let files = list_csv_files(dir.path()).expect("list csv");
    assert_eq!(files.len(), 7);
    assert!(files.iter().any(|file| file.ends_with("Notes.csv")));

    let workbook = load_workbook(dir.path(), IngestOptions::default()).expect("load");
    assert_eq!(workbook.entity().len(), 2);
    assert_eq!(workbook.sample().value(0, "depth_sample").as_number(), Some(1.5));
    assert_eq!(workbook.site().value(0, "latitude").as_number(), Some(10.0));
}

#[test]
fn missing_sheet_is_structural() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_workbook(dir.path());
    fs::remove_file(dir.path().join("References.csv")).expect("remove");

    let err = load_workbook(dir.path(), IngestOptions::default()).expect_err("missing");
    assert!(matches!(
        err,
        IngestError::Structural(StructuralError::MissingSheet { sheet: "References" })
    ));
}

#[test]
fn second_sample_sheet_is_structural() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_workbook(dir.path());
    write_sheet(dir.path(), "Sample data (copy)", TableKind::Sample, &[]);

    let err = load_workbook(dir.path(), IngestOptions::default()).expect_err("two samples");
    assert!(matches!(
        err,
        IngestError::Structural(StructuralError::MultipleSampleSheets { count: 2 })
    ));
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = list_csv_files(&dir.path().join("absent")).expect_err("absent");
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    assert_eq!(classify_sheet("Entity metadata"), Some(TableKind::Entity));
}
