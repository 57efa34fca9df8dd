//! Integration tests for the check and normalize workflows.

use std::fs;
use std::path::Path;

use speleo_cli::pipeline::{NormalizeOutcome, run_check, run_normalize, write_report};
use speleo_ingest::{IngestOptions, read_sheet};
use speleo_model::TableKind;
use speleo_validate::Verdict;

/// One CSV line in schema order; unnamed columns stay empty.
fn line(kind: TableKind, cells: &[(&str, &str)]) -> String {
    kind.required_columns()
        .iter()
        .map(|column| {
            cells
                .iter()
                .find(|(name, _)| name == column)
                .map_or("", |(_, value)| *value)
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn write_sheet(dir: &Path, kind: TableKind, rows: &[Vec<(&str, &str)>]) {
    let mut text = format!(
        "{} description\n{}\n",
        kind.sheet_name(),
        kind.required_columns().join(",")
    );
    for row in rows {
        text.push_str(&line(kind, row));
        text.push('\n');
    }
    fs::write(dir.join(format!("{}.csv", kind.sheet_name())), text).unwrap();
}

fn write_workbook(dir: &Path) {
    write_sheet(
        dir,
        TableKind::Site,
        &[vec![
            ("site_name", "Test cave"),
            ("latitude", "45.5"),
            ("longitude", "10.25"),
        ]],
    );
    write_sheet(
        dir,
        TableKind::Entity,
        &[vec![
            ("entity_name", "E1"),
            ("speleothem_type", "stalagmite"),
            ("depth_ref", "from top"),
        ]],
    );
    write_sheet(dir, TableKind::References, &[]);
    write_sheet(
        dir,
        TableKind::Dating,
        &[vec![
            ("entity_name", "E1"),
            ("date_type", "C14"),
            ("depth_dating", "10"),
            ("date_used", "yes"),
            ("corr_age", "1050"),
            ("modern_reference", "b2k"),
        ]],
    );
    write_sheet(dir, TableKind::Lamina, &[]);
    write_sheet(
        dir,
        TableKind::Sample,
        &[vec![
            ("entity_name", "E1"),
            ("depth_sample", "10"),
            ("interp_age", "1050"),
            ("modern_reference", "b2k"),
        ]],
    );
}

#[test]
fn check_reports_review_for_incomplete_workbook() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(dir.path());

    let result = run_check(dir.path(), IngestOptions::default()).unwrap();
    assert_eq!(result.verdict, Verdict::Review);
    assert!(!result.accepted());
    assert_eq!(result.warnings, result.report.warning_count());
    assert!(
        result
            .report
            .render()
            .contains("References tab: Entity E1 is missing a reference")
    );
}

#[test]
fn json_report_round_trips_through_serde() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(dir.path());
    let result = run_check(dir.path(), IngestOptions::default()).unwrap();

    let path = dir.path().join("report.json");
    write_report(&path, &result).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["verdict"], "Review");
    assert_eq!(json["warnings"], result.warnings);
    assert!(json["checked_at"].as_str().is_some_and(|t| t.contains('T')));
}

#[test]
fn missing_sheet_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(dir.path());
    fs::remove_file(dir.path().join("References.csv")).unwrap();

    let error = run_check(dir.path(), IngestOptions::default()).unwrap_err();
    assert!(format!("{error:#}").contains("References"));
}

#[test]
fn normalize_refuses_workbook_with_warnings() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(dir.path());

    let outcome = run_normalize(dir.path(), None, false, IngestOptions::default()).unwrap();
    assert!(matches!(outcome, NormalizeOutcome::Refused { warnings } if warnings > 0));
    assert!(!dir.path().join("normalized").exists());
}

#[test]
fn forced_normalize_writes_bp1950_sheets() {
    let dir = tempfile::tempdir().unwrap();
    write_workbook(dir.path());
    let out = dir.path().join("out");

    let outcome = run_normalize(dir.path(), Some(&out), true, IngestOptions::default()).unwrap();
    let NormalizeOutcome::Written(result) = outcome else {
        panic!("expected written sheets");
    };
    assert!(result.forced);
    assert_eq!(result.sheets.len(), 3);
    assert!(result.unresolved.is_empty());

    let sample = read_sheet(
        &out.join("Sample data.csv"),
        TableKind::Sample,
        IngestOptions::default(),
    )
    .unwrap();
    assert_eq!(sample.value(0, "interp_age").as_number(), Some(1000.0));
    assert_eq!(sample.value(0, "modern_reference").as_str(), Some("BP (1950)"));

    let dating = read_sheet(
        &out.join("Dating information.csv"),
        TableKind::Dating,
        IngestOptions::default(),
    )
    .unwrap();
    assert_eq!(dating.value(0, "corr_age").as_number(), Some(1000.0));
}
