//! Tests for workbook assembly and its structural gate.

use speleo_model::{Sheet, StructuralError, TableKind, Value, Workbook};

fn sheet(kind: TableKind, rows: &[&[(&str, &str)]]) -> Sheet {
    let mut sheet = Sheet::with_schema(kind);
    for row in rows {
        let cells = sheet
            .columns()
            .iter()
            .map(|column| {
                row.iter()
                    .find(|(name, _)| *name == column.as_str())
                    .map_or(Value::Missing, |(_, raw)| Value::from_raw(raw))
            })
            .collect();
        sheet.push_next(cells);
    }
    sheet
}

fn minimal_sheets() -> Vec<Sheet> {
    vec![
        sheet(TableKind::Site, &[&[("site_name", "Cave")]]),
        sheet(TableKind::Entity, &[&[("entity_name", "A")], &[("entity_name", "B")]]),
        sheet(TableKind::References, &[]),
        sheet(TableKind::Dating, &[]),
        sheet(TableKind::Lamina, &[]),
        sheet(TableKind::Sample, &[]),
    ]
}

#[test]
fn assembles_from_unordered_sheets() {
    let mut sheets = minimal_sheets();
    sheets.reverse();
    let workbook = Workbook::from_sheets(sheets).expect("workbook");
    assert_eq!(workbook.entity().len(), 2);
    assert_eq!(workbook.sheet(TableKind::Site).kind(), TableKind::Site);
}

#[test]
fn missing_sheet_is_structural() {
    let mut sheets = minimal_sheets();
    sheets.retain(|sheet| sheet.kind() != TableKind::Lamina);
    let err = Workbook::from_sheets(sheets).expect_err("missing lamina");
    assert_eq!(
        err,
        StructuralError::MissingSheet {
            sheet: "Lamina age vs depth"
        }
    );
}

#[test]
fn two_sample_sheets_are_rejected() {
    let mut sheets = minimal_sheets();
    sheets.push(sheet(TableKind::Sample, &[]));
    let err = Workbook::from_sheets(sheets).expect_err("two samples");
    assert_eq!(err, StructuralError::MultipleSampleSheets { count: 2 });
}

#[test]
fn missing_columns_name_the_version() {
    let mut sheets = minimal_sheets();
    sheets[5] = Sheet::new(TableKind::Sample, vec!["entity_name".to_string()]);
    let err = Workbook::from_sheets(sheets).expect_err("old schema");
    let message = err.to_string();
    assert!(message.contains("not version 12"));
    assert!(message.contains("depth_sample"));
}

#[test]
fn site_must_have_one_row() {
    let mut sheets = minimal_sheets();
    sheets[0] = sheet(
        TableKind::Site,
        &[&[("site_name", "Cave")], &[("site_name", "Other")]],
    );
    let err = Workbook::from_sheets(sheets).expect_err("two sites");
    assert_eq!(err, StructuralError::SiteRowCount { rows: 2 });
}

#[test]
fn entities_are_required_and_unique() {
    let mut sheets = minimal_sheets();
    sheets[1] = sheet(TableKind::Entity, &[]);
    assert_eq!(
        Workbook::from_sheets(sheets).expect_err("no entities"),
        StructuralError::NoEntities
    );

    let mut sheets = minimal_sheets();
    sheets[1] = sheet(
        TableKind::Entity,
        &[&[("entity_name", "A")], &[("entity_name", "A")]],
    );
    let err = Workbook::from_sheets(sheets).expect_err("duplicates");
    assert_eq!(
        err,
        StructuralError::DuplicateEntityNames {
            names: vec!["A".to_string()]
        }
    );
}
