//! Checks joining sheets, run through their pipeline stages.

mod common;

use speleo_model::TableKind;
use speleo_validate::{Issue, Severity, run_stages};

use common::{Builder, stages};

#[test]
fn undeclared_entity_is_named_once() {
    let workbook = Builder::with_entities(&["E1"])
        .dating(&[
            &[
                ("entity_name", "Cave_X"),
                ("depth_dating", "10"),
                ("date_type", "C14"),
                ("date_used", "yes"),
            ],
            &[
                ("entity_name", "Cave_X"),
                ("depth_dating", "20"),
                ("date_type", "C14"),
                ("date_used", "yes"),
            ],
        ])
        .build();

    let report = run_stages(&workbook, &stages(&["entity_names"]));
    assert_eq!(report.warning_count(), 1);
    assert_eq!(
        report.diagnostics()[0].issue,
        Issue::UnknownEntities {
            names: vec!["Cave_X".to_string()],
            found_in: TableKind::Dating,
        }
    );
}

#[test]
fn sample_hiatus_without_dating_hiatus() {
    let workbook = Builder::with_entities(&["E1"])
        .sample(&[
            &[("entity_name", "E1"), ("depth_sample", "10")],
            &[("entity_name", "E1"), ("depth_sample", "55"), ("hiatus", "H")],
            &[("entity_name", "E1"), ("depth_sample", "100")],
        ])
        .dating(&[&[
            ("entity_name", "E1"),
            ("depth_dating", "40"),
            ("date_type", "Event; hiatus"),
            ("date_used", "no"),
        ]])
        .build();

    let report = run_stages(&workbook, &stages(&["sample_hiatus_alignment"]));
    assert_eq!(report.warning_count(), 1);
    let Issue::HiatusMismatch { depths, .. } = &report.diagnostics()[0].issue else {
        panic!("unexpected issue: {:?}", report.diagnostics()[0].issue);
    };
    assert_eq!(depths, &vec!["55".to_string()]);
}

#[test]
fn dating_hiatus_outside_sampled_range_is_ignored() {
    let workbook = Builder::with_entities(&["E1"])
        .sample(&[
            &[("entity_name", "E1"), ("depth_sample", "10")],
            &[("entity_name", "E1"), ("depth_sample", "100")],
        ])
        .dating(&[
            &[
                ("entity_name", "E1"),
                ("depth_dating", "250"),
                ("date_type", "Event; hiatus"),
                ("date_used", "no"),
            ],
            &[
                ("entity_name", "E1"),
                ("depth_dating", "50"),
                ("date_type", "Event; hiatus"),
                ("date_used", "no"),
            ],
        ])
        .build();

    let report = run_stages(
        &workbook,
        &stages(&["dating_keys", "dating_hiatus_depths", "dating_hiatus_alignment"]),
    );
    let mismatches: Vec<_> = report
        .diagnostics()
        .iter()
        .filter_map(|d| match &d.issue {
            Issue::HiatusMismatch { depths, .. } => Some(depths.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(mismatches, vec![vec!["50".to_string()]]);
}

fn lamination(start_depth: &'static str, end_depth: &'static str) -> speleo_model::Workbook {
    Builder::with_entities(&["E1"])
        .dating(&[
            &[
                ("entity_name", "E1"),
                ("depth_dating", start_depth),
                ("date_type", "Event; start of laminations"),
                ("date_used", "no"),
            ],
            &[
                ("entity_name", "E1"),
                ("depth_dating", end_depth),
                ("date_type", "Event; end of laminations"),
                ("date_used", "no"),
            ],
        ])
        .build()
}

#[test]
fn lamination_pairing_accepts_ordered_events() {
    let report = run_stages(&lamination("100", "0"), &stages(&["lamination_pairing"]));
    assert!(report.diagnostics().is_empty());
}

#[test]
fn lamination_pairing_flags_both_ends_when_swapped() {
    let report = run_stages(&lamination("0", "100"), &stages(&["lamination_pairing"]));
    assert_eq!(report.warning_count(), 2);
    assert!(
        report
            .diagnostics()
            .iter()
            .all(|d| d.severity == Severity::Warning && d.table == TableKind::Dating)
    );
}

#[test]
fn lamina_without_start_event() {
    let workbook = Builder::with_entities(&["E1", "E2"])
        .lamina(&[&[
            ("entity_name", "E1"),
            ("depth_lam", "1"),
            ("lam_age", "10"),
        ]])
        .dating(&[&[
            ("entity_name", "E2"),
            ("depth_dating", "3"),
            ("date_type", "Event; start of laminations"),
            ("date_used", "no"),
        ]])
        .build();

    let report = run_stages(&workbook, &stages(&["lamina_links"]));
    let tables: Vec<TableKind> = report.diagnostics().iter().map(|d| d.table).collect();
    assert_eq!(tables, vec![TableKind::Lamina, TableKind::Dating]);
}

#[test]
fn every_entity_needs_a_reference() {
    let workbook = Builder::with_entities(&["E1", "E2"]).build();
    let report = run_stages(&workbook, &stages(&["entity_coverage"]));
    let messages: Vec<String> = report
        .diagnostics()
        .iter()
        .filter(|d| d.table == TableKind::References)
        .map(|d| d.message())
        .collect();
    assert_eq!(
        messages,
        vec![
            "References tab: Entity E1 is missing a reference",
            "References tab: Entity E2 is missing a reference",
        ]
    );
}
