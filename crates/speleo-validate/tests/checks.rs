//! Column and row-group checks over single sheets.

mod common;

use proptest::prelude::*;
use speleo_model::{Direction, Sheet, TableKind, Value};
use speleo_validate::checks::range::Bounds;
use speleo_validate::checks::{
    MissingPolicy, co_occurrence, duplicates, min_max, numeric, ordering, presence, range,
};
use speleo_validate::{Issue, View};

use common::sheet;

fn ages(values: &[&str]) -> Sheet {
    let rows: Vec<Vec<(&str, &str)>> = values
        .iter()
        .map(|age| vec![("entity_name", "E1"), ("interp_age", *age)])
        .collect();
    let rows: Vec<_> = rows.iter().map(Vec::as_slice).collect();
    sheet(TableKind::Sample, &rows)
}

#[test]
fn presence_reports_every_empty_row() {
    let sheet = ages(&["10", "", "12", ""]);
    let outcome = presence::check(&View::new(&sheet), "interp_age");
    assert_eq!(outcome.warnings(), 1);
    assert_eq!(
        outcome.diagnostics()[0].issue,
        Issue::Missing {
            column: "interp_age".to_string(),
            rows: vec![4, 6],
        }
    );
}

#[test]
fn numeric_flags_text_only() {
    let sheet = ages(&["10", "ten", ""]);
    let outcome = numeric::check(&View::new(&sheet), "interp_age");
    assert_eq!(outcome.diagnostics()[0].issue.rows(), vec![4]);
}

#[test]
fn age_floor_is_inclusive() {
    let sheet = ages(&["-70", "-70.0001", "5000"]);
    let outcome = range::check(
        &View::new(&sheet),
        "interp_age",
        Bounds::at_least(-70.0),
        MissingPolicy::Flag,
    );
    assert_eq!(outcome.warnings(), 1);
    assert_eq!(outcome.diagnostics()[0].issue.rows(), vec![4]);
}

#[test]
fn range_skip_ignores_empty_cells() {
    let sheet = ages(&["", "12"]);
    let view = View::new(&sheet);
    let bounds = Bounds::at_least(-70.0);
    assert!(range::check(&view, "interp_age", bounds, MissingPolicy::Skip).passed());
    assert!(!range::check(&view, "interp_age", bounds, MissingPolicy::Flag).passed());
}

#[test]
fn measurement_needs_its_precision() {
    let sheet = sheet(
        TableKind::Sample,
        &[
            &[("entity_name", "E1"), ("d18O_measurement", "-5.2")],
            &[
                ("entity_name", "E1"),
                ("d18O_measurement", "-5.1"),
                ("d18O_precision", "0.1"),
            ],
            &[("entity_name", "E1")],
        ],
    );
    let outcome = co_occurrence::check(&View::new(&sheet), "d18O_precision", "d18O_measurement");
    assert_eq!(outcome.warnings(), 1);
    assert_eq!(outcome.diagnostics()[0].issue.rows(), vec![3]);
}

#[test]
fn duplicates_list_each_repeated_depth() {
    let sheet = sheet(
        TableKind::Sample,
        &[
            &[("entity_name", "E1"), ("depth_sample", "5")],
            &[("entity_name", "E1"), ("depth_sample", "7")],
            &[("entity_name", "E1"), ("depth_sample", "5")],
            &[("entity_name", "E1"), ("depth_sample", "5.0000001")],
        ],
    );
    let outcome = duplicates::check(&View::new(&sheet), "E1", "depth_sample");
    assert_eq!(outcome.warnings(), 1);
    assert_eq!(
        outcome.diagnostics()[0].message(),
        "Sample data tab: Entity E1; the following depth_sample occur more than once: 5 (row: 3, 5, 6)"
    );
}

#[test]
fn duplicates_keep_large_ages_apart() {
    let sheet = ages(&["123456.7", "123457.2", "98765.4321", "98765.4322"]);
    let outcome = duplicates::check(&View::new(&sheet), "E1", "interp_age");
    assert!(outcome.passed(), "{:?}", outcome.diagnostics());

    let sheet = ages(&["123456.7", "123456.700000001"]);
    let outcome = duplicates::check(&View::new(&sheet), "E1", "interp_age");
    assert_eq!(outcome.warnings(), 1);
    assert_eq!(outcome.diagnostics()[0].issue.rows(), vec![3, 4]);
}

#[test]
fn min_max_needs_two_bracketing_rows() {
    let row = |age, pos, neg| {
        vec![
            ("entity_name", "E1"),
            ("interp_age", age),
            ("interp_age_uncert_pos", pos),
            ("interp_age_uncert_neg", neg),
        ]
    };
    let tolerated = [row("100", "120", "80"), row("200", "10", "10")];
    let tolerated: Vec<_> = tolerated.iter().map(Vec::as_slice).collect();
    let sheet = sheet(TableKind::Sample, &tolerated);
    let check = |sheet: &Sheet| {
        min_max::check(
            &View::new(sheet),
            "E1",
            "interp_age",
            "interp_age_uncert_pos",
            "interp_age_uncert_neg",
        )
    };
    assert!(check(&sheet).passed());

    let flagged = [row("100", "120", "80"), row("200", "220", "180")];
    let flagged: Vec<_> = flagged.iter().map(Vec::as_slice).collect();
    let sheet = common::sheet(TableKind::Sample, &flagged);
    assert_eq!(check(&sheet).warnings(), 1);
}

#[test]
fn inversions_report_depth_pairs() {
    let sheet = sheet(
        TableKind::Sample,
        &[
            &[("entity_name", "E1"), ("depth_sample", "1"), ("interp_age", "100")],
            &[("entity_name", "E1"), ("depth_sample", "2"), ("interp_age", "200")],
            &[("entity_name", "E1"), ("depth_sample", "3"), ("interp_age", "150")],
            &[("entity_name", "E1"), ("depth_sample", "4"), ("interp_age", "300")],
        ],
    );
    let outcome = ordering::check(
        &View::new(&sheet),
        "E1",
        "depth_sample",
        "interp_age",
        Direction::Ascending,
    );
    assert_eq!(
        outcome.diagnostics()[0].message(),
        "Sample data tab: Entity E1; age inversion at the following paired depth_sample: (2, 3)"
    );
}

#[test]
fn fully_inverted_sequence_blames_depth_ref() {
    let sheet = sheet(
        TableKind::Sample,
        &[
            &[("entity_name", "E1"), ("depth_sample", "1"), ("interp_age", "300")],
            &[("entity_name", "E1"), ("depth_sample", "2"), ("interp_age", "200")],
            &[("entity_name", "E1"), ("depth_sample", "3"), ("interp_age", "100")],
        ],
    );
    let outcome = ordering::check(
        &View::new(&sheet),
        "E1",
        "depth_sample",
        "interp_age",
        Direction::Ascending,
    );
    assert_eq!(
        outcome.diagnostics()[0].issue,
        Issue::DepthRefInverted {
            entity: "E1".to_string()
        }
    );
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Missing),
        (-1.0e4..1.0e4f64).prop_map(Value::Number),
        "[a-z]{1,6}".prop_map(Value::Text),
    ]
}

proptest! {
    #[test]
    fn co_occurrence_flags_exactly_the_orphans(cells in prop::collection::vec((cell(), cell()), 0..20)) {
        let mut sheet = Sheet::new(
            TableKind::Dating,
            vec!["corr_age".to_string(), "corr_age_uncert_pos".to_string()],
        );
        for (age, uncert) in &cells {
            sheet.push_next(vec![age.clone(), uncert.clone()]);
        }
        let view = View::new(&sheet);
        let expected: Vec<usize> = view.row_numbers_where(|row| {
            row.is_missing("corr_age") && row.is_present("corr_age_uncert_pos")
        });

        let outcome = co_occurrence::check(&view, "corr_age", "corr_age_uncert_pos");
        prop_assert_eq!(outcome.passed(), expected.is_empty());
        prop_assert!(outcome.warnings() <= 1);
        if let Some(diagnostic) = outcome.diagnostics().first() {
            prop_assert_eq!(diagnostic.issue.rows(), expected);
        }
    }

    #[test]
    fn range_flags_only_values_below_the_floor(values in prop::collection::vec(-200.0..200.0f64, 1..20)) {
        let mut sheet = Sheet::new(TableKind::Sample, vec!["interp_age".to_string()]);
        for value in &values {
            sheet.push_next(vec![Value::Number(*value)]);
        }
        let outcome = range::check(
            &View::new(&sheet),
            "interp_age",
            Bounds::at_least(-70.0),
            MissingPolicy::Flag,
        );
        prop_assert_eq!(outcome.passed(), values.iter().all(|v| *v >= -70.0));
    }
}
