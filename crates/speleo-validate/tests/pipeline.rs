//! Stage gating and the rendered transcript.

mod common;

use polars::df;
use speleo_ingest::sheet_from_frame;
use speleo_model::TableKind;
use speleo_validate::{
    Context, Gate, Outcome, Stage, StageResult, StageStatus, Verdict, run_stages, validate,
};

use common::{Builder, stages};

#[test]
fn missing_date_type_skips_event_checks() {
    let workbook = Builder::with_entities(&["E1"])
        .dating(&[&[
            ("entity_name", "E1"),
            ("depth_dating", "10"),
            ("date_used", "yes"),
        ]])
        .build();

    let report = run_stages(&workbook, &stages(&["dating_keys", "dating_events"]));
    assert_eq!(report.stages()[1].stage, "dating_events");
    assert_eq!(
        report.stages()[1].status,
        StageStatus::Skipped {
            missing: vec![Gate::DatingTypesPresent]
        }
    );
    assert_eq!(report.warning_count(), 1);
}

fn claims_depths(_: &Context<'_>) -> StageResult {
    StageResult::from(Outcome::pass()).grant_if(true, Gate::SampleDepthsPresent)
}

fn needs_depths(_: &Context<'_>) -> StageResult {
    Outcome::pass().into()
}

#[test]
fn only_declared_gates_are_granted() {
    let workbook = Builder::with_entities(&["E1"]).build();
    let undeclared = [
        Stage {
            name: "claims",
            requires: &[],
            provides: &[],
            run: claims_depths,
        },
        Stage {
            name: "needs",
            requires: &[Gate::SampleDepthsPresent],
            provides: &[],
            run: needs_depths,
        },
    ];
    let report = run_stages(&workbook, &undeclared);
    assert!(matches!(
        report.stages()[1].status,
        StageStatus::Skipped { .. }
    ));

    let declared = [
        Stage {
            provides: &[Gate::SampleDepthsPresent],
            ..undeclared[0]
        },
        undeclared[1],
    ];
    let report = run_stages(&workbook, &declared);
    assert_eq!(
        report.stages()[1].status,
        StageStatus::Ran { warnings: 0 }
    );
}

#[test]
fn transcript_lists_cross_table_findings() {
    let lamina = df!(
        "entity_name" => ["Cave_X"],
        "depth_lam" => [1.5],
        "lam_thickness" => [None::<f64>],
        "lam_age" => [12.0],
        "lam_age_uncert_pos" => [None::<f64>],
        "lam_age_uncert_neg" => [None::<f64>],
        "modern_reference" => ["BP (1950)"],
    )
    .unwrap();
    let mut builder = Builder::with_entities(&["E1"])
        .sample(&[
            &[("entity_name", "E1"), ("depth_sample", "10")],
            &[("entity_name", "E1"), ("depth_sample", "55"), ("hiatus", "H")],
            &[("entity_name", "E1"), ("depth_sample", "100")],
        ])
        .dating(&[&[
            ("entity_name", "E1"),
            ("depth_dating", "20"),
            ("date_type", "C14"),
            ("date_used", "yes"),
        ]]);
    builder.lamina = sheet_from_frame(TableKind::Lamina, &lamina).unwrap();
    let workbook = builder.build();

    let report = run_stages(
        &workbook,
        &stages(&["sample_hiatus_alignment", "entity_names"]),
    );
    assert_eq!(report.verdict(), Verdict::Review);
    insta::assert_snapshot!(report.render(), @r"
    Sample data tab: Entity E1; hiatus depth(s) 55 have no matching hiatus in the Dating information sheet
    Entity metadata tab: Entity Cave_X missing from the list (found in the Lamina age vs depth sheet)
    2 warning/s were detected
    ");
}

#[test]
fn full_run_records_every_stage() {
    let workbook = Builder::with_entities(&["E1"])
        .sample(&[&[("entity_name", "E1"), ("depth_sample", "10")]])
        .build();
    let report = validate(&workbook);
    assert_eq!(report.stages().len(), speleo_validate::STAGES.len());
    assert_eq!(report.verdict(), Verdict::Review);
    assert!(report.render().ends_with(&format!(
        "{} warning/s were detected\n",
        report.warning_count()
    )));
}
