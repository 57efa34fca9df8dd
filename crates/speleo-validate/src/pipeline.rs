//! Stage ordering and gating.
//!
//! The run is a fixed list of [`Stage`]s. A stage may require [`Gate`]s
//! granted by earlier stages; when any is missing the stage is recorded as
//! skipped instead of run.

use serde::Serialize;
use speleo_model::Workbook;
use tracing::{debug, info, info_span};

use crate::context::Context;
use crate::report::{Outcome, ValidationReport};
use crate::stages::{
    closing, composite, cross_table, dating, entity, lamina, references, sample, site,
};

/// Named precondition granted by a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Gate {
    /// Every non-composite sample row has a depth.
    SampleDepthsPresent,
    /// Every dating row has a date_type.
    DatingTypesPresent,
    /// Every dating row has a date_used flag.
    DatingUseFlagsPresent,
    /// Every dating row has a depth.
    DatingDepthsPresent,
    /// Every dating row names its entity.
    DatingEntitiesPresent,
    /// No dating hiatus is repeated or shares a depth with a date.
    DatingHiatusesConsistent,
}

impl Gate {
    pub fn label(&self) -> &'static str {
        match self {
            Gate::SampleDepthsPresent => "sample depths present",
            Gate::DatingTypesPresent => "dating types present",
            Gate::DatingUseFlagsPresent => "dating use flags present",
            Gate::DatingDepthsPresent => "dating depths present",
            Gate::DatingEntitiesPresent => "dating entities present",
            Gate::DatingHiatusesConsistent => "dating hiatuses consistent",
        }
    }
}

/// What a stage produced.
#[derive(Debug, Default)]
pub struct StageResult {
    pub outcome: Outcome,
    pub granted: Vec<Gate>,
}

impl StageResult {
    /// Grants `gate` when `condition` holds.
    pub fn grant_if(mut self, condition: bool, gate: Gate) -> Self {
        if condition {
            self.granted.push(gate);
        }
        self
    }
}

impl From<Outcome> for StageResult {
    fn from(outcome: Outcome) -> Self {
        Self {
            outcome,
            granted: Vec::new(),
        }
    }
}

/// One step of the run.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    pub requires: &'static [Gate],
    pub provides: &'static [Gate],
    pub run: fn(&Context<'_>) -> StageResult,
}

const fn stage(name: &'static str, run: fn(&Context<'_>) -> StageResult) -> Stage {
    Stage {
        name,
        requires: &[],
        provides: &[],
        run,
    }
}

const DATING_KEYS: &[Gate] = &[
    Gate::DatingTypesPresent,
    Gate::DatingUseFlagsPresent,
    Gate::DatingDepthsPresent,
    Gate::DatingEntitiesPresent,
];

/// Every stage, in run order.
pub const STAGES: &[Stage] = &[
    stage("site", site::run),
    stage("entity", entity::run),
    stage("sample_overview", sample::overview),
    stage("composites", composite::run),
    Stage {
        provides: &[Gate::SampleDepthsPresent],
        ..stage("sample_profile", sample::profile)
    },
    stage("sample_measurements", sample::measurements),
    stage("sample_age_model", sample::age_model),
    stage("sample_sequence", sample::sequence),
    Stage {
        provides: DATING_KEYS,
        ..stage("dating_keys", dating::keys)
    },
    Stage {
        requires: DATING_KEYS,
        ..stage("dating_events", dating::events)
    },
    stage("dating_values", dating::values),
    Stage {
        provides: &[Gate::DatingHiatusesConsistent],
        ..stage("dating_hiatus_depths", dating::hiatus_depths)
    },
    stage("dating_actively_forming", dating::actively_forming),
    stage("lamina", lamina::run),
    stage("references", references::run),
    stage("lamina_links", lamina::links),
    stage("sample_hiatus_alignment", cross_table::sample_hiatus_alignment),
    Stage {
        requires: &[Gate::DatingHiatusesConsistent],
        ..stage("dating_hiatus_alignment", cross_table::dating_hiatus_alignment)
    },
    stage("entity_coverage", cross_table::entity_coverage),
    stage("lamination_pairing", cross_table::lamination_pairing),
    stage("entity_names", cross_table::entity_names),
    stage("data_doi_overlap", entity::data_doi_overlap),
    stage("closing", closing::run),
];

/// Runs every content check on a structurally valid workbook.
pub fn validate(workbook: &Workbook) -> ValidationReport {
    run_stages(workbook, STAGES)
}

/// Runs `stages` in order, folding their outcomes into one report.
pub fn run_stages(workbook: &Workbook, stages: &[Stage]) -> ValidationReport {
    let span = info_span!("validate", entities = workbook.entity().len());
    let _guard = span.enter();

    let mut context = Context::new(workbook);
    let mut report = ValidationReport::new();

    for stage in stages {
        let missing: Vec<Gate> = stage
            .requires
            .iter()
            .copied()
            .filter(|gate| !context.is_granted(*gate))
            .collect();
        if !missing.is_empty() {
            debug!(stage = stage.name, ?missing, "stage skipped");
            report.record_skip(stage.name, missing);
            continue;
        }

        let result = info_span!("stage", name = stage.name).in_scope(|| (stage.run)(&context));
        for gate in result.granted {
            if stage.provides.contains(&gate) {
                context.grant(gate);
            }
        }
        debug!(
            stage = stage.name,
            warnings = result.outcome.warnings(),
            "stage finished"
        );
        report.record_run(stage.name, result.outcome);
    }

    info!(
        warnings = report.warning_count(),
        verdict = report.verdict().label(),
        "validation finished"
    );
    report
}
