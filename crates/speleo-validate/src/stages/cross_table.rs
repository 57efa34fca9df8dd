//! Checks that join sheets on entity name or depth.

use speleo_model::vocab::{AnnLamCheck, DateType};
use speleo_model::{TableKind, Workbook};

use super::warn;
use crate::checks::{entity_names as names, hiatus_alignment, lamination, references};
use crate::context::Context;
use crate::issue::Category;
use crate::pipeline::StageResult;
use crate::report::Outcome;
use crate::view::{Row, View};

pub fn sample_hiatus_alignment(ctx: &Context<'_>) -> StageResult {
    hiatus_alignment::sample_in_dating(&ctx.samples(), &ctx.dating()).into()
}

pub fn dating_hiatus_alignment(ctx: &Context<'_>) -> StageResult {
    let (dating, samples) = (ctx.dating(), ctx.samples());
    if dating.is_empty() || samples.is_empty() {
        return Outcome::pass().into();
    }
    hiatus_alignment::dating_in_sample(&dating, &samples).into()
}

fn has_event(dating: &View<'_>, event: DateType) -> bool {
    dating.rows().any(|row| row.is("date_type", event))
}

/// References, dating and lamination coverage of every entity.
pub fn entity_coverage(ctx: &Context<'_>) -> StageResult {
    let mut outcome = references::coverage(ctx.entities(), &ctx.references());
    let (all_dating, all_lamina) = (ctx.dating(), ctx.lamina());
    let samples = ctx.hiatus_free_samples();
    let unmodelled = ctx.entities_without_age_model();

    for entity in ctx.entities().iter().filter(|e| !ctx.is_composite(e)) {
        let dating = all_dating.for_entity(entity);
        let has_lamina = !all_lamina.for_entity(entity).is_empty();

        if dating.is_empty() {
            let message = if has_lamina {
                format!(
                    "Entity {entity} has laminae information but no dating information. A lamina-only chronology needs its start and end of laminations events in the dating sheet."
                )
            } else {
                format!("Entity {entity} has no dating information")
            };
            outcome.merge(warn(
                TableKind::Dating,
                Category::CrossReference,
                "entity_dating",
                message,
            ));
        }

        let start = has_event(&dating, DateType::StartOfLaminations);
        let end = has_event(&dating, DateType::EndOfLaminations);
        if end && !start {
            outcome.merge(warn(
                TableKind::Dating,
                Category::Chronology,
                "lamination_events",
                format!(
                    "Entity {entity} has an \"Event; end of laminations\" but no \"Event; start of laminations\"."
                ),
            ));
        }
        if start && !end {
            outcome.merge(warn(
                TableKind::Dating,
                Category::Chronology,
                "lamination_events",
                format!(
                    "Entity {entity} has an \"Event; start of laminations\" but no \"Event; end of laminations\"."
                ),
            ));
        }
        if (start || end) && !has_lamina {
            outcome.merge(warn(
                TableKind::Lamina,
                Category::CrossReference,
                "lamination_events",
                format!(
                    "Entity {entity} has lamination events in the dating information but no lamina data."
                ),
            ));
        }
        if has_lamina && !start {
            outcome.merge(warn(
                TableKind::Dating,
                Category::CrossReference,
                "lamination_events",
                format!(
                    "Entity {entity} has lamina data but no \"Event; start of laminations\" in the dating information."
                ),
            ));
        }

        let checks = samples.for_entity(entity);
        if checks.is_empty() || unmodelled.contains(entity) {
            continue;
        }
        let not_applicable = |row: &Row<'_>| row.is("ann_lam_check", AnnLamCheck::NotApplicable);
        if start || end {
            if checks.rows().any(|row| not_applicable(&row)) {
                outcome.merge(warn(
                    TableKind::Sample,
                    Category::Consistency,
                    "ann_lam_check",
                    format!(
                        "Entity {entity} is laminated and ann_lam_check cannot be \"not applicable\"."
                    ),
                ));
            }
        } else if !checks.rows().any(|row| not_applicable(&row)) {
            outcome.merge(warn(
                TableKind::Sample,
                Category::Consistency,
                "ann_lam_check",
                format!(
                    "Entity {entity} has no lamination events and ann_lam_check must be \"not applicable\"."
                ),
            ));
        }
    }
    outcome.into()
}

/// End and start of laminations bracket the laminated section.
pub fn lamination_pairing(ctx: &Context<'_>) -> StageResult {
    let dating = ctx.dating();
    let events = dating.filter(|row| {
        row.term::<DateType>("date_type")
            .is_some_and(|t| t.is_lamination_event())
    });
    let outcome: Outcome = events
        .entity_names()
        .iter()
        .map(|entity| {
            let forming = has_event(&dating.for_entity(entity), DateType::ActivelyForming);
            lamination::check(
                &events.for_entity(entity),
                entity,
                ctx.depth_ref(entity),
                forming,
            )
        })
        .collect();
    outcome.into()
}

fn entity_scoped(workbook: &Workbook) -> [View<'_>; 4] {
    [
        View::new(workbook.sample()),
        View::new(workbook.dating()),
        View::new(workbook.lamina()),
        View::new(workbook.references()),
    ]
}

/// Every entity named outside the entity sheet must be declared there.
pub fn entity_names(ctx: &Context<'_>) -> StageResult {
    let declared = ctx.declared();
    let outcome: Outcome = entity_scoped(ctx.workbook())
        .iter()
        .map(|table| names::check(&declared, table))
        .collect();
    outcome.into()
}
