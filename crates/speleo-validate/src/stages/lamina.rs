//! Laminae counts and their link to the lamination events in dating.

use speleo_model::TableKind;
use speleo_model::vocab::{DateType, ModernReference};
use speleo_transform::normalize_calendar_ages;

use super::sample::MIN_AGE;
use super::{per_entity, warn};
use crate::checks::range::Bounds;
use crate::checks::{
    MissingPolicy, chem_year, co_occurrence, min_max, positive, presence, range, required_term,
};
use crate::context::Context;
use crate::issue::Category;
use crate::pipeline::StageResult;
use crate::report::Outcome;

const AGE: &str = "lam_age";
const UNCERT_POS: &str = "lam_age_uncert_pos";
const UNCERT_NEG: &str = "lam_age_uncert_neg";

pub fn run(ctx: &Context<'_>) -> StageResult {
    let lamina = ctx.lamina();
    if lamina.is_empty() {
        return Outcome::pass().into();
    }
    let mut outcome = Outcome::pass();

    outcome.merge(presence::check(&lamina, "entity_name"));
    outcome.merge(presence::check(&lamina, "depth_lam"));
    let ages = presence::check(&lamina, AGE);
    let ages_ok = ages.passed();
    outcome.merge(ages);

    let reference = required_term::<ModernReference>(&lamina, "modern_reference");
    let reference_ok = reference.passed();
    outcome.merge(reference);
    if reference_ok {
        outcome.merge(chem_year::check(
            &lamina,
            &ctx.dating(),
            chem_year::ChemYearScope::UsedDates,
        ));
    }

    for (independent, dependent) in [
        (UNCERT_POS, UNCERT_NEG),
        (UNCERT_NEG, UNCERT_POS),
        (AGE, UNCERT_POS),
        (AGE, UNCERT_NEG),
    ] {
        outcome.merge(co_occurrence::check(&lamina, independent, dependent));
    }
    outcome.merge(positive::check(&lamina, UNCERT_POS, MissingPolicy::Skip));
    outcome.merge(positive::check(&lamina, UNCERT_NEG, MissingPolicy::Skip));

    outcome.merge(per_entity(&lamina, |entity, rows| {
        min_max::check(rows, entity, AGE, UNCERT_POS, UNCERT_NEG)
    }));

    if ages_ok && reference_ok {
        let calendar = normalize_calendar_ages(lamina.sheet(), AGE);
        outcome.merge(range::check(
            &lamina.rebase(&calendar),
            AGE,
            Bounds::at_least(MIN_AGE),
            MissingPolicy::Flag,
        ));
    }
    outcome.into()
}

/// Laminae counts and start of laminations events come together.
pub fn links(ctx: &Context<'_>) -> StageResult {
    let lamina = ctx.lamina();
    let dating = ctx.dating();
    let starts = dating.filter(|row| row.is("date_type", DateType::StartOfLaminations));
    let mut outcome = Outcome::pass();

    for entity in lamina.entity_names() {
        if starts.for_entity(&entity).is_empty() {
            outcome.merge(warn(
                TableKind::Lamina,
                Category::CrossReference,
                "lamina_events",
                format!(
                    "Entity {entity} has lamina information but there is no \"Event; start of laminations\" in the dating information."
                ),
            ));
        }
    }
    for entity in starts.entity_names() {
        if lamina.for_entity(&entity).is_empty() {
            outcome.merge(warn(
                TableKind::Dating,
                Category::CrossReference,
                "lamina_events",
                format!(
                    "Entity {entity} has an \"Event; start of laminations\" but no lamina information."
                ),
            ));
        }
    }
    outcome.into()
}
