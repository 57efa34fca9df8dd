//! Composite records: sample rows stitched from other entities, with no
//! dating or lamina data of their own.

use speleo_model::vocab::{
    AgeModelType, AnnLamCheck, DepRateCheck, DripType, GapMarker, IsoStd, ModernReference,
};
use speleo_model::TableKind;

use super::sample::{age_range, interp_age_chain, isotope_pairs, mineralogy};
use super::{informative, warn};
use crate::checks::event_fields::EventRule;
use crate::checks::{
    MissingPolicy, chem_year, event_fields, min_max, numeric, positive, required_term,
    vocabulary,
};
use crate::context::Context;
use crate::format::join_names;
use crate::issue::Category;
use crate::pipeline::StageResult;
use crate::report::Outcome;
use crate::view::View;

const GAP_RULE: EventRule = EventRule {
    marker_column: "gap",
    marker: "G",
    label: "gaps",
    required: &["entity_name", "gap"],
    optional: &[],
};

pub fn run(ctx: &Context<'_>) -> StageResult {
    let mut outcome = Outcome::pass();
    if !ctx.composites().is_empty() {
        outcome.merge(informative(
            TableKind::Entity,
            Category::Consistency,
            "composite",
            "There is a composite in this workbook. Please list the entity_names/references (or entity_id if already in SISAL) of the records used to construct this composite in the Notes tab.",
        ));
    }

    let entity = ctx.entity();
    let dating = ctx.dating();
    let mut undated = Vec::new();
    for row in entity.rows() {
        let Some(name) = row.entity() else {
            continue;
        };
        let drip_na = row.is("drip_type", DripType::NotApplicable);
        if ctx.is_composite(&name) {
            if !drip_na {
                outcome.merge(warn(
                    TableKind::Entity,
                    Category::Consistency,
                    "drip_type",
                    format!("Entity {name} is a composite. Drip type must be \"not applicable\"."),
                ));
            }
            outcome.merge(composite(ctx, &name));
        } else {
            if drip_na {
                outcome.merge(warn(
                    TableKind::Entity,
                    Category::Consistency,
                    "drip_type",
                    format!(
                        "Entity {name} is not a composite and drip type cannot be \"not applicable\"."
                    ),
                ));
            }
            if dating.for_entity(&name).is_empty() {
                undated.push(name.into_owned());
            }
        }
    }

    if !undated.is_empty() {
        outcome.merge(warn(
            TableKind::Sample,
            Category::CrossReference,
            "entity_without_dating",
            format!(
                "Entity {} is not a composite and has no Dating information data. This will only be accepted in very special cases.",
                join_names(&undated)
            ),
        ));
    }
    outcome.into()
}

fn composite(ctx: &Context<'_>, name: &str) -> Outcome {
    let samples = ctx.composite_samples().for_entity(name);
    let mut outcome = event_fields::check(&samples, &GAP_RULE);
    let samples = samples.filter(|row| !row.is("gap", GapMarker::Gap));

    let reference = required_term::<ModernReference>(&samples, "modern_reference");
    let reference_ok = reference.passed();
    outcome.merge(reference);

    let (interp, numeric_ok) = interp_age_chain(&samples);
    outcome.merge(interp.and_then(|| {
        positive::check(&samples, "interp_age_uncert_pos", MissingPolicy::Skip)
            .and_then(|| positive::check(&samples, "interp_age_uncert_neg", MissingPolicy::Skip))
            .and_then(|| {
                min_max::check(
                    &samples,
                    name,
                    "interp_age",
                    "interp_age_uncert_pos",
                    "interp_age_uncert_neg",
                )
            })
    }));
    if numeric_ok && reference_ok {
        outcome.merge(age_range(&samples));
        outcome.merge(chem_year::check(
            &samples,
            &ctx.composite_dating().for_entity(name),
            chem_year::ChemYearScope::UsedDates,
        ));
    }

    for column in [
        "d18O_measurement",
        "d18O_precision",
        "d13C_measurement",
        "d13C_precision",
    ] {
        outcome.merge(numeric::check(&samples, column));
    }
    outcome.merge(isotope_pairs(&samples));
    outcome.merge(mineralogy(&samples));
    outcome.merge(vocabulary::check::<AgeModelType>(
        &samples,
        "age_model_type",
        MissingPolicy::Flag,
    ));
    outcome.merge(required_term::<AnnLamCheck>(&samples, "ann_lam_check"));
    outcome.merge(required_term::<DepRateCheck>(&samples, "dep_rate_check"));
    outcome.merge(vocabulary::check::<IsoStd>(
        &samples,
        "iso_std",
        MissingPolicy::Skip,
    ));

    outcome.merge(leftovers(&ctx.composite_dating().for_entity(name), name));
    outcome.merge(leftovers(&ctx.composite_lamina().for_entity(name), name));
    outcome
}

/// Composites carry no dating or lamina rows.
fn leftovers(rows: &View<'_>, name: &str) -> Outcome {
    if rows.is_empty() {
        Outcome::pass()
    } else {
        warn(
            rows.table(),
            Category::Consistency,
            "composite_leftovers",
            format!(
                "Something has been entered in the {} spreadsheet for the composite entity {name}. This should be left empty for composites.",
                rows.table()
            ),
        )
    }
}
