use std::collections::HashMap;

use speleo_model::vocab::{
    CalibUsed, DateType, DecayConstant, DepthRef, MaterialDated, ModernReference, YesNoUnknown,
};
use speleo_model::{TableKind, Vocabulary};
use speleo_transform::normalize_calendar_ages;

use super::sample::MIN_AGE;
use super::{per_entity, warn, warn_rows};
use crate::checks::event_fields::EventRule;
use crate::checks::lamination::canonical_age;
use crate::checks::range::Bounds;
use crate::checks::{
    MissingPolicy, chem_year, co_occurrence, event_fields, min_max, numeric,
    numeric_then_positive, positive, presence, range, vocabulary,
};
use crate::context::Context;
use crate::format::{join_names, number, value_key};
use crate::issue::Category;
use crate::pipeline::{Gate, StageResult};
use crate::report::Outcome;
use crate::view::{Row, View};

/// Numeric, non-negative measurement columns.
const MEASUREMENTS: [&str; 23] = [
    "dating_thickness",
    "min_weight",
    "max_weight",
    "14C_correction",
    "uncorr_age_uncert_pos",
    "uncorr_age_uncert_neg",
    "238U_content",
    "238U_uncertainty",
    "232Th_content",
    "232Th_uncertainty",
    "230Th_content",
    "230Th_uncertainty",
    "230Th_232Th_ratio",
    "230Th_232Th_ratio_uncertainty",
    "230Th_238U_activity",
    "230Th_238U_activity_uncertainty",
    "234U_238U_activity",
    "234U_238U_activity_uncertainty",
    "ini_230Th_232Th_ratio",
    "ini_230Th_232Th_ratio_uncertainty",
    "corr_age_uncert_pos",
    "corr_age_uncert_neg",
    "chem_year",
];

/// (independent, dependent) pairs.
const PAIRS: [(&str, &str); 13] = [
    ("uncorr_age", "uncorr_age_uncert_pos"),
    ("uncorr_age", "uncorr_age_uncert_neg"),
    ("234U_238U_activity", "234U_238U_activity_uncertainty"),
    ("ini_230Th_232Th_ratio", "ini_230Th_232Th_ratio_uncertainty"),
    ("238U_content", "238U_uncertainty"),
    ("232Th_content", "232Th_uncertainty"),
    ("230Th_content", "230Th_uncertainty"),
    ("230Th_232Th_ratio", "230Th_232Th_ratio_uncertainty"),
    ("230Th_238U_activity", "230Th_238U_activity_uncertainty"),
    ("corr_age", "corr_age_uncert_pos"),
    ("corr_age", "corr_age_uncert_neg"),
    ("corr_age_uncert_pos", "corr_age_uncert_neg"),
    ("corr_age_uncert_neg", "corr_age_uncert_pos"),
];

const KEY_COLUMNS: &[&str] = &["entity_name", "depth_dating", "date_used", "date_type"];
const EVENT_COLUMNS: &[&str] = &[
    "entity_name",
    "depth_dating",
    "date_used",
    "date_type",
    "corr_age",
    "corr_age_uncert_pos",
    "corr_age_uncert_neg",
    "modern_reference",
];

fn rule(
    event: DateType,
    required: &'static [&'static str],
    optional: &'static [&'static str],
) -> EventRule {
    EventRule {
        marker_column: "date_type",
        marker: event.as_str(),
        label: event.as_str(),
        required,
        optional,
    }
}

fn event_rules() -> [EventRule; 5] {
    [
        rule(DateType::Hiatus, KEY_COLUMNS, &[]),
        rule(DateType::ActivelyForming, EVENT_COLUMNS, &["chem_year"]),
        rule(DateType::StartOfLaminations, EVENT_COLUMNS, &["chem_year"]),
        rule(DateType::EndOfLaminations, EVENT_COLUMNS, &["chem_year"]),
        rule(
            DateType::Other,
            &[
                "entity_name",
                "depth_dating",
                "date_used",
                "date_type",
                "corr_age",
                "modern_reference",
            ],
            &[
                "dating_thickness",
                "material_dated",
                "min_weight",
                "max_weight",
                "corr_age_uncert_neg",
                "corr_age_uncert_pos",
                "lab_num",
            ],
        ),
    ]
}

fn date_type(row: &Row<'_>) -> Option<DateType> {
    row.term::<DateType>("date_type")
}

pub fn keys(ctx: &Context<'_>) -> StageResult {
    let dating = ctx.dating();
    let mut outcome = Outcome::pass();

    let types = presence::check(&dating, "date_type");
    let types_ok = types.passed();
    outcome.merge(types.and_then(|| {
        vocabulary::check::<DateType>(&dating, "date_type", MissingPolicy::Flag)
    }));

    let used = presence::check(&dating, "date_used");
    let used_ok = used.passed();
    outcome.merge(used.and_then(|| {
        vocabulary::check::<YesNoUnknown>(&dating, "date_used", MissingPolicy::Flag)
    }));

    let depths = presence::check(&dating, "depth_dating");
    let depths_ok = depths.passed();
    outcome.merge(depths.and_then(|| {
        numeric::check(&dating, "depth_dating")
            .and_then(|| positive::check(&dating, "depth_dating", MissingPolicy::Flag))
    }));

    let entities = presence::check(&dating, "entity_name");
    let entities_ok = entities.passed();
    outcome.merge(entities);

    StageResult::from(outcome)
        .grant_if(types_ok, Gate::DatingTypesPresent)
        .grant_if(used_ok, Gate::DatingUseFlagsPresent)
        .grant_if(depths_ok, Gate::DatingDepthsPresent)
        .grant_if(entities_ok, Gate::DatingEntitiesPresent)
}

pub fn events(ctx: &Context<'_>) -> StageResult {
    let dating = ctx.dating();
    let outcome: Outcome = event_rules()
        .iter()
        .map(|rule| event_fields::check(&dating, rule))
        .collect();
    outcome.into()
}

pub fn values(ctx: &Context<'_>) -> StageResult {
    let dating = ctx.dating();
    let mut outcome = Outcome::pass();

    outcome.merge(
        co_occurrence::check(&dating, "min_weight", "max_weight")
            .and_then(|| co_occurrence::check(&dating, "max_weight", "min_weight"))
            .and_then(|| {
                warn_rows(
                    TableKind::Dating,
                    Category::Range,
                    "weights",
                    dating.row_numbers_where(|row| {
                        matches!(
                            (row.number_in("min_weight"), row.number_in("max_weight")),
                            (Some(min), Some(max)) if min > max
                        )
                    }),
                    "min_weight is greater than max_weight.",
                )
            }),
    );

    outcome.merge(numeric::check(&dating, "uncorr_age"));
    outcome.merge(numeric::check(&dating, "corr_age"));
    for column in MEASUREMENTS {
        outcome.merge(numeric_then_positive(&dating, column));
    }
    for (independent, dependent) in PAIRS {
        outcome.merge(co_occurrence::check(&dating, independent, dependent));
    }

    outcome.merge(
        co_occurrence::check(&dating, "modern_reference", "corr_age").and_then(|| {
            vocabulary::check::<ModernReference>(&dating, "modern_reference", MissingPolicy::Skip)
        }),
    );
    outcome.merge(chem_year::check(
        &dating,
        &dating,
        chem_year::ChemYearScope::SameTable,
    ));
    outcome.merge(vocabulary::check::<CalibUsed>(
        &dating,
        "calib_used",
        MissingPolicy::Skip,
    ));

    outcome.merge(per_entity(&dating, |entity, rows| {
        let mut outcome = min_max::check(
            rows,
            entity,
            "corr_age",
            "corr_age_uncert_pos",
            "corr_age_uncert_neg",
        );
        outcome.merge(min_max::check(
            rows,
            entity,
            "uncorr_age",
            "uncorr_age_uncert_pos",
            "uncorr_age_uncert_neg",
        ));
        outcome
    }));

    let calendar = normalize_calendar_ages(dating.sheet(), "corr_age");
    let dated = dating
        .filter(|row| {
            date_type(row) != Some(DateType::Hiatus)
                && (row.is("date_used", YesNoUnknown::Yes)
                    || row.is("date_used", YesNoUnknown::Unknown))
        })
        .rebase(&calendar);
    outcome.merge(range::check(
        &dated,
        "corr_age",
        Bounds::at_least(MIN_AGE),
        MissingPolicy::Flag,
    ));

    let measured = dating.filter(|row| !date_type(row).is_some_and(|t| t.is_event()));
    if !measured.is_empty() {
        outcome.merge(vocabulary::check::<MaterialDated>(
            &measured,
            "material_dated",
            MissingPolicy::Flag,
        ));
    }

    outcome.merge(used_dates(&dating));
    outcome.merge(method_columns(&dating));
    outcome.into()
}

/// Dates used in the age model need a full corrected age.
fn used_dates(dating: &View<'_>) -> Outcome {
    let used = dating.filter(|row| {
        !row.is("date_used", YesNoUnknown::No)
            && !matches!(date_type(row), Some(DateType::Hiatus | DateType::Gap))
    });
    let mut outcome: Outcome = [
        "corr_age",
        "corr_age_uncert_pos",
        "corr_age_uncert_neg",
        "modern_reference",
    ]
    .into_iter()
    .map(|column| {
        warn_rows(
            TableKind::Dating,
            Category::Presence,
            "used_date",
            used.row_numbers_where(|row| row.is_missing(column)),
            format!("{column} is not filled in when date_used = \"yes\" or \"unknown\"."),
        )
    })
    .collect();

    for entity in dating.entity_names() {
        if used.for_entity(&entity).is_empty() {
            outcome.merge(warn(
                TableKind::Dating,
                Category::Presence,
                "used_date",
                format!(
                    "Entity {entity} has no dating info other than hiatuses and/or not used dates. This is not allowed except for very special cases where the entity is missing an age model."
                ),
            ));
        }
    }
    outcome
}

/// Calibration columns belong to C14 dates, decay constants to U/Th dates.
fn method_columns(dating: &View<'_>) -> Outcome {
    let mut outcome = Outcome::pass();

    let c14 = dating.filter(|row| date_type(row) == Some(DateType::C14));
    if !c14.is_empty() {
        outcome.merge(vocabulary::check::<CalibUsed>(
            &c14,
            "calib_used",
            MissingPolicy::Flag,
        ));
    }
    let not_c14 = dating.filter(|row| date_type(row) != Some(DateType::C14));
    for column in ["calib_used", "14C_correction"] {
        outcome.merge(warn_rows(
            TableKind::Dating,
            Category::Consistency,
            "c14_columns",
            not_c14.row_numbers_where(|row| row.is_present(column)),
            format!("{column} must be empty when date_type is not C14."),
        ));
    }

    let uth = dating.filter(|row| date_type(row).is_some_and(|t| t.is_uranium_thorium()));
    if !uth.is_empty() {
        let unset = uth.row_numbers_where(|row| row.is_missing("decay_constant"));
        if unset.is_empty() {
            outcome.merge(vocabulary::check::<DecayConstant>(
                &uth,
                "decay_constant",
                MissingPolicy::Flag,
            ));
        } else {
            outcome.merge(warn_rows(
                TableKind::Dating,
                Category::Presence,
                "decay_constant",
                unset,
                "decay_constant must be filled in when date_type is of U/Th type.",
            ));
        }
    }
    outcome.merge(warn_rows(
        TableKind::Dating,
        Category::Consistency,
        "decay_constant",
        dating.row_numbers_where(|row| {
            !date_type(row).is_some_and(|t| t.is_uranium_thorium())
                && row.is_present("decay_constant")
        }),
        "decay_constant must be empty when date_type is not of U/Th type.",
    ));
    outcome
}

pub fn hiatus_depths(ctx: &Context<'_>) -> StageResult {
    let dating = ctx.dating();
    let outcome = per_entity(&dating, |entity, rows| {
        let is_hiatus = |row: &Row<'_>| date_type(row) == Some(DateType::Hiatus);

        let mut counts: HashMap<String, (f64, usize)> = HashMap::new();
        for depth in rows
            .rows()
            .filter(is_hiatus)
            .filter_map(|row| row.number_in("depth_dating"))
        {
            counts.entry(value_key(depth)).or_insert((depth, 0)).1 += 1;
        }
        if counts.is_empty() {
            return Outcome::pass();
        }

        let mut repeated: Vec<f64> = counts
            .values()
            .filter(|(_, count)| *count > 1)
            .map(|(depth, _)| *depth)
            .collect();
        if !repeated.is_empty() {
            repeated.sort_by(f64::total_cmp);
            let depths: Vec<String> = repeated.into_iter().map(number).collect();
            return warn(
                TableKind::Dating,
                Category::Consistency,
                "hiatus_depth",
                format!(
                    "Entity {entity}; There are multiple hiatuses recorded at depth_dating: {}",
                    join_names(&depths)
                ),
            );
        }

        let mut shared: Vec<f64> = rows
            .rows()
            .filter(|row| !is_hiatus(row))
            .filter_map(|row| row.number_in("depth_dating"))
            .filter(|depth| counts.contains_key(&value_key(*depth)))
            .collect();
        shared.sort_by(f64::total_cmp);
        shared.dedup_by(|a, b| value_key(*a) == value_key(*b));
        if shared.is_empty() {
            Outcome::pass()
        } else {
            let depths: Vec<String> = shared.into_iter().map(number).collect();
            warn(
                TableKind::Dating,
                Category::Consistency,
                "hiatus_depth",
                format!(
                    "Entity {entity}; A hiatus cannot be at the same depth as a date. See depth_dating: {}",
                    join_names(&depths)
                ),
            )
        }
    });
    let consistent = outcome.passed();
    StageResult::from(outcome).grant_if(consistent, Gate::DatingHiatusesConsistent)
}

pub fn actively_forming(ctx: &Context<'_>) -> StageResult {
    let dating = ctx.dating();
    let outcome = per_entity(&dating, |entity, rows| {
        let forming = rows.filter(|row| date_type(row) == Some(DateType::ActivelyForming));
        let mut events = forming.rows();
        let (Some(event), None) = (events.next(), events.next()) else {
            return if forming.len() > 1 {
                warn(
                    TableKind::Dating,
                    Category::Chronology,
                    "actively_forming",
                    format!("Entity {entity}; There are more than one actively growing event."),
                )
            } else {
                Outcome::pass()
            };
        };

        let mut outcome = Outcome::pass();
        if ctx.depth_ref(entity) == Some(DepthRef::FromTop)
            && event.number_in("depth_dating") != Some(0.0)
        {
            outcome.merge(warn(
                TableKind::Dating,
                Category::Chronology,
                "actively_forming",
                format!(
                    "Entity {entity}; Actively growing event is not at depth_dating = 0 when depth_ref is from top."
                ),
            ));
        }
        if canonical_age(&event).is_some_and(|age| age > 0.0) {
            outcome.merge(warn(
                TableKind::Dating,
                Category::Chronology,
                "actively_forming",
                format!(
                    "Entity {entity}; Actively growing event is not in the modern era (younger than 1950) and this is very unlikely. Please check."
                ),
            ));
        }
        outcome
    });
    outcome.into()
}
