use speleo_model::vocab::{
    AgeModelType, AnnLamCheck, AragCorr, DepRateCheck, GapMarker, HiatusMarker, IsoStd,
    Mineralogy, ModernReference,
};
use speleo_model::{TableKind, Vocabulary};
use speleo_transform::normalize_calendar_ages;

use super::{informative, note, warn, warn_rows};
use crate::checks::event_fields::EventRule;
use crate::checks::range::Bounds;
use crate::checks::{
    MissingPolicy, chem_year, co_occurrence, duplicates, event_fields, min_max, numeric,
    numeric_then_positive, ordering, positive, possible_hiatus, presence, range, required_term,
    vocabulary,
};
use crate::context::Context;
use crate::format::join_names;
use crate::issue::Category;
use crate::pipeline::{Gate, StageResult};
use crate::report::Outcome;
use crate::view::{Row, View};

/// Youngest plausible age, in years BP (1950).
pub(crate) const MIN_AGE: f64 = -70.0;

const AGE: &str = "interp_age";
const UNCERT_POS: &str = "interp_age_uncert_pos";
const UNCERT_NEG: &str = "interp_age_uncert_neg";

const HIATUS_RULE: EventRule = EventRule {
    marker_column: "hiatus",
    marker: "H",
    label: "hiatuses",
    required: &["entity_name", "depth_sample", "hiatus"],
    optional: &[],
};

/// Dependent columns paired with the column that must accompany them.
const ISOTOPE_PAIRS: [(&str, &str); 8] = [
    ("d18O_measurement", "d18O_precision"),
    ("d13C_measurement", "d13C_precision"),
    ("d18O_precision", "d18O_measurement"),
    ("d13C_precision", "d13C_measurement"),
    (UNCERT_NEG, UNCERT_POS),
    (UNCERT_POS, UNCERT_NEG),
    ("iso_std", "d18O_measurement"),
    ("iso_std", "d13C_measurement"),
];

/// Isotope co-occurrence rules shared by plain and composite samples.
pub(crate) fn isotope_pairs(samples: &View<'_>) -> Outcome {
    let mut outcome: Outcome = ISOTOPE_PAIRS
        .iter()
        .map(|(independent, dependent)| co_occurrence::check(samples, independent, dependent))
        .collect();
    outcome.merge(warn_rows(
        TableKind::Sample,
        Category::Consistency,
        "iso_std_without_measurement",
        samples.row_numbers_where(|row| {
            row.is_present("iso_std")
                && row.is_missing("d18O_measurement")
                && row.is_missing("d13C_measurement")
        }),
        "There is at least one row with isotope standard and no d13C or d18O measurement. Ensure that only isotope measurements have iso_std info.",
    ));
    outcome
}

/// mineralogy and arag_corr must be listed terms and agree with each other.
pub(crate) fn mineralogy(samples: &View<'_>) -> Outcome {
    let mut outcome = required_term::<Mineralogy>(samples, "mineralogy");
    outcome.merge(required_term::<AragCorr>(samples, "arag_corr"));
    if !outcome.passed() {
        return outcome;
    }

    let mineral = |row: &Row<'_>| row.term::<Mineralogy>("mineralogy");
    let correction = |row: &Row<'_>| row.term::<AragCorr>("arag_corr");
    let na = AragCorr::NotApplicable.as_str();

    outcome.merge(warn_rows(
        TableKind::Sample,
        Category::Consistency,
        "arag_corr",
        samples.row_numbers_where(|row| {
            matches!(
                mineral(row),
                Some(Mineralogy::Calcite | Mineralogy::SecondaryCalcite | Mineralogy::Vaterite)
            ) && correction(row) != Some(AragCorr::NotApplicable)
        }),
        format!("if mineralogy is not \"aragonite\" or \"mixed\", arag_corr must be \"{na}\"."),
    ));
    outcome.merge(warn_rows(
        TableKind::Sample,
        Category::Consistency,
        "arag_corr",
        samples.row_numbers_where(|row| {
            matches!(mineral(row), Some(Mineralogy::Aragonite | Mineralogy::Mixed))
                && correction(row) == Some(AragCorr::NotApplicable)
        }),
        format!(
            "if mineralogy = \"aragonite\" or \"mixed\", arag_corr must be something different than \"{na}\"."
        ),
    ));
    let corrected_mixed = samples.rows().any(|row| {
        mineral(&row) == Some(Mineralogy::Mixed)
            && matches!(correction(&row), Some(AragCorr::Yes | AragCorr::Unknown))
    });
    if corrected_mixed {
        outcome.merge(informative(
            TableKind::Sample,
            Category::Consistency,
            "arag_corr",
            "There are samples with mixed mineralogy where aragonite correction has been performed. Please make sure to give as much detail as possible in the notes section with regards to this.",
        ));
    }
    outcome.merge(warn_rows(
        TableKind::Sample,
        Category::Consistency,
        "arag_corr",
        samples.row_numbers_where(|row| {
            mineral(row) == Some(Mineralogy::Unknown) && correction(row) != Some(AragCorr::Unknown)
        }),
        "if mineralogy = unknown, arag_corr cannot be anything other than \"unknown\".",
    ));
    outcome
}

/// interp_age: present, numeric, and carrying both uncertainties.
pub(crate) fn interp_age_chain(samples: &View<'_>) -> (Outcome, bool) {
    let outcome = presence::check(samples, AGE).and_then(|| numeric::check(samples, AGE));
    let numeric_ok = outcome.passed();
    let outcome = outcome
        .and_then(|| co_occurrence::check(samples, AGE, UNCERT_POS))
        .and_then(|| co_occurrence::check(samples, AGE, UNCERT_NEG));
    (outcome, numeric_ok)
}

/// Range of calendar-normalized interp_age.
pub(crate) fn age_range(samples: &View<'_>) -> Outcome {
    let calendar = normalize_calendar_ages(samples.sheet(), AGE);
    range::check(
        &samples.rebase(&calendar),
        AGE,
        Bounds::at_least(MIN_AGE),
        MissingPolicy::Flag,
    )
}

pub fn overview(ctx: &Context<'_>) -> StageResult {
    let samples = View::new(ctx.workbook().sample());
    let mut outcome = vocabulary::check::<HiatusMarker>(&samples, "hiatus", MissingPolicy::Skip);
    outcome.merge(vocabulary::check::<GapMarker>(
        &samples,
        "gap",
        MissingPolicy::Skip,
    ));

    let sampled = samples.entity_names();
    let unsampled: Vec<&String> = ctx
        .entities()
        .iter()
        .filter(|entity| sampled.binary_search(entity).is_err())
        .collect();
    if !unsampled.is_empty() {
        outcome.merge(warn(
            TableKind::Sample,
            Category::CrossReference,
            "entity_without_samples",
            format!(
                "Entity {} has no Sample data. This will only be accepted if this entity is part of a composite and its isotope data is to be submitted soon.",
                join_names(&unsampled)
            ),
        ));
    }
    outcome.into()
}

pub fn profile(ctx: &Context<'_>) -> StageResult {
    let samples = ctx.samples();
    let mut outcome = presence::check(&samples, "entity_name");

    for entity in samples.entity_names() {
        let depths: Vec<f64> = samples
            .for_entity(&entity)
            .rows()
            .filter_map(|row| row.number_in("depth_sample"))
            .collect();
        let max = depths.iter().copied().reduce(f64::max);
        let span = max.zip(depths.iter().copied().reduce(f64::min));
        if let Some((max, min)) = span
            && max - min <= 100.0
        {
            outcome.merge(informative(
                TableKind::Sample,
                Category::Range,
                "entity_length",
                format!(
                    "The total length of Entity {entity} is less than 100mm. This is either a very small speleothem or the depths are in cm."
                ),
            ));
        }
    }

    let depths = presence::check(&samples, "depth_sample");
    let depths_present = depths.passed();
    outcome.merge(depths.and_then(|| {
        numeric::check(&samples, "depth_sample").and_then(|| {
            positive::check(&samples, "depth_sample", MissingPolicy::Flag)
        })
    }));
    outcome.merge(event_fields::check(&samples, &HIATUS_RULE));

    StageResult::from(outcome).grant_if(depths_present, Gate::SampleDepthsPresent)
}

pub fn measurements(ctx: &Context<'_>) -> StageResult {
    let samples = ctx.hiatus_free_samples();
    let mut outcome = mineralogy(&samples);

    outcome.merge(numeric::check(&samples, "d18O_measurement"));
    outcome.merge(numeric::check(&samples, "d13C_measurement"));
    for column in [
        UNCERT_POS,
        UNCERT_NEG,
        "sample_thickness",
        "d18O_precision",
        "d13C_precision",
    ] {
        outcome.merge(numeric_then_positive(&samples, column));
    }
    outcome.merge(isotope_pairs(&samples));
    outcome.merge(vocabulary::check::<IsoStd>(
        &samples,
        "iso_std",
        MissingPolicy::Skip,
    ));

    if samples.rows().any(|row| row.is("gap", GapMarker::Gap)) {
        outcome.merge(warn(
            TableKind::Sample,
            Category::Consistency,
            "gap_outside_composite",
            "A gap column is filled in with non-composite entities. Check if this should be a hiatus instead.",
        ));
    }
    outcome.into()
}

/// Columns an entity without an age model should leave empty.
const AGE_MODEL_COLUMNS: [&str; 6] = [
    UNCERT_POS,
    UNCERT_NEG,
    "age_model_type",
    "modern_reference",
    "ann_lam_check",
    "dep_rate_check",
];

pub fn age_model(ctx: &Context<'_>) -> StageResult {
    let samples = ctx.samples();
    let hiatus_free = ctx.hiatus_free_samples();
    let without = ctx.entities_without_age_model();
    let mut outcome = Outcome::pass();

    for entity in &without {
        outcome.merge(duplicates::check(
            &samples.for_entity(entity),
            entity,
            "depth_sample",
        ));
        outcome.merge(warn(
            TableKind::Sample,
            Category::Presence,
            "missing_age_model",
            format!(
                "Entity {entity} is likely missing an age model. This is not allowed except for some VERY special cases. No more checks will be done for this entity. Please add a dummy age-depth model so that all other checks can be performed, and delete it once the workbook has passed all checks."
            ),
        ));
        let rows = hiatus_free.for_entity(entity);
        for column in AGE_MODEL_COLUMNS {
            if rows.all_present(column) {
                outcome.merge(note(
                    TableKind::Sample,
                    Category::Presence,
                    "missing_age_model",
                    format!(
                        "Entity {entity} is likely missing an age model (i.e. no interp_ages). If this is correct, {column} should be empty."
                    ),
                ));
            }
        }
    }

    let modelled = hiatus_free.filter(|row| {
        !row.entity().is_some_and(|name| without.iter().any(|entity| *entity == name))
    });

    let reference = required_term::<ModernReference>(&modelled, "modern_reference");
    let reference_ok = reference.passed();
    outcome.merge(reference);
    let (interp, _) = interp_age_chain(&modelled);
    let interp_ok = interp.passed();
    outcome.merge(interp);
    if reference_ok && interp_ok {
        outcome.merge(age_range(&modelled));
    }

    outcome.merge(vocabulary::check::<AgeModelType>(
        &modelled,
        "age_model_type",
        MissingPolicy::Flag,
    ));
    outcome.merge(required_term::<AnnLamCheck>(&modelled, "ann_lam_check"));
    outcome.merge(required_term::<DepRateCheck>(&modelled, "dep_rate_check"));
    outcome.merge(chem_year::check(
        &modelled,
        &ctx.dating(),
        chem_year::ChemYearScope::UsedDates,
    ));
    outcome.into()
}

pub fn sequence(ctx: &Context<'_>) -> StageResult {
    let samples = ctx.samples();
    let calendar = normalize_calendar_ages(ctx.workbook().sample(), AGE);
    let without = ctx.entities_without_age_model();
    let mut outcome = Outcome::pass();

    for entity in samples.entity_names() {
        if without.contains(&entity) {
            continue;
        }
        let rows = samples.for_entity(&entity);
        outcome.merge(min_max::check(&rows, &entity, AGE, UNCERT_POS, UNCERT_NEG));
        let depth_repeats = duplicates::check(&rows, &entity, "depth_sample");
        let age_repeats = duplicates::check(&rows, &entity, AGE);
        let unique = depth_repeats.passed() && age_repeats.passed();
        outcome.merge(depth_repeats);
        outcome.merge(age_repeats);

        let hiatus_free = rows
            .filter(|row| !row.is("hiatus", HiatusMarker::Hiatus))
            .rebase(&calendar);
        if unique
            && let Some(direction) = ctx.depth_ref(&entity).and_then(|d| d.direction())
        {
            match ordering::mean_step(&hiatus_free, "depth_sample", AGE, direction) {
                Some(step) if step <= 0.0 => outcome.merge(warn(
                    TableKind::Sample,
                    Category::Chronology,
                    "depth_ref",
                    format!(
                        "Entity {entity}. depth_ref likely wrong. The oldest speleothem sample cannot be the one at the top! Further checks cannot be completed until this is fixed."
                    ),
                )),
                _ => {
                    outcome.merge(ordering::check(
                        &hiatus_free,
                        &entity,
                        "depth_sample",
                        AGE,
                        direction,
                    ));
                    let hiatus_depths: Vec<f64> = rows
                        .rows()
                        .filter(|row| row.is("hiatus", HiatusMarker::Hiatus))
                        .filter_map(|row| row.number_in("depth_sample"))
                        .collect();
                    outcome.merge(possible_hiatus::check(
                        &hiatus_free,
                        &hiatus_depths,
                        &entity,
                        "depth_sample",
                        AGE,
                        direction,
                    ));
                }
            }
        }

        if hiatus_free.rows().any(|row| row.is_missing(UNCERT_NEG)) {
            outcome.merge(informative(
                TableKind::Sample,
                Category::Presence,
                "interp_age_uncertainty",
                format!(
                    "Entity {entity}; Excluding hiatuses, there are missing interp_age uncertainties. This is possible but please make sure that you have tried your best to obtain this information"
                ),
            ));
        }
    }
    outcome.into()
}
