//! Start/end-of-laminations pairing.
//!
//! Sorted by depth along the entity's depth reference, lamination events run
//! from the youngest `end of laminations` to the oldest `start of
//! laminations`, alternating in between.

use speleo_model::vocab::{DateType, DepthRef, ModernReference};
use speleo_model::{Direction, TableKind};
use speleo_transform::to_bp1950;

use crate::issue::{Category, Issue};
use crate::report::Outcome;
use crate::view::{Row, View};

const RULE: &str = "lamination_pairing";

fn warn(message: String) -> Outcome {
    Outcome::warning(
        TableKind::Dating,
        Issue::rule(Category::Chronology, RULE, message),
    )
}

/// Canonical corr_age of a dating row, if it can be computed.
pub(crate) fn canonical_age(row: &Row<'_>) -> Option<f64> {
    let age = row.number_in("corr_age")?;
    let reference = row.term::<ModernReference>("modern_reference")?;
    to_bp1950(age, reference, row.value("chem_year").as_finite())
}

/// Checks the lamination events of one entity.
///
/// `events` holds the entity's start and end of laminations rows;
/// `actively_forming` tells whether the entity also has an actively forming
/// event.
pub fn check(
    events: &View<'_>,
    entity: &str,
    depth_ref: Option<DepthRef>,
    actively_forming: bool,
) -> Outcome {
    let Some((depth_ref, direction)) =
        depth_ref.and_then(|depth_ref| depth_ref.direction().map(|d| (depth_ref, d)))
    else {
        return warn(format!(
            "The depth_ref chosen for entity {entity} is not \"from top\" or \"from base\". Cannot perform further checks"
        ));
    };

    let sorted = events.sorted_by("depth_dating", direction);
    let (Some((first_depth, first)), Some((_, last))) = (sorted.first(), sorted.last()) else {
        return Outcome::pass();
    };

    let mut outcome = Outcome::pass();
    let shallow_ok = first.is("date_type", DateType::EndOfLaminations);
    if !shallow_ok {
        outcome.merge(warn(format!(
            "The youngest date related to laminae for entity {entity} is not linked to an \"Event; end of laminations\". This may be missing"
        )));
    } else if !actively_forming
        && (direction == Direction::Descending || *first_depth == 0.0)
        && canonical_age(first).is_some_and(|age| age <= 0.0)
    {
        outcome.merge(Outcome::informative(
            TableKind::Dating,
            Issue::rule(
                Category::Chronology,
                RULE,
                "The youngest \"Event; end of laminations\" appears like it could also be an \"Event; actively forming\". Please add this extra date_type if this is the case.",
            ),
        ));
    }

    let deep_ok = last.is("date_type", DateType::StartOfLaminations);
    if !deep_ok {
        outcome.merge(warn(format!(
            "The oldest date related to laminae for entity {entity} is not linked to an \"Event; start of laminations\". This may be missing"
        )));
    }
    if !(shallow_ok && deep_ok) {
        return outcome;
    }

    let misplaced = match depth_ref {
        DepthRef::FromTop => DateType::StartOfLaminations,
        _ => DateType::EndOfLaminations,
    };
    if sorted
        .iter()
        .any(|(depth, row)| *depth == 0.0 && row.is("date_type", misplaced))
    {
        outcome.merge(warn(format!(
            "depth_ref = \"{depth_ref}\" for Entity {entity} and therefore date_type = \"{misplaced}\" cannot exist at depth_dating = 0"
        )));
        return outcome;
    }

    let consecutive = sorted.len() > 2
        && sorted.windows(2).any(|pair| {
            pair[0].1.term::<DateType>("date_type") == pair[1].1.term::<DateType>("date_type")
        });
    if consecutive {
        outcome.merge(warn(format!(
            "There are two consecutive \"Event; end of laminations\" or \"Event; start of laminations\" when the dating information of entity {entity} is sorted by depth. The two events should alternate between each other."
        )));
    }
    outcome
}
