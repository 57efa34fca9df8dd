//! Hiatus depths shared by the sample and dating sheets.

use std::collections::BTreeSet;

use speleo_model::TableKind;
use speleo_model::vocab::{DateType, HiatusMarker};

use crate::format::{number, value_key};
use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

fn sample_hiatus_depths(samples: &View<'_>, entity: &str) -> Vec<f64> {
    samples
        .for_entity(entity)
        .rows()
        .filter(|row| row.is("hiatus", HiatusMarker::Hiatus))
        .filter_map(|row| row.number_in("depth_sample"))
        .collect()
}

fn dating_hiatus_depths(dating: &View<'_>, entity: &str) -> Vec<f64> {
    dating
        .for_entity(entity)
        .rows()
        .filter(|row| row.is("date_type", DateType::Hiatus))
        .filter_map(|row| row.number_in("depth_dating"))
        .collect()
}

/// Depths of `depths` (display form, first-appearance order) whose key is
/// not in `known`.
fn unmatched(depths: &[f64], known: &[f64]) -> Vec<String> {
    let known: BTreeSet<String> = known.iter().copied().map(value_key).collect();
    let mut seen = BTreeSet::new();
    depths
        .iter()
        .copied()
        .filter(|&depth| !known.contains(&value_key(depth)))
        .filter(|&depth| seen.insert(value_key(depth)))
        .map(number)
        .collect()
}

/// Every sample hiatus depth must be an `Event; hiatus` depth in dating.
pub fn sample_in_dating(samples: &View<'_>, dating: &View<'_>) -> Outcome {
    let entities = samples
        .filter(|row| row.is("hiatus", HiatusMarker::Hiatus))
        .entity_names();
    entities
        .iter()
        .map(|entity| {
            let depths = unmatched(
                &sample_hiatus_depths(samples, entity),
                &dating_hiatus_depths(dating, entity),
            );
            if depths.is_empty() {
                Outcome::pass()
            } else {
                Outcome::warning(
                    TableKind::Sample,
                    Issue::HiatusMismatch {
                        entity: entity.clone(),
                        depths,
                        missing_from: TableKind::Dating,
                    },
                )
            }
        })
        .collect()
}

/// Every dating hiatus within the entity's sampled depth range must be a
/// sample hiatus depth.
pub fn dating_in_sample(dating: &View<'_>, samples: &View<'_>) -> Outcome {
    let entities = dating
        .filter(|row| row.is("date_type", DateType::Hiatus))
        .entity_names();
    entities
        .iter()
        .map(|entity| {
            let sampled: Vec<f64> = samples
                .for_entity(entity)
                .rows()
                .filter_map(|row| row.number_in("depth_sample"))
                .collect();
            let (Some(min), Some(max)) = (
                sampled.iter().copied().reduce(f64::min),
                sampled.iter().copied().reduce(f64::max),
            ) else {
                return Outcome::pass();
            };
            let in_range: Vec<f64> = dating_hiatus_depths(dating, entity)
                .into_iter()
                .filter(|&depth| min <= depth && depth <= max)
                .collect();
            let depths = unmatched(&in_range, &sample_hiatus_depths(samples, entity));
            if depths.is_empty() {
                Outcome::pass()
            } else {
                Outcome::warning(
                    TableKind::Dating,
                    Issue::HiatusMismatch {
                        entity: entity.clone(),
                        depths,
                        missing_from: TableKind::Sample,
                    },
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_hiatuses_match_to_five_decimals() {
        assert!(unmatched(&[12.000001], &[12.0]).is_empty());
        assert_eq!(unmatched(&[1500.0001], &[1500.0002]).len(), 1);
        assert_eq!(unmatched(&[1500.5, 1500.5], &[]).len(), 1);
    }
}
