//! Unrecorded hiatus detection.

use speleo_model::Direction;

use super::ordering;
use crate::format::number;
use crate::issue::{Category, Issue};
use crate::report::Outcome;
use crate::view::View;

/// Age steps at least this many times the mean step are suspicious.
const STEP_FACTOR: f64 = 5.0;

/// Looks for unusually large age steps not explained by a recorded hiatus.
///
/// `samples` are the entity's non-hiatus rows and `hiatus_depths` the depths
/// of its recorded hiatuses. A sample without depth is a warning; the gap
/// report itself is informative only.
pub fn check(
    samples: &View<'_>,
    hiatus_depths: &[f64],
    entity: &str,
    depth: &str,
    age: &str,
    direction: Direction,
) -> Outcome {
    if !samples.all_present(depth) {
        return Outcome::warning(
            samples.table(),
            Issue::rule(
                Category::Presence,
                "hiatus_check_depths",
                format!(
                    "Entity {entity} has samples (not identified as hiatuses) that are missing depths. Checks for possible hiatuses cannot be performed"
                ),
            ),
        );
    }
    let Some(mean) = ordering::mean_step(samples, depth, age, direction) else {
        return Outcome::pass();
    };

    let profile: Vec<(f64, f64)> = samples
        .sorted_by(depth, direction)
        .into_iter()
        .filter_map(|(d, row)| row.number_in(age).map(|a| (d, a)))
        .collect();
    let pairs: Vec<(String, String)> = profile
        .windows(2)
        .filter(|pair| pair[1].1 - pair[0].1 >= mean * STEP_FACTOR)
        .filter(|pair| {
            let (low, high) = if pair[0].0 < pair[1].0 {
                (pair[0].0, pair[1].0)
            } else {
                (pair[1].0, pair[0].0)
            };
            !hiatus_depths.iter().any(|&h| low < h && h < high)
        })
        .map(|pair| (number(pair[0].0), number(pair[1].0)))
        .collect();

    if pairs.is_empty() {
        Outcome::pass()
    } else {
        Outcome::informative(
            samples.table(),
            Issue::PossibleHiatus {
                entity: entity.to_string(),
                depth: depth.to_string(),
                pairs,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use speleo_model::{Sheet, TableKind, Value};

    use super::*;
    use crate::issue::Severity;

    fn samples(rows: &[(f64, f64)]) -> Sheet {
        let mut sheet = Sheet::new(
            TableKind::Sample,
            vec!["depth_sample".to_string(), "interp_age".to_string()],
        );
        for (depth, age) in rows {
            sheet.push_next(vec![Value::from(*depth), Value::from(*age)]);
        }
        sheet
    }

    #[test]
    fn large_step_is_informative() {
        let mut rows: Vec<(f64, f64)> = (0..10)
            .map(|i| (f64::from(i), f64::from(i) * 10.0))
            .collect();
        rows.push((10.0, 5000.0));
        let sheet = samples(&rows);
        let outcome = check(
            &View::new(&sheet),
            &[],
            "A",
            "depth_sample",
            "interp_age",
            Direction::Ascending,
        );
        assert!(outcome.passed());
        assert_eq!(outcome.diagnostics().len(), 1);
        assert_eq!(outcome.diagnostics()[0].severity, Severity::Informative);
    }

    #[test]
    fn recorded_hiatus_explains_step() {
        let mut rows: Vec<(f64, f64)> = (0..10)
            .map(|i| (f64::from(i), f64::from(i) * 10.0))
            .collect();
        rows.push((10.0, 5000.0));
        let sheet = samples(&rows);
        let outcome = check(
            &View::new(&sheet),
            &[9.5],
            "A",
            "depth_sample",
            "interp_age",
            Direction::Ascending,
        );
        assert!(outcome.diagnostics().is_empty());
    }
}
