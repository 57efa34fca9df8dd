//! Age/depth ordering validation.

use speleo_model::Direction;

use crate::format::number;
use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Ages along depth for rows carrying both numbers.
fn profile(view: &View<'_>, depth: &str, age: &str, direction: Direction) -> Vec<(f64, f64)> {
    view.sorted_by(depth, direction)
        .into_iter()
        .filter_map(|(d, row)| row.number_in(age).map(|a| (d, a)))
        .collect()
}

/// Mean age step along depth, `None` with fewer than two dated rows.
pub fn mean_step(view: &View<'_>, depth: &str, age: &str, direction: Direction) -> Option<f64> {
    let profile = profile(view, depth, age, direction);
    if profile.len() < 2 {
        return None;
    }
    let total: f64 = profile.windows(2).map(|pair| pair[1].1 - pair[0].1).sum();
    Some(total / (profile.len() - 1) as f64)
}

/// Ages must increase with depth.
///
/// When every step is non-increasing the depth reference is reported as
/// likely wrong; otherwise each inverted depth pair is listed.
pub fn check(
    view: &View<'_>,
    entity: &str,
    depth: &str,
    age: &str,
    direction: Direction,
) -> Outcome {
    let profile = profile(view, depth, age, direction);
    let inverted: Vec<(String, String)> = profile
        .windows(2)
        .filter(|pair| pair[1].1 - pair[0].1 <= 0.0)
        .map(|pair| (number(pair[0].0), number(pair[1].0)))
        .collect();

    if inverted.is_empty() {
        Outcome::pass()
    } else if profile.len() >= 2 && inverted.len() + 1 == profile.len() {
        Outcome::warning(
            view.table(),
            Issue::DepthRefInverted {
                entity: entity.to_string(),
            },
        )
    } else {
        Outcome::warning(
            view.table(),
            Issue::AgeInversions {
                entity: entity.to_string(),
                depth: depth.to_string(),
                pairs: inverted,
            },
        )
    }
}
