//! Repeated values within one entity.

use std::collections::HashMap;

use crate::format::{number, value_key};
use crate::issue::{Issue, Repetition};
use crate::report::Outcome;
use crate::view::View;

/// Flags numeric values of `column` that occur more than once.
///
/// Values are compared at five decimal places. Repetitions are listed
/// in ascending value order.
pub fn check(view: &View<'_>, entity: &str, column: &str) -> Outcome {
    let mut groups: Vec<(f64, Vec<usize>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for row in view.rows() {
        let Some(value) = row.number_in(column) else {
            continue;
        };
        let slot = *slots.entry(value_key(value)).or_insert_with(|| {
            groups.push((value, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row.number());
    }

    let mut repeated: Vec<(f64, Vec<usize>)> =
        groups.into_iter().filter(|(_, rows)| rows.len() > 1).collect();
    if repeated.is_empty() {
        return Outcome::pass();
    }
    repeated.sort_by(|a, b| a.0.total_cmp(&b.0));
    Outcome::warning(
        view.table(),
        Issue::Repeated {
            entity: entity.to_string(),
            column: column.to_string(),
            repetitions: repeated
                .into_iter()
                .map(|(value, rows)| Repetition {
                    value: number(value),
                    rows,
                })
                .collect(),
        },
    )
}
