//! Stage bodies, grouped by the sheet they mostly concern.

pub mod closing;
pub mod composite;
pub mod cross_table;
pub mod dating;
pub mod entity;
pub mod lamina;
pub mod references;
pub mod sample;
pub mod site;

use speleo_model::TableKind;

use crate::issue::{Category, Issue};
use crate::report::Outcome;
use crate::view::View;

/// Warning citing `rows` when there are any.
pub(crate) fn warn_rows(
    table: TableKind,
    category: Category,
    rule: &'static str,
    rows: Vec<usize>,
    message: impl Into<String>,
) -> Outcome {
    if rows.is_empty() {
        Outcome::pass()
    } else {
        Outcome::warning(table, Issue::rule_at(category, rule, rows, message))
    }
}

/// Warning without row references.
pub(crate) fn warn(
    table: TableKind,
    category: Category,
    rule: &'static str,
    message: impl Into<String>,
) -> Outcome {
    Outcome::warning(table, Issue::rule(category, rule, message))
}

pub(crate) fn informative(
    table: TableKind,
    category: Category,
    rule: &'static str,
    message: impl Into<String>,
) -> Outcome {
    Outcome::informative(table, Issue::rule(category, rule, message))
}

pub(crate) fn note(
    table: TableKind,
    category: Category,
    rule: &'static str,
    message: impl Into<String>,
) -> Outcome {
    Outcome::note(table, Issue::rule(category, rule, message))
}

/// Runs `check` once per entity of `view`, in sorted entity order.
pub(crate) fn per_entity(
    view: &View<'_>,
    mut check: impl FnMut(&str, &View<'_>) -> Outcome,
) -> Outcome {
    view.entity_names()
        .iter()
        .map(|entity| check(entity, &view.for_entity(entity)))
        .collect()
}
