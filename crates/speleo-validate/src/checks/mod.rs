//! Individual checks.
//!
//! Every check is a pure function over a [`View`] returning an [`Outcome`];
//! a failing check contributes exactly one warning per invocation unless its
//! documentation says otherwise.

pub mod chem_year;
pub mod co_occurrence;
pub mod duplicates;
pub mod entity_names;
pub mod event_fields;
pub mod hiatus_alignment;
pub mod lamination;
pub mod min_max;
pub mod numeric;
pub mod ordering;
pub mod positive;
pub mod possible_hiatus;
pub mod presence;
pub mod range;
pub mod references;
pub mod vocabulary;

use speleo_model::Vocabulary;

use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// How a check treats empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Empty cells fail the check.
    Flag,
    /// Empty cells are not looked at.
    Skip,
}

/// Warning on the view's sheet when `rows` is non-empty.
pub(crate) fn flag_rows(
    view: &View<'_>,
    rows: Vec<usize>,
    issue: impl FnOnce(Vec<usize>) -> Issue,
) -> Outcome {
    if rows.is_empty() {
        Outcome::pass()
    } else {
        Outcome::warning(view.table(), issue(rows))
    }
}

/// Presence, then membership in `V`.
pub fn required_term<V: Vocabulary>(view: &View<'_>, column: &str) -> Outcome {
    presence::check(view, column)
        .and_then(|| vocabulary::check::<V>(view, column, MissingPolicy::Flag))
}

/// Numeric, then non-negative wherever filled in.
pub fn numeric_then_positive(view: &View<'_>, column: &str) -> Outcome {
    numeric::check(view, column).and_then(|| positive::check(view, column, MissingPolicy::Skip))
}
