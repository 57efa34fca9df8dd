//! Presence validation.

use super::flag_rows;
use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Flags rows where `column` is empty.
pub fn check(view: &View<'_>, column: &str) -> Outcome {
    let rows = view.row_numbers_where(|row| row.is_missing(column));
    flag_rows(view, rows, |rows| Issue::Missing {
        column: column.to_string(),
        rows,
    })
}
