//! Numeric type validation.

use super::flag_rows;
use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Flags text cells in `column`. Empty cells pass.
pub fn check(view: &View<'_>, column: &str) -> Outcome {
    let rows = view.row_numbers_where(|row| row.value(column).is_text());
    flag_rows(view, rows, |rows| Issue::NotNumeric {
        column: column.to_string(),
        rows,
    })
}
