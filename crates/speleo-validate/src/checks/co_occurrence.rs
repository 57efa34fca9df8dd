//! Conditional co-occurrence validation.

use super::flag_rows;
use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Flags rows where `dependent` is filled in but `independent` is not.
pub fn check(view: &View<'_>, independent: &str, dependent: &str) -> Outcome {
    let rows =
        view.row_numbers_where(|row| row.is_present(dependent) && row.is_missing(independent));
    flag_rows(view, rows, |rows| Issue::Unaccompanied {
        independent: independent.to_string(),
        dependent: dependent.to_string(),
        rows,
    })
}

/// Flags rows where `dependent` is filled in and none of `independents` is.
pub fn check_any(view: &View<'_>, independents: &[&str], dependent: &str) -> Outcome {
    let rows = view.row_numbers_where(|row| {
        row.is_present(dependent) && independents.iter().all(|column| row.is_missing(column))
    });
    flag_rows(view, rows, |rows| Issue::UnaccompaniedByAny {
        independents: independents.iter().map(|c| (*c).to_string()).collect(),
        dependent: dependent.to_string(),
        rows,
    })
}
