//! Positivity validation.

use speleo_model::Value;

use super::{MissingPolicy, flag_rows};
use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Flags negative numbers and text. Zero passes.
pub fn check(view: &View<'_>, column: &str, missing: MissingPolicy) -> Outcome {
    let rows = view.row_numbers_where(|row| match row.value(column) {
        Value::Number(value) => *value < 0.0,
        Value::Missing => missing == MissingPolicy::Flag,
        Value::Text(_) => true,
    });
    flag_rows(view, rows, |rows| Issue::NotPositive {
        column: column.to_string(),
        rows,
    })
}
