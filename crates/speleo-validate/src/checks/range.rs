//! Numeric range validation.

use speleo_model::Value;

use super::{MissingPolicy, flag_rows};
use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Flags numbers outside `bounds` and any non-numeric cell.
pub fn check(view: &View<'_>, column: &str, bounds: Bounds, missing: MissingPolicy) -> Outcome {
    let rows = view.row_numbers_where(|row| match row.value(column) {
        Value::Number(value) => !bounds.contains(*value),
        Value::Missing => missing == MissingPolicy::Flag,
        Value::Text(_) => true,
    });
    flag_rows(view, rows, |rows| Issue::OutOfRange {
        column: column.to_string(),
        min: bounds.min,
        max: bounds.max,
        rows,
    })
}
