//! Controlled vocabulary validation.

use speleo_model::Vocabulary;

use super::{MissingPolicy, flag_rows};
use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Flags values of `column` outside the list `V`.
pub fn check<V: Vocabulary>(view: &View<'_>, column: &str, missing: MissingPolicy) -> Outcome {
    let rows = view.row_numbers_where(|row| match row.text(column) {
        None => missing == MissingPolicy::Flag,
        Some(text) => V::parse(&text).is_none(),
    });
    flag_rows(view, rows, |rows| Issue::NotInVocabulary {
        column: column.to_string(),
        rows,
    })
}
