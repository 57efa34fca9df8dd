//! Entity-name referential integrity.

use std::collections::BTreeSet;

use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;
use speleo_model::TableKind;

/// Flags entity names in `table` that the entity sheet does not declare.
///
/// The warning is attributed to the entity sheet, naming the sheet the
/// strays were found in.
pub fn check(declared: &BTreeSet<String>, table: &View<'_>) -> Outcome {
    let unknown: Vec<String> = table
        .entity_names()
        .into_iter()
        .filter(|name| !declared.contains(name))
        .collect();
    if unknown.is_empty() {
        Outcome::pass()
    } else {
        Outcome::warning(
            TableKind::Entity,
            Issue::UnknownEntities {
                names: unknown,
                found_in: table.table(),
            },
        )
    }
}
