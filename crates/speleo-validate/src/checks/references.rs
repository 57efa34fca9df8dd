//! Reference sheet validation.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use speleo_model::TableKind;

use crate::format::{has_outer_space, is_placeholder, join_names};
use crate::issue::{Category, Issue};
use crate::report::Outcome;
use crate::view::{Row, View};

const UNPUBLISHED: &str = "unpublished";

fn cell<'a>(row: &Row<'a>, column: &str) -> Cow<'a, str> {
    row.text(column).unwrap_or_default()
}

/// Rows grouped by `key`, mapping to the distinct values of `other`.
fn linked<'a>(
    refs: &View<'a>,
    key: &str,
    other: &str,
) -> BTreeMap<Cow<'a, str>, BTreeSet<Cow<'a, str>>> {
    let mut groups: BTreeMap<Cow<'a, str>, BTreeSet<Cow<'a, str>>> = BTreeMap::new();
    for row in refs.rows() {
        groups
            .entry(cell(&row, key))
            .or_default()
            .insert(cell(&row, other));
    }
    groups
}

/// One citation must carry one DOI. A single warning covers all citations.
pub fn citation_dois(refs: &View<'_>) -> Outcome {
    let conflicting: BTreeSet<String> = linked(refs, "citation", "publication_DOI")
        .into_iter()
        .filter(|(_, dois)| dois.len() > 1)
        .map(|(citation, _)| citation.into_owned())
        .collect();
    if conflicting.is_empty() {
        return Outcome::pass();
    }
    let rows = refs.row_numbers_where(|row| conflicting.contains(cell(row, "citation").as_ref()));
    Outcome::warning(
        refs.table(),
        Issue::rule_at(
            Category::Consistency,
            "citation_doi",
            rows,
            "There is more than one DOI associated to one citation. Possible drag-down error with the DOI.",
        ),
    )
}

/// One DOI must carry one citation, `unpublished` aside. A single warning
/// covers all DOIs.
pub fn doi_citations(refs: &View<'_>) -> Outcome {
    let conflicting: Vec<String> = linked(refs, "publication_DOI", "citation")
        .into_iter()
        .filter(|(doi, citations)| doi != UNPUBLISHED && citations.len() > 1)
        .map(|(doi, _)| doi.into_owned())
        .collect();
    if conflicting.is_empty() {
        return Outcome::pass();
    }
    Outcome::warning(
        refs.table(),
        Issue::rule(
            Category::Consistency,
            "doi_citation",
            format!(
                "One same DOI ({}) is linked to multiple citations. If the same DOI is from different chapters of the same book, please accept the workbook manually",
                join_names(&conflicting)
            ),
        ),
    )
}

/// A citation may appear only once per entity. One warning per entity.
pub fn repeated_citations(refs: &View<'_>) -> Outcome {
    refs.entity_names()
        .into_iter()
        .map(|entity| {
            let rows = refs.for_entity(&entity);
            let distinct: BTreeSet<Cow<'_, str>> =
                rows.rows().map(|row| cell(&row, "citation")).collect();
            if distinct.len() < rows.len() {
                Outcome::warning(
                    refs.table(),
                    Issue::rule(
                        Category::Consistency,
                        "repeated_citation",
                        format!("There are repeated citation(s) in {entity}."),
                    ),
                )
            } else {
                Outcome::pass()
            }
        })
        .collect()
}

/// DOIs must be a DOI, a URL or `unpublished`.
pub fn doi_format(refs: &View<'_>) -> Outcome {
    let malformed = refs.row_numbers_where(|row| {
        let doi = row.text("publication_DOI");
        is_placeholder(doi.as_deref(), true) || doi.as_deref().is_some_and(has_outer_space)
    });
    if !malformed.is_empty() {
        return Outcome::warning(
            refs.table(),
            Issue::rule_at(
                Category::Format,
                "doi_format",
                malformed,
                "The DOI(s) entered are incorrect. This must be either a DOI, URL or \"unpublished\". Check for spaces before or after the DOI.",
            ),
        );
    }
    let unprefixed = refs.row_numbers_where(|row| {
        let doi = cell(row, "publication_DOI");
        !(doi.starts_with("http") || doi.starts_with("10.") || doi == UNPUBLISHED)
    });
    if unprefixed.is_empty() {
        Outcome::pass()
    } else {
        Outcome::warning(
            refs.table(),
            Issue::rule_at(
                Category::Format,
                "doi_format",
                unprefixed,
                "Incorrect DOI(s). DOI/URL must either be \"unpublished\" or start with \"http\", \"10.\".",
            ),
        )
    }
}

/// Citations must be real text without surrounding spaces.
pub fn citation_format(refs: &View<'_>) -> Outcome {
    let rows = refs.row_numbers_where(|row| {
        let citation = row.text("citation");
        is_placeholder(citation.as_deref(), true)
            || citation.as_deref().is_some_and(has_outer_space)
    });
    if rows.is_empty() {
        Outcome::pass()
    } else {
        Outcome::warning(
            refs.table(),
            Issue::rule_at(
                Category::Format,
                "citation_format",
                rows,
                "The citation(s) are incorrect. This cannot be empty, \"unknown\", \"N/A\", \"not known\", etc or have spaces before/after the text.",
            ),
        )
    }
}

/// Every entity needs at least one reference. One warning per entity.
pub fn coverage(entities: &[String], refs: &View<'_>) -> Outcome {
    let referenced: BTreeSet<String> = refs.entity_names().into_iter().collect();
    entities
        .iter()
        .filter(|entity| !referenced.contains(*entity))
        .map(|entity| {
            Outcome::warning(
                TableKind::References,
                Issue::rule(
                    Category::CrossReference,
                    "reference_coverage",
                    format!("Entity {entity} is missing a reference"),
                ),
            )
        })
        .collect()
}
