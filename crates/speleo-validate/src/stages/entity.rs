use speleo_model::vocab::{
    DepthRef, DripType, EntityStatusInfo, SpeleothemType, YesNo, YesNoUnknown,
};
use speleo_model::{TableKind, Value, Vocabulary};

use super::{warn, warn_rows};
use crate::checks::{MissingPolicy, numeric, presence, required_term, vocabulary};
use crate::context::Context;
use crate::format::{has_outer_space, is_placeholder};
use crate::issue::Category;
use crate::pipeline::StageResult;
use crate::report::Outcome;
use crate::view::{Row, View};

/// Yes/no/unknown proxy availability columns.
const PROXY_COLUMNS: [&str; 12] = [
    "d13C",
    "d18O",
    "d18O_water_equilibrium",
    "trace_elements",
    "organics",
    "fluid_inclusions",
    "mineralogy_petrology_fabric",
    "clumped_isotopes",
    "noble_gas_temperatures",
    "C14",
    "ODL",
    "Mg_Ca",
];

pub fn run(ctx: &Context<'_>) -> StageResult {
    let entity = ctx.entity();
    let mut outcome = Outcome::pass();

    outcome.merge(presence::check(&entity, "entity_name").and_then(|| {
        entity
            .entity_names()
            .into_iter()
            .filter(|name| has_outer_space(name))
            .map(|name| {
                warn(
                    TableKind::Entity,
                    Category::Format,
                    "entity_name_spaces",
                    format!(
                        "The entity_name {name} either starts or ends with a space. Please remove the extra space"
                    ),
                )
            })
            .collect()
    }));

    outcome.merge(required_term::<SpeleothemType>(&entity, "speleothem_type"));
    outcome.merge(required_term::<DepthRef>(&entity, "depth_ref"));
    outcome.merge(vocabulary::check::<DripType>(
        &entity,
        "drip_type",
        MissingPolicy::Flag,
    ));
    for column in PROXY_COLUMNS {
        outcome.merge(required_term::<YesNoUnknown>(&entity, column));
    }

    outcome.extend(entity.rows().map(|row| contact(&row)));

    outcome.merge(
        required_term::<YesNo>(&entity, "one_and_only")
            .and_then(|| required_term::<EntityStatusInfo>(&entity, "entity_status_info"))
            .and_then(|| entity_status(&entity)),
    );

    outcome.merge(numeric::check(&entity, "cover_thickness"));
    outcome.merge(numeric::check(&entity, "distance_entrance"));
    outcome.merge(data_doi(&entity));
    outcome.into()
}

/// A contact must be a full name: several words, not all initials.
fn contact(row: &Row<'_>) -> Outcome {
    let number = row.number();
    let problem = match row.value("contact") {
        Value::Missing => Some("is empty"),
        Value::Number(_) => Some("is numeric instead of text"),
        Value::Text(name) if !name.contains(' ') => Some("is only one word"),
        Value::Text(name) if name.trim().is_empty() || has_outer_space(name) => {
            Some("is just spaces or starts and ends with spaces")
        }
        Value::Text(name) => {
            let words: Vec<&str> = name.split(' ').collect();
            let threshold = if words.len() > 2 { 1 } else { 0 };
            let initials = words
                .iter()
                .filter(|word| word.chars().count() < 2 || word.ends_with('.'))
                .count();
            (initials > threshold).then_some("seems to not fulfill the criteria of a full name")
        }
    };
    match problem {
        Some(problem) => warn(
            TableKind::Entity,
            Category::Format,
            "contact",
            format!("Contact_name in row {number} {problem}. Name and surname(s) are required"),
        ),
        None => Outcome::pass(),
    }
}

/// one_and_only against entity_status_info and entity_status_notes.
fn entity_status(entity: &View<'_>) -> Outcome {
    let only = |row: &Row<'_>| row.is("one_and_only", YesNo::Yes);
    let not_only = |row: &Row<'_>| row.is("one_and_only", YesNo::No);
    let status_na = |row: &Row<'_>| row.is("entity_status_info", EntityStatusInfo::NotApplicable);
    let na = EntityStatusInfo::NotApplicable.as_str();

    [
        warn_rows(
            TableKind::Entity,
            Category::Consistency,
            "one_and_only",
            entity.row_numbers_where(|row| only(row) && !status_na(row)),
            format!("if one_and_only = \"yes\", entity_status_info must be \"{na}\"."),
        ),
        warn_rows(
            TableKind::Entity,
            Category::Consistency,
            "one_and_only",
            entity.row_numbers_where(|row| only(row) && row.is_present("entity_status_notes")),
            "if one_and_only = \"yes\", entity_status_notes must be empty.",
        ),
        warn_rows(
            TableKind::Entity,
            Category::Consistency,
            "one_and_only",
            entity.row_numbers_where(|row| not_only(row) && status_na(row)),
            format!("if one_and_only = \"no\", entity_status_info cannot be \"{na}\"."),
        ),
        warn_rows(
            TableKind::Entity,
            Category::Consistency,
            "one_and_only",
            entity.row_numbers_where(|row| {
                not_only(row) && is_placeholder(row.text("entity_status_notes").as_deref(), true)
            }),
            "if one_and_only = \"no\", entity_status_notes cannot be empty, \"NA\", \"unknown\", \"not known\" (or their variants).",
        ),
    ]
    .into_iter()
    .collect()
}

/// data_DOI_URL is optional, but when given it must be a DOI or URL.
fn data_doi(entity: &View<'_>) -> Outcome {
    let malformed = entity.row_numbers_where(|row| {
        let doi = row.text("data_DOI_URL");
        is_placeholder(doi.as_deref(), false) || doi.as_deref().is_some_and(has_outer_space)
    });
    if !malformed.is_empty() {
        return warn_rows(
            TableKind::Entity,
            Category::Format,
            "data_doi",
            malformed,
            "the NOAA/PANGAEA URL or DOI of the data is incorrect. This cannot be \"unknown\", \"N/A\", \"not known\", etc. or have spaces before/after the text. It must either be the URL/DOI or be left empty.",
        );
    }
    warn_rows(
        TableKind::Entity,
        Category::Format,
        "data_doi",
        entity.row_numbers_where(|row| {
            row.text("data_DOI_URL").is_some_and(|doi| {
                !(doi.starts_with("10.") || doi.starts_with("ftp") || doi.starts_with("http"))
            })
        }),
        "the NOAA/PANGAEA URL or DOI of the data is incorrect. The URL or DOI must start with either \"10.\", \"ftp\", or \"http\".",
    )
}

/// Last ten characters.
fn tail(text: &str) -> &str {
    text.char_indices()
        .rev()
        .nth(9)
        .map_or(text, |(index, _)| &text[index..])
}

/// The data DOI must not be one of the entity's publication DOIs.
pub fn data_doi_overlap(ctx: &Context<'_>) -> StageResult {
    let references = ctx.references();
    let outcome: Outcome = ctx
        .entity()
        .rows()
        .filter_map(|row| Some((row.entity()?, row.text("data_DOI_URL")?)))
        .filter(|(entity, data_doi)| {
            references
                .for_entity(entity)
                .rows()
                .filter_map(|reference| reference.text("publication_DOI"))
                .any(|doi| tail(&doi) == tail(data_doi))
        })
        .map(|(entity, _)| {
            warn(
                TableKind::Entity,
                Category::CrossReference,
                "data_doi_overlap",
                format!(
                    "data_DOI_URL; Entity {entity} likely has the same data_DOI_URL as publication_DOI in References tab. The data_DOI_URL refers only to the data while the publication_DOI refers to the paper. If no data_DOI_URL is available, please leave empty."
                ),
            )
        })
        .collect();
    outcome.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_counts_characters() {
        assert_eq!(tail("https://doi.org/10.1000/abc123"), "000/abc123");
        assert_eq!(tail("short"), "short");
    }
}
