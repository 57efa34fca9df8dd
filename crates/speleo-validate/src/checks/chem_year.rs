//! Year-of-chemistry cross-check.

use speleo_model::vocab::{ModernReference, YesNoUnknown};
use speleo_model::{TableKind, Value};

use crate::format::value_key;
use crate::issue::{Category, Issue};
use crate::report::Outcome;
use crate::view::View;

const RULE: &str = "chem_year";

/// Which dating rows supply the chem year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChemYearScope {
    /// Dating checked against itself: every chemistry-referenced row.
    SameTable,
    /// Sample or lamina checked against dating rows used in the age model.
    UsedDates,
}

/// Distinct chem years of an entity's chemistry-referenced dating rows.
fn chem_years(dating: &View<'_>, entity: &str, scope: ChemYearScope) -> Vec<Value> {
    let mut keys = Vec::new();
    let mut values = Vec::new();
    let rows = dating.for_entity(entity);
    for row in rows.rows() {
        if !row.is("modern_reference", ModernReference::YearOfChemistry) {
            continue;
        }
        if scope == ChemYearScope::UsedDates && row.is("date_used", YesNoUnknown::No) {
            continue;
        }
        let value = row.value("chem_year");
        let key = match value {
            Value::Number(year) => value_key(*year),
            Value::Missing => String::new(),
            Value::Text(text) => format!("text:{text}"),
        };
        if !keys.contains(&key) {
            keys.push(key);
            values.push(value.clone());
        }
    }
    values
}

fn warn(message: String) -> Outcome {
    Outcome::warning(
        TableKind::Dating,
        Issue::rule(Category::CrossReference, RULE, message),
    )
}

/// Rows of `table` referenced to the year of chemistry need a usable chem
/// year in the owning entity's dating rows. At most one warning per entity.
pub fn check(table: &View<'_>, dating: &View<'_>, scope: ChemYearScope) -> Outcome {
    let entities = table
        .filter(|row| row.is("modern_reference", ModernReference::YearOfChemistry))
        .entity_names();

    entities
        .iter()
        .map(|entity| {
            let years = chem_years(dating, entity, scope);
            let all_finite = years.iter().all(|year| year.as_finite().is_some());
            let not_finite = || {
                warn(format!(
                    "Entity {entity} has chem_year which is not a finite number (or missing) where modern_reference is Year of chemistry."
                ))
            };
            let missing = || {
                warn(format!(
                    "Entity {entity} is missing chem_year where modern_reference is Year of chemistry."
                ))
            };
            match (scope, all_finite, years.len()) {
                (ChemYearScope::SameTable, _, 0) => missing(),
                (ChemYearScope::SameTable, false, _) => not_finite(),
                (ChemYearScope::SameTable, true, _) => Outcome::pass(),
                (ChemYearScope::UsedDates, _, 0) => warn(format!(
                    "Entity {entity} is missing chem_year in Dating Information spreadsheet (where date_used = \"yes\"). If chem_year exists in the workbook, it is likely that date_used = \"no\". Best practice is to convert all dates to the same modern reference manually"
                )),
                (ChemYearScope::UsedDates, false, 1) => not_finite(),
                (ChemYearScope::UsedDates, false, _) => warn(format!(
                    "Entity {entity} has more than one chem_year, not all of which are a finite number (or missing)."
                )),
                (ChemYearScope::UsedDates, true, 1) => Outcome::pass(),
                (ChemYearScope::UsedDates, true, _) => Outcome::informative(
                    TableKind::Dating,
                    Issue::rule(
                        Category::CrossReference,
                        RULE,
                        format!(
                            "Entity {entity} has more than one chem_year. The most recent chem_year will be used when converting to BP (1950). Please check whether this is correct."
                        ),
                    ),
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use speleo_model::Sheet;

    use super::*;
    use crate::issue::Severity;

    fn dating(years: &[(Value, &str)]) -> Sheet {
        let mut sheet = Sheet::new(
            TableKind::Dating,
            vec![
                "entity_name".to_string(),
                "modern_reference".to_string(),
                "chem_year".to_string(),
                "date_used".to_string(),
            ],
        );
        for (year, used) in years {
            sheet.push_next(vec![
                Value::from("A"),
                Value::from("Year of chemistry"),
                year.clone(),
                Value::from(*used),
            ]);
        }
        sheet
    }

    #[test]
    fn single_finite_year_passes() {
        let sheet = dating(&[(Value::Number(2010.0), "yes"), (Value::Number(2010.0), "yes")]);
        let view = View::new(&sheet);
        assert!(check(&view, &view, ChemYearScope::UsedDates).diagnostics().is_empty());
    }

    #[test]
    fn several_finite_years_are_informative() {
        let sheet = dating(&[(Value::Number(2010.0), "yes"), (Value::Number(2012.0), "yes")]);
        let view = View::new(&sheet);
        let outcome = check(&view, &view, ChemYearScope::UsedDates);
        assert!(outcome.passed());
        assert_eq!(outcome.diagnostics()[0].severity, Severity::Informative);
        assert!(check(&view, &view, ChemYearScope::SameTable).diagnostics().is_empty());
    }

    #[test]
    fn unused_rows_do_not_count() {
        let sheet = dating(&[(Value::Number(2010.0), "no")]);
        let view = View::new(&sheet);
        assert_eq!(check(&view, &view, ChemYearScope::UsedDates).warnings(), 1);
        assert!(check(&view, &view, ChemYearScope::SameTable).passed());
    }

    #[test]
    fn missing_year_warns() {
        let sheet = dating(&[(Value::Missing, "yes")]);
        let view = View::new(&sheet);
        assert_eq!(check(&view, &view, ChemYearScope::SameTable).warnings(), 1);
        assert_eq!(check(&view, &view, ChemYearScope::UsedDates).warnings(), 1);
    }
}
