//! Reference-epoch conversion.
//!
//! Ages arrive in one of four epochs (`modern_reference`). The canonical
//! epoch is `BP (1950)`; the others convert as
//!
//! | epoch               | canonical age                   |
//! |---------------------|---------------------------------|
//! | `b2k`               | `age - 50`                      |
//! | `CE/BCE`            | `1950 - age`                    |
//! | `Year of chemistry` | `age - (chem_year - 1950)`      |
//!
//! Conversions never touch the input sheet: they return a rewritten copy
//! with the converted rows relabelled `BP (1950)`.

use std::borrow::Cow;
use std::collections::BTreeSet;

use speleo_model::vocab::ModernReference;
use speleo_model::{Sheet, Value, Vocabulary};

use crate::chem_year::ChemYearIndex;

/// Column holding the epoch of an age in every age-bearing sheet.
pub const REFERENCE_COLUMN: &str = "modern_reference";

/// Column holding the year of chemistry on dating rows.
pub const CHEM_YEAR_COLUMN: &str = "chem_year";

const BP_ORIGIN: f64 = 1950.0;
const B2K_OFFSET: f64 = 50.0;

/// Converts one age to `BP (1950)`.
///
/// Returns `None` for `Year of chemistry` without a finite chem year.
pub fn to_bp1950(age: f64, reference: ModernReference, chem_year: Option<f64>) -> Option<f64> {
    match reference {
        ModernReference::Bp1950 => Some(age),
        ModernReference::B2k => Some(age - B2K_OFFSET),
        ModernReference::CeBce => Some(BP_ORIGIN - age),
        ModernReference::YearOfChemistry => chem_year
            .filter(|year| year.is_finite())
            .map(|year| age - (year - BP_ORIGIN)),
    }
}

/// Where `Year of chemistry` rows find their chem year.
#[derive(Debug, Clone, Copy)]
pub enum ChemYearSource<'a> {
    /// The row's own `chem_year` cell (dating rows).
    Row,
    /// The owning entity's dating rows (sample and lamina rows).
    Entity(&'a ChemYearIndex),
    /// No chem year is available; such rows stay unresolved.
    Unavailable,
}

/// Result of rewriting one age column.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub sheet: Sheet,
    /// Rows whose age was rewritten.
    pub converted: usize,
    /// Entities with `Year of chemistry` rows that could not be converted.
    pub unresolved: BTreeSet<String>,
}

/// Rewrites `age_column` onto `BP (1950)` for every epoch.
pub fn normalize_ages(sheet: &Sheet, age_column: &str, chem: ChemYearSource<'_>) -> Normalized {
    rewrite(sheet, age_column, chem, |_| true)
}

/// Rewrites only `CE/BCE` ages, leaving the other epochs as they are.
///
/// Range checks run on this view: calendar years are the only epoch whose
/// magnitude is not already comparable to BP.
pub fn normalize_calendar_ages(sheet: &Sheet, age_column: &str) -> Sheet {
    rewrite(sheet, age_column, ChemYearSource::Unavailable, |reference| {
        reference == ModernReference::CeBce
    })
    .sheet
}

fn rewrite(
    sheet: &Sheet,
    age_column: &str,
    chem: ChemYearSource<'_>,
    selected: impl Fn(ModernReference) -> bool,
) -> Normalized {
    let mut out = sheet.clone();
    let mut converted = 0;
    let mut unresolved = BTreeSet::new();

    for index in 0..sheet.len() {
        let Some(reference) = sheet
            .value(index, REFERENCE_COLUMN)
            .as_str()
            .and_then(ModernReference::parse)
        else {
            continue;
        };
        if reference == ModernReference::Bp1950 || !selected(reference) {
            continue;
        }
        let Some(age) = sheet.value(index, age_column).as_number() else {
            continue;
        };

        let chem_year = match (reference, chem) {
            (ModernReference::YearOfChemistry, ChemYearSource::Row) => {
                sheet.value(index, CHEM_YEAR_COLUMN).as_finite()
            }
            (ModernReference::YearOfChemistry, ChemYearSource::Entity(years)) => sheet
                .value(index, "entity_name")
                .as_text()
                .and_then(|entity| years.get(&entity)),
            _ => None,
        };

        match to_bp1950(age, reference, chem_year) {
            Some(canonical) => {
                out.set_value(index, age_column, Value::Number(canonical));
                out.set_value(
                    index,
                    REFERENCE_COLUMN,
                    Value::Text(ModernReference::Bp1950.as_str().to_string()),
                );
                converted += 1;
            }
            None => {
                let entity = sheet
                    .value(index, "entity_name")
                    .as_text()
                    .map(Cow::into_owned)
                    .unwrap_or_default();
                unresolved.insert(entity);
            }
        }
    }

    Normalized {
        sheet: out,
        converted,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_epoch() {
        assert_eq!(to_bp1950(1000.0, ModernReference::B2k, None), Some(950.0));
        assert_eq!(to_bp1950(1990.0, ModernReference::CeBce, None), Some(-40.0));
        assert_eq!(
            to_bp1950(500.0, ModernReference::YearOfChemistry, Some(2000.0)),
            Some(450.0)
        );
        assert_eq!(to_bp1950(12.0, ModernReference::Bp1950, None), Some(12.0));
    }

    #[test]
    fn chemistry_without_year_is_unresolved() {
        assert_eq!(to_bp1950(500.0, ModernReference::YearOfChemistry, None), None);
        assert_eq!(
            to_bp1950(500.0, ModernReference::YearOfChemistry, Some(f64::NAN)),
            None
        );
    }
}
