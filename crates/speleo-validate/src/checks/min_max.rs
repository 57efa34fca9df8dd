//! Uncertainties entered as a min/max range.

use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Flags rows whose `age` lies inclusively between its own two uncertainty
/// values. A single matching row is tolerated.
pub fn check(view: &View<'_>, entity: &str, age: &str, upper: &str, lower: &str) -> Outcome {
    let rows = view.row_numbers_where(|row| {
        match (row.number_in(age), row.number_in(upper), row.number_in(lower)) {
            (Some(age), Some(a), Some(b)) => (age <= a && age >= b) || (age <= b && age >= a),
            _ => false,
        }
    });
    if rows.len() > 1 {
        Outcome::warning(
            view.table(),
            Issue::RangeAsUncertainty {
                entity: entity.to_string(),
                age: age.to_string(),
                upper: upper.to_string(),
                lower: lower.to_string(),
                rows,
            },
        )
    } else {
        Outcome::pass()
    }
}

#[cfg(test)]
mod tests {
    use speleo_model::{Sheet, TableKind, Value};

    use super::*;

    fn sheet(rows: &[(f64, f64, f64)]) -> Sheet {
        let mut sheet = Sheet::new(
            TableKind::Sample,
            vec![
                "interp_age".to_string(),
                "interp_age_uncert_pos".to_string(),
                "interp_age_uncert_neg".to_string(),
            ],
        );
        for (age, pos, neg) in rows {
            sheet.push_next(vec![Value::from(*age), Value::from(*pos), Value::from(*neg)]);
        }
        sheet
    }

    fn run(sheet: &Sheet) -> Outcome {
        check(
            &View::new(sheet),
            "A",
            "interp_age",
            "interp_age_uncert_pos",
            "interp_age_uncert_neg",
        )
    }

    #[test]
    fn two_bracketing_rows_warn() {
        let sheet = sheet(&[(100.0, 110.0, 90.0), (200.0, 190.0, 210.0), (300.0, 5.0, 5.0)]);
        let outcome = run(&sheet);
        assert_eq!(outcome.warnings(), 1);
        assert_eq!(outcome.diagnostics()[0].issue.rows(), vec![3, 4]);
    }

    #[test]
    fn one_bracketing_row_is_tolerated() {
        let sheet = sheet(&[(100.0, 110.0, 90.0), (300.0, 5.0, 5.0)]);
        assert!(run(&sheet).passed());
    }
}
