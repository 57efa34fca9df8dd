//! Field completeness for hiatus, gap and dating event rows.

use std::collections::BTreeSet;

use crate::issue::Issue;
use crate::report::Outcome;
use crate::view::View;

/// Which columns an event row must, may and must not carry.
#[derive(Debug, Clone, Copy)]
pub struct EventRule {
    /// Column holding the marker.
    pub marker_column: &'static str,
    /// Marker identifying the event rows.
    pub marker: &'static str,
    /// Name used in messages.
    pub label: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

/// Checks every row where `marker_column` equals `marker`.
///
/// Columns outside `required` and `optional` must be empty. The two
/// directions are reported separately, so up to two warnings result.
pub fn check(view: &View<'_>, rule: &EventRule) -> Outcome {
    let events = view.filter(|row| row.text(rule.marker_column).as_deref() == Some(rule.marker));
    if events.is_empty() {
        return Outcome::pass();
    }

    let mut missing_columns = Vec::new();
    let mut missing_rows = BTreeSet::new();
    let mut extra_columns = Vec::new();
    let mut extra_rows = BTreeSet::new();

    for column in events.sheet().columns() {
        if rule.required.contains(&column.as_str()) {
            let rows = events.row_numbers_where(|row| row.is_missing(column));
            if !rows.is_empty() {
                missing_columns.push(column.clone());
                missing_rows.extend(rows);
            }
        } else if !rule.optional.contains(&column.as_str()) {
            let rows = events.row_numbers_where(|row| row.is_present(column));
            if !rows.is_empty() {
                extra_columns.push(column.clone());
                extra_rows.extend(rows);
            }
        }
    }

    let mut outcome = Outcome::pass();
    if !missing_columns.is_empty() {
        outcome.merge(Outcome::warning(
            view.table(),
            Issue::EventFieldsMissing {
                event: rule.label.to_string(),
                columns: missing_columns,
                rows: missing_rows.into_iter().collect(),
            },
        ));
    }
    if !extra_columns.is_empty() {
        outcome.merge(Outcome::warning(
            view.table(),
            Issue::EventFieldsUnexpected {
                event: rule.label.to_string(),
                columns: extra_columns,
                rows: extra_rows.into_iter().collect(),
            },
        ));
    }
    outcome
}

#[cfg(test)]
mod tests {
    use speleo_model::{Sheet, TableKind, Value};

    use super::*;

    const HIATUS: EventRule = EventRule {
        marker_column: "hiatus",
        marker: "H",
        label: "hiatuses",
        required: &["entity_name", "depth_sample", "hiatus"],
        optional: &[],
    };

    fn sheet() -> Sheet {
        let mut sheet = Sheet::new(
            TableKind::Sample,
            vec![
                "entity_name".to_string(),
                "depth_sample".to_string(),
                "hiatus".to_string(),
                "d18O_measurement".to_string(),
            ],
        );
        sheet.push_next(vec![
            Value::from("A"),
            Value::from(1.0),
            Value::Missing,
            Value::from(-5.0),
        ]);
        sheet.push_next(vec![Value::from("A"), Value::Missing, Value::from("H"), Value::from(-5.0)]);
        sheet.push_next(vec![Value::from("A"), Value::from(3.0), Value::from("H"), Value::Missing]);
        sheet
    }

    #[test]
    fn reports_both_directions() {
        let sheet = sheet();
        let outcome = check(&View::new(&sheet), &HIATUS);
        assert_eq!(outcome.warnings(), 2);
        assert_eq!(
            outcome.diagnostics()[0].issue,
            Issue::EventFieldsMissing {
                event: "hiatuses".to_string(),
                columns: vec!["depth_sample".to_string()],
                rows: vec![4],
            }
        );
        assert_eq!(outcome.diagnostics()[1].issue.rows(), vec![4]);
    }

    #[test]
    fn clean_events_pass() {
        let sheet = sheet();
        let view = View::new(&sheet).filter(|row| row.number() == 5);
        assert!(check(&view, &HIATUS).passed());
    }
}
