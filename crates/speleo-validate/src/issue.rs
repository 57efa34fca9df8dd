//! Diagnostic types.
//!
//! The Issue enum provides type-safe diagnostic creation where each variant
//! carries only its needed data. A [`Diagnostic`] pins an issue to a sheet and
//! a severity; only warnings count towards the verdict.

use std::fmt;

use serde::Serialize;
use speleo_model::TableKind;

use crate::format::{join_names, join_pairs, join_rows};

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// Counted; any warning sends the workbook back for review.
    Warning,
    /// Advisory notice for the submitter.
    Informative,
    /// Plain guidance line.
    Note,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "warning" => Some(Self::Warning),
            "informative" => Some(Self::Informative),
            "note" => Some(Self::Note),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Informative => "Informative",
            Self::Note => "Note",
        }
    }

    pub fn counts(&self) -> bool {
        matches!(self, Self::Warning)
    }
}

/// Broad family of a rule, used for grouping in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Presence,
    Format,
    Range,
    Terminology,
    Consistency,
    Chronology,
    CrossReference,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Presence => "presence",
            Self::Format => "format",
            Self::Range => "range",
            Self::Terminology => "terminology",
            Self::Consistency => "consistency",
            Self::Chronology => "chronology",
            Self::CrossReference => "cross-reference",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value that occurs more than once, with the rows it occurs in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repetition {
    pub value: String,
    pub rows: Vec<usize>,
}

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Issue {
    // Column checks
    /// Cells left empty.
    Missing { column: String, rows: Vec<usize> },
    /// Text where a number is expected.
    NotNumeric { column: String, rows: Vec<usize> },
    /// Numbers outside an inclusive range, or non-numbers.
    OutOfRange {
        column: String,
        min: f64,
        max: f64,
        rows: Vec<usize>,
    },
    /// Values outside a dropdown list.
    NotInVocabulary { column: String, rows: Vec<usize> },
    /// Negative numbers or non-numbers.
    NotPositive { column: String, rows: Vec<usize> },
    /// `dependent` filled in while `independent` is empty.
    Unaccompanied {
        independent: String,
        dependent: String,
        rows: Vec<usize>,
    },
    /// `dependent` filled in while every one of `independents` is empty.
    UnaccompaniedByAny {
        independents: Vec<String>,
        dependent: String,
        rows: Vec<usize>,
    },
    /// Uncertainties entered as min/max bounds around the age.
    RangeAsUncertainty {
        entity: String,
        age: String,
        upper: String,
        lower: String,
        rows: Vec<usize>,
    },
    /// Values repeated within one entity.
    Repeated {
        entity: String,
        column: String,
        repetitions: Vec<Repetition>,
    },

    // Row-group checks
    /// Every age step runs backwards.
    DepthRefInverted { entity: String },
    /// Depth pairs across which age decreases.
    AgeInversions {
        entity: String,
        depth: String,
        pairs: Vec<(String, String)>,
    },
    /// Unusually large age steps without a recorded hiatus.
    PossibleHiatus {
        entity: String,
        depth: String,
        pairs: Vec<(String, String)>,
    },
    /// Event rows lacking fields they must carry.
    EventFieldsMissing {
        event: String,
        columns: Vec<String>,
        rows: Vec<usize>,
    },
    /// Event rows carrying fields that must stay empty.
    EventFieldsUnexpected {
        event: String,
        columns: Vec<String>,
        rows: Vec<usize>,
    },

    // Cross-table checks
    /// Entity names not declared in the entity sheet.
    UnknownEntities {
        names: Vec<String>,
        found_in: TableKind,
    },
    /// Hiatus depths recorded in one sheet but not the other.
    HiatusMismatch {
        entity: String,
        depths: Vec<String>,
        missing_from: TableKind,
    },

    /// Any other named rule.
    Rule {
        rule: &'static str,
        category: Category,
        rows: Vec<usize>,
        message: String,
    },
}

impl Issue {
    /// A named rule without row references.
    pub fn rule(category: Category, rule: &'static str, message: impl Into<String>) -> Self {
        Issue::Rule {
            rule,
            category,
            rows: Vec::new(),
            message: message.into(),
        }
    }

    /// A named rule citing rows; the row list is appended to the message.
    pub fn rule_at(
        category: Category,
        rule: &'static str,
        rows: Vec<usize>,
        message: impl Into<String>,
    ) -> Self {
        let message = format!("{} row: {}", message.into(), join_rows(&rows));
        Issue::Rule {
            rule,
            category,
            rows,
            message,
        }
    }

    /// Short machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::Missing { .. } => "missing",
            Issue::NotNumeric { .. } => "not_numeric",
            Issue::OutOfRange { .. } => "out_of_range",
            Issue::NotInVocabulary { .. } => "not_in_vocabulary",
            Issue::NotPositive { .. } => "not_positive",
            Issue::Unaccompanied { .. } => "unaccompanied",
            Issue::UnaccompaniedByAny { .. } => "unaccompanied_by_any",
            Issue::RangeAsUncertainty { .. } => "range_as_uncertainty",
            Issue::Repeated { .. } => "repeated",
            Issue::DepthRefInverted { .. } => "depth_ref_inverted",
            Issue::AgeInversions { .. } => "age_inversions",
            Issue::PossibleHiatus { .. } => "possible_hiatus",
            Issue::EventFieldsMissing { .. } => "event_fields_missing",
            Issue::EventFieldsUnexpected { .. } => "event_fields_unexpected",
            Issue::UnknownEntities { .. } => "unknown_entities",
            Issue::HiatusMismatch { .. } => "hiatus_mismatch",
            Issue::Rule { rule, .. } => *rule,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Issue::Missing { .. } | Issue::EventFieldsMissing { .. } => Category::Presence,
            Issue::NotNumeric { .. } => Category::Format,
            Issue::OutOfRange { .. }
            | Issue::NotPositive { .. }
            | Issue::RangeAsUncertainty { .. } => Category::Range,
            Issue::NotInVocabulary { .. } => Category::Terminology,
            Issue::Unaccompanied { .. }
            | Issue::UnaccompaniedByAny { .. }
            | Issue::Repeated { .. }
            | Issue::EventFieldsUnexpected { .. } => Category::Consistency,
            Issue::DepthRefInverted { .. }
            | Issue::AgeInversions { .. }
            | Issue::PossibleHiatus { .. } => Category::Chronology,
            Issue::UnknownEntities { .. } | Issue::HiatusMismatch { .. } => {
                Category::CrossReference
            }
            Issue::Rule { category, .. } => *category,
        }
    }

    /// Spreadsheet rows the issue cites.
    pub fn rows(&self) -> Vec<usize> {
        match self {
            Issue::Missing { rows, .. }
            | Issue::NotNumeric { rows, .. }
            | Issue::OutOfRange { rows, .. }
            | Issue::NotInVocabulary { rows, .. }
            | Issue::NotPositive { rows, .. }
            | Issue::Unaccompanied { rows, .. }
            | Issue::UnaccompaniedByAny { rows, .. }
            | Issue::RangeAsUncertainty { rows, .. }
            | Issue::EventFieldsMissing { rows, .. }
            | Issue::EventFieldsUnexpected { rows, .. }
            | Issue::Rule { rows, .. } => rows.clone(),
            Issue::Repeated { repetitions, .. } => {
                let mut rows: Vec<usize> = repetitions
                    .iter()
                    .flat_map(|repetition| repetition.rows.iter().copied())
                    .collect();
                rows.sort_unstable();
                rows
            }
            _ => Vec::new(),
        }
    }

    /// Message text, without the sheet prefix.
    pub fn message(&self) -> String {
        match self {
            Issue::Missing { column, rows } => format!(
                "{column}; {} row(s) missing. row: {}",
                rows.len(),
                join_rows(rows)
            ),
            Issue::NotNumeric { column, rows } => format!(
                "{column}; {} row(s) not a number. row: {}",
                rows.len(),
                join_rows(rows)
            ),
            Issue::OutOfRange {
                column,
                min,
                max,
                rows,
            } => format!(
                "{column}; {} row(s) not within the valid range (>={min:.2} and <={max:.2}) or not a number. row: {}",
                rows.len(),
                join_rows(rows)
            ),
            Issue::NotInVocabulary { column, rows } => format!(
                "{column}; {} row(s) contain values not in the dropdown list. row: {}",
                rows.len(),
                join_rows(rows)
            ),
            Issue::NotPositive { column, rows } => format!(
                "{column}; {} row(s) not a positive number. row: {}",
                rows.len(),
                join_rows(rows)
            ),
            Issue::Unaccompanied {
                independent,
                dependent,
                rows,
            } => format!(
                "{} row(s) have {dependent} but no {independent}. row: {}",
                rows.len(),
                join_rows(rows)
            ),
            Issue::UnaccompaniedByAny {
                independents,
                dependent,
                rows,
            } => format!(
                "{} row(s) have {dependent} but none of {}. row: {}",
                rows.len(),
                independents.join(" or "),
                join_rows(rows)
            ),
            Issue::RangeAsUncertainty {
                entity,
                age,
                upper,
                lower,
                rows,
            } => format!(
                "Entity {entity}; {upper} and {lower} look like a min/max range around {age} instead of uncertainties in {} row(s). row: {}",
                rows.len(),
                join_rows(rows)
            ),
            Issue::Repeated {
                entity,
                column,
                repetitions,
            } => {
                let listed: Vec<String> = repetitions
                    .iter()
                    .map(|repetition| {
                        format!("{} (row: {})", repetition.value, join_rows(&repetition.rows))
                    })
                    .collect();
                format!(
                    "Entity {entity}; the following {column} occur more than once: {}",
                    listed.join("; ")
                )
            }
            Issue::DepthRefInverted { entity } => {
                format!("Entity {entity}; depth_ref is likely wrong (all ages are inverted)")
            }
            Issue::AgeInversions {
                entity,
                depth,
                pairs,
            } => format!(
                "Entity {entity}; age inversion at the following paired {depth}: {}",
                join_pairs(pairs)
            ),
            Issue::PossibleHiatus {
                entity,
                depth,
                pairs,
            } => format!(
                "Entity {entity}; possible unaccounted hiatus between the following paired {depth}: {}",
                join_pairs(pairs)
            ),
            Issue::EventFieldsMissing {
                event,
                columns,
                rows,
            } => format!(
                "for {event}, {} should be filled in but is empty. row: {}",
                join_names(columns),
                join_rows(rows)
            ),
            Issue::EventFieldsUnexpected {
                event,
                columns,
                rows,
            } => format!(
                "for {event}, columns which must be empty are filled in: {}. row: {}",
                join_names(columns),
                join_rows(rows)
            ),
            Issue::UnknownEntities { names, found_in } => format!(
                "Entity {} missing from the list (found in the {found_in} sheet)",
                join_names(names)
            ),
            Issue::HiatusMismatch {
                entity,
                depths,
                missing_from,
            } => format!(
                "Entity {entity}; hiatus depth(s) {} have no matching hiatus in the {missing_from} sheet",
                depths.join(", ")
            ),
            Issue::Rule { message, .. } => message.clone(),
        }
    }
}

/// An issue located on a sheet, with its severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub table: TableKind,
    pub issue: Issue,
}

impl Diagnostic {
    pub fn new(severity: Severity, table: TableKind, issue: Issue) -> Self {
        Self {
            severity,
            table,
            issue,
        }
    }

    pub fn counts(&self) -> bool {
        self.severity.counts()
    }

    /// Transcript line, e.g. `Sample data tab: depth_sample; 1 row(s) missing. row: 4`.
    pub fn message(&self) -> String {
        let body = format!("{} tab: {}", self.table, self.issue.message());
        match self.severity {
            Severity::Warning => body,
            Severity::Informative => format!("Informative: {body}"),
            Severity::Note => format!("Note: {body}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
