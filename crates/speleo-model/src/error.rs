use thiserror::Error;

use crate::table::TableKind;

/// Columns a sheet lacks relative to the version-12 schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns {
    pub table: TableKind,
    pub columns: Vec<&'static str>,
}

/// Workbook shape problems that stop validation before any content check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    // === Sheet Errors ===
    #[error("cannot read the \"{sheet}\" sheet; the workbook has no sheet with that name")]
    MissingSheet { sheet: &'static str },

    #[error("found {count} \"Sample data\" sheets; a workbook may only contain one")]
    MultipleSampleSheets { count: usize },

    #[error("workbook is likely not version 12; missing columns: {}", describe(.missing))]
    MissingColumns { missing: Vec<MissingColumns> },

    // === Row Errors ===
    #[error("Site metadata tab: expected exactly one site, found {rows} row(s)")]
    SiteRowCount { rows: usize },

    #[error("Entity metadata tab: there are no entities in this workbook")]
    NoEntities,

    #[error("Entity metadata tab: entity_name must be unique; repeated: {}", .names.join(", "))]
    DuplicateEntityNames { names: Vec<String> },
}

fn describe(missing: &[MissingColumns]) -> String {
    missing
        .iter()
        .map(|entry| format!("{} [{}]", entry.table, entry.columns.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, StructuralError>;
