//! Whole-workbook normalization.

use std::collections::BTreeSet;

use speleo_model::{TableKind, Workbook};
use tracing::{debug, warn};

use crate::chem_year::ChemYearIndex;
use crate::epoch::{ChemYearSource, Normalized, normalize_ages};

/// The age-bearing sheets of a workbook rewritten onto `BP (1950)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWorkbook {
    pub sample: Normalized,
    pub lamina: Normalized,
    pub dating: Normalized,
}

impl NormalizedWorkbook {
    pub fn tables(&self) -> [(TableKind, &Normalized); 3] {
        [
            (TableKind::Sample, &self.sample),
            (TableKind::Lamina, &self.lamina),
            (TableKind::Dating, &self.dating),
        ]
    }

    /// Entities left (partly) in `Year of chemistry`, across all sheets.
    pub fn unresolved(&self) -> BTreeSet<&str> {
        self.tables()
            .into_iter()
            .flat_map(|(_, table)| table.unresolved.iter().map(String::as_str))
            .collect()
    }
}

pub fn normalize_workbook(workbook: &Workbook) -> NormalizedWorkbook {
    let chem_years = ChemYearIndex::from_dating(workbook.dating());
    let entity_years = ChemYearSource::Entity(&chem_years);

    let normalized = NormalizedWorkbook {
        sample: normalize_ages(workbook.sample(), "interp_age", entity_years),
        lamina: normalize_ages(workbook.lamina(), "lam_age", entity_years),
        dating: normalize_ages(workbook.dating(), "corr_age", ChemYearSource::Row),
    };

    for (kind, table) in normalized.tables() {
        debug!(
            sheet = kind.sheet_name(),
            converted = table.converted,
            "normalized ages to BP (1950)"
        );
        for entity in &table.unresolved {
            warn!(
                sheet = kind.sheet_name(),
                entity = %entity,
                "chem_year unresolved; rows kept in Year of chemistry"
            );
        }
    }
    normalized
}
