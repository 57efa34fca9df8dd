//! Workbook sheet identities and their column schemas (workbook version 12).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The six sheets of a speleothem workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Site,
    Entity,
    References,
    Dating,
    Lamina,
    Sample,
}

const SITE_COLUMNS: &[&str] = &[
    "site_name",
    "latitude",
    "longitude",
    "elevation",
    "geology",
    "rock_age",
    "monitoring",
];

const ENTITY_COLUMNS: &[&str] = &[
    "entity_name",
    "one_and_only",
    "entity_status_info",
    "entity_status_notes",
    "depth_ref",
    "cover_thickness",
    "distance_entrance",
    "speleothem_type",
    "drip_type",
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
    "contact",
    "data_DOI_URL",
];

const REFERENCE_COLUMNS: &[&str] = &["entity_name", "citation", "publication_DOI"];

const DATING_COLUMNS: &[&str] = &[
    "entity_name",
    "date_type",
    "depth_dating",
    "dating_thickness",
    "lab_num",
    "material_dated",
    "min_weight",
    "max_weight",
    "uncorr_age",
    "uncorr_age_uncert_pos",
    "uncorr_age_uncert_neg",
    "14C_correction",
    "calib_used",
    "date_used",
    "238U_content",
    "238U_uncertainty",
    "232Th_content",
    "232Th_uncertainty",
    "230Th_content",
    "230Th_uncertainty",
    "230Th_232Th_ratio",
    "230Th_232Th_ratio_uncertainty",
    "230Th_238U_activity",
    "230Th_238U_activity_uncertainty",
    "234U_238U_activity",
    "234U_238U_activity_uncertainty",
    "decay_constant",
    "ini_230Th_232Th_ratio",
    "ini_230Th_232Th_ratio_uncertainty",
    "corr_age",
    "corr_age_uncert_pos",
    "corr_age_uncert_neg",
    "modern_reference",
    "chem_year",
];

const LAMINA_COLUMNS: &[&str] = &[
    "entity_name",
    "depth_lam",
    "lam_thickness",
    "lam_age",
    "lam_age_uncert_pos",
    "lam_age_uncert_neg",
    "modern_reference",
];

const SAMPLE_COLUMNS: &[&str] = &[
    "entity_name",
    "depth_sample",
    "hiatus",
    "gap",
    "mineralogy",
    "arag_corr",
    "interp_age",
    "interp_age_uncert_pos",
    "interp_age_uncert_neg",
    "age_model_type",
    "modern_reference",
    "ann_lam_check",
    "dep_rate_check",
    "sample_thickness",
    "d13C_measurement",
    "d13C_precision",
    "d18O_measurement",
    "d18O_precision",
    "iso_std",
];

impl TableKind {
    pub const ALL: [TableKind; 6] = [
        TableKind::Site,
        TableKind::Entity,
        TableKind::References,
        TableKind::Dating,
        TableKind::Lamina,
        TableKind::Sample,
    ];

    /// Name of the sheet as it appears in the workbook.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            TableKind::Site => "Site metadata",
            TableKind::Entity => "Entity metadata",
            TableKind::References => "References",
            TableKind::Dating => "Dating information",
            TableKind::Lamina => "Lamina age vs depth",
            TableKind::Sample => "Sample data",
        }
    }

    /// Columns every version-12 workbook carries for this sheet.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Site => SITE_COLUMNS,
            TableKind::Entity => ENTITY_COLUMNS,
            TableKind::References => REFERENCE_COLUMNS,
            TableKind::Dating => DATING_COLUMNS,
            TableKind::Lamina => LAMINA_COLUMNS,
            TableKind::Sample => SAMPLE_COLUMNS,
        }
    }

    /// Whether rows of this sheet belong to an entity through `entity_name`.
    pub fn is_entity_scoped(&self) -> bool {
        !matches!(self, TableKind::Site | TableKind::Entity)
    }

    pub fn from_sheet_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.sheet_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sheet_name(s).ok_or_else(|| format!("Unknown workbook sheet: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_round_trip() {
        for kind in TableKind::ALL {
            assert_eq!(kind.sheet_name().parse::<TableKind>(), Ok(kind));
        }
        assert_eq!(
            TableKind::from_sheet_name("dating information"),
            Some(TableKind::Dating)
        );
        assert!("Notes".parse::<TableKind>().is_err());
    }

    #[test]
    fn entity_scoped_tables() {
        assert!(!TableKind::Site.is_entity_scoped());
        assert!(!TableKind::Entity.is_entity_scoped());
        assert!(TableKind::Sample.is_entity_scoped());
        assert!(TableKind::Dating.required_columns().contains(&"chem_year"));
    }
}
