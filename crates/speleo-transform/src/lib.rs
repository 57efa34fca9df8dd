//! Age normalization for speleothem workbooks.
//!
//! - **epoch**: single-age conversion and per-sheet rewriting onto `BP (1950)`
//! - **chem_year**: per-entity year of chemistry drawn from dating rows
//! - **workbook**: normalization of every age-bearing sheet at once

pub mod chem_year;
pub mod epoch;
pub mod workbook;

pub use chem_year::ChemYearIndex;
pub use epoch::{
    CHEM_YEAR_COLUMN, ChemYearSource, Normalized, REFERENCE_COLUMN, normalize_ages,
    normalize_calendar_ages, to_bp1950,
};
pub use workbook::{NormalizedWorkbook, normalize_workbook};
