use std::path::PathBuf;

use serde::Serialize;
use speleo_model::TableKind;
use speleo_validate::{ValidationReport, Verdict};

/// Result of `speleo check`.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub workbook: PathBuf,
    /// RFC 3339 time of the run.
    pub checked_at: String,
    pub verdict: Verdict,
    pub warnings: usize,
    pub report: ValidationReport,
}

impl CheckResult {
    pub fn accepted(&self) -> bool {
        self.verdict == Verdict::Accept
    }
}

/// One sheet written by `speleo normalize`.
#[derive(Debug, Serialize)]
pub struct WrittenSheet {
    pub table: TableKind,
    pub path: PathBuf,
    pub rows: usize,
    /// Rows whose age was rewritten onto `BP (1950)`.
    pub converted: usize,
}

/// Result of `speleo normalize`.
#[derive(Debug, Serialize)]
pub struct NormalizeResult {
    pub output_dir: PathBuf,
    pub verdict: Verdict,
    pub forced: bool,
    pub sheets: Vec<WrittenSheet>,
    /// Entities whose `Year of chemistry` ages could not be converted.
    pub unresolved: Vec<String>,
}
