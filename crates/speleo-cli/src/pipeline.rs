//! The check and normalize workflows behind the subcommands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use speleo_ingest::{IngestOptions, load_workbook, write_sheet};
use speleo_model::Workbook;
use speleo_transform::normalize_workbook;
use speleo_validate::{Verdict, validate};
use tracing::{info, info_span};

use crate::types::{CheckResult, NormalizeResult, WrittenSheet};

/// Description row written above the header of normalized sheets.
pub const NORMALIZED_DESCRIPTION: &str = "Ages normalized to BP (1950)";

/// Directory name used when `--output-dir` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "normalized";

pub fn load(dir: &Path, options: IngestOptions) -> Result<Workbook> {
    load_workbook(dir, options).with_context(|| format!("load workbook {}", dir.display()))
}

/// Validates an already loaded workbook.
pub fn check_workbook(workbook: &Workbook, path: &Path) -> CheckResult {
    let report = validate(workbook);
    CheckResult {
        workbook: path.to_path_buf(),
        checked_at: Utc::now().to_rfc3339(),
        verdict: report.verdict(),
        warnings: report.warning_count(),
        report,
    }
}

pub fn run_check(dir: &Path, options: IngestOptions) -> Result<CheckResult> {
    let span = info_span!("check", workbook = %dir.display());
    let _guard = span.enter();
    let workbook = load(dir, options)?;
    Ok(check_workbook(&workbook, dir))
}

/// Writes the JSON report of a check.
pub fn write_report(path: &Path, result: &CheckResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))
}

/// What `speleo normalize` did.
#[derive(Debug)]
pub enum NormalizeOutcome {
    Written(NormalizeResult),
    /// The workbook has warnings and `--force` was not given.
    Refused { warnings: usize },
}

pub fn run_normalize(
    dir: &Path,
    output_dir: Option<&Path>,
    force: bool,
    options: IngestOptions,
) -> Result<NormalizeOutcome> {
    let span = info_span!("normalize", workbook = %dir.display());
    let _guard = span.enter();

    let workbook = load(dir, options)?;
    let report = validate(&workbook);
    let verdict = report.verdict();
    if verdict != Verdict::Accept && !force {
        return Ok(NormalizeOutcome::Refused {
            warnings: report.warning_count(),
        });
    }

    let output_dir = output_dir.map_or_else(|| dir.join(DEFAULT_OUTPUT_DIR), Path::to_path_buf);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let normalized = normalize_workbook(&workbook);
    let mut sheets = Vec::new();
    for (table, result) in normalized.tables() {
        let path = output_dir.join(format!("{}.csv", table.sheet_name()));
        write_sheet(&path, &result.sheet, NORMALIZED_DESCRIPTION)
            .with_context(|| format!("write {}", path.display()))?;
        info!(
            sheet = table.sheet_name(),
            rows = result.sheet.len(),
            converted = result.converted,
            "normalized sheet written"
        );
        sheets.push(WrittenSheet {
            table,
            path,
            rows: result.sheet.len(),
            converted: result.converted,
        });
    }

    Ok(NormalizeOutcome::Written(NormalizeResult {
        output_dir,
        verdict,
        forced: force && verdict != Verdict::Accept,
        sheets,
        unresolved: normalized
            .unresolved()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }))
}
