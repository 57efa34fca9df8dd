//! Loading a whole workbook directory.

use std::path::Path;

use speleo_model::Workbook;
use tracing::info;

use crate::csv_sheet::{IngestOptions, read_sheet};
use crate::discovery::{discover_sheets, list_csv_files};
use crate::error::Result;

/// Loads every sheet of a workbook directory and runs the structural gate.
pub fn load_workbook(dir: &Path, options: IngestOptions) -> Result<Workbook> {
    let files = list_csv_files(dir)?;
    let sheet_files = discover_sheets(&files)?;

    let sheets = sheet_files
        .iter()
        .map(|file| read_sheet(&file.path, file.kind, options))
        .collect::<Result<Vec<_>>>()?;

    let workbook = Workbook::from_sheets(sheets)?;
    info!(
        workbook = %dir.display(),
        entities = workbook.entity().len(),
        samples = workbook.sample().len(),
        dates = workbook.dating().len(),
        "workbook loaded"
    );
    Ok(workbook)
}
