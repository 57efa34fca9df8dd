//! Sheet file discovery.
//!
//! A workbook on disk is a directory with one CSV per sheet, each file named
//! after its sheet (`Site metadata.csv`, `Dating information.csv`, ...).

use std::path::{Path, PathBuf};

use speleo_model::{StructuralError, TableKind};
use tracing::debug;

use crate::error::{IngestError, Result};

/// A CSV file matched to a workbook sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFile {
    pub kind: TableKind,
    pub path: PathBuf,
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| IngestError::DirectoryRead {
                path: dir.to_path_buf(),
                source,
            })?
            .path();

        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Classifies a file stem as a workbook sheet.
///
/// Any stem containing `Sample data` is a sample sheet; the others must match
/// their sheet name (case-insensitive).
pub fn classify_sheet(stem: &str) -> Option<TableKind> {
    if stem.contains(TableKind::Sample.sheet_name()) {
        return Some(TableKind::Sample);
    }
    TableKind::from_sheet_name(stem)
}

/// Matches CSV files to sheets.
///
/// Unrelated files (a `Notes.csv`, say) are ignored. More than one sample
/// sheet is a structural error; missing sheets are left for the caller.
pub fn discover_sheets(files: &[PathBuf]) -> Result<Vec<SheetFile>> {
    let mut found = Vec::new();
    for path in files {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        match classify_sheet(stem) {
            Some(kind) => found.push(SheetFile {
                kind,
                path: path.clone(),
            }),
            None => debug!(file = %path.display(), "ignoring file that is not a workbook sheet"),
        }
    }

    let samples = found
        .iter()
        .filter(|file| file.kind == TableKind::Sample)
        .count();
    if samples > 1 {
        return Err(StructuralError::MultipleSampleSheets { count: samples }.into());
    }
    Ok(found)
}
