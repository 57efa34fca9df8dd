//! CSV reading and writing of workbook sheets.
//!
//! Sheets exported from the workbook start with a free-text description row,
//! then the header row, then data. Blank rows are dropped but still counted,
//! so every kept row keeps the row number the submitter sees in the
//! spreadsheet.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use speleo_model::{Sheet, TableKind, Value};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Options for reading sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Rows above the header row.
    pub skip_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { skip_rows: 1 }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// Spreadsheet row number of the first record after the header.
    fn first_data_row(self) -> usize {
        self.skip_rows + 2
    }
}

fn normalize_header(raw: &str, index: usize) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        format!("unnamed_{index}")
    } else {
        trimmed.to_string()
    }
}

/// Reads a sheet from a CSV file.
pub fn read_sheet(path: &Path, kind: TableKind, options: IngestOptions) -> Result<Sheet> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let sheet = parse_records(reader, kind, options).map_err(|err| match err {
        ParseError::Csv(source) => IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        },
        ParseError::NoHeader => IngestError::MissingHeader {
            path: path.to_path_buf(),
        },
    })?;
    debug!(
        sheet = kind.sheet_name(),
        file = %path.display(),
        rows = sheet.len(),
        columns = sheet.columns().len(),
        "loaded sheet"
    );
    Ok(sheet)
}

/// Reads a sheet from any CSV source, e.g. an in-memory buffer.
pub fn read_sheet_from<R: Read>(
    input: R,
    kind: TableKind,
    options: IngestOptions,
) -> Result<Sheet> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    parse_records(reader, kind, options).map_err(|err| match err {
        ParseError::Csv(source) => IngestError::CsvParse {
            path: kind.sheet_name().into(),
            source,
        },
        ParseError::NoHeader => IngestError::MissingHeader {
            path: kind.sheet_name().into(),
        },
    })
}

enum ParseError {
    Csv(csv::Error),
    NoHeader,
}

fn parse_records<R: Read>(
    mut reader: csv::Reader<R>,
    kind: TableKind,
    options: IngestOptions,
) -> std::result::Result<Sheet, ParseError> {
    let mut records = reader.records();

    for _ in 0..options.skip_rows {
        if records.next().transpose().map_err(ParseError::Csv)?.is_none() {
            return Err(ParseError::NoHeader);
        }
    }
    let header = records
        .next()
        .transpose()
        .map_err(ParseError::Csv)?
        .ok_or(ParseError::NoHeader)?;
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_header(raw, index))
        .collect();

    let mut sheet = Sheet::new(kind, columns);
    let first_row = options.first_data_row();
    for (offset, record) in records.enumerate() {
        let record = record.map_err(ParseError::Csv)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let cells = record.iter().map(Value::from_raw).collect();
        sheet.push_row(first_row + offset, cells);
    }
    Ok(sheet)
}

/// Writes a sheet in the same layout it is read from: a description row,
/// the header row, then one record per row.
pub fn write_sheet(path: &Path, sheet: &Sheet, description: &str) -> Result<()> {
    let to_err = |source| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(to_err)?;

    writer.write_record([description]).map_err(to_err)?;
    writer.write_record(sheet.columns()).map_err(to_err)?;
    for row in sheet.rows() {
        writer
            .write_record(row.cells.iter().map(Value::to_string))
            .map_err(to_err)?;
    }
    writer
        .flush()
        .map_err(|source| to_err(csv::Error::from(source)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use speleo_model::FIRST_DATA_ROW;

    #[test]
    fn default_layout_starts_at_row_three() {
        assert_eq!(IngestOptions::default().first_data_row(), FIRST_DATA_ROW);
        assert_eq!(IngestOptions::default().with_skip_rows(0).first_data_row(), 2);
    }

    #[test]
    fn unnamed_headers_get_positional_names() {
        assert_eq!(normalize_header(" depth_sample ", 1), "depth_sample");
        assert_eq!(normalize_header("", 4), "unnamed_4");
    }
}
