//! Error types for workbook ingestion.

use std::path::PathBuf;

use speleo_model::StructuralError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("workbook directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("sheet {path} has no header row")]
    MissingHeader { path: PathBuf },

    // === DataFrame Errors ===
    #[error("failed to read column {column} from frame: {message}")]
    Frame { column: String, message: String },

    // === Workbook Errors ===
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
