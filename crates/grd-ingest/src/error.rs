//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during ingestion.
///
/// Cell- and column-level conversion problems never surface here; the
/// temporal normalizer absorbs them and keeps the original values.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file does not exist.
    #[error("the file '{}' does not exist", path.display())]
    InputNotFound { path: PathBuf },

    /// Failed to write the output file.
    #[error("failed to write CSV file {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    // === Workbook Errors ===
    /// The spreadsheet library could not open or read the workbook.
    #[error("failed to read workbook {}: {message}", path.display())]
    Workbook { path: PathBuf, message: String },

    /// The requested worksheet is not present.
    #[error("sheet '{sheet}' does not exist. Available sheets: {}", available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// The workbook contains no worksheets.
    #[error("workbook {} contains no sheets", path.display())]
    EmptyWorkbook { path: PathBuf },

    /// The selected worksheet has no header row.
    #[error("sheet '{sheet}' is empty")]
    EmptySheet { sheet: String },

    // === Flat File Errors ===
    /// Failed to parse the semicolon-delimited input.
    #[error("failed to parse CSV {}: {message}", path.display())]
    CsvParse { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
