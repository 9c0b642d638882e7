//! End-to-end ingestion: load, clean, normalize, write.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{error, info, info_span};

use crate::columns::{drop_empty, normalize_column_names};
use crate::error::{IngestError, Result};
use crate::options::IngestOptions;
use crate::source::load_table;
use crate::summary::IngestSummary;
use crate::temporal::{ColumnOutcome, normalize_temporal_columns};

/// Result of a successful ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub output_file: PathBuf,
    /// Worksheet that was processed; `None` for flat-file input.
    pub processed_sheet: Option<String>,
    pub rows: usize,
    /// Normalized output column names, in order.
    pub columns: Vec<String>,
    pub temporal: Vec<ColumnOutcome>,
}

/// Default output path: `<input-stem>_processed.csv` beside the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_processed.csv"))
}

/// Writes `df` as a UTF-8, semicolon-delimited CSV with a header row.
///
/// Null cells are written as empty fields.
pub fn write_flat_file(df: &mut DataFrame, path: &Path) -> Result<()> {
    let write_error = |message: String| IngestError::Write {
        path: path.to_path_buf(),
        message,
    };
    let mut file = File::create(path).map_err(|e| write_error(e.to_string()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b';')
        .finish(df)
        .map_err(|e| write_error(e.to_string()))
}

/// Runs the whole ingestion pipeline for one file.
pub fn process_file(
    input: &Path,
    output: Option<&Path>,
    options: &IngestOptions,
) -> Result<IngestOutcome> {
    let span = info_span!("ingest", input = %input.display());
    let _guard = span.enter();

    if !input.exists() {
        return Err(IngestError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let loaded = load_table(input, options)?;
    info!(
        rows = loaded.frame.height(),
        columns = loaded.frame.width(),
        "source table loaded"
    );

    let frame = if options.drop_empty {
        drop_empty(&loaded.frame)?
    } else {
        loaded.frame
    };
    let (frame, temporal) = normalize_temporal_columns(&frame)?;
    let mut frame = normalize_column_names(&frame)?;

    let output_file = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
    write_flat_file(&mut frame, &output_file)?;

    let columns = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    info!(
        output = %output_file.display(),
        rows = frame.height(),
        "ingestion complete"
    );

    Ok(IngestOutcome {
        output_file,
        processed_sheet: loaded.sheet,
        rows: frame.height(),
        columns,
        temporal,
    })
}

/// Runs [`process_file`] and folds the result into a summary. Never fails.
pub fn run_ingest(input: &Path, output: Option<&Path>, options: &IngestOptions) -> IngestSummary {
    match process_file(input, output, options) {
        Ok(outcome) => IngestSummary::succeeded(&outcome),
        Err(err) => {
            error!(input = %input.display(), error = %err, "ingestion failed");
            IngestSummary::failed(&err)
        }
    }
}
