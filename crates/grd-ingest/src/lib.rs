//! Hospital discharge dataset ingestion.
//!
//! This crate turns a spreadsheet workbook or a semicolon-delimited flat file
//! into a normalized, semicolon-delimited CSV ready for anonymization and
//! querying.
//!
//! # Features
//!
//! - **Sheet Selection**: Pick the requested worksheet, a known form-response
//!   sheet, or fall back to the first worksheet
//! - **Temporal Normalization**: Detect native date/times, spreadsheet serial
//!   numbers and ISO text, and rewrite them as `DD/MM/YYYY[ HH:MM:SS]`
//! - **Column Normalization**: Lower-case, underscore-separated column names
//! - **Summary**: A machine-readable JSON outcome for calling processes
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use grd_ingest::{IngestOptions, run_ingest};
//!
//! let summary = run_ingest(Path::new("Gestion Estadia.xlsm"), None, &IngestOptions::default());
//! println!("{}", summary.to_json_pretty()?);
//! ```

mod columns;
mod error;
mod numeric;
mod options;
mod pipeline;
mod source;
mod summary;
pub mod temporal;

// === Error Types ===
pub use error::{IngestError, Result};

// === Configuration ===
pub use options::{DEFAULT_PREFERRED_SHEETS, IngestOptions};

// === Loading ===
pub use source::{InputKind, LoadedTable, load_table, read_flat_file, read_workbook, select_sheet};

// === Column Handling ===
pub use columns::{drop_empty, normalize_column_name, normalize_column_names, unique_names};
pub use numeric::format_numeric;

// === Temporal Normalization ===
pub use temporal::{ColumnOutcome, EncodingClass, normalize_temporal_columns};

// === Pipeline ===
pub use pipeline::{IngestOutcome, default_output_path, process_file, run_ingest, write_flat_file};
pub use summary::IngestSummary;
