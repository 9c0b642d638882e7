//! Record extraction over anonymized discharge datasets.
//!
//! Every query re-reads the flat file from the start; nothing is indexed
//! between calls.
//!
//! # Features
//!
//! - **Header Contract**: Semantic fields resolved by header name once, at
//!   load time, failing fast when a key column is missing
//! - **Point Lookups**: By national identifier or episode id, stopping at the
//!   first match
//! - **Filters**: Service and diagnosis substrings, inclusive age ranges and
//!   bounded samples
//! - **Statistics**: Counts by sex and distinct services, diagnoses and years
//! - **Export**: Pretty-printed JSON with non-ASCII text kept literal
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use grd_query::{Criteria, RecordExtractor};
//!
//! let extractor = RecordExtractor::open(Path::new("egresos_anonymized.csv"))?;
//! let records = extractor.query(&Criteria::Service("NEONATOLOGIA".into()))?;
//! ```

mod error;
mod export;
mod extractor;
mod layout;
mod record;
mod stats;

// === Error Types ===
pub use error::{QueryError, Result};

// === Header Contract ===
pub use layout::{ColumnMap, Field, FieldLayout};

// === Records ===
pub use record::PatientRecord;

// === Queries ===
pub use extractor::{Criteria, DEFAULT_SAMPLE_SIZE, Lookup, RecordExtractor};
pub use stats::DatasetStatistics;

// === Export ===
pub use export::{export_record, export_records, records_to_json};
