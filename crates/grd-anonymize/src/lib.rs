//! Synthetic identity generation for discharge datasets.
//!
//! Replaces patient names and national identifiers with synthetic values
//! while keeping every other field intact.
//!
//! # Features
//!
//! - **National Identifiers**: Mod-11 checksum, `NN.NNN.NNN-C` formatting and
//!   validation
//! - **Name Synthesis**: Sex-conditioned forenames with two distinct surnames
//! - **Uniqueness**: A per-run context that never issues the same identifier
//!   twice and fails loudly when it cannot find a fresh one
//! - **Anonymization Pass**: Row-wise rewrite of a semicolon-delimited file
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use grd_anonymize::{AnonymizeOptions, anonymize_file};
//!
//! let report = anonymize_file(Path::new("egresos_processed.csv"), None, &AnonymizeOptions::default())?;
//! println!("{} identifiers issued", report.identifiers_issued);
//! ```

mod error;
mod names;
mod national_id;
mod rewrite;
mod synthesizer;

// === Error Types ===
pub use error::{AnonymizeError, Result};

// === National Identifier ===
pub use national_id::{BODY_MAX, BODY_MIN, NationalId, check_digit, is_valid_identifier};

// === Name Synthesis ===
pub use names::{FEMALE_NAMES, MALE_NAMES, SURNAMES, Sex};
pub use synthesizer::{DEFAULT_MAX_ATTEMPTS, IdentitySynthesizer};

// === Anonymization Pass ===
pub use rewrite::{AnonymizeOptions, AnonymizeReport, anonymize_file, default_output_path};
