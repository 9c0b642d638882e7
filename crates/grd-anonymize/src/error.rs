//! Error types for the anonymization stage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while synthesizing identities.
#[derive(Debug, Error)]
pub enum AnonymizeError {
    /// Source file does not exist.
    #[error("the file '{}' does not exist", path.display())]
    InputNotFound { path: PathBuf },

    /// Failed to read or write CSV records.
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to flush or create the output file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A column the pass needs is not in the header row.
    #[error("required column '{header}' not found in header row")]
    MissingHeader { header: String },

    /// No fresh identifier was found within the retry budget.
    #[error("could not issue a unique identifier after {attempts} attempts")]
    IdentifierSpaceExhausted { attempts: u32 },

    /// Text that is not a well-formed identifier with a matching check character.
    #[error("invalid national identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },
}

/// Result type for anonymization operations.
pub type Result<T> = std::result::Result<T, AnonymizeError>;
