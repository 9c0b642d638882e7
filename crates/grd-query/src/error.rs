//! Error types for record queries.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while querying a dataset.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Dataset file does not exist.
    #[error("dataset file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Dataset has no header row.
    #[error("dataset {} has no header row", path.display())]
    EmptyFile { path: PathBuf },

    /// Failed to read CSV records.
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// I/O failure while exporting.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A key column is not in the header row.
    #[error("required column '{header}' not found in header row")]
    MissingHeader { header: String },

    /// Failed to serialize records.
    #[error("failed to export records to {}: {message}", path.display())]
    Export { path: PathBuf, message: String },
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::MissingHeader {
            header: "Servicio Ingreso (Descripción)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "required column 'Servicio Ingreso (Descripción)' not found in header row"
        );

        let err = QueryError::FileNotFound {
            path: PathBuf::from("egresos.csv"),
        };
        assert_eq!(err.to_string(), "dataset file not found: egresos.csv");
    }
}
