//! Semicolon-delimited flat file reading.

use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Reads a semicolon-delimited file with a header row into a DataFrame.
///
/// Column types are inferred over the whole file so that numeric columns
/// reach the temporal normalizer as numbers.
pub fn read_flat_file(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|parse_options| parse_options.with_separator(b';'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_semicolon_file() {
        let file = create_temp_csv("Episodio;Fecha Ingreso;Servicio\n1001;44927;UCI\n1002;44928.5;PEDIATRIA\n");
        let df = read_flat_file(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        assert!(df.column("Fecha Ingreso").unwrap().dtype().is_float());
        assert_eq!(df.column("Servicio").unwrap().dtype(), &DataType::String);
    }
}
