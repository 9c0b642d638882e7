//! Source file loading.

mod flat;
mod workbook;

use std::path::Path;

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::options::IngestOptions;

pub use flat::read_flat_file;
pub use workbook::{read_workbook, select_sheet};

/// Kind of source file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Semicolon-delimited flat file (`.csv`, `.txt`).
    FlatFile,
    /// Spreadsheet workbook (`.xlsx`, `.xlsm`, `.xls`, `.ods`, ...).
    Workbook,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv" | "txt") => Self::FlatFile,
            _ => Self::Workbook,
        }
    }
}

/// A raw table loaded from a source file.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub frame: DataFrame,
    /// Worksheet the table came from; `None` for flat files.
    pub sheet: Option<String>,
}

/// Loads the source table, dispatching on the input kind.
pub fn load_table(path: &Path, options: &IngestOptions) -> Result<LoadedTable> {
    match InputKind::from_path(path) {
        InputKind::FlatFile => Ok(LoadedTable {
            frame: read_flat_file(path)?,
            sheet: None,
        }),
        InputKind::Workbook => {
            let (frame, sheet) = read_workbook(path, options)?;
            Ok(LoadedTable {
                frame,
                sheet: Some(sheet),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind_from_extension() {
        assert_eq!(InputKind::from_path(Path::new("egresos.csv")), InputKind::FlatFile);
        assert_eq!(InputKind::from_path(Path::new("EGRESOS.CSV")), InputKind::FlatFile);
        assert_eq!(InputKind::from_path(Path::new("gestion.xlsm")), InputKind::Workbook);
        assert_eq!(InputKind::from_path(Path::new("sin_extension")), InputKind::Workbook);
    }
}
