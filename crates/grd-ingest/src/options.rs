//! Configuration options for ingestion.

use serde::{Deserialize, Serialize};

/// Worksheet names tried, in order, when no sheet is requested explicitly.
pub const DEFAULT_PREFERRED_SHEETS: [&str; 4] = [
    "Respuestas Formulario",
    "Respuesta Formulario",
    "respuestas formulario",
    "respuesta formulario",
];

/// Options controlling how a source file is ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Worksheet to process. When set, it must exist in the workbook.
    pub sheet: Option<String>,

    /// Worksheet names tried in priority order when `sheet` is not set.
    ///
    /// Matched exactly first, then case-insensitively. If none matches the
    /// first worksheet is used.
    pub preferred_sheets: Vec<String>,

    /// Drop rows and columns that contain no values at all.
    pub drop_empty: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            preferred_sheets: DEFAULT_PREFERRED_SHEETS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            drop_empty: true,
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a specific worksheet.
    #[must_use]
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    /// Replace the preferred worksheet list.
    #[must_use]
    pub fn with_preferred_sheets(mut self, sheets: Vec<String>) -> Self {
        self.preferred_sheets = sheets;
        self
    }

    #[must_use]
    pub fn with_drop_empty(mut self, enable: bool) -> Self {
        self.drop_empty = enable;
        self
    }
}
