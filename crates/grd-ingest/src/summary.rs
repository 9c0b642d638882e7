//! Machine-readable ingestion outcome.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::IngestError;
use crate::pipeline::IngestOutcome;

/// Ingestion result reported to calling processes.
///
/// A failed run carries only `success`, `error` and `output_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub success: bool,
    pub error: Option<String>,
    pub output_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_sheet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl IngestSummary {
    pub fn succeeded(outcome: &IngestOutcome) -> Self {
        Self {
            success: true,
            error: None,
            output_file: Some(outcome.output_file.clone()),
            processed_sheet: outcome.processed_sheet.clone(),
            rows_count: Some(outcome.rows),
            columns_count: Some(outcome.columns.len()),
            columns: Some(outcome.columns.clone()),
        }
    }

    pub fn failed(error: &IngestError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            output_file: None,
            processed_sheet: None,
            rows_count: None,
            columns_count: None,
            columns: None,
        }
    }

    /// Pretty JSON with non-ASCII characters kept literal.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_summary_shape() {
        let summary = IngestSummary::failed(&IngestError::SheetNotFound {
            sheet: "Egresos".into(),
            available: vec!["Hoja1".into()],
        });
        let json: serde_json::Value = serde_json::from_str(&summary.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "sheet 'Egresos' does not exist. Available sheets: Hoja1"
        );
        assert!(json["output_file"].is_null());
        assert!(json.get("rows_count").is_none());
    }

    #[test]
    fn test_success_summary_keeps_non_ascii() {
        let outcome = IngestOutcome {
            output_file: PathBuf::from("salida.csv"),
            processed_sheet: Some("Respuestas Formulario".into()),
            rows: 2,
            columns: vec!["año".into(), "diagnóstico".into()],
            temporal: Vec::new(),
        };
        let text = IngestSummary::succeeded(&outcome).to_json_pretty().unwrap();

        assert!(text.contains("\"año\""));
        assert!(text.contains("\"columns_count\": 2"));
        assert!(text.contains("\"error\": null"));
    }
}
