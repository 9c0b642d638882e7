//! End-to-end ingestion tests over a workbook fixture.
//!
//! `fixtures/egresos.xlsx` holds two sheets: `Hoja1` (a single `Folio`
//! column) and `Respuestas Formulario` with date-formatted, serial, mixed,
//! duration and blank-header columns. Its last row stops after column C.

use std::fs;
use std::path::{Path, PathBuf};

use grd_ingest::{EncodingClass, IngestError, IngestOptions, process_file};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/egresos.xlsx")
}

#[test]
fn preferred_sheet_is_normalized_end_to_end() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("egresos.csv");

    let outcome = process_file(&fixture(), Some(&output), &IngestOptions::default()).unwrap();

    assert_eq!(outcome.processed_sheet.as_deref(), Some("Respuestas Formulario"));
    assert_eq!(outcome.rows, 3);
    assert_eq!(
        outcome.columns,
        vec!["episodio_cmbd", "fecha_ingreso", "fecha_alta", "unnamed_3", "control", "duracion"]
    );

    let encodings: Vec<(&str, EncodingClass, usize)> = outcome
        .temporal
        .iter()
        .map(|column| (column.name.as_str(), column.encoding, column.converted))
        .collect();
    assert_eq!(
        encodings,
        vec![
            ("Episodio CMBD", EncodingClass::Plain, 0),
            ("Fecha Ingreso", EncodingClass::NativeTemporal, 3),
            ("Fecha Alta", EncodingClass::NumericSerial, 3),
            ("Unnamed: 3", EncodingClass::Plain, 0),
            ("Control", EncodingClass::IsoText, 1),
            ("Duracion", EncodingClass::Plain, 0),
        ]
    );

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "episodio_cmbd;fecha_ingreso;fecha_alta;unnamed_3;control;duracion",
            "1000123;01/03/2024 00:00:00;09/03/2024;x;04/03/2024 00:00:00;0.5",
            "1000124;02/03/2024 12:00:00;10/03/2024 06:00:00;y;pendiente;0.25",
            "1000125;03/03/2024 00:00:00;11/03/2024;;;",
        ]
    );
}

#[test]
fn requested_sheet_is_used() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("hoja1.csv");
    let options = IngestOptions::default().with_sheet(Some("Hoja1".to_string()));

    let outcome = process_file(&fixture(), Some(&output), &options).unwrap();

    assert_eq!(outcome.processed_sheet.as_deref(), Some("Hoja1"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "folio\n70000\n");
}

#[test]
fn missing_sheet_lists_available_sheets() {
    let dir = TempDir::new().unwrap();
    let options = IngestOptions::default().with_sheet(Some("Altas".to_string()));

    let err = process_file(&fixture(), Some(&dir.path().join("x.csv")), &options).unwrap_err();

    match err {
        IngestError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, "Altas");
            assert_eq!(available, vec!["Hoja1", "Respuestas Formulario"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.path().join("x.csv").exists());
}

#[test]
fn unreadable_workbook_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("roto.xlsx");
    fs::write(&input, "not a zip archive").unwrap();

    let err = process_file(&input, None, &IngestOptions::default()).unwrap_err();

    assert!(matches!(err, IngestError::Workbook { .. }));
}
