//! JSON export of query results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{QueryError, Result};
use crate::record::PatientRecord;

/// Pretty-printed JSON array of records. Non-ASCII text stays literal.
pub fn records_to_json(records: &[PatientRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Writes `records` to `path` as a JSON array.
pub fn export_records(records: &[PatientRecord], path: &Path) -> Result<()> {
    write_json(records, path)?;
    info!(path = %path.display(), records = records.len(), "records exported");
    Ok(())
}

/// Writes one record to `path` as a JSON object.
pub fn export_record(record: &PatientRecord, path: &Path) -> Result<()> {
    write_json(record, path)?;
    info!(path = %path.display(), "record exported");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let io_error = |source| QueryError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| QueryError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PatientRecord {
        PatientRecord {
            episode: "1001".into(),
            name: "María José Núñez Peña".into(),
            identifier: "16.014.303-7".into(),
            service: "NEONATOLOGÍA".into(),
            ..PatientRecord::default()
        }
    }

    #[test]
    fn test_export_records_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pacientes.json");

        export_records(&[record(), PatientRecord::default()], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("María José Núñez Peña"));
        let parsed: Vec<PatientRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], record());
    }

    #[test]
    fn test_export_single_record_is_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paciente.json");

        export_record(&record(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["rut"], "16.014.303-7");
        assert_eq!(value["servicio_ingreso"], "NEONATOLOGÍA");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_record(&record(), &dir.path().join("no/existe.json")).unwrap_err();
        assert!(matches!(err, QueryError::Io { .. }));
    }

    #[test]
    fn test_records_to_json_snapshot() {
        let json = records_to_json(&[PatientRecord {
            episode: "1001".into(),
            year: "2024".into(),
            ..PatientRecord::default()
        }])
        .unwrap();
        insta::assert_snapshot!(json, @r#"
        [
          {
            "episodio_cmbd": "1001",
            "nombre": "",
            "rut": "",
            "edad": "",
            "sexo": "",
            "diagnostico_principal": "",
            "especialidad": "",
            "tipo_actividad": "",
            "tipo_ingreso": "",
            "servicio_ingreso": "",
            "prevision": "",
            "fecha_ingreso": "",
            "fecha_egreso": "",
            "estancia_dias": "",
            "horas_estancia": "",
            "estancia_inlier_outlier": "",
            "peso_grd": "",
            "ir_gravedad": "",
            "ir_mortalidad": "",
            "año": "2024",
            "mes": ""
          }
        ]
        "#);
    }
}
