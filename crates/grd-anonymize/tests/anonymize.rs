//! End-to-end anonymization pass tests.

use std::collections::HashSet;
use std::fs;

use grd_anonymize::{
    AnonymizeError, AnonymizeOptions, FEMALE_NAMES, MALE_NAMES, anonymize_file, is_valid_identifier,
};
use tempfile::TempDir;

const INPUT: &str = "Episodio CMBD;Nombre;RUT;Edad en años;Sexo  (Desc)\n\
1001;Juan Real;11.111.111-1;34;Hombre\n\
1002;Ana Real;22.222.222-2;3;Mujer\n\
1003;Paz Real\n\
1004;Pedro Real;33.333.333-3;71;hombre\n";

fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect()
}

#[test]
fn names_and_identifiers_are_replaced() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("egresos.csv");
    fs::write(&input, INPUT).unwrap();

    let report = anonymize_file(&input, None, &AnonymizeOptions::default().with_seed(Some(3))).unwrap();

    assert_eq!(report.output_file, dir.path().join("egresos_anonymized.csv"));
    assert_eq!(report.rows_written, 4);
    assert_eq!(report.rows_rewritten, 3);
    assert_eq!(report.rows_skipped, 1);
    assert_eq!(report.identifiers_issued, 3);

    let rows = read_rows(&report.output_file);
    assert_eq!(rows[0], vec!["Episodio CMBD", "Nombre", "RUT", "Edad en años", "Sexo  (Desc)"]);
    assert_eq!(rows[3], vec!["1003", "Paz Real"]);

    let mut identifiers = HashSet::new();
    for row in [&rows[1], &rows[2], &rows[4]] {
        assert!(!row[1].ends_with("Real"));
        assert!(is_valid_identifier(&row[2]), "{}", row[2]);
        assert!(identifiers.insert(row[2].clone()));
    }
    assert!(MALE_NAMES.iter().any(|f| rows[1][1].starts_with(&format!("{f} "))));
    assert!(FEMALE_NAMES.iter().any(|f| rows[2][1].starts_with(&format!("{f} "))));
    assert_eq!(rows[1][0], "1001");
    assert_eq!(rows[2][3], "3");
    assert_eq!(rows[4][4], "hombre");
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("egresos.csv");
    fs::write(&input, INPUT).unwrap();
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");
    let options = AnonymizeOptions::default().with_seed(Some(99));

    anonymize_file(&input, Some(&first), &options).unwrap();
    anonymize_file(&input, Some(&second), &options).unwrap();

    assert_eq!(fs::read_to_string(first).unwrap(), fs::read_to_string(second).unwrap());
}

#[test]
fn ingested_headers_resolve() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("egresos_processed.csv");
    fs::write(&input, "episodio_cmbd;nombre;rut;sexo__(desc)\n1;X;1-9;Mujer\n").unwrap();

    let report = anonymize_file(&input, None, &AnonymizeOptions::default()).unwrap();

    assert_eq!(report.rows_rewritten, 1);
}

#[test]
fn missing_identity_column_fails_fast() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("egresos.csv");
    fs::write(&input, "Episodio CMBD;Nombre;Sexo  (Desc)\n1;X;Hombre\n").unwrap();

    let err = anonymize_file(&input, None, &AnonymizeOptions::default()).unwrap_err();

    assert!(matches!(err, AnonymizeError::MissingHeader { ref header } if header == "RUT"));
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = anonymize_file(&dir.path().join("nada.csv"), None, &AnonymizeOptions::default()).unwrap_err();
    assert!(matches!(err, AnonymizeError::InputNotFound { .. }));
}

#[test]
fn in_place_pass_keeps_every_row() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("egresos.csv");
    let mut text = String::from("Episodio CMBD;Nombre;RUT;Edad en años;Sexo  (Desc)\n");
    for row in 0..2000 {
        text.push_str(&format!("{};Paciente Real {row};11.111.111-1;40;Mujer\n", 1_000_000 + row));
    }
    assert!(text.len() > 64 * 1024);
    fs::write(&input, &text).unwrap();

    let report = anonymize_file(&input, Some(&input), &AnonymizeOptions::default().with_seed(Some(1))).unwrap();

    assert_eq!(report.output_file, input);
    assert_eq!(report.rows_rewritten, 2000);
    let rows = read_rows(&input);
    assert_eq!(rows.len(), 2001);
    assert_eq!(rows[2000][0], "1001999");
    assert!(rows[1..].iter().all(|row| !row[1].starts_with("Paciente Real")));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn failed_run_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("egresos.csv");
    let output = dir.path().join("salida.csv");
    let mut bytes = b"Episodio CMBD;Nombre;RUT;Sexo  (Desc)\n1;Ana;1-9;Mujer\n".to_vec();
    bytes.extend_from_slice(b"2;\xff\xfe;2-7;Hombre\n");
    fs::write(&input, bytes).unwrap();

    let err = anonymize_file(&input, Some(&output), &AnonymizeOptions::default()).unwrap_err();

    assert!(matches!(err, AnonymizeError::Csv { .. }));
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
