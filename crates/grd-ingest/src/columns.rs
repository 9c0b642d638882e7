//! Column naming and empty-data cleanup.

use std::collections::HashSet;

use polars::prelude::*;

use crate::error::Result;

/// Normalizes a column name: trimmed, lower-cased, spaces replaced with
/// underscores and colons removed.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_").replace(':', "")
}

/// Makes names unique by suffixing repeats with `.1`, `.2`, ...
pub fn unique_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .map(|name| {
            if seen.insert(name.clone()) {
                return name;
            }
            let mut counter = 1;
            loop {
                let candidate = format!("{name}.{counter}");
                if seen.insert(candidate.clone()) {
                    return candidate;
                }
                counter += 1;
            }
        })
        .collect()
}

/// Renames every column of `df` with [`normalize_column_name`].
pub fn normalize_column_names(df: &DataFrame) -> Result<DataFrame> {
    let names = unique_names(
        df.get_column_names()
            .iter()
            .map(|name| normalize_column_name(name.as_str()))
            .collect(),
    );

    let columns = df
        .get_columns()
        .iter()
        .zip(names)
        .map(|(column, name)| {
            let mut series = column.as_materialized_series().clone();
            series.rename(name.into());
            series.into_column()
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Drops columns with no values, then rows with no values.
pub fn drop_empty(df: &DataFrame) -> Result<DataFrame> {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .filter(|column| column.null_count() < column.len())
        .cloned()
        .collect();
    if columns.is_empty() {
        return Ok(DataFrame::empty());
    }

    let mut keep = vec![false; df.height()];
    for column in &columns {
        let present = column.as_materialized_series().is_not_null();
        for (row, valid) in present.into_iter().enumerate() {
            if valid == Some(true) {
                keep[row] = true;
            }
        }
    }

    let frame = DataFrame::new(columns)?;
    if keep.iter().all(|k| *k) {
        return Ok(frame);
    }
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    Ok(frame.filter(&mask)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("  Fecha Ingreso:  "), "fecha_ingreso");
        assert_eq!(normalize_column_name("Sexo  (Desc)"), "sexo__(desc)");
        assert_eq!(normalize_column_name("Diagnóstico   Principal"), "diagnóstico___principal");
        assert_eq!(normalize_column_name("AÑO"), "año");
    }

    #[test]
    fn test_unique_names() {
        let names = unique_names(vec!["fecha".into(), "fecha".into(), "rut".into(), "fecha".into()]);
        assert_eq!(names, vec!["fecha", "fecha.1", "rut", "fecha.2"]);
    }

    #[test]
    fn test_normalize_column_names_deduplicates() {
        let df = DataFrame::new(vec![
            Series::new("Fecha".into(), [1_i64]).into_column(),
            Series::new("fecha ".into(), [2_i64]).into_column(),
        ])
        .unwrap();
        let out = normalize_column_names(&df).unwrap();
        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["fecha", "fecha.1"]);
    }

    #[test]
    fn test_drop_empty_rows_and_columns() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), [Some(1_i64), None, Some(3)]).into_column(),
            Series::new("b".into(), [Some("x"), None, None]).into_column(),
            Series::new("vacia".into(), [None::<i64>, None, None]).into_column(),
        ])
        .unwrap();

        let out = drop_empty(&df).unwrap();

        assert_eq!(out.width(), 2);
        assert_eq!(out.height(), 2);
        assert!(out.column("vacia").is_err());
    }
}
