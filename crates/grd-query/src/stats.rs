//! Dataset-wide aggregates.

use std::collections::HashSet;

use csv::StringRecord;
use serde::Serialize;

use crate::layout::{ColumnMap, Field};

/// Counts over every row that carries a sex value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStatistics {
    #[serde(rename = "total_pacientes")]
    pub total_patients: usize,
    #[serde(rename = "hombres")]
    pub men: usize,
    #[serde(rename = "mujeres")]
    pub women: usize,
    #[serde(rename = "servicios_unicos")]
    pub unique_services: usize,
    #[serde(rename = "diagnosticos_unicos")]
    pub unique_diagnoses: usize,
    #[serde(rename = "años_unicos")]
    pub unique_years: usize,
}

#[derive(Debug, Default)]
pub(crate) struct StatisticsBuilder {
    total: usize,
    men: usize,
    women: usize,
    services: HashSet<String>,
    diagnoses: HashSet<String>,
    years: HashSet<String>,
}

impl StatisticsBuilder {
    pub(crate) fn add(&mut self, row: &StringRecord, columns: &ColumnMap) {
        let Some(sex) = columns.get(row, Field::Sex) else {
            return;
        };
        self.total += 1;

        let sex = sex.to_lowercase();
        if sex.contains("hombre") {
            self.men += 1;
        } else if sex.contains("mujer") {
            self.women += 1;
        }

        for (field, set) in [
            (Field::Service, &mut self.services),
            (Field::Diagnosis, &mut self.diagnoses),
            (Field::Year, &mut self.years),
        ] {
            if let Some(value) = columns.get(row, field) {
                set.insert(value.to_string());
            }
        }
    }

    pub(crate) fn finish(self) -> DatasetStatistics {
        DatasetStatistics {
            total_patients: self.total,
            men: self.men,
            women: self.women,
            unique_services: self.services.len(),
            unique_diagnoses: self.diagnoses.len(),
            unique_years: self.years.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldLayout;

    #[test]
    fn test_counts() {
        let headers = StringRecord::from(vec![
            "Episodio CMBD",
            "RUT",
            "Edad en años",
            "Sexo  (Desc)",
            "Servicio Ingreso (Descripción)",
            "Diagnóstico   Principal",
            "Año",
        ]);
        let columns = FieldLayout::default().resolve(&headers).unwrap();
        let rows = [
            vec!["1", "a", "3", "Hombre", "UCI", "J18", "2024"],
            vec!["2", "b", "40", "MUJER", "UCI", "I21", "2025"],
            vec!["3", "c", "7", "Indeterminado", "PEDIATRIA", "J18", "2024"],
            vec!["4", "d"],
        ];

        let mut builder = StatisticsBuilder::default();
        for row in rows {
            builder.add(&StringRecord::from(row), &columns);
        }
        let stats = builder.finish();

        assert_eq!(
            stats,
            DatasetStatistics {
                total_patients: 3,
                men: 1,
                women: 1,
                unique_services: 2,
                unique_diagnoses: 2,
                unique_years: 2,
            }
        );
    }
}
