//! Flat patient record.

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::layout::{ColumnMap, Field};

/// One dataset row mapped to named fields.
///
/// Fields whose column is absent, or beyond the end of a short row, are
/// empty strings. Serialized keys follow the dataset's own vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "episodio_cmbd")]
    pub episode: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rut")]
    pub identifier: String,
    #[serde(rename = "edad")]
    pub age: String,
    #[serde(rename = "sexo")]
    pub sex: String,

    #[serde(rename = "diagnostico_principal")]
    pub diagnosis: String,
    #[serde(rename = "especialidad")]
    pub specialty: String,
    #[serde(rename = "tipo_actividad")]
    pub activity_type: String,
    #[serde(rename = "tipo_ingreso")]
    pub admission_type: String,
    #[serde(rename = "servicio_ingreso")]
    pub service: String,
    #[serde(rename = "prevision")]
    pub insurance: String,

    #[serde(rename = "fecha_ingreso")]
    pub admission_date: String,
    #[serde(rename = "fecha_egreso")]
    pub discharge_date: String,

    #[serde(rename = "estancia_dias")]
    pub stay_days: String,
    #[serde(rename = "horas_estancia")]
    pub stay_hours: String,
    #[serde(rename = "estancia_inlier_outlier")]
    pub stay_outlier: String,

    #[serde(rename = "peso_grd")]
    pub drg_weight: String,
    #[serde(rename = "ir_gravedad")]
    pub severity: String,
    #[serde(rename = "ir_mortalidad")]
    pub mortality: String,

    #[serde(rename = "año")]
    pub year: String,
    #[serde(rename = "mes")]
    pub month: String,
}

impl PatientRecord {
    pub fn from_row(row: &StringRecord, columns: &ColumnMap) -> Self {
        let value = |field| columns.get(row, field).unwrap_or_default().to_string();
        Self {
            episode: value(Field::Episode),
            name: value(Field::Name),
            identifier: value(Field::Identifier),
            age: value(Field::Age),
            sex: value(Field::Sex),
            diagnosis: value(Field::Diagnosis),
            specialty: value(Field::Specialty),
            activity_type: value(Field::ActivityType),
            admission_type: value(Field::AdmissionType),
            service: value(Field::Service),
            insurance: value(Field::Insurance),
            admission_date: value(Field::AdmissionDate),
            discharge_date: value(Field::DischargeDate),
            stay_days: value(Field::StayDays),
            stay_hours: value(Field::StayHours),
            stay_outlier: value(Field::StayOutlier),
            drg_weight: value(Field::DrgWeight),
            severity: value(Field::Severity),
            mortality: value(Field::Mortality),
            year: value(Field::Year),
            month: value(Field::Month),
        }
    }
}
