//! Header contract: which column holds which semantic field.

use csv::StringRecord;
use tracing::debug;

use crate::error::{QueryError, Result};

/// Semantic fields of a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Episode,
    Name,
    Identifier,
    Age,
    Sex,
    Diagnosis,
    Specialty,
    ActivityType,
    AdmissionType,
    Service,
    Insurance,
    AdmissionDate,
    DischargeDate,
    StayDays,
    StayHours,
    StayOutlier,
    DrgWeight,
    Severity,
    Mortality,
    Year,
    Month,
}

impl Field {
    pub const COUNT: usize = 21;

    pub const ALL: [Field; Self::COUNT] = [
        Self::Episode,
        Self::Name,
        Self::Identifier,
        Self::Age,
        Self::Sex,
        Self::Diagnosis,
        Self::Specialty,
        Self::ActivityType,
        Self::AdmissionType,
        Self::Service,
        Self::Insurance,
        Self::AdmissionDate,
        Self::DischargeDate,
        Self::StayDays,
        Self::StayHours,
        Self::StayOutlier,
        Self::DrgWeight,
        Self::Severity,
        Self::Mortality,
        Self::Year,
        Self::Month,
    ];

    /// Fields the query paths read directly; they must be present.
    pub const KEYS: [Field; 6] = [
        Self::Episode,
        Self::Identifier,
        Self::Age,
        Self::Sex,
        Self::Diagnosis,
        Self::Service,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Header used by the source dataset export.
    pub fn default_header(self) -> &'static str {
        match self {
            Self::Episode => "Episodio CMBD",
            Self::Name => "Nombre",
            Self::Identifier => "RUT",
            Self::Age => "Edad en años",
            Self::Sex => "Sexo  (Desc)",
            Self::Diagnosis => "Diagnóstico   Principal",
            Self::Specialty => "Especialidad médica de la intervención (des)",
            Self::ActivityType => "Tipo Actividad",
            Self::AdmissionType => "Tipo Ingreso (Descripción)",
            Self::Service => "Servicio Ingreso (Descripción)",
            Self::Insurance => "Prevision (Desc)",
            Self::AdmissionDate => "Fecha Ingreso completa",
            Self::DischargeDate => "Fecha Completa",
            Self::StayDays => "Estancia del Episodio",
            Self::StayHours => "Horas de Estancia",
            Self::StayOutlier => "Estancia Inlier / Outlier",
            Self::DrgWeight => "Peso GRD Medio (Todos)",
            Self::Severity => "IR Gravedad  (desc)",
            Self::Mortality => "IR Mortalidad  (desc)",
            Self::Year => "Año",
            Self::Month => "Mes (Número)",
        }
    }
}

/// Header names for every semantic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    headers: Vec<String>,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            headers: Field::ALL
                .iter()
                .map(|field| field.default_header().to_string())
                .collect(),
        }
    }
}

impl FieldLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the header expected for `field`.
    #[must_use]
    pub fn with_header(mut self, field: Field, header: impl Into<String>) -> Self {
        self.headers[field.index()] = header.into();
        self
    }

    pub fn header(&self, field: Field) -> &str {
        &self.headers[field.index()]
    }

    /// Resolves every field against a header row.
    ///
    /// Headers match exactly or after normalization (trimmed, lower-cased,
    /// spaces to underscores, colons removed), so ingested files resolve
    /// too. When a header repeats, the last occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingHeader`] for the first key field that
    /// does not resolve.
    pub fn resolve(&self, headers: &StringRecord) -> Result<ColumnMap> {
        let mut positions = [None; Field::COUNT];
        for field in Field::ALL {
            positions[field.index()] = find_last(headers, self.header(field));
        }

        for field in Field::KEYS {
            if positions[field.index()].is_none() {
                return Err(QueryError::MissingHeader {
                    header: self.header(field).to_string(),
                });
            }
        }
        debug!(resolved = positions.iter().flatten().count(), "header contract resolved");
        Ok(ColumnMap { positions })
    }
}

fn header_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_").replace(':', "")
}

fn find_last(headers: &StringRecord, wanted: &str) -> Option<usize> {
    let last_where = |matches: &dyn Fn(&str) -> bool| {
        headers
            .iter()
            .enumerate()
            .filter(|(_, header)| matches(header))
            .map(|(index, _)| index)
            .last()
    };
    let key = header_key(wanted);
    last_where(&|header| header == wanted).or_else(|| last_where(&|header| header_key(header) == key))
}

/// Column positions of each field within one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [Option<usize>; Field::COUNT],
}

impl ColumnMap {
    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions[field.index()]
    }

    /// Value of `field` in `row`; `None` when the column is absent or the
    /// row is too short to reach it.
    pub fn get<'r>(&self, row: &'r StringRecord, field: Field) -> Option<&'r str> {
        self.position(field).and_then(|index| row.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_headers() -> StringRecord {
        Field::ALL.iter().map(|f| f.default_header()).collect()
    }

    #[test]
    fn test_all_fields_listed_in_order() {
        for (position, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), position);
        }
    }

    #[test]
    fn test_resolve_default_headers() {
        let map = FieldLayout::default().resolve(&default_headers()).unwrap();
        assert_eq!(map.position(Field::Episode), Some(0));
        assert_eq!(map.position(Field::Service), Some(9));
        assert_eq!(map.position(Field::Month), Some(20));
    }

    #[test]
    fn test_resolve_normalized_headers() {
        let headers = StringRecord::from(vec![
            "episodio_cmbd",
            "rut",
            "edad_en_años",
            "sexo__(desc)",
            "diagnóstico___principal",
            "servicio_ingreso_(descripción)",
        ]);
        let map = FieldLayout::default().resolve(&headers).unwrap();
        assert_eq!(map.position(Field::Diagnosis), Some(4));
        assert_eq!(map.position(Field::Name), None);
    }

    #[test]
    fn test_missing_key_header_fails_fast() {
        let headers = StringRecord::from(vec!["Episodio CMBD", "RUT"]);
        let err = FieldLayout::default().resolve(&headers).unwrap_err();
        assert!(matches!(err, QueryError::MissingHeader { ref header } if header == "Edad en años"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let mut headers: Vec<&str> = Field::ALL.iter().map(|f| f.default_header()).collect();
        headers.push("RUT");
        let map = FieldLayout::default()
            .resolve(&StringRecord::from(headers))
            .unwrap();
        assert_eq!(map.position(Field::Identifier), Some(Field::COUNT));
    }

    #[test]
    fn test_custom_header() {
        let layout = FieldLayout::new().with_header(Field::Service, "Servicio");
        assert_eq!(layout.header(Field::Service), "Servicio");
        assert_eq!(layout.header(Field::Identifier), "RUT");
    }

    #[test]
    fn test_get_short_row() {
        let map = FieldLayout::default().resolve(&default_headers()).unwrap();
        let row = StringRecord::from(vec!["1001", "Ana", "16.014.303-7"]);
        assert_eq!(map.get(&row, Field::Identifier), Some("16.014.303-7"));
        assert_eq!(map.get(&row, Field::Service), None);
    }
}
