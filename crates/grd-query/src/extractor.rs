//! Scanning queries over a dataset file.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::{QueryError, Result};
use crate::layout::{ColumnMap, Field, FieldLayout};
use crate::record::PatientRecord;
use crate::stats::{DatasetStatistics, StatisticsBuilder};

/// Records returned by [`Criteria::Sample`] when no size is given.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Multi-record selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criteria {
    /// Case-insensitive substring of the admission service.
    Service(String),
    /// Inclusive age bounds; non-numeric ages never match.
    AgeRange { min: i64, max: i64 },
    /// Case-insensitive substring of the principal diagnosis.
    Diagnosis(String),
    /// First `n` records of the file.
    Sample(usize),
}

/// Single-record lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Identifier(String),
    Episode(String),
}

/// Query context for one dataset file.
///
/// The header row is read and validated once; each query then re-reads the
/// data rows from the start.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    path: PathBuf,
    columns: ColumnMap,
}

impl RecordExtractor {
    /// Opens `path` with the default header layout.
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_layout(path, &FieldLayout::default())
    }

    pub fn with_layout(path: &Path, layout: &FieldLayout) -> Result<Self> {
        if !path.exists() {
            return Err(QueryError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut reader = open_reader(path)?;
        let headers = reader.headers().map_err(|source| csv_error(path, source))?;
        if headers.is_empty() {
            return Err(QueryError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
        let columns = layout.resolve(headers)?;
        debug!(path = %path.display(), columns = headers.len(), "dataset opened");

        Ok(Self {
            path: path.to_path_buf(),
            columns,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Visits every data row in file order until `visit` breaks.
    fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&StringRecord) -> ControlFlow<()>,
    {
        let mut reader = open_reader(&self.path)?;
        let mut row = StringRecord::new();
        while reader
            .read_record(&mut row)
            .map_err(|source| csv_error(&self.path, source))?
        {
            if visit(&row).is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Collects records for rows that reach `field` and satisfy `keep`.
    fn collect_where<F>(&self, field: Field, mut keep: F) -> Result<Vec<PatientRecord>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut records = Vec::new();
        self.scan(|row| {
            if let Some(value) = self.columns.get(row, field)
                && keep(value)
            {
                records.push(PatientRecord::from_row(row, &self.columns));
            }
            ControlFlow::Continue(())
        })?;
        Ok(records)
    }

    /// First record whose `field` equals `wanted` exactly.
    fn find_first(&self, field: Field, wanted: &str) -> Result<Option<PatientRecord>> {
        let mut found = None;
        self.scan(|row| {
            if self.columns.get(row, field) == Some(wanted) {
                found = Some(PatientRecord::from_row(row, &self.columns));
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        })?;
        Ok(found)
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Result<Option<PatientRecord>> {
        self.find_first(Field::Identifier, identifier)
    }

    pub fn find_by_episode(&self, episode: &str) -> Result<Option<PatientRecord>> {
        self.find_first(Field::Episode, episode)
    }

    pub fn filter_by_service(&self, service: &str) -> Result<Vec<PatientRecord>> {
        let needle = service.to_lowercase();
        self.collect_where(Field::Service, |value| value.to_lowercase().contains(&needle))
    }

    /// Records with `min <= age <= max`. Ages that are not whole numbers are
    /// skipped.
    pub fn filter_by_age_range(&self, min: i64, max: i64) -> Result<Vec<PatientRecord>> {
        self.collect_where(Field::Age, |value| {
            value
                .trim()
                .parse::<i64>()
                .is_ok_and(|age| (min..=max).contains(&age))
        })
    }

    pub fn filter_by_diagnosis(&self, diagnosis: &str) -> Result<Vec<PatientRecord>> {
        let needle = diagnosis.to_lowercase();
        self.collect_where(Field::Diagnosis, |value| value.to_lowercase().contains(&needle))
    }

    /// Records among the first `count` rows; rows too short to carry an
    /// identifier are left out.
    pub fn sample(&self, count: usize) -> Result<Vec<PatientRecord>> {
        let mut records = Vec::with_capacity(count.min(1024));
        let mut seen = 0;
        self.scan(|row| {
            if seen >= count {
                return ControlFlow::Break(());
            }
            seen += 1;
            if self.columns.get(row, Field::Identifier).is_some() {
                records.push(PatientRecord::from_row(row, &self.columns));
            }
            ControlFlow::Continue(())
        })?;
        Ok(records)
    }

    pub fn query(&self, criteria: &Criteria) -> Result<Vec<PatientRecord>> {
        let records = match criteria {
            Criteria::Service(service) => self.filter_by_service(service)?,
            Criteria::AgeRange { min, max } => self.filter_by_age_range(*min, *max)?,
            Criteria::Diagnosis(diagnosis) => self.filter_by_diagnosis(diagnosis)?,
            Criteria::Sample(count) => self.sample(*count)?,
        };
        info!(?criteria, matches = records.len(), "query complete");
        Ok(records)
    }

    pub fn lookup(&self, lookup: &Lookup) -> Result<Option<PatientRecord>> {
        match lookup {
            Lookup::Identifier(identifier) => self.find_by_identifier(identifier),
            Lookup::Episode(episode) => self.find_by_episode(episode),
        }
    }

    /// Aggregates over the whole file in one additional scan.
    pub fn statistics(&self) -> Result<DatasetStatistics> {
        let mut builder = StatisticsBuilder::default();
        self.scan(|row| {
            builder.add(row, &self.columns);
            ControlFlow::Continue(())
        })?;
        Ok(builder.finish())
    }
}

fn open_reader(path: &Path) -> Result<Reader<std::fs::File>> {
    ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| csv_error(path, source))
}

fn csv_error(path: &Path, source: csv::Error) -> QueryError {
    QueryError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
