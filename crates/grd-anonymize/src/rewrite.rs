//! Row-wise anonymization of a semicolon-delimited dataset.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, info_span};

use crate::error::{AnonymizeError, Result};
use crate::names::Sex;
use crate::synthesizer::{DEFAULT_MAX_ATTEMPTS, IdentitySynthesizer};

/// Options for [`anonymize_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizeOptions {
    /// Header of the column holding patient names.
    pub name_header: String,
    /// Header of the column holding national identifiers.
    pub identifier_header: String,
    /// Header of the column holding the sex label.
    pub sex_header: String,
    /// Retry budget for a fresh identifier.
    pub max_attempts: u32,
    /// Log progress every this many rows (0 disables).
    pub progress_every: usize,
    /// Seed for reproducible output; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for AnonymizeOptions {
    fn default() -> Self {
        Self {
            name_header: "Nombre".to_string(),
            identifier_header: "RUT".to_string(),
            sex_header: "Sexo  (Desc)".to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            progress_every: 1000,
            seed: None,
        }
    }
}

impl AnonymizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_progress_every(mut self, rows: usize) -> Self {
        self.progress_every = rows;
        self
    }

    #[must_use]
    pub fn with_headers(
        mut self,
        name: impl Into<String>,
        identifier: impl Into<String>,
        sex: impl Into<String>,
    ) -> Self {
        self.name_header = name.into();
        self.identifier_header = identifier.into();
        self.sex_header = sex.into();
        self
    }
}

/// Counts from one anonymization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnonymizeReport {
    pub output_file: PathBuf,
    /// Data rows written, header excluded.
    pub rows_written: usize,
    /// Rows whose name and identifier were replaced.
    pub rows_rewritten: usize,
    /// Rows too short to hold both fields, copied unchanged.
    pub rows_skipped: usize,
    pub identifiers_issued: usize,
}

/// Default output path: `<input-stem>_anonymized.csv` beside the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_anonymized.csv"))
}

fn header_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_").replace(':', "")
}

/// Finds `wanted` in the header row, exactly or by its normalized form, so
/// both raw and ingested files resolve.
fn resolve_header(headers: &StringRecord, wanted: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == wanted)
        .or_else(|| {
            let key = header_key(wanted);
            headers.iter().position(|header| header_key(header) == key)
        })
        .ok_or_else(|| AnonymizeError::MissingHeader {
            header: wanted.to_string(),
        })
}

/// Replaces names and identifiers in every data row of `input`.
///
/// The header row and every other field are copied verbatim. Rows too short
/// to hold both the name and identifier columns are copied unchanged.
///
/// Rows are staged in a temporary file beside the output, which replaces
/// `output` only once every row is written. `output` may therefore be `input`
/// itself, and a failed run leaves no partial file behind.
pub fn anonymize_file(
    input: &Path,
    output: Option<&Path>,
    options: &AnonymizeOptions,
) -> Result<AnonymizeReport> {
    let span = info_span!("anonymize", input = %input.display());
    let _guard = span.enter();

    if !input.exists() {
        return Err(AnonymizeError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    let output_file = output.map_or_else(|| default_output_path(input), Path::to_path_buf);

    let read_error = |source| AnonymizeError::Csv {
        path: input.to_path_buf(),
        source,
    };
    let write_error = |source| AnonymizeError::Csv {
        path: output_file.clone(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_path(input)
        .map_err(read_error)?;
    let headers = reader.headers().map_err(read_error)?.clone();

    let name_index = resolve_header(&headers, &options.name_header)?;
    let id_index = resolve_header(&headers, &options.identifier_header)?;
    let sex_index = resolve_header(&headers, &options.sex_header)?;
    let needed = name_index.max(id_index) + 1;
    debug!(name_index, id_index, sex_index, "resolved identity columns");

    let io_error = |path: &Path, source| AnonymizeError::Io {
        path: path.to_path_buf(),
        source,
    };
    let staging_dir = output_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staging = NamedTempFile::new_in(staging_dir).map_err(|e| io_error(staging_dir, e))?;

    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_writer(staging);
    writer.write_record(&headers).map_err(write_error)?;

    let mut synthesizer = match options.seed {
        Some(seed) => IdentitySynthesizer::from_seed(seed),
        None => IdentitySynthesizer::from_entropy(),
    }
    .with_max_attempts(options.max_attempts);

    let mut report = AnonymizeReport {
        output_file: output_file.clone(),
        rows_written: 0,
        rows_rewritten: 0,
        rows_skipped: 0,
        identifiers_issued: 0,
    };

    for record in reader.records() {
        let record = record.map_err(read_error)?;
        if record.len() < needed {
            writer.write_record(&record).map_err(write_error)?;
            report.rows_written += 1;
            report.rows_skipped += 1;
            continue;
        }

        let sex = record.get(sex_index).map_or(Sex::Male, Sex::from_label);
        let name = synthesizer.full_name(sex);
        let identifier = synthesizer.national_id()?.to_string();

        let rewritten: StringRecord = record
            .iter()
            .enumerate()
            .map(|(index, field)| {
                if index == name_index {
                    name.as_str()
                } else if index == id_index {
                    identifier.as_str()
                } else {
                    field
                }
            })
            .collect();
        writer.write_record(&rewritten).map_err(write_error)?;
        report.rows_written += 1;
        report.rows_rewritten += 1;

        if options.progress_every > 0 && report.rows_rewritten % options.progress_every == 0 {
            info!(rows = report.rows_rewritten, "anonymization progress");
        }
    }

    drop(reader);
    let staging = writer
        .into_inner()
        .map_err(|e| io_error(&output_file, e.into_error()))?;
    staging
        .persist(&output_file)
        .map_err(|e| io_error(&output_file, e.error))?;
    report.identifiers_issued = synthesizer.issued_count();
    info!(
        output = %output_file.display(),
        rows = report.rows_written,
        skipped = report.rows_skipped,
        identifiers = report.identifiers_issued,
        "anonymization complete"
    );
    Ok(report)
}
