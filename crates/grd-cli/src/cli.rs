//! CLI argument definitions for `grd`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "grd",
    version,
    about = "Hospital discharge dataset tools - ingest, anonymize and query",
    long_about = "Prepare hospital discharge (GRD) datasets for analysis.\n\n\
                  Normalizes spreadsheet or semicolon-delimited exports to a flat CSV,\n\
                  replaces patient names and national identifiers with synthetic values,\n\
                  and answers lookups and filters over the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient-level values (names, identifiers) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a workbook or flat file into a semicolon-delimited CSV.
    Ingest(IngestArgs),

    /// Replace names and national identifiers with synthetic values.
    Anonymize(AnonymizeArgs),

    /// Look up, filter or summarize records of a flat file.
    Query(QueryArgs),
}

#[derive(Args)]
pub struct IngestArgs {
    /// Workbook (.xlsx, .xlsm, .xls, .ods) or flat file (.csv, .txt).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV path (default: <INPUT stem>_processed.csv).
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Worksheet to process (default: the form-response sheet, else the first).
    #[arg(value_name = "SHEET")]
    pub sheet: Option<String>,

    /// Keep rows and columns that carry no values.
    #[arg(long = "keep-empty")]
    pub keep_empty: bool,
}

#[derive(Args)]
pub struct AnonymizeArgs {
    /// Semicolon-delimited dataset to anonymize.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV path (default: <INPUT stem>_anonymized.csv).
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Seed for reproducible output.
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Draws allowed per identifier before giving up.
    #[arg(long = "max-attempts", default_value_t = grd_anonymize::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Log progress every N rows (0 disables).
    #[arg(long = "progress-every", value_name = "N", default_value_t = 1000)]
    pub progress_every: usize,

    /// Header of the name column.
    #[arg(long = "name-header", default_value = "Nombre")]
    pub name_header: String,

    /// Header of the national identifier column.
    #[arg(long = "id-header", default_value = "RUT")]
    pub id_header: String,

    /// Header of the sex column.
    #[arg(long = "sex-header", default_value = "Sexo  (Desc)")]
    pub sex_header: String,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Semicolon-delimited dataset to query.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Also write the matching records to this JSON file.
    #[arg(long = "export", value_name = "PATH", global = true)]
    pub export: Option<PathBuf>,

    #[command(subcommand)]
    pub query: QueryCommand,
}

#[derive(Subcommand)]
pub enum QueryCommand {
    /// Find the first record with this national identifier.
    ById {
        #[arg(value_name = "RUT")]
        identifier: String,
    },

    /// Find the first record with this episode id.
    ByEpisode {
        #[arg(value_name = "EPISODE")]
        episode: String,
    },

    /// Records whose admission service contains TEXT (case-insensitive).
    Service {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Records with MIN <= age <= MAX.
    Age {
        #[arg(value_name = "MIN")]
        min: i64,
        #[arg(value_name = "MAX")]
        max: i64,
    },

    /// Records whose principal diagnosis contains TEXT (case-insensitive).
    Diagnosis {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// The first COUNT records.
    Sample {
        #[arg(value_name = "COUNT", default_value_t = grd_query::DEFAULT_SAMPLE_SIZE)]
        count: usize,
    },

    /// Dataset statistics.
    Stats {
        /// Print JSON instead of a table.
        #[arg(long = "json")]
        json: bool,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
