use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use grd_anonymize::{AnonymizeOptions, AnonymizeReport, anonymize_file};
use grd_cli::logging::redact_value;
use grd_cli::summary::{anonymize_table, statistics_table};
use grd_ingest::IngestOptions;
use grd_query::{
    Criteria, Lookup, PatientRecord, RecordExtractor, export_record, export_records, records_to_json,
};

use crate::cli::{AnonymizeArgs, IngestArgs, QueryArgs, QueryCommand};

/// Runs ingestion and prints the JSON summary. Ingestion failures are part
/// of the summary, not an error of this function.
pub fn run_ingest(args: &IngestArgs) -> Result<()> {
    let options = IngestOptions::default()
        .with_sheet(args.sheet.clone())
        .with_drop_empty(!args.keep_empty);
    let summary = grd_ingest::run_ingest(&args.input, args.output.as_deref(), &options);
    println!(
        "{}",
        summary
            .to_json_pretty()
            .context("serialize ingestion summary")?
    );
    Ok(())
}

pub fn run_anonymize(args: &AnonymizeArgs) -> Result<AnonymizeReport> {
    let options = AnonymizeOptions::default()
        .with_headers(&args.name_header, &args.id_header, &args.sex_header)
        .with_seed(args.seed)
        .with_max_attempts(args.max_attempts)
        .with_progress_every(args.progress_every);
    let report = anonymize_file(&args.input, args.output.as_deref(), &options)
        .with_context(|| format!("anonymize {}", args.input.display()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize anonymization report")?
    );
    if io::stderr().is_terminal() {
        eprintln!("{}", anonymize_table(&report));
    }
    Ok(report)
}

pub fn run_query(args: &QueryArgs) -> Result<()> {
    let span = info_span!("query", file = %args.file.display());
    let _guard = span.enter();

    let extractor = RecordExtractor::open(&args.file)
        .with_context(|| format!("open dataset {}", args.file.display()))?;

    match &args.query {
        QueryCommand::ById { identifier } => {
            debug!(identifier = redact_value(identifier), "lookup by identifier");
            print_lookup(
                &extractor.lookup(&Lookup::Identifier(identifier.clone()))?,
                args,
            )
        }
        QueryCommand::ByEpisode { episode } => {
            debug!(episode = redact_value(episode), "lookup by episode");
            print_lookup(&extractor.lookup(&Lookup::Episode(episode.clone()))?, args)
        }
        QueryCommand::Service { text } => {
            print_records(&extractor.query(&Criteria::Service(text.clone()))?, args)
        }
        QueryCommand::Age { min, max } => print_records(
            &extractor.query(&Criteria::AgeRange {
                min: *min,
                max: *max,
            })?,
            args,
        ),
        QueryCommand::Diagnosis { text } => {
            print_records(&extractor.query(&Criteria::Diagnosis(text.clone()))?, args)
        }
        QueryCommand::Sample { count } => {
            print_records(&extractor.query(&Criteria::Sample(*count))?, args)
        }
        QueryCommand::Stats { json } => {
            let stats = extractor.statistics()?;
            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("serialize statistics")?
                );
            } else {
                println!("{}", statistics_table(&stats));
            }
            Ok(())
        }
    }
}

fn print_lookup(record: &Option<PatientRecord>, args: &QueryArgs) -> Result<()> {
    let Some(record) = record else {
        info!("no matching record");
        println!("null");
        return Ok(());
    };
    if let Some(path) = &args.export {
        export_record(record, path)?;
    }
    println!(
        "{}",
        serde_json::to_string_pretty(record).context("serialize record")?
    );
    Ok(())
}

fn print_records(records: &[PatientRecord], args: &QueryArgs) -> Result<()> {
    if let Some(path) = &args.export {
        export_records(records, path)?;
    }
    println!("{}", records_to_json(records).context("serialize records")?);
    Ok(())
}
