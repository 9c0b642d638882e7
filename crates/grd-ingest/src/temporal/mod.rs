//! Temporal normalization.
//!
//! Every column that carries dates is rewritten to the canonical
//! `DD/MM/YYYY[ HH:MM:SS]` text form. Three encodings are recognised:
//!
//! - **Native temporal** columns are formatted cell by cell.
//! - **Numeric** columns are classified once per column: when the smallest
//!   and largest values both fall within the serial range the whole column
//!   is decoded as spreadsheet serial dates, otherwise it is left alone.
//! - **Text** columns are inspected cell by cell for ISO dates; cells that do
//!   not parse keep their original text.
//!
//! A column that fails to convert is logged and kept unchanged; no column is
//! ever dropped here.

mod iso;
mod serial;

use chrono::{DateTime, Utc};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::numeric::format_numeric;

pub use iso::iso_to_canonical;
pub use serial::{SERIAL_MAX, SERIAL_MIN, SerialCell, column_bounds, decode_serial, is_serial_range};

/// Canonical date-only format.
pub const CANONICAL_DATE: &str = "%d/%m/%Y";

/// Canonical date-time format.
pub const CANONICAL_DATETIME: &str = "%d/%m/%Y %H:%M:%S";

/// Encoding class inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingClass {
    NativeTemporal,
    NumericSerial,
    IsoText,
    Plain,
}

/// What the normalizer did to one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnOutcome {
    pub name: String,
    pub encoding: EncodingClass,
    /// Cells rewritten to canonical form.
    pub converted: usize,
}

/// Rewrites every date-bearing column of `df` to canonical text.
///
/// Returns the transformed frame together with one outcome per column, in
/// column order.
pub fn normalize_temporal_columns(df: &DataFrame) -> Result<(DataFrame, Vec<ColumnOutcome>)> {
    let mut columns = Vec::with_capacity(df.width());
    let mut outcomes = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = column.name().to_string();
        match normalize_column(column) {
            Ok((normalized, encoding, converted)) => {
                if encoding != EncodingClass::Plain {
                    debug!(column = %name, ?encoding, converted, "normalized date column");
                }
                columns.push(normalized);
                outcomes.push(ColumnOutcome {
                    name,
                    encoding,
                    converted,
                });
            }
            Err(error) => {
                warn!(column = %name, %error, "could not convert dates, keeping original values");
                columns.push(column.clone());
                outcomes.push(ColumnOutcome {
                    name,
                    encoding: EncodingClass::Plain,
                    converted: 0,
                });
            }
        }
    }

    Ok((DataFrame::new(columns)?, outcomes))
}

fn normalize_column(column: &Column) -> PolarsResult<(Column, EncodingClass, usize)> {
    let dtype = column.dtype();

    if matches!(dtype, DataType::Datetime(_, _) | DataType::Date) {
        let (normalized, converted) = format_native_temporal(column)?;
        return Ok((normalized, EncodingClass::NativeTemporal, converted));
    }

    if dtype.is_integer() || dtype.is_float() {
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;
        return match column_bounds(values.into_iter()) {
            Some((min, max)) if is_serial_range(min, max) => {
                let (normalized, converted) = decode_serial_column(column.name(), values);
                Ok((normalized, EncodingClass::NumericSerial, converted))
            }
            _ => Ok((column.clone(), EncodingClass::Plain, 0)),
        };
    }

    if dtype == &DataType::String {
        let (normalized, converted) = convert_iso_column(column)?;
        let encoding = if converted > 0 {
            EncodingClass::IsoText
        } else {
            EncodingClass::Plain
        };
        return Ok((normalized, encoding, converted));
    }

    Ok((column.clone(), EncodingClass::Plain, 0))
}

/// Formats native date/times with the full canonical pattern. Missing cells
/// stay missing.
fn format_native_temporal(column: &Column) -> PolarsResult<(Column, usize)> {
    let millis = column
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        .cast(&DataType::Int64)?;

    let mut converted = 0;
    let values: Vec<Option<String>> = millis
        .i64()?
        .into_iter()
        .map(|cell| {
            let text = cell
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| dt.naive_utc().format(CANONICAL_DATETIME).to_string());
            if text.is_some() {
                converted += 1;
            }
            text
        })
        .collect();

    Ok((Series::new(column.name().clone(), values).into_column(), converted))
}

fn decode_serial_column(name: &PlSmallStr, values: &Float64Chunked) -> (Column, usize) {
    let mut converted = 0;
    let cells: Vec<Option<String>> = values
        .into_iter()
        .map(|cell| {
            let value = cell?;
            match decode_serial(value) {
                SerialCell::Date(text) => {
                    converted += 1;
                    Some(text)
                }
                SerialCell::NoValue => None,
                SerialCell::Unchanged => Some(format_numeric(value)),
            }
        })
        .collect();

    (Series::new(name.clone(), cells).into_column(), converted)
}

fn convert_iso_column(column: &Column) -> PolarsResult<(Column, usize)> {
    let mut converted = 0;
    let cells: Vec<Option<String>> = column
        .str()?
        .into_iter()
        .map(|cell| {
            cell.map(|text| match iso_to_canonical(text) {
                Some(canonical) => {
                    converted += 1;
                    canonical
                }
                None => text.to_string(),
            })
        })
        .collect();

    Ok((Series::new(column.name().clone(), cells).into_column(), converted))
}
