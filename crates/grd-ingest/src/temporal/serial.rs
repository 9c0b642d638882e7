//! Spreadsheet serial date decoding.
//!
//! Serial dates count days from the spreadsheet's day zero. The epoch used
//! here is 1899-12-30, which reproduces the spreadsheet's 1900 leap-year
//! defect for every serial after February 1900.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use super::{CANONICAL_DATE, CANONICAL_DATETIME};

/// Inclusive lower bound for a column to be treated as serial dates.
pub const SERIAL_MIN: f64 = 1.0;

/// Inclusive upper bound for a column to be treated as serial dates.
pub const SERIAL_MAX: f64 = 50_000.0;

/// Outcome of decoding one serial cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialCell {
    /// Decoded into canonical text.
    Date(String),
    /// Zero or unparseable; the cell becomes empty.
    NoValue,
    /// Decoding failed; the original number is kept.
    Unchanged,
}

/// Returns true when both column bounds fall within the serial date range.
pub fn is_serial_range(min: f64, max: f64) -> bool {
    (SERIAL_MIN..=SERIAL_MAX).contains(&min) && (SERIAL_MIN..=SERIAL_MAX).contains(&max)
}

/// Computes the minimum and maximum over the parsed values of a column.
///
/// Missing and NaN values are ignored. Returns `None` when nothing parsed.
pub fn column_bounds<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold(None, |bounds, v| match bounds {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Decodes a serial number into `DD/MM/YYYY`, or `DD/MM/YYYY HH:MM:SS` when
/// the value carries a fraction of a day.
///
/// Time components are derived by successive multiplication and truncation,
/// never rounding.
pub fn decode_serial(value: f64) -> SerialCell {
    if value == 0.0 || !value.is_finite() {
        return SerialCell::NoValue;
    }

    let days = value.trunc();
    let fraction = value - days;

    let date = NaiveDate::from_ymd_opt(1899, 12, 30)
        .zip(TimeDelta::try_days(days as i64))
        .and_then(|(epoch, offset)| epoch.checked_add_signed(offset));
    let Some(date) = date else {
        return SerialCell::Unchanged;
    };

    if fraction <= 0.0 {
        return SerialCell::Date(date.format(CANONICAL_DATE).to_string());
    }

    let hours_f = fraction * 24.0;
    let hours = hours_f.trunc();
    let minutes_f = (hours_f - hours) * 60.0;
    let minutes = minutes_f.trunc();
    let seconds = ((minutes_f - minutes) * 60.0).trunc();

    match NaiveTime::from_hms_opt(hours as u32, minutes as u32, seconds as u32) {
        Some(time) => SerialCell::Date(date.and_time(time).format(CANONICAL_DATETIME).to_string()),
        None => SerialCell::Unchanged,
    }
}
