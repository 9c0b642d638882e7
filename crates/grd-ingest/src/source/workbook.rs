//! Spreadsheet workbook reading.
//!
//! Cells are typed per column the way a dataframe reader would: a column
//! whose non-empty cells are all date/times becomes a native temporal column,
//! all numbers a numeric column, anything else text.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::{debug, info};

use crate::columns::unique_names;
use crate::error::{IngestError, Result};
use crate::numeric::format_numeric;
use crate::options::IngestOptions;

/// Text form used for date/times that end up in text columns. The temporal
/// normalizer recognises it as ISO text.
const ISO_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Reads the selected worksheet of a workbook into a DataFrame.
///
/// Returns the frame and the name of the sheet that was processed.
pub fn read_workbook(path: &Path, options: &IngestOptions) -> Result<(DataFrame, String)> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let available = workbook.sheet_names();
    let sheet = select_sheet(path, &available, options)?;
    info!(path = %path.display(), sheet = %sheet, "reading worksheet");

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let frame = range_to_frame(&range, &sheet)?;
    Ok((frame, sheet))
}

/// Chooses the worksheet to process.
///
/// A requested sheet must exist exactly. Otherwise the preferred names are
/// tried exactly, then case-insensitively, and finally the first sheet wins.
pub fn select_sheet(path: &Path, available: &[String], options: &IngestOptions) -> Result<String> {
    if let Some(requested) = &options.sheet {
        return if available.iter().any(|name| name == requested) {
            Ok(requested.clone())
        } else {
            Err(IngestError::SheetNotFound {
                sheet: requested.clone(),
                available: available.to_vec(),
            })
        };
    }

    let exact = options
        .preferred_sheets
        .iter()
        .find(|preferred| available.contains(preferred));
    if let Some(found) = exact {
        return Ok(found.clone());
    }

    let relaxed = options.preferred_sheets.iter().find_map(|preferred| {
        available
            .iter()
            .find(|name| name.trim().eq_ignore_ascii_case(preferred.trim()))
    });
    if let Some(found) = relaxed {
        return Ok(found.clone());
    }

    available
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })
}

/// A worksheet cell reduced to what column typing needs.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Integer(i64),
    Float(f64),
    Temporal(NaiveDateTime),
    Text(String),
}

impl Cell {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::Int(v) => Self::Integer(*v),
            Data::Float(v) => Self::Float(*v),
            Data::Bool(v) => Self::Text(if *v { "True" } else { "False" }.to_string()),
            Data::String(s) if s.trim().is_empty() => Self::Empty,
            Data::String(s) => Self::Text(s.clone()),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(value) if !dt.is_duration() => Self::Temporal(value),
                _ => Self::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => parse_iso_cell(s)
                .map(Self::Temporal)
                .unwrap_or_else(|| Self::Text(s.clone())),
            Data::DurationIso(s) => Self::Text(s.clone()),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Integer(v) => Some(v.to_string()),
            Self::Float(v) => Some(format_numeric(*v)),
            Self::Temporal(dt) => Some(dt.format(ISO_DATETIME).to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

fn parse_iso_cell(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Temporal,
    Integer,
    Float,
    Text,
}

fn column_kind(cells: &[Cell]) -> ColumnKind {
    let mut present = cells.iter().filter(|cell| **cell != Cell::Empty).peekable();
    if present.peek().is_none() {
        return ColumnKind::Text;
    }

    let mut all_temporal = true;
    let mut all_numeric = true;
    let mut all_integral = true;
    for cell in present {
        match cell {
            Cell::Temporal(_) => {
                all_numeric = false;
                all_integral = false;
            }
            Cell::Integer(_) => all_temporal = false,
            Cell::Float(v) => {
                all_temporal = false;
                if v.fract() != 0.0 || !v.is_finite() {
                    all_integral = false;
                }
            }
            _ => return ColumnKind::Text,
        }
    }

    if all_temporal {
        ColumnKind::Temporal
    } else if all_numeric && all_integral {
        ColumnKind::Integer
    } else if all_numeric {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    }
}

fn header_text(index: usize, cell: &Data) -> String {
    match Cell::from_data(cell).as_text() {
        Some(text) => text,
        None => format!("Unnamed: {index}"),
    }
}

fn build_column(name: &str, cells: &[Cell]) -> PolarsResult<Column> {
    let name = PlSmallStr::from(name);
    let series = match column_kind(cells) {
        ColumnKind::Temporal => {
            let millis: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Temporal(dt) => Some(dt.and_utc().timestamp_millis()),
                    _ => None,
                })
                .collect();
            Series::new(name, millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        ColumnKind::Integer => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| cell.as_f64().map(|v| v as i64))
                .collect();
            Series::new(name, values)
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(Cell::as_f64).collect();
            Series::new(name, values)
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(Cell::as_text).collect();
            Series::new(name, values)
        }
    };
    Ok(series.into_column())
}

fn range_to_frame(range: &Range<Data>, sheet: &str) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptySheet {
            sheet: sheet.to_string(),
        });
    };

    let headers = unique_names(
        header_row
            .iter()
            .enumerate()
            .map(|(index, cell)| header_text(index, cell))
            .collect(),
    );

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (index, cells) in columns.iter_mut().enumerate() {
            cells.push(row.get(index).map_or(Cell::Empty, Cell::from_data));
        }
    }
    debug!(sheet, columns = headers.len(), rows = columns.first().map_or(0, Vec::len), "worksheet loaded");

    let columns = headers
        .iter()
        .zip(&columns)
        .map(|(name, cells)| build_column(name, cells))
        .collect::<PolarsResult<Vec<_>>>()?;
    Ok(DataFrame::new(columns)?)
}
