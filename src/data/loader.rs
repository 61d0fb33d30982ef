//! CSV Data Loader Module
//! Parses the headerless Adult Income CSV into a cleaned [`Dataset`].

use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use super::model::{Dataset, Income, Record, ADULT_COLUMNS};
use super::source::Source;
use crate::error::DatasetError;

/// Token the raw source uses for a missing value.
pub const MISSING_SENTINEL: &str = "?";

/// Position of every [`Record`] field inside a row, resolved from the
/// caller's column list.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    width: usize,
    idx: [usize; 15],
}

impl ColumnLayout {
    fn resolve<S: AsRef<str>>(columns: &[S]) -> Result<Self, DatasetError> {
        let mut idx = [0usize; 15];
        for (slot, wanted) in idx.iter_mut().zip(ADULT_COLUMNS) {
            *slot = columns
                .iter()
                .position(|c| c.as_ref() == wanted)
                .ok_or_else(|| DatasetError::MissingColumn(wanted.to_string()))?;
        }
        Ok(Self {
            width: columns.len(),
            idx,
        })
    }

    /// Name of the record field read from raw column `position`, if any.
    fn column_name(&self, position: usize) -> String {
        self.idx
            .iter()
            .position(|i| *i == position)
            .map(|f| ADULT_COLUMNS[f].to_string())
            .unwrap_or_else(|| format!("column {}", position + 1))
    }

    fn field<'r>(&self, row: &'r StringRecord, field: usize) -> &'r str {
        // width was checked before any field access
        row.get(self.idx[field]).unwrap_or_default()
    }
}

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == MISSING_SENTINEL
}

/// Fetch `source` and parse it with the given column order.
pub fn load<S: AsRef<str>>(source: &dyn Source, columns: &[S]) -> Result<Dataset, DatasetError> {
    let layout = ColumnLayout::resolve(columns)?;
    let bytes = source.fetch()?;
    let dataset = parse_with_layout(&bytes, layout, source.locator())?;
    info!(
        "loaded {} records from {} ({} rows read, {} dropped for missing values)",
        dataset.len(),
        source.locator(),
        dataset.rows_read(),
        dataset.rows_dropped()
    );
    Ok(dataset)
}

/// Parse raw CSV bytes that are already in memory.
pub fn parse_csv<S: AsRef<str>>(bytes: &[u8], columns: &[S]) -> Result<Dataset, DatasetError> {
    let layout = ColumnLayout::resolve(columns)?;
    parse_with_layout(bytes, layout, "<memory>")
}

fn parse_with_layout(
    bytes: &[u8],
    layout: ColumnLayout,
    locator: &str,
) -> Result<Dataset, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    let mut rows_read = 0usize;

    for result in reader.records() {
        let row = result.map_err(|e| read_error(e, &layout, locator))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        // whitespace-only line, trimmed down to one empty field
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }
        rows_read += 1;

        if row.len() != layout.width {
            return Err(DatasetError::SchemaMismatch {
                line,
                expected: layout.width,
                found: row.len(),
            });
        }

        if row.iter().any(is_missing) {
            debug!("dropping line {line}: missing value");
            continue;
        }

        records.push(build_record(&row, &layout, line)?);
    }

    Ok(Dataset::new(records, rows_read))
}

/// I/O failures mean the source could not be read; anything else is a
/// malformed value in bytes that were read fine.
fn read_error(err: csv::Error, layout: &ColumnLayout, locator: &str) -> DatasetError {
    match err.kind() {
        csv::ErrorKind::Utf8 { pos, err: utf8 } => DatasetError::InvalidField {
            line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            column: layout.column_name(utf8.field()),
            value: "<invalid UTF-8>".to_string(),
        },
        csv::ErrorKind::Io(_) => DatasetError::unavailable(locator, &err),
        _ => DatasetError::InvalidField {
            line: err.position().map(|p| p.line()).unwrap_or(0),
            column: String::new(),
            value: err.to_string(),
        },
    }
}

fn parse_field<T: FromStr>(
    row: &StringRecord,
    layout: &ColumnLayout,
    field: usize,
    line: u64,
) -> Result<T, DatasetError> {
    let raw = layout.field(row, field);
    raw.parse::<T>().map_err(|_| DatasetError::InvalidField {
        line,
        column: ADULT_COLUMNS[field].to_string(),
        value: raw.to_string(),
    })
}

fn text_field(row: &StringRecord, layout: &ColumnLayout, field: usize) -> String {
    layout.field(row, field).to_string()
}

fn build_record(
    row: &StringRecord,
    layout: &ColumnLayout,
    line: u64,
) -> Result<Record, DatasetError> {
    let income_raw = layout.field(row, 14);
    let income = income_raw
        .parse::<Income>()
        .map_err(|_| DatasetError::InvalidField {
            line,
            column: ADULT_COLUMNS[14].to_string(),
            value: income_raw.to_string(),
        })?;

    Ok(Record {
        age: parse_field(row, layout, 0, line)?,
        workclass: text_field(row, layout, 1),
        fnlwgt: parse_field(row, layout, 2, line)?,
        education: text_field(row, layout, 3),
        education_num: parse_field(row, layout, 4, line)?,
        marital_status: text_field(row, layout, 5),
        occupation: text_field(row, layout, 6),
        relationship: text_field(row, layout, 7),
        race: text_field(row, layout, 8),
        sex: text_field(row, layout, 9),
        capital_gain: parse_field(row, layout, 10, line)?,
        capital_loss: parse_field(row, layout, 11, line)?,
        hours_per_week: parse_field(row, layout, 12, line)?,
        native_country: text_field(row, layout, 13),
        income,
    })
}
