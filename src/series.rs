//! Reading timestamp columns from delimited text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Timestamps parsed from the first column of a CSV source, with their raw text.
#[derive(Debug, Clone, Default)]
pub struct TimestampColumn {
    pub raw: Vec<String>,
    pub values: Vec<NaiveDateTime>,
}

impl TimestampColumn {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("failed to open timestamp file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: cannot parse `{value}` with format `{format}`")]
    Parse {
        line: u64,
        value: String,
        format: String,
    },
}

/// Load the first column of a CSV file as timestamps.
pub fn load_timestamp_column<P: AsRef<Path>>(
    path: P,
    format: &str,
    has_headers: bool,
) -> Result<TimestampColumn, SeriesError> {
    let file = File::open(path)?;
    read_timestamp_column(file, format, has_headers)
}

/// Parse the first column of every record; blank rows are skipped.
pub fn read_timestamp_column<R: Read>(
    reader: R,
    format: &str,
    has_headers: bool,
) -> Result<TimestampColumn, SeriesError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut column = TimestampColumn::default();
    for record in csv_reader.records() {
        let record = record?;
        let Some(field) = record.get(0).filter(|f| !f.is_empty()) else {
            continue;
        };
        let value = NaiveDateTime::parse_from_str(field, format).map_err(|_| {
            SeriesError::Parse {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                value: field.to_string(),
                format: format.to_string(),
            }
        })?;
        column.raw.push(field.to_string());
        column.values.push(value);
    }
    Ok(column)
}
