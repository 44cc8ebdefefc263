//! Record loading.
//!
//! Reads exported reference tables into a [`RecordTable`]. Supported inputs
//! are delimited text with a header row (CSV, or tab-separated as produced by
//! Web of Science "Tab-delimited" exports) and JSON, either as an array of
//! objects or as JSONL (one object per line).

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::record::{FieldValue, Record, RecordTable};

/// Errors that can occur when loading records.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid JSONL at line {line}: {message}")]
    JsonlError { line: usize, message: String },

    #[error("Records must be a JSON array")]
    NotAnArray,

    #[error("Record {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Tab-separated values with a header row
    Tsv,
    /// JSON array of objects, or JSONL
    Json,
}

impl InputFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "tsv" | "txt" => Ok(InputFormat::Tsv),
            "json" | "jsonl" | "ndjson" => Ok(InputFormat::Json),
            "" => Err(InputError::UnsupportedFormat("file has no extension".into())),
            other => Err(InputError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

/// Loads records from `path`, detecting the format from its extension
/// unless `format` is given.
pub fn load_records(path: &Path, format: Option<InputFormat>) -> Result<RecordTable, InputError> {
    let format = match format {
        Some(f) => f,
        None => InputFormat::from_path(path)?,
    };
    let content = fs::read_to_string(path)?;
    let table = parse_records(&content, format)?;
    debug!(
        path = %path.display(),
        ?format,
        rows = table.len(),
        columns = table.columns.len(),
        "loaded records"
    );
    Ok(table)
}

/// Parses records from in-memory content.
pub fn parse_records(content: &str, format: InputFormat) -> Result<RecordTable, InputError> {
    match format {
        InputFormat::Csv => parse_delimited(content, b','),
        InputFormat::Tsv => parse_delimited(content, b'\t'),
        InputFormat::Json => parse_json(content),
    }
}

fn parse_delimited(content: &str, delimiter: u8) -> Result<RecordTable, InputError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut record = Record::new();
        for (name, cell) in columns.iter().zip(row.iter()) {
            // Duplicate headers keep the leftmost column
            if record.get(name).is_none() {
                record.insert(name.as_str(), FieldValue::from_cell(cell));
            }
        }
        rows.push(record);
    }

    Ok(RecordTable { columns, rows })
}

/// Accepts a JSON array of objects or JSONL.
fn parse_json(content: &str) -> Result<RecordTable, InputError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();

    if trimmed.is_empty() {
        return Ok(RecordTable::default());
    }

    let values: Vec<serde_json::Value> = if trimmed.starts_with('[') {
        let value: serde_json::Value = serde_json::from_str(trimmed)?;
        match value {
            serde_json::Value::Array(items) => items,
            _ => return Err(InputError::NotAnArray),
        }
    } else {
        let mut items = Vec::new();
        for (line_num, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: serde_json::Value = serde_json::from_str(line).map_err(|e| InputError::JsonlError {
                line: line_num + 1,
                message: e.to_string(),
            })?;
            items.push(value);
        }
        items
    };

    let mut rows = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        if !value.is_object() {
            return Err(InputError::NotAnObject { index: index + 1 });
        }
        rows.push(serde_json::from_value::<Record>(value)?);
    }

    Ok(RecordTable::from_rows(rows))
}
