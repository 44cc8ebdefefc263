//! Citation line assembly.
//!
//! Builds one numbered GB/T 7714 style line per record. The author block
//! decides the script; the script decides the layout of the whole line.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::authors::format_authors;
use crate::fields::{has_expected_columns, resolve, Field};
use crate::record::{Record, RecordTable};
use crate::script::Script;

/// Publication-type marker placed after the title. Every record is rendered
/// as a journal article.
// TODO: choose [C]/[M]/[D] from the resolved publication type once the
// WoS/Scopus type codes are mapped.
pub const PUBLICATION_MARKER: &str = "[J]";

/// Default number of authors kept before the "et al." marker.
pub const DEFAULT_TRUNCATE: usize = 3;

/// Number of column names reported when a table is not recognized.
const COLUMN_SAMPLE_LEN: usize = 10;

static PAGES_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^pp\.\s*").expect("valid regex"));
static SPACE_BEFORE_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+,").expect("valid regex"));
static DOUBLE_STOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*\.").expect("valid regex"));
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Errors that abort a whole conversion.
#[derive(Error, Debug, PartialEq)]
pub enum ConvertError {
    #[error("input does not contain expected columns; found (first {}): {}", .found.len(), .found.join(", "))]
    MissingExpectedColumns { found: Vec<String> },
}

/// Formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Authors kept before the list is cut with "et al." / "等".
    pub truncate: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            truncate: DEFAULT_TRUNCATE,
        }
    }
}

/// The resolved fields of one record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CitationFields {
    /// Resolved but not used for the marker; see [`PUBLICATION_MARKER`].
    pub publication_type: String,
    pub authors: String,
    pub title: String,
    pub source: String,
    pub volume: String,
    pub issue: String,
    pub article_number: String,
    pub pages: String,
    pub doi: String,
    pub year: String,
}

impl CitationFields {
    pub fn from_record(record: &Record) -> Self {
        Self {
            publication_type: resolve(record, Field::PublicationType),
            authors: resolve(record, Field::Authors),
            title: resolve(record, Field::Title),
            source: resolve(record, Field::Source),
            volume: resolve(record, Field::Volume),
            issue: resolve(record, Field::Issue),
            article_number: resolve(record, Field::ArticleNumber),
            pages: resolve(record, Field::Pages),
            doi: resolve(record, Field::Doi),
            year: resolve(record, Field::Year),
        }
    }
}

/// Builds the `volume(issue):pages` fragment.
///
/// Every input is optional; the result never carries dangling punctuation.
/// An article number takes the place of the page range when both exist.
///
/// # Examples
///
/// ```
/// use gbt_refs::format_volume_pages;
///
/// assert_eq!(format_volume_pages("12", "3", "", "45-50"), "12(3):45-50");
/// assert_eq!(format_volume_pages("", "", "", "pp. 7-9"), "7-9");
/// assert_eq!(format_volume_pages("", "", "", ""), "");
/// ```
pub fn format_volume_pages(volume: &str, issue: &str, article_number: &str, pages: &str) -> String {
    let volume = volume.trim();
    let issue = issue.trim();

    let vol_issue = match (volume.is_empty(), issue.is_empty()) {
        (false, false) => format!("{}({})", volume, issue),
        (false, true) => volume.to_string(),
        (true, false) => format!("({})", issue),
        (true, true) => String::new(),
    };

    let candidate = if article_number.trim().is_empty() {
        pages
    } else {
        article_number
    };
    let page_part = PAGES_PREFIX.replace(candidate.trim(), "");
    let page_part = page_part.trim();

    match (vol_issue.is_empty(), page_part.is_empty()) {
        (false, false) => format!("{}:{}", vol_issue, page_part),
        (false, true) => vol_issue,
        (true, false) => page_part.to_string(),
        (true, true) => String::new(),
    }
}

/// Formats one record as a numbered citation line. `index` is 1-based.
///
/// # Examples
///
/// ```
/// use gbt_refs::{format_citation, Record};
///
/// let record: Record = [
///     ("Authors", "Smith, J; Lee, K"),
///     ("Title", "A Study"),
///     ("Source", "J. Test"),
///     ("Year", "2020"),
///     ("Volume", "5"),
///     ("Pages", "10-20"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(
///     format_citation(&record, 1, 3),
///     "[1] Smith J, Lee K. A Study[J] J. Test, 2020, 5:10-20."
/// );
/// ```
pub fn format_citation(record: &Record, index: usize, truncate: usize) -> String {
    assemble(&CitationFields::from_record(record), index, truncate)
}

/// Assembles a citation line from already-resolved fields.
pub fn assemble(fields: &CitationFields, index: usize, truncate: usize) -> String {
    let authors = format_authors(&fields.authors, truncate);
    let vol_pages = format_volume_pages(
        &fields.volume,
        &fields.issue,
        &fields.article_number,
        &fields.pages,
    );

    let mut line = format!(
        "[{}] {}. {}{} {}, {}",
        index, authors.text, fields.title, PUBLICATION_MARKER, fields.source, fields.year
    );

    match authors.script {
        Script::Cjk => {
            if !vol_pages.is_empty() {
                line.push_str(", ");
                line.push_str(&vol_pages);
            }
            if !fields.doi.is_empty() {
                line.push_str(", doi:");
                line.push_str(&fields.doi);
            }
            if !line.ends_with('.') {
                line.push('.');
            }
            line
        }
        Script::Latin => {
            if !vol_pages.is_empty() {
                line.push_str(", ");
                line.push_str(&vol_pages);
            }
            if !fields.doi.is_empty() {
                line.push_str(". doi:");
                line.push_str(&fields.doi);
            }
            line.push('.');
            clean_latin(&line)
        }
    }
}

fn clean_latin(line: &str) -> String {
    let line = SPACE_BEFORE_COMMA.replace_all(line, ",");
    let line = DOUBLE_STOP.replace_all(&line, ".");
    SPACE_RUN.replace_all(&line, " ").into_owned()
}

/// Checks that `columns` looks like a bibliographic export.
pub fn check_columns<S: AsRef<str>>(columns: &[S]) -> Result<(), ConvertError> {
    if has_expected_columns(columns) {
        return Ok(());
    }
    Err(ConvertError::MissingExpectedColumns {
        found: columns
            .iter()
            .take(COLUMN_SAMPLE_LEN)
            .map(|c| c.as_ref().to_string())
            .collect(),
    })
}

/// Formats every record of `table`, numbered from 1 in input order.
///
/// Fails before any record is formatted when the table has none of the
/// core bibliographic columns.
pub fn format_references(table: &RecordTable, options: &Options) -> Result<Vec<String>, ConvertError> {
    check_columns(&table.columns)?;
    Ok(format_records(&table.rows, options))
}

/// Formats records without the column check.
pub fn format_records(records: &[Record], options: &Options) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| format_citation(record, i + 1, options.truncate))
        .collect()
}
