//! Output writers for formatted reference lists.
//!
//! The same citation lines are written twice: as a single-column table and as
//! a document with one paragraph per reference under a heading.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::fields::render_value;
use crate::record::RecordTable;

/// Column header of the single-column table.
pub const TABLE_HEADER: &str = "FormattedReference";

/// Heading placed above the reference list in the document.
pub const DOCUMENT_HEADING: &str = "参考文献";

/// File name of the table output.
pub const TABLE_FILE_NAME: &str = "参考文献输出.csv";

/// File name of the document output.
pub const DOCUMENT_FILE_NAME: &str = "参考文献输出.md";

/// File name of the diagnostic sample written when a table is not recognized.
pub const SAMPLE_FILE_NAME: &str = "wos_input_sample.csv";

/// Errors that can occur when writing outputs.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] csv::Error),
}

/// Paths of the files written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub table: PathBuf,
    pub document: PathBuf,
}

/// Renders the citations as a Markdown document.
///
/// # Arguments
///
/// * `citations` - The formatted citation lines, in output order
/// * `heading` - The level-one heading placed above the list
///
/// # Returns
///
/// The document text, one paragraph per citation.
pub fn render_document(citations: &[String], heading: &str) -> String {
    let mut output = format!("# {}\n", heading);
    for citation in citations {
        output.push('\n');
        output.push_str(&escape_markdown(citation));
        output.push('\n');
    }
    output
}

/// Escapes the characters that would turn a citation into Markdown markup.
///
/// Citation lines start with `[N]` and contain `[J]`, which Markdown would
/// otherwise read as reference-style links.
fn escape_markdown(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for c in line.chars() {
        if matches!(c, '\\' | '[' | ']' | '*' | '_' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders the citations as a single-column CSV table with a header row.
pub fn render_table(citations: &[String]) -> Result<String, OutputError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([TABLE_HEADER])?;
    for citation in citations {
        writer.write_record([citation])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes the table and the document into `out_dir`.
pub fn write_outputs(out_dir: &Path, citations: &[String]) -> Result<OutputPaths, OutputError> {
    let paths = OutputPaths {
        table: out_dir.join(TABLE_FILE_NAME),
        document: out_dir.join(DOCUMENT_FILE_NAME),
    };

    // Excel only detects UTF-8 CSV files that carry a byte-order mark
    let table = format!("\u{feff}{}", render_table(citations)?);
    fs::write(&paths.table, table)?;
    debug!(path = %paths.table.display(), rows = citations.len(), "wrote table");

    fs::write(&paths.document, render_document(citations, DOCUMENT_HEADING))?;
    debug!(path = %paths.document.display(), "wrote document");

    Ok(paths)
}

/// Writes the first `limit` rows of `table` to `path` as CSV, for inspecting
/// an input whose columns were not recognized.
pub fn write_sample(path: &Path, table: &RecordTable, limit: usize) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in table.rows.iter().take(limit) {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|c| row.get(c).and_then(render_value).unwrap_or_default())
            .collect();
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), "wrote input sample");
    Ok(())
}
