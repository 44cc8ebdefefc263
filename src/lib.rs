//! gbt-refs: turn bibliographic database exports into numbered reference lists.
//!
//! This library provides functionality to:
//! - Load exported records (CSV, tab-delimited, JSON or JSONL)
//! - Resolve fields across the column-name dialects of different databases
//! - Format author names and lists for CJK and Latin script
//! - Assemble one GB/T 7714 style citation line per record
//! - Write the list as a single-column table and as a document

pub mod authors;
pub mod citation;
pub mod fields;
pub mod input;
pub mod names;
pub mod output;
pub mod record;
pub mod script;

pub use authors::{format_authors, split_authors, AuthorBlock};
pub use citation::{
    check_columns, format_citation, format_records, format_references, format_volume_pages,
    ConvertError, Options,
};
pub use fields::{resolve, Field};
pub use input::{load_records, parse_records, InputError, InputFormat};
pub use names::format_name;
pub use output::{render_document, render_table, write_outputs, write_sample, OutputError};
pub use record::{FieldValue, Record, RecordTable};
pub use script::{is_cjk, Script};
