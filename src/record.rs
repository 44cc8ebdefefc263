//! Bibliographic records as loosely-typed field maps.
//!
//! Exported tables have no fixed schema: column names vary between databases
//! and cells may hold text, numbers or nothing at all.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Builds a value from a raw text cell. Empty cells become `Null`.
    pub fn from_cell(cell: &str) -> Self {
        if cell.is_empty() {
            FieldValue::Null
        } else {
            FieldValue::Text(cell.to_string())
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// One bibliographic entry: field name to value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Records together with their column names in first-appearance order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl RecordTable {
    /// Builds a table from rows alone, collecting column names as they appear.
    ///
    /// Field order inside a single record is not preserved, so columns first
    /// seen in the same record are sorted by name.
    pub fn from_rows(rows: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            let mut new: Vec<&str> = row
                .field_names()
                .filter(|name| !columns.iter().any(|c| c == name))
                .collect();
            new.sort_unstable();
            columns.extend(new.into_iter().map(str::to_string));
        }
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
