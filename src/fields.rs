//! Logical fields and their column-name synonyms.
//!
//! Export schemas disagree on column names ("Article Title", "Title", "TI"),
//! so each logical field owns an ordered synonym list. The first synonym that
//! holds a value wins.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::record::{FieldValue, Record};

/// A logical bibliographic attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PublicationType,
    Authors,
    Title,
    Source,
    Volume,
    Issue,
    ArticleNumber,
    Pages,
    Doi,
    Year,
}

/// Single source of truth for column synonyms, most authoritative first.
const SYNONYMS: &[(Field, &[&str])] = &[
    (
        Field::PublicationType,
        &[
            "Publication Type",
            "publication type",
            "PubType",
            "Record Type",
            "Document Type",
        ],
    ),
    (
        Field::Authors,
        &["Authors", "Author", "AU", "authors", "Author(s)"],
    ),
    (
        Field::Title,
        &["Article Title", "Title", "article title", "TI"],
    ),
    (
        Field::Source,
        &["Source Title", "Journal", "Source", "Source title", "SO"],
    ),
    (Field::Volume, &["Volume", "volume", "VL"]),
    (Field::Issue, &["Issue", "issue", "IS"]),
    (
        Field::ArticleNumber,
        &["Article Number", "Art. No.", "art. no.", "ArticleNumber"],
    ),
    (Field::Pages, &["Pages", "Page", "PG"]),
    (Field::Doi, &["DOI", "doi", "DOI:"]),
    (
        Field::Year,
        &["Publication Year", "Year", "PY", "publication year"],
    ),
];

/// Columns of which at least one must be present for a table to be treated
/// as a bibliographic export.
pub const EXPECTED_COLUMNS: &[&str] = &[
    "Authors",
    "Author",
    "AU",
    "Article Title",
    "Title",
    "Source Title",
    "Journal",
    "Publication Year",
    "Year",
];

static INTEGRAL_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]?\d+)\.0*$").expect("valid regex"));

impl Field {
    pub const ALL: [Field; 10] = [
        Field::PublicationType,
        Field::Authors,
        Field::Title,
        Field::Source,
        Field::Volume,
        Field::Issue,
        Field::ArticleNumber,
        Field::Pages,
        Field::Doi,
        Field::Year,
    ];

    /// Column names accepted for this field, in precedence order.
    pub fn synonyms(self) -> &'static [&'static str] {
        SYNONYMS
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, names)| *names)
            .unwrap_or(&[])
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::PublicationType => "publication type",
            Field::Authors => "authors",
            Field::Title => "title",
            Field::Source => "source",
            Field::Volume => "volume",
            Field::Issue => "issue",
            Field::ArticleNumber => "article number",
            Field::Pages => "pages",
            Field::Doi => "doi",
            Field::Year => "year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the first present, non-empty value among `candidates`, rendered
/// as trimmed text. Returns an empty string when nothing matches.
pub fn resolve_any(record: &Record, candidates: &[&str]) -> String {
    candidates
        .iter()
        .filter_map(|name| record.get(name))
        .filter_map(render_value)
        .next()
        .unwrap_or_default()
}

/// Resolves a logical field through its synonym list.
pub fn resolve(record: &Record, field: Field) -> String {
    resolve_any(record, field.synonyms())
}

/// Renders a cell as text, or `None` when it counts as absent.
///
/// Integral numbers lose their decimal point, whether they arrive as numbers
/// or as numeric-looking text such as `"12.0"`.
pub fn render_value(value: &FieldValue) -> Option<String> {
    let text = match value {
        FieldValue::Null => return None,
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Number(n) if n.is_nan() => return None,
        FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{:.0}", n),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Text(s) => {
            let trimmed = s.trim();
            match INTEGRAL_DECIMAL.captures(trimmed) {
                Some(caps) => caps[1].to_string(),
                None => trimmed.to_string(),
            }
        }
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Returns true if any of `columns` is one of [`EXPECTED_COLUMNS`].
pub fn has_expected_columns<S: AsRef<str>>(columns: &[S]) -> bool {
    columns
        .iter()
        .any(|c| EXPECTED_COLUMNS.contains(&c.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, FieldValue)]) -> Record {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_every_field_has_synonyms() {
        for field in Field::ALL {
            assert!(!field.synonyms().is_empty(), "{} has no synonyms", field);
        }
    }

    #[test]
    fn test_resolve_prefers_first_synonym() {
        // Given: a record with both "Title" and "Article Title"
        let rec = record(&[
            ("Title", "Short".into()),
            ("Article Title", "Full Title".into()),
        ]);

        // When: we resolve the title
        // Then: the earlier synonym in the list wins
        assert_eq!(resolve(&rec, Field::Title), "Full Title");
    }

    #[test]
    fn test_resolve_skips_absent_and_empty_values() {
        let rec = record(&[
            ("Authors", FieldValue::Null),
            ("Author", "   ".into()),
            ("AU", "Smith J".into()),
        ]);
        assert_eq!(resolve(&rec, Field::Authors), "Smith J");
    }

    #[test]
    fn test_resolve_missing_field_is_empty() {
        let rec = record(&[("Title", "A".into())]);
        assert_eq!(resolve(&rec, Field::Doi), "");
    }

    #[test]
    fn test_resolve_trims_text() {
        let rec = record(&[("DOI", "  10.1000/xyz  ".into())]);
        assert_eq!(resolve(&rec, Field::Doi), "10.1000/xyz");
    }

    #[test]
    fn test_render_integral_numbers() {
        assert_eq!(render_value(&FieldValue::Number(12.0)), Some("12".into()));
        assert_eq!(render_value(&FieldValue::Integer(2020)), Some("2020".into()));
        assert_eq!(render_value(&FieldValue::Number(12.5)), Some("12.5".into()));
        assert_eq!(render_value(&FieldValue::Number(f64::NAN)), None);
    }

    #[test]
    fn test_render_numeric_looking_text() {
        assert_eq!(render_value(&"12.0".into()), Some("12".into()));
        assert_eq!(render_value(&" 2020.00 ".into()), Some("2020".into()));
        assert_eq!(render_value(&"12.50".into()), Some("12.50".into()));
        assert_eq!(render_value(&"10.1000/xyz".into()), Some("10.1000/xyz".into()));
        assert_eq!(render_value(&"45-50".into()), Some("45-50".into()));
    }

    #[test]
    fn test_render_empty_text_is_absent() {
        assert_eq!(render_value(&"".into()), None);
        assert_eq!(render_value(&FieldValue::Null), None);
    }

    #[test]
    fn test_has_expected_columns() {
        assert!(has_expected_columns(&["Foo", "TI", "Year"]));
        assert!(has_expected_columns(&["AU"]));
        // "TI" alone is a synonym but not a core column
        assert!(!has_expected_columns(&["TI", "SO"]));
        assert!(!has_expected_columns::<&str>(&[]));
    }

    #[test]
    fn test_tag_only_export_needs_au() {
        // Given: field-tag columns that all resolve, but no AU
        // Then: the table is still not recognized; AU alone is enough
        assert!(!has_expected_columns(&["TI", "SO", "PY"]));
        assert!(has_expected_columns(&["AU", "TI", "SO", "PY"]));
    }
}
