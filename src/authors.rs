//! Author field splitting and author-block composition.
//!
//! Author fields arrive joined by whatever delimiter the exporting database
//! preferred. The splitter tries delimiter classes in a fixed order and uses
//! the first one present in the field.

use std::sync::LazyLock;

use regex::Regex;

use crate::names::format_name;
use crate::script::{is_cjk, Script};

static AND_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\band\b").expect("valid regex"));
static COMMA_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*").expect("valid regex"));
static COMMA_OR_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,/]").expect("valid regex"));

/// One delimiter class: when `applies` holds for the field, `split` cuts it.
pub struct DelimiterRule {
    pub name: &'static str,
    pub applies: fn(&str) -> bool,
    pub split: fn(&str) -> Vec<&str>,
}

/// Delimiter classes in precedence order. The last rule always applies.
pub const DELIMITER_RULES: &[DelimiterRule] = &[
    DelimiterRule {
        name: "semicolon",
        applies: |s| s.contains(';'),
        split: |s| s.split(';').collect(),
    },
    DelimiterRule {
        name: "line-break",
        applies: |s| s.contains('\n'),
        split: |s| s.lines().collect(),
    },
    DelimiterRule {
        name: "full-width-semicolon",
        applies: |s| s.contains('；'),
        split: |s| s.split('；').collect(),
    },
    DelimiterRule {
        name: "and",
        applies: |s| AND_WORD.is_match(s),
        split: |s| AND_WORD.split(s).collect(),
    },
    DelimiterRule {
        name: "ampersand",
        applies: |s| s.contains(" & "),
        split: |s| s.split(" & ").collect(),
    },
    // A single comma usually separates surname from given names, so only a
    // field with two or more commas is treated as a comma-separated list.
    DelimiterRule {
        name: "comma-list",
        applies: |s| s.matches(',').count() >= 2,
        split: |s| COMMA_SPACE.split(s).collect(),
    },
    DelimiterRule {
        name: "comma-or-slash",
        applies: |_| true,
        split: |s| COMMA_OR_SLASH.split(s).collect(),
    },
];

/// Splits a raw author field into trimmed, non-empty names.
///
/// # Examples
///
/// ```
/// use gbt_refs::split_authors;
///
/// assert_eq!(split_authors("Smith, J; Lee, K"), vec!["Smith, J", "Lee, K"]);
/// assert_eq!(split_authors("Smith J and Lee K"), vec!["Smith J", "Lee K"]);
/// assert!(split_authors("   ").is_empty());
/// ```
pub fn split_authors(raw: &str) -> Vec<String> {
    let s = raw.trim();
    if s.is_empty() {
        return Vec::new();
    }
    let Some(rule) = DELIMITER_RULES.iter().find(|rule| (rule.applies)(s)) else {
        return vec![s.to_string()];
    };
    (rule.split)(s)
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// A formatted author list and the script that governs the rest of the line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorBlock {
    pub text: String,
    pub script: Script,
}

impl AuthorBlock {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Splits, formats, truncates and joins an author field.
///
/// Lists longer than `truncate` keep their first `truncate` names followed by
/// `，等.` (CJK) or `, et al.` (Latin). CJK lists are joined with a bare comma.
pub fn format_authors(raw: &str, truncate: usize) -> AuthorBlock {
    let names = split_authors(raw);
    if names.is_empty() {
        return AuthorBlock::default();
    }
    let script = Script::of_names(&names);

    let formatted: Vec<String> = names
        .iter()
        .map(|name| {
            if is_cjk(name) {
                name.clone()
            } else {
                format_name(name)
            }
        })
        .filter(|name| !name.is_empty())
        .collect();

    let (separator, marker) = match script {
        Script::Cjk => (",", "，等."),
        Script::Latin => (", ", ", et al."),
    };

    let text = if formatted.len() > truncate {
        format!("{}{}", formatted[..truncate].join(separator), marker)
    } else {
        formatted.join(separator)
    };

    AuthorBlock { text, script }
}
