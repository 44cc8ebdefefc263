//! Single-name formatting.
//!
//! Turns one raw author name into the `Surname I I` display form used in
//! GB/T 7714 reference lists. Name shapes in database exports are ambiguous,
//! so formatting is an ordered list of rules: the first rule whose predicate
//! matches produces the output.

use crate::script::is_cjk;

/// Common transliterated Chinese surnames. A leading token from this set is
/// taken as the surname even when no comma marks it.
pub const CHINESE_SURNAMES: &[&str] = &[
    "li", "wang", "zhang", "liu", "chen", "yang", "zhao", "huang", "zhou", "wu", "xu", "sun", "ma",
    "zhu", "hu", "guo", "he", "gao", "lin", "luo", "zheng", "liang", "xie", "song", "tang", "feng",
    "yu", "dong", "kou", "cao", "pan", "wei", "jiang", "han", "xiao", "du", "ye", "pei",
];

/// A name prepared for rule matching: periods stripped, whitespace collapsed.
#[derive(Debug)]
pub struct NameParts<'a> {
    pub text: &'a str,
    pub tokens: Vec<&'a str>,
}

impl<'a> NameParts<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: text.split_whitespace().collect(),
        }
    }
}

/// One formatting rule: when `applies` holds, `format` produces the name.
pub struct NameRule {
    pub name: &'static str,
    pub applies: fn(&NameParts) -> bool,
    pub format: fn(&NameParts) -> String,
}

/// Rules in precedence order. The last rule always applies.
pub const NAME_RULES: &[NameRule] = &[
    NameRule {
        name: "empty",
        applies: |p| p.text.is_empty(),
        format: |_| String::new(),
    },
    NameRule {
        name: "cjk",
        applies: |p| is_cjk(p.text),
        format: |p| p.text.to_string(),
    },
    NameRule {
        name: "surname-comma-given",
        applies: |p| p.text.contains(','),
        format: format_comma_separated,
    },
    NameRule {
        name: "known-chinese-surname",
        applies: |p| {
            p.tokens
                .first()
                .is_some_and(|t| CHINESE_SURNAMES.contains(&t.to_lowercase().as_str()))
        },
        format: |p| with_initials(p.tokens[0], &initials(&p.tokens[1..])),
    },
    NameRule {
        name: "surname-single-initial",
        applies: |p| p.tokens.len() == 2 && p.tokens[1].chars().count() == 1,
        format: |p| format!("{} {}", p.tokens[0], p.tokens[1].to_uppercase()),
    },
    NameRule {
        name: "short-surname-first",
        applies: |p| p.tokens.len() == 2 && p.tokens[0].chars().count() <= 3,
        format: |p| with_initials(p.tokens[0], &initials(&p.tokens[1..])),
    },
    NameRule {
        name: "given-surname",
        applies: |p| p.tokens.len() == 2,
        format: |p| with_initials(p.tokens[1], &initials(&p.tokens[..1])),
    },
    NameRule {
        name: "surname-last",
        applies: |_| true,
        format: |p| match p.tokens.split_last() {
            Some((surname, given)) => with_initials(surname, &initials(given)),
            None => String::new(),
        },
    },
];

/// Strips periods and collapses runs of whitespace to single spaces.
pub fn normalize_name(raw: &str) -> String {
    raw.replace('.', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats one raw author name.
///
/// # Examples
///
/// ```
/// use gbt_refs::format_name;
///
/// assert_eq!(format_name("Doe, John A."), "Doe J A");
/// assert_eq!(format_name("Zhang San Feng"), "Zhang S F");
/// assert_eq!(format_name("张三"), "张三");
/// ```
pub fn format_name(raw: &str) -> String {
    let normalized = normalize_name(raw);
    let parts = NameParts::new(&normalized);
    match matching_rule(&parts) {
        Some(rule) => (rule.format)(&parts),
        None => String::new(),
    }
}

/// Returns the first rule that applies to `parts`.
pub fn matching_rule(parts: &NameParts) -> Option<&'static NameRule> {
    NAME_RULES.iter().find(|rule| (rule.applies)(parts))
}

fn format_comma_separated(parts: &NameParts) -> String {
    let mut pieces = parts.text.split(',').map(str::trim).filter(|p| !p.is_empty());
    let Some(surname) = pieces.next() else {
        return String::new();
    };
    let given = pieces.collect::<Vec<_>>().join(" ");
    let tokens: Vec<&str> = given.split_whitespace().collect();
    with_initials(surname, &initials(&tokens))
}

/// Uppercased first letters of each token, each letter separated by a space.
fn initials(tokens: &[&str]) -> String {
    let letters: String = tokens
        .iter()
        .filter_map(|t| t.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    letters
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

fn with_initials(surname: &str, initials: &str) -> String {
    if initials.is_empty() {
        surname.to_string()
    } else {
        format!("{} {}", surname, initials)
    }
}
