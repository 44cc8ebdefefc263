//! Script detection.
//!
//! Every formatting decision downstream is a binary switch between CJK and
//! Latin conventions: name order, list punctuation and the "et al." marker.

/// The writing script a name (or a whole author field) is formatted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Script {
    /// Contains at least one CJK Unified Ideograph.
    Cjk,
    /// Anything else.
    #[default]
    Latin,
}

impl Script {
    /// Classifies a single text fragment.
    pub fn detect(text: &str) -> Self {
        if is_cjk(text) {
            Script::Cjk
        } else {
            Script::Latin
        }
    }

    /// Classifies a group of names: CJK as soon as any one of them is.
    pub fn of_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if names.into_iter().any(|n| is_cjk(n.as_ref())) {
            Script::Cjk
        } else {
            Script::Latin
        }
    }

    pub fn is_cjk(self) -> bool {
        self == Script::Cjk
    }
}

/// Returns true if `text` contains a character in U+4E00..=U+9FFF.
pub fn is_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}
