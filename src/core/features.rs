//! Placeholder and markup features extracted from localized strings.
//!
//! - Variables: `{name}` placeholders
//! - Legacy variables: `$name$` placeholders from the old dynamic format
//! - Allowed tags: `<b>…</b>`, `<br/>` and `<span>…</span>`
//! - Disallowed tags: any other well-formed tag
//! - Improper tags: angle-bracket fragments that are not well-formed tags

use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    sync::LazyLock,
};

use indexmap::IndexMap;
use regex::Regex;

use super::locales::LocaleDictionary;

static VARIABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\w+)\}").unwrap());

static LEGACY_VARIABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+)\$").unwrap());

static B_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<b>(.*?)</b>").unwrap());

static BR_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br/>").unwrap());

static SPAN_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<span>(.*?)</span>").unwrap());

static ANY_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)(\w+)[^>]*>").unwrap());

static ANGLE_FRAGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>|<|>").unwrap());

static WELL_FORMED_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^<\s*/?\s*\w+.*?>").unwrap());

/// Tags that may appear in localized strings.
pub const ALLOWED_TAGS: [&str; 3] = ["b", "br", "span"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagKind {
    B,
    Br,
    Span,
}

impl TagKind {
    pub const ALL: [TagKind; 3] = [TagKind::B, TagKind::Br, TagKind::Span];
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::B => write!(f, "<b>"),
            TagKind::Br => write!(f, "<br/>"),
            TagKind::Span => write!(f, "<span>"),
        }
    }
}

/// Occurrence counts of each allowed tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCounts {
    pub b: usize,
    pub br: usize,
    pub span: usize,
}

impl TagCounts {
    pub fn get(&self, kind: TagKind) -> usize {
        match kind {
            TagKind::B => self.b,
            TagKind::Br => self.br,
            TagKind::Span => self.span,
        }
    }
}

/// Everything the differ compares for a single string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFeatures {
    pub variables: Vec<String>,
    pub legacy_variables: Vec<String>,
    pub tags: TagCounts,
    pub disallowed_tags: Vec<String>,
    pub improper_tags: Vec<String>,
}

impl StringFeatures {
    pub fn extract(text: &str) -> Self {
        Self {
            variables: extract_variables(text),
            legacy_variables: extract_legacy_variables(text),
            tags: count_tags(text),
            disallowed_tags: find_disallowed_tags(text),
            improper_tags: find_improper_tags(text),
        }
    }
}

/// Features of every entry in a dictionary, keyed like the dictionary.
pub type DictionaryFeatures = IndexMap<String, StringFeatures>;

pub fn extract_dictionary_features(dictionary: &LocaleDictionary) -> DictionaryFeatures {
    dictionary
        .entries()
        .map(|e| (e.key.clone(), StringFeatures::extract(&e.value)))
        .collect()
}

/// Names of `{name}` placeholders, in order of appearance.
pub fn extract_variables(text: &str) -> Vec<String> {
    VARIABLE_REGEX
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Names of legacy `$name$` placeholders, in order of appearance.
pub fn extract_legacy_variables(text: &str) -> Vec<String> {
    LEGACY_VARIABLE_REGEX
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

pub fn count_tags(text: &str) -> TagCounts {
    TagCounts {
        b: B_TAG_REGEX.find_iter(text).count(),
        br: BR_TAG_REGEX.find_iter(text).count(),
        span: SPAN_TAG_REGEX.find_iter(text).count(),
    }
}

/// Well-formed tags whose name is not in [`ALLOWED_TAGS`], e.g. `<i>` or `</div>`.
pub fn find_disallowed_tags(text: &str) -> Vec<String> {
    ANY_TAG_REGEX
        .captures_iter(text)
        .filter(|c| !ALLOWED_TAGS.contains(&&c[2]))
        .map(|c| c[0].to_string())
        .collect()
}

/// Angle-bracket fragments that do not form a tag: `< b>` is fine, `<>`, `a > b`
/// and an unterminated `<` are not.
pub fn find_improper_tags(text: &str) -> Vec<String> {
    ANGLE_FRAGMENT_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|fragment| !WELL_FORMED_TAG_REGEX.is_match(fragment))
        .map(String::from)
        .collect()
}

/// Items of `a` that do not appear in `b`, deduplicated and sorted.
pub fn missing_from_list(a: &[String], b: &[String]) -> Vec<String> {
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter()
        .map(String::as_str)
        .filter(|item| !b.contains(item))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
