//! Call-site pattern templates for localization keys.
//!
//! A template is a regular expression with a `{key}` placeholder. Building a
//! [`PatternSet`] for a key substitutes the regex-escaped key into every
//! template and compiles the result with `.` matching line breaks, so calls
//! that span several lines still match when searched against a whole file.

use anyhow::{Context, Result, bail};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

pub const KEY_PLACEHOLDER: &str = "{key}";

/// Optional trailing argument object, e.g. `, { count: 3 }`.
const ARGS: &str = r"(, \{.*\})?";

/// Built-in call shapes, tried in this order.
///
/// The order only affects how quickly a match is found; a key counts as used
/// as soon as any template matches.
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("window-i18n-call", r"window\.i18n\('{key}'\)"),
    ("window-i18n-call-args", r"window\.i18n\('{key}'{args}\)"),
    ("token-object-inline", r"\{ token: '{key}'(, args: \{.*\})? \}"),
    (
        "token-object-multiline",
        r"\{\s+token: '{key}',?\s+(\s*args: \{.*\},)?\s+\}",
    ),
    (
        "window-i18n-method",
        r"window\.i18n\.(stripped|inEnglish|getRawMessage)\('{key}'{args}\)",
    ),
    ("i18n-component-token", r#"<I18n.*token=\{?['"]{key}['"]\}?"#),
    ("i18n-component-expression", r"<I18n.*token=.*{key}.*"),
    ("i18n-call", r"i18n\('{key}'\)"),
    ("i18n-call-args", r"i18n\('{key}'{args}\)"),
    (
        "i18n-method",
        r"i18n\.(stripped|inEnglish|getRawMessage)\('{key}'{args}\)",
    ),
    ("optional-window-i18n", r"window\?\.i18n\?\.\('{key}'{args}\)"),
    ("i18n-subtext-component", r"<I18nSubText.*token=.*{key}.*"),
];

/// A named regex template containing the `{key}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CallPattern {
    pub name: String,
    pub pattern: String,
}

impl CallPattern {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Substitute an already escaped key into the template.
    fn render(&self, escaped_key: &str) -> String {
        self.pattern
            .replace("{args}", ARGS)
            .replace(KEY_PLACEHOLDER, escaped_key)
    }
}

/// The ordered list of templates used to recognize key usages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    templates: Vec<CallPattern>,
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternTable {
    pub fn builtin() -> Self {
        Self {
            templates: BUILTIN_PATTERNS
                .iter()
                .map(|(name, pattern)| CallPattern::new(*name, *pattern))
                .collect(),
        }
    }

    /// Built-in templates followed by `custom` ones.
    pub fn with_custom(custom: &[CallPattern]) -> Self {
        let mut table = Self::builtin();
        table.templates.extend(custom.iter().cloned());
        table
    }

    pub fn templates(&self) -> &[CallPattern] {
        &self.templates
    }

    /// Check that every template has a placeholder and compiles.
    pub fn validate(&self) -> Result<()> {
        for template in &self.templates {
            validate_template(template)?;
        }
        Ok(())
    }

    /// Compile every template for `key`.
    pub fn build(&self, key: &str) -> Result<PatternSet> {
        let escaped = regex::escape(key);
        let matchers = self
            .templates
            .iter()
            .map(|template| {
                compile(&template.render(&escaped)).with_context(|| {
                    format!("Failed to build pattern '{}' for key '{}'", template.name, key)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PatternSet { matchers })
    }
}

pub fn validate_template(template: &CallPattern) -> Result<()> {
    if !template.pattern.contains(KEY_PLACEHOLDER) {
        bail!(
            "Call pattern '{}' does not contain the {} placeholder",
            template.name,
            KEY_PLACEHOLDER
        );
    }
    compile(&template.render("sampleKey"))
        .with_context(|| format!("Invalid regex in call pattern '{}'", template.name))?;
    Ok(())
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).dot_matches_new_line(true).build()
}

/// Compiled matchers for one key.
#[derive(Debug, Clone)]
pub struct PatternSet {
    matchers: Vec<Regex>,
}

impl PatternSet {
    /// True if any matcher matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.matchers.iter().any(|m| m.is_match(text))
    }

    /// Byte ranges of every match of every matcher, sorted and deduplicated.
    pub fn match_spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans: Vec<(usize, usize)> = self
            .matchers
            .iter()
            .flat_map(|m| m.find_iter(text).map(|found| (found.start(), found.end())))
            .collect();
        spans.sort_unstable();
        spans.dedup();
        spans
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// The fallback matcher for keys no template found: the key as a quoted literal.
pub fn quoted_literal(key: &str) -> Result<Regex> {
    Regex::new(&format!("'{}'", regex::escape(key)))
        .with_context(|| format!("Failed to build literal pattern for key '{}'", key))
}
