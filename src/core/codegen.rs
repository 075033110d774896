//! Rendering locale dictionaries as a typed TypeScript module.
//!
//! Two shapes are supported:
//!
//! - Master only: `export const en = { key: 'value' } as const;`
//! - Merged: every key maps to its value in each locale plus the argument
//!   record inferred from the master string's `{placeholders}`.
//!
//! Plural strings (`{count, plural, one [# item] other [# items]}`) are
//! expanded into one object per locale keyed by plural category.

use std::{
    borrow::Cow,
    collections::BTreeMap,
    sync::LazyLock,
};

use anyhow::{Result, bail};
use regex::Regex;

use super::locales::{LoadedLocales, LocaleDictionary};

pub const DISCLAIMER: &str = "
// This file was generated by a script. Do not modify this file manually.
// To make changes, modify the corresponding JSON file and re-run the script.

";

/// Prefix that marks a value as a plural selector.
pub const PLURAL_MARKER: &str = "{count, plural, ";

/// Placeholders typed as numbers; every other placeholder is a string.
pub const NUMERIC_ARGUMENTS: [&str; 2] = ["count", "found_count"];

static IDENTIFIER_UNSAFE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").unwrap());

static BRACED_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(.*?)\}").unwrap());

static PLURAL_CATEGORY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(zero|one|two|few|many|other)\s*\[([^\]]+)\]").unwrap());

pub struct ModuleGenerator<'a> {
    replacements: &'a BTreeMap<String, String>,
}

impl<'a> ModuleGenerator<'a> {
    /// `replacements` maps placeholder text such as `{app_name}` to the value
    /// substituted into merged output.
    pub fn new(replacements: &'a BTreeMap<String, String>) -> Self {
        Self { replacements }
    }

    pub fn render_master(&self, master: &LocaleDictionary) -> String {
        let mut out = String::from(DISCLAIMER);
        out.push_str(&format!("export const {} = {{\n", master.locale));
        for entry in master.entries() {
            out.push_str(&format!(
                "  {}: '{}',\n",
                wrap_key(&entry.key),
                escape_single_quoted(&entry.value)
            ));
        }
        out.push_str("} as const;\n");
        out.push_str(&format!("\nexport type Dictionary = typeof {};\n", master.locale));
        out
    }

    pub fn render_merged(&self, locales: &LoadedLocales) -> Result<String> {
        let mut object = String::from("{\n");
        for entry in locales.master.entries() {
            if entry.value.starts_with(PLURAL_MARKER) {
                object.push_str(&self.render_plural(&entry.key, &entry.value, locales)?);
            } else {
                object.push_str(&self.render_plain(&entry.key, &entry.value, locales));
            }
        }
        object.push('}');

        Ok(format!(
            "{}export const dictionary = {};\n\nexport type Dictionary = typeof dictionary;\n",
            DISCLAIMER, object
        ))
    }

    fn render_plain(&self, key: &str, master_value: &str, locales: &LoadedLocales) -> String {
        let master_value = self.replace_static(master_value);
        let args = argument_record(&extract_argument_names(&master_value));

        let values: Vec<String> = locales
            .all()
            .map(|dictionary| {
                let value = dictionary
                    .value(key)
                    .map(|v| self.replace_static(v))
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| master_value.clone());
                format!("{}: \"{}\"", dictionary.locale, escape_double_quoted(&value))
            })
            .collect();

        format!(
            "  {}: {{\n      {},\n      args: {}\n  }},\n",
            wrap_key(key),
            values.join(",\n      "),
            args_field(args)
        )
    }

    fn render_plural(&self, key: &str, master_value: &str, locales: &LoadedLocales) -> Result<String> {
        let master_categories = plural_categories(&self.replace_static(master_value));
        let Some((_, first_text)) = master_categories.first() else {
            bail!("Invalid plural string for key '{}': no plural categories", key);
        };

        let mut arguments = extract_argument_names(first_text);
        if !arguments.iter().any(|a| a == "count") {
            arguments.push("count".to_string());
        }
        let args = argument_record(&arguments);

        let blocks: Vec<String> = locales
            .all()
            .map(|dictionary| {
                let own = dictionary
                    .value(key)
                    .map(|v| plural_categories(&self.replace_static(v)))
                    .unwrap_or_default();
                let categories = if own.is_empty() {
                    &master_categories
                } else {
                    &own
                };
                let lines: Vec<String> = categories
                    .iter()
                    .map(|(category, text)| {
                        format!("{}: \"{}\"", category, escape_double_quoted(text))
                    })
                    .collect();
                format!(
                    "    {}:{{\n      {}\n    }},",
                    wrap_key(&dictionary.locale),
                    lines.join(",\n      ")
                )
            })
            .collect();

        Ok(format!(
            "  {}: {{\n{}\n    args: {}\n  }},\n",
            wrap_key(key),
            blocks.join("\n"),
            args_field(args)
        ))
    }

    fn replace_static(&self, value: &str) -> String {
        self.replacements
            .iter()
            .fold(value.to_string(), |acc, (from, to)| acc.replace(from, to))
    }
}

fn args_field(record: Option<String>) -> String {
    match record {
        Some(record) => format!("{} as const,", record),
        None => "undefined,".to_string(),
    }
}

/// Quote a key unless it is a plain identifier-like word.
pub fn wrap_key(key: &str) -> Cow<'_, str> {
    if IDENTIFIER_UNSAFE_REGEX.is_match(key) {
        Cow::Owned(format!("'{}'", escape_single_quoted(key)))
    } else {
        Cow::Borrowed(key)
    }
}

fn escape_single_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}

fn escape_double_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Contents of every `{...}` group, in order.
pub fn extract_argument_names(text: &str) -> Vec<String> {
    BRACED_REGEX
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// `(category, text)` pairs of a plural string, with `#` standing for `{count}`.
pub fn plural_categories(value: &str) -> Vec<(String, String)> {
    let value = value.replace('#', "{count}");
    PLURAL_CATEGORY_REGEX
        .captures_iter(&value)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// TypeScript record type for the given argument names, or `None` if empty.
pub fn argument_record(names: &[String]) -> Option<String> {
    let mut fields: Vec<String> = Vec::new();
    for name in names {
        let kind = if NUMERIC_ARGUMENTS.contains(&name.as_str()) {
            "number"
        } else {
            "string"
        };
        let field = format!("{}: \"{}\"", name, kind);
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    (!fields.is_empty()).then(|| format!("{{{}}}", fields.join(", ")))
}
