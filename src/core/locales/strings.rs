use std::{collections::HashSet, path::Path};

use super::{DictionaryParser, LocaleDictionary};
use crate::core::error::LoadError;

/// Apple-style `.strings` dictionaries: one `"key" = "value";` per line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringsFormat;

impl DictionaryParser for StringsFormat {
    fn parse(
        &self,
        content: &str,
        path: &Path,
        locale: &str,
    ) -> Result<LocaleDictionary, LoadError> {
        let mut dictionary = LocaleDictionary::new(locale, path.to_string_lossy());
        for (index, line) in content.lines().enumerate() {
            if let Some((key, value)) = parse_line(line) {
                dictionary.insert(key, value, index + 1);
            }
        }
        Ok(dictionary)
    }

    fn remove_keys(
        &self,
        content: &str,
        _path: &Path,
        keys: &HashSet<&str>,
    ) -> Result<(String, usize), LoadError> {
        let mut output = String::with_capacity(content.len());
        let mut removed = 0;
        for line in content.split_inclusive('\n') {
            match parse_line(line) {
                Some((key, _)) if keys.contains(key.as_str()) => removed += 1,
                _ => output.push_str(line),
            }
        }
        Ok((output, removed))
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") || line.starts_with("/*") {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = unquote(key.trim());
    let value = unquote(value.trim().trim_end_matches(';').trim_end());
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.replace("\\\"", "\"").replace("\\n", "\n")))
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}
