use std::{collections::HashSet, path::Path};

use serde_json::Value;

use super::{DictionaryParser, LocaleDictionary};
use crate::{
    core::error::LoadError,
    utils::{build_line_index, offset_to_line},
};

/// JSON dictionaries: `{"key": "value"}`, nested objects flatten to `a.b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormat;

impl DictionaryParser for JsonFormat {
    fn parse(
        &self,
        content: &str,
        path: &Path,
        locale: &str,
    ) -> Result<LocaleDictionary, LoadError> {
        let json: Value =
            serde_json::from_str(content).map_err(|e| LoadError::parse(path, e.to_string()))?;
        if !json.is_object() {
            return Err(LoadError::parse(path, "expected a JSON object at the top level"));
        }

        let line_index = build_line_index(content);
        let mut dictionary = LocaleDictionary::new(locale, path.to_string_lossy());
        flatten_json(&json, String::new(), content, &line_index, &mut dictionary);
        Ok(dictionary)
    }

    fn remove_keys(
        &self,
        content: &str,
        path: &Path,
        keys: &HashSet<&str>,
    ) -> Result<(String, usize), LoadError> {
        let mut value: Value =
            serde_json::from_str(content).map_err(|e| LoadError::parse(path, e.to_string()))?;

        let mut removed = 0;
        let mut sorted: Vec<&str> = keys.iter().copied().collect();
        sorted.sort_unstable();
        for key in sorted {
            if delete_key(&mut value, key) {
                removed += 1;
            }
        }
        if removed == 0 {
            return Ok((content.to_string(), 0));
        }

        remove_empty_objects(&mut value);
        let mut output =
            serde_json::to_string_pretty(&value).map_err(|e| LoadError::parse(path, e.to_string()))?;
        output.push('\n');
        Ok((output, removed))
    }
}

/// Find the line number where a key appears in the JSON content.
///
/// Searches for each key part in sequence so that `Common.submit` finds the
/// `"submit"` after `"Common"`, not one in another namespace. A match only
/// counts when it is followed by `:`, i.e. is a key rather than a value.
fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let mut search_start = 0;
    let mut parts: Vec<String> = key_path.split('.').map(String::from).collect();
    // Flat keys may contain dots themselves.
    if !content.contains(&format!("\"{}\"", parts[0])) {
        parts = vec![key_path.to_string()];
    }

    for part in &parts {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();
            if remaining[after_pattern..].trim_start().starts_with(':') {
                search_start += after_pattern;
                found = true;
                break;
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1
    }
}

fn flatten_json(
    value: &Value,
    prefix: String,
    content: &str,
    line_index: &[usize],
    result: &mut LocaleDictionary,
) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(val, new_prefix, content, line_index, result);
            }
        }
        Value::String(s) => {
            let line = find_key_line(content, &prefix, line_index);
            result.insert(prefix, s.clone(), line);
        }
        // Arrays, numbers, booleans and null are not translatable strings.
        _ => {}
    }
}

/// Delete a key, trying the flat key first and then the dotted path.
fn delete_key(value: &mut Value, key: &str) -> bool {
    if let Value::Object(map) = value
        && map.get(key).is_some_and(Value::is_string)
    {
        map.shift_remove(key);
        return true;
    }
    delete_key_path(value, key)
}

fn delete_key_path(value: &mut Value, key_path: &str) -> bool {
    let parts: Vec<&str> = key_path.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return false;
    };

    let mut current = value;
    for part in parents {
        match current {
            Value::Object(map) => match map.get_mut(*part) {
                Some(child) => current = child,
                None => return false,
            },
            _ => return false,
        }
    }

    match current {
        Value::Object(map) => map.shift_remove(*last).is_some(),
        _ => false,
    }
}

fn remove_empty_objects(value: &mut Value) {
    if let Value::Object(map) = value {
        for child in map.values_mut() {
            remove_empty_objects(child);
        }
        map.retain(|_, v| !matches!(v, Value::Object(m) if m.is_empty()));
    }
}
