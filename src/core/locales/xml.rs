use std::{collections::HashSet, ops::Range, path::Path, sync::LazyLock};

use regex::Regex;

use super::{DictionaryParser, LocaleDictionary};
use crate::{
    core::error::LoadError,
    utils::{build_line_index, offset_to_line},
};

static OPEN_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z_][\w.\-]*)(\s[^<>]*?)?(/?)>").unwrap());

static NAME_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bname\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// Attribute-keyed XML dictionaries: `<string name="key">value</string>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlFormat;

/// A named element and the byte span it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
struct XmlEntry {
    key: String,
    value: String,
    span: Range<usize>,
}

impl DictionaryParser for XmlFormat {
    fn parse(
        &self,
        content: &str,
        path: &Path,
        locale: &str,
    ) -> Result<LocaleDictionary, LoadError> {
        let entries = scan_entries(content, path)?;
        let line_index = build_line_index(content);
        let mut dictionary = LocaleDictionary::new(locale, path.to_string_lossy());
        for entry in entries {
            let line = offset_to_line(&line_index, entry.span.start);
            dictionary.insert(entry.key, entry.value, line);
        }
        Ok(dictionary)
    }

    fn remove_keys(
        &self,
        content: &str,
        path: &Path,
        keys: &HashSet<&str>,
    ) -> Result<(String, usize), LoadError> {
        let entries = scan_entries(content, path)?;
        let mut output = String::with_capacity(content.len());
        let mut cursor = 0;
        let mut removed = 0;

        for entry in entries.iter().filter(|e| keys.contains(e.key.as_str())) {
            // Drop the whole line when the element is alone on it.
            let line_start = content[..entry.span.start]
                .rfind('\n')
                .map_or(0, |i| i + 1);
            let line_end = content[entry.span.end..]
                .find('\n')
                .map_or(content.len(), |i| entry.span.end + i + 1);
            let alone = content[line_start..entry.span.start].trim().is_empty()
                && content[entry.span.end..line_end].trim().is_empty();
            let range = if alone {
                line_start..line_end
            } else {
                entry.span.clone()
            };

            output.push_str(&content[cursor..range.start]);
            cursor = range.end;
            removed += 1;
        }
        output.push_str(&content[cursor..]);
        Ok((output, removed))
    }
}

/// Walk the document and collect every element that carries a `name` attribute.
///
/// The root element (and any other unnamed element) is stepped into, so named
/// children are found at any depth. The value is the raw inner text of the
/// element with the basic XML entities decoded.
fn scan_entries(content: &str, path: &Path) -> Result<Vec<XmlEntry>, LoadError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();
    if !trimmed.starts_with('<') {
        return Err(LoadError::parse(path, "not an XML document"));
    }

    let mut entries = Vec::new();
    let mut pos = 0;
    while let Some(caps) = OPEN_TAG_REGEX.captures_at(content, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        let tag = &caps[1];
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        let self_closing = !caps[3].is_empty();

        let Some(name) = NAME_ATTR_REGEX
            .captures(attrs)
            .and_then(|c| c.get(1).or_else(|| c.get(2)))
            .map(|m| m.as_str().to_string())
        else {
            pos = whole.end();
            continue;
        };

        if self_closing {
            entries.push(XmlEntry {
                key: unescape(&name),
                value: String::new(),
                span: whole.start()..whole.end(),
            });
            pos = whole.end();
            continue;
        }

        let closing = format!("</{}>", tag);
        let Some(rel_end) = content[whole.end()..].find(&closing) else {
            return Err(LoadError::parse(
                path,
                format!("element '{}' named '{}' is never closed", tag, name),
            ));
        };
        let inner_end = whole.end() + rel_end;
        let end = inner_end + closing.len();
        entries.push(XmlEntry {
            key: unescape(&name),
            value: unescape(strip_cdata(&content[whole.end()..inner_end])),
            span: whole.start()..end,
        });
        pos = end;
    }

    Ok(entries)
}

fn strip_cdata(text: &str) -> &str {
    text.strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
        .unwrap_or(text)
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
