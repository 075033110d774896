//! Per-locale dictionaries and the on-disk formats they are read from.
//!
//! A locales root holds one directory per locale, each containing a dictionary
//! file with a fixed name (e.g. `_locales/fr/messages.json`). The format is
//! chosen from the file extension:
//!
//! - `.json`: a JSON object, nested objects flattened into dotted keys
//! - `.xml`: elements carrying a `name` attribute, the element text is the value
//! - `.strings`: `"key" = "value";` lines
//!
//! Directory names are normalized by replacing `-` with `_` (`zh-CN` -> `zh_CN`).

mod json;
mod strings;
mod xml;

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result, bail};
use enum_dispatch::enum_dispatch;
use indexmap::IndexMap;

pub use json::JsonFormat;
pub use strings::StringsFormat;
pub use xml::XmlFormat;

use super::{
    console::Console,
    error::{LoadError, read_utf8},
};

/// Position of an entry inside a dictionary file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MessageLocation {
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

/// One key/value pair from a dictionary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub key: String,
    pub value: String,
    pub location: MessageLocation,
}

/// All entries of one locale, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleDictionary {
    pub locale: String,
    pub file_path: String,
    entries: IndexMap<String, MessageEntry>,
}

impl LocaleDictionary {
    pub fn new(locale: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            entries: IndexMap::new(),
        }
    }

    /// Insert an entry. A later duplicate key replaces the earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>, line: usize) {
        let key = key.into();
        let entry = MessageEntry {
            key: key.clone(),
            value: value.into(),
            location: MessageLocation::new(self.file_path.clone(), line),
        };
        self.entries.insert(key, entry);
    }

    pub fn get(&self, key: &str) -> Option<&MessageEntry> {
        self.entries.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A locale whose dictionary could not be loaded and was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleLoadWarning {
    pub locale: String,
    pub error: String,
}

/// Every locale found under the locales root.
///
/// The master dictionary is always present; other locales are keyed by their
/// normalized name.
#[derive(Debug, Clone)]
pub struct LoadedLocales {
    pub master: LocaleDictionary,
    pub others: BTreeMap<String, LocaleDictionary>,
    pub skipped: Vec<LocaleLoadWarning>,
}

impl LoadedLocales {
    /// Master first, then the other locales by name.
    pub fn all(&self) -> impl Iterator<Item = &LocaleDictionary> {
        std::iter::once(&self.master).chain(self.others.values())
    }

    pub fn locale_count(&self) -> usize {
        1 + self.others.len()
    }
}

#[enum_dispatch]
pub trait DictionaryParser {
    /// Parse file content into a dictionary for `locale`.
    fn parse(&self, content: &str, path: &Path, locale: &str)
    -> Result<LocaleDictionary, LoadError>;

    /// Remove `keys` from file content.
    ///
    /// Returns the rewritten content and the number of entries removed.
    fn remove_keys(
        &self,
        content: &str,
        path: &Path,
        keys: &HashSet<&str>,
    ) -> Result<(String, usize), LoadError>;
}

#[enum_dispatch(DictionaryParser)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryFormat {
    Json(JsonFormat),
    Xml(XmlFormat),
    Strings(StringsFormat),
}

impl DictionaryFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(JsonFormat.into()),
            Some("xml") => Ok(XmlFormat.into()),
            Some("strings") => Ok(StringsFormat.into()),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Normalize a locale directory name (`pt-BR` -> `pt_BR`).
pub fn normalize_locale(name: &str) -> String {
    name.replace('-', "_")
}

/// Read and parse one dictionary file.
pub fn parse_dictionary(path: &Path, locale: &str) -> Result<LocaleDictionary, LoadError> {
    let format = DictionaryFormat::from_path(path)?;
    let content = read_utf8(path)?;
    format.parse(&content, path, locale)
}

/// Load every locale under `locales_root` that has a `dictionary_file`.
///
/// A failure to load the master dictionary is fatal. Any other locale that
/// fails to load is recorded in [`LoadedLocales::skipped`] and left out.
pub fn load_locales(
    locales_root: &Path,
    dictionary_file: &str,
    master_locale: &str,
    console: &Console,
) -> Result<LoadedLocales> {
    if !locales_root.exists() {
        bail!(
            "Locales directory '{}' does not exist.\n\
             Hint: Check the 'localesRoot' setting or pass --locales-root.",
            locales_root.display()
        );
    }
    if !locales_root.is_dir() {
        bail!("'{}' is not a directory.", locales_root.display());
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(locales_root)
        .with_context(|| format!("Failed to read directory: {}", locales_root.display()))?
    {
        let entry = entry?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    let mut master = None;
    let mut others = BTreeMap::new();
    let mut skipped = Vec::new();

    for dir in dirs {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let locale = normalize_locale(name);
        let path = dir.join(dictionary_file);
        if !path.is_file() {
            tracing::debug!(locale = %locale, "no dictionary file, skipping");
            continue;
        }

        match parse_dictionary(&path, &locale) {
            Ok(dictionary) if locale == master_locale => master = Some(dictionary),
            Ok(dictionary) => {
                others.insert(locale, dictionary);
            }
            Err(err) if locale == master_locale => {
                return Err(err).context(format!(
                    "Failed to load master locale '{}'",
                    master_locale
                ));
            }
            Err(err) => {
                console.warn(format!("skipping locale {}: {}", locale, err));
                skipped.push(LocaleLoadWarning {
                    locale,
                    error: err.to_string(),
                });
            }
        }
    }

    let Some(master) = master else {
        let mut available: Vec<&str> = others.keys().map(String::as_str).collect();
        available.extend(skipped.iter().map(|w| w.locale.as_str()));
        available.sort();
        bail!(
            "Master locale '{}' has no {} under '{}'.\n\
             Available locales: {}",
            master_locale,
            dictionary_file,
            locales_root.display(),
            if available.is_empty() {
                "(none)".to_string()
            } else {
                available.join(", ")
            }
        );
    };

    tracing::debug!(
        master = %master.locale,
        keys = master.len(),
        locales = others.len(),
        skipped = skipped.len(),
        "loaded locales"
    );

    Ok(LoadedLocales {
        master,
        others,
        skipped,
    })
}
