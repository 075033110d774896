//! Files written by `scan` and `diff`.
//!
//! Scan results land in an output directory as CSV and plain-text listings;
//! the problems report is a standalone pretty-printed JSON file. Rendering is
//! kept separate from writing so the text can be checked without touching
//! the filesystem.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    core::{
        console::Console,
        differ::IssueReport,
        error::{read_utf8, write_file},
        locales::LocaleDictionary,
        scanner::UsageLocation,
    },
    utils::csv_field,
};

pub const FOUND_STRINGS_FILE: &str = "found_strings.csv";
pub const NOT_FOUND_STRINGS_FILE: &str = "not_found_strings.txt";
pub const POTENTIAL_MATCHES_FILE: &str = "potential_matches.csv";
pub const NOT_IN_MASTER_LIST_FILE: &str = "not_in_master_list.csv";

const GENERATED_FILES: [&str; 4] = [
    FOUND_STRINGS_FILE,
    NOT_FOUND_STRINGS_FILE,
    POTENTIAL_MATCHES_FILE,
    NOT_IN_MASTER_LIST_FILE,
];

const FOUND_HEADER: &str = "String,Phrase,Locations";
const POTENTIAL_HEADER: &str = "String,Potential File Matches";

/// Writer for the scan output directory.
pub struct AnalysisOutput {
    dir: PathBuf,
}

impl AnalysisOutput {
    /// Create `dir` if needed and remove results of a previous run.
    pub fn prepare(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        for name in GENERATED_FILES {
            let path = dir.join(name);
            match fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed previous output"),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Failed to remove {}", path.display()));
                }
            }
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        write_file(&path, content)?;
        Ok(path)
    }

    pub fn write_found(
        &self,
        found: &BTreeMap<String, Vec<UsageLocation>>,
        master: &LocaleDictionary,
    ) -> Result<PathBuf> {
        self.write(FOUND_STRINGS_FILE, &render_found_csv(found.keys(), found, master))
    }

    pub fn write_not_found(&self, not_found: &BTreeSet<String>) -> Result<PathBuf> {
        self.write(NOT_FOUND_STRINGS_FILE, &render_key_list(not_found))
    }

    pub fn write_potential_matches(
        &self,
        matches: &BTreeMap<String, Vec<UsageLocation>>,
    ) -> Result<PathBuf> {
        self.write(POTENTIAL_MATCHES_FILE, &render_potential_csv(matches))
    }

    pub fn write_not_in_master_list(
        &self,
        keys: &BTreeSet<String>,
        found: &BTreeMap<String, Vec<UsageLocation>>,
        master: &LocaleDictionary,
    ) -> Result<PathBuf> {
        self.write(NOT_IN_MASTER_LIST_FILE, &render_found_csv(keys, found, master))
    }
}

/// `String,Phrase,Locations` rows for `keys`, phrases taken from the master.
pub fn render_found_csv<'k>(
    keys: impl IntoIterator<Item = &'k String>,
    found: &BTreeMap<String, Vec<UsageLocation>>,
    master: &LocaleDictionary,
) -> String {
    let mut out = format!("{}\n", FOUND_HEADER);
    for key in keys {
        let phrase = master.value(key).unwrap_or_default();
        let locations = found.get(key).map(|l| join_locations(l)).unwrap_or_default();
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(key),
            csv_field(phrase),
            csv_field(&locations)
        ));
    }
    out
}

pub fn render_potential_csv(matches: &BTreeMap<String, Vec<UsageLocation>>) -> String {
    let mut out = format!("{}\n", POTENTIAL_HEADER);
    for (key, locations) in matches {
        out.push_str(&format!(
            "{},{}\n",
            csv_field(key),
            csv_field(&join_locations(locations))
        ));
    }
    out
}

pub fn render_key_list(keys: &BTreeSet<String>) -> String {
    keys.iter().map(|key| format!("{}\n", key)).collect()
}

fn join_locations(locations: &[UsageLocation]) -> String {
    locations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Read a newline-separated key list.
///
/// A missing file is not an error: a warning is printed and `None` returned
/// so the caller can skip the comparison that needs it.
pub fn read_key_list(path: &Path, label: &str, console: &Console) -> Result<Option<BTreeSet<String>>> {
    if !path.exists() {
        console.warn(format!(
            "{} not found at: {}. Skipping comparison.",
            label,
            path.display()
        ));
        return Ok(None);
    }
    let content = read_utf8(path)?;
    Ok(Some(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
    ))
}

/// Found keys missing from the master list and not slated for removal.
pub fn not_in_master_list(
    found: &BTreeMap<String, Vec<UsageLocation>>,
    master_list: &BTreeSet<String>,
    to_be_removed: Option<&BTreeSet<String>>,
) -> BTreeSet<String> {
    found
        .keys()
        .filter(|key| !master_list.contains(*key))
        .filter(|key| to_be_removed.is_none_or(|removed| !removed.contains(*key)))
        .cloned()
        .collect()
}

pub fn render_problems_json(report: &IssueReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize problems")?;
    Ok(format!("{}\n", json))
}

pub fn write_problems(path: &Path, report: &IssueReport) -> Result<()> {
    write_file(path, &render_problems_json(report)?)?;
    Ok(())
}
