//! Deciding, for every dictionary key, whether the corpus uses it.
//!
//! Two strategies produce the same found/not-found partition:
//!
//! - Parallel: keys are distributed over a rayon pool and results are sent
//!   back over a channel; only presence is recorded.
//! - Detailed: keys are scanned one by one and every `path:line` where a key
//!   appears is recorded.
//!
//! Keys that no template matches can then be searched as quoted literals to
//! list files that may reference them indirectly.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::mpsc,
};

use anyhow::{Context, Result};
use rayon::{ThreadPoolBuilder, prelude::*};

use super::{
    console::Console,
    corpus::{Corpus, SourceFile},
    locales::{LoadedLocales, MessageLocation},
    patterns::{PatternSet, PatternTable, quoted_literal},
};
use crate::utils::{build_line_index, offset_to_line};

/// A line in a source file where a key appears.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UsageLocation {
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl UsageLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

impl fmt::Display for UsageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Presence only. `jobs == 0` uses the global rayon pool.
    Parallel { jobs: usize },
    /// Sequential, recording every usage location.
    Detailed,
}

/// Found/not-found partition of the scanned keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Found keys with their usage locations (empty in parallel mode).
    pub found: BTreeMap<String, Vec<UsageLocation>>,
    pub not_found: BTreeSet<String>,
    /// Keys that were listed as intentionally unused and not scanned.
    pub skipped: BTreeSet<String>,
}

impl ScanOutcome {
    pub fn scanned_count(&self) -> usize {
        self.found.len() + self.not_found.len()
    }
}

/// A dictionary entry whose key the scan did not find anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub locale: String,
    pub key: String,
    pub location: MessageLocation,
}

/// Every entry, in every loaded locale, whose key is in `not_found`.
///
/// Only keys computed from the master dictionary are considered, so each
/// locale loses exactly the same keys.
pub fn unused_key_issues(outcome: &ScanOutcome, locales: &LoadedLocales) -> Vec<UnusedKeyIssue> {
    locales
        .all()
        .flat_map(|dictionary| {
            outcome.not_found.iter().filter_map(|key| {
                dictionary.get(key).map(|entry| UnusedKeyIssue {
                    locale: dictionary.locale.clone(),
                    key: entry.key.clone(),
                    location: entry.location.clone(),
                })
            })
        })
        .collect()
}

pub struct KeyUsageScanner<'a> {
    corpus: &'a Corpus,
    patterns: &'a PatternTable,
    console: &'a Console,
}

impl<'a> KeyUsageScanner<'a> {
    pub fn new(corpus: &'a Corpus, patterns: &'a PatternTable, console: &'a Console) -> Self {
        Self {
            corpus,
            patterns,
            console,
        }
    }

    /// True if any template matches the key in any corpus file.
    pub fn is_used(&self, key: &str) -> Result<bool> {
        let set = self.patterns.build(key)?;
        Ok(self.corpus.iter().any(|file| set.is_match(&file.text)))
    }

    /// Every line where the key appears.
    pub fn locate(&self, key: &str) -> Result<Vec<UsageLocation>> {
        let set = self.patterns.build(key)?;
        Ok(self
            .corpus
            .iter()
            .filter(|file| set.is_match(&file.text))
            .flat_map(|file| locate_in_file(&set, file))
            .collect())
    }

    /// Scan `keys`, leaving out those in `intentionally_unused`.
    pub fn scan<S: AsRef<str> + Sync>(
        &self,
        keys: &[S],
        intentionally_unused: &[String],
        mode: ScanMode,
    ) -> Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();
        let mut pending: Vec<&str> = Vec::with_capacity(keys.len());
        for key in keys.iter().map(AsRef::as_ref) {
            if intentionally_unused.iter().any(|k| k == key) {
                outcome.skipped.insert(key.to_string());
            } else {
                pending.push(key);
            }
        }

        self.console.note(format!(
            "scanning {} key(s) against {} file(s)",
            pending.len(),
            self.corpus.len()
        ));

        match mode {
            ScanMode::Parallel { jobs } => self.scan_parallel(&pending, jobs, &mut outcome)?,
            ScanMode::Detailed => self.scan_detailed(&pending, &mut outcome)?,
        }
        Ok(outcome)
    }

    fn scan_parallel(&self, keys: &[&str], jobs: usize, outcome: &mut ScanOutcome) -> Result<()> {
        let (sender, receiver) = mpsc::channel();
        let work = move || {
            keys.par_iter().for_each_with(sender, |sender, key| {
                let _ = sender.send((*key, self.is_used(key)));
            });
        };

        if jobs == 0 {
            work();
        } else {
            ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .context("Failed to build scan thread pool")?
                .install(work);
        }

        for (key, used) in receiver {
            if used? {
                outcome.found.insert(key.to_string(), Vec::new());
            } else {
                outcome.not_found.insert(key.to_string());
            }
        }
        Ok(())
    }

    fn scan_detailed(&self, keys: &[&str], outcome: &mut ScanOutcome) -> Result<()> {
        for (index, key) in keys.iter().enumerate() {
            let locations = self.locate(key)?;
            tracing::debug!(
                key = %key,
                index = index + 1,
                total = keys.len(),
                locations = locations.len(),
                "scanned key"
            );
            if locations.is_empty() {
                outcome.not_found.insert(key.to_string());
            } else {
                outcome.found.insert(key.to_string(), locations);
            }
        }
        Ok(())
    }

    /// Lines where each key appears as a single-quoted literal.
    ///
    /// Keys with no such line are left out of the result.
    pub fn potential_matches<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k String>,
    ) -> Result<BTreeMap<String, Vec<UsageLocation>>> {
        let mut matches = BTreeMap::new();
        for key in keys {
            let literal = quoted_literal(key)?;
            let locations: Vec<UsageLocation> = self
                .corpus
                .iter()
                .flat_map(|file| {
                    file.text
                        .lines()
                        .enumerate()
                        .filter(|(_, line)| literal.is_match(line))
                        .map(|(index, _)| UsageLocation::new(file.path.clone(), index + 1))
                        .collect::<Vec<_>>()
                })
                .collect();
            if !locations.is_empty() {
                matches.insert(key.clone(), locations);
            }
        }
        Ok(matches)
    }
}

/// Lines of a file where the key is used.
///
/// Every line that matches on its own is reported. A match that only exists
/// across several lines is reported at the line where it starts, unless one
/// of the lines it covers already matched on its own.
fn locate_in_file(set: &PatternSet, file: &SourceFile) -> Vec<UsageLocation> {
    let single: BTreeSet<usize> = file
        .text
        .lines()
        .enumerate()
        .filter(|(_, line)| set.is_match(line))
        .map(|(index, _)| index + 1)
        .collect();

    let line_index = build_line_index(&file.text);
    let mut lines = single.clone();
    for (start, end) in set.match_spans(&file.text) {
        let first = offset_to_line(&line_index, start);
        let last = offset_to_line(&line_index, end.saturating_sub(1).max(start));
        if single.range(first..=last).next().is_none() {
            lines.insert(first);
        }
    }

    lines
        .into_iter()
        .map(|line| UsageLocation::new(file.path.clone(), line))
        .collect()
}
