//! Loading the source files that are searched for key usages.
//!
//! Files are selected by extension under a source root and read fully into
//! memory before any scanning starts. Directory traversal does not follow
//! symbolic links, so link cycles cannot cause repeated visits.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use super::{console::Console, error::read_utf8};
use crate::utils::display_path;

/// Check if an ignore entry contains glob wildcards (* or ?).
/// Other entries match as plain substrings of the path.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Display path, relative to the working directory when possible.
    pub path: String,
    pub text: String,
}

/// Every source file that may contain key usages, ordered by path.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    files: Vec<SourceFile>,
}

impl Corpus {
    pub fn new(mut files: Vec<SourceFile>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { files }
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SourceFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Which files under the source root belong to the corpus.
#[derive(Debug, Clone)]
pub struct CorpusFilter {
    extensions: Vec<String>,
    fragments: Vec<String>,
    globs: Vec<Pattern>,
}

impl CorpusFilter {
    pub fn new(extensions: &[String], ignores: &[String]) -> Result<Self> {
        let mut fragments = Vec::new();
        let mut globs = Vec::new();
        for ignore in ignores {
            if is_glob_pattern(ignore) {
                globs.push(
                    Pattern::new(ignore)
                        .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", ignore))?,
                );
            } else {
                fragments.push(ignore.clone());
            }
        }
        Ok(Self {
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            fragments,
            globs,
        })
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.fragments.iter().any(|f| path.contains(f.as_str()))
            || self.globs.iter().any(|g| g.matches(path))
    }

    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Result of collecting corpus paths.
pub struct CollectResult {
    pub paths: Vec<PathBuf>,
    pub skipped_count: usize,
}

pub fn collect_source_paths(
    source_root: &Path,
    filter: &CorpusFilter,
    console: &Console,
) -> Result<CollectResult> {
    if !source_root.exists() {
        bail!(
            "Source root '{}' does not exist.\n\
             Hint: Check the 'sourceRoot' setting or pass --source-root.",
            source_root.display()
        );
    }

    let mut paths = Vec::new();
    let mut skipped_count = 0;
    for entry in WalkDir::new(source_root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                console.note(format!("Cannot access path: {}", e));
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !filter.has_extension(path) {
            continue;
        }
        if filter.is_ignored(&path.to_string_lossy()) {
            continue;
        }
        paths.push(path.to_path_buf());
    }

    Ok(CollectResult {
        paths,
        skipped_count,
    })
}

/// Collect and read every corpus file.
///
/// A file that is not valid UTF-8 fails the whole load: scanning a partial
/// corpus could report used keys as unused.
pub fn load_corpus(source_root: &Path, filter: &CorpusFilter, console: &Console) -> Result<Corpus> {
    let CollectResult {
        paths,
        skipped_count,
    } = collect_source_paths(source_root, filter, console)?;
    if skipped_count > 0 {
        console.warn(format!(
            "{} path(s) under {} could not be accessed",
            skipped_count,
            source_root.display()
        ));
    }

    let files = paths
        .par_iter()
        .map(|path| {
            read_utf8(path).map(|text| SourceFile {
                path: display_path(path),
                text,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(files = files.len(), root = %source_root.display(), "loaded corpus");
    Ok(Corpus::new(files))
}
