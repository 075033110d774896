use std::{
    collections::HashSet,
    io::Write,
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::{
    error::{read_utf8, write_file},
    locales::{DictionaryFormat, DictionaryParser},
};

/// A single rewrite of one dictionary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Remove `keys` from the dictionary at `file_path`.
    DeleteKeys {
        file_path: String,
        keys: Vec<String>,
    },
}

impl Operation {
    /// Apply the operation and return the number of entries changed.
    ///
    /// The file is left untouched when nothing matched.
    pub fn execute(&self) -> Result<usize> {
        match self {
            Operation::DeleteKeys { file_path, keys } => {
                let path = Path::new(file_path);
                let format = DictionaryFormat::from_path(path)?;
                let content = read_utf8(path)?;
                let keys: HashSet<&str> = keys.iter().map(String::as_str).collect();
                let (rewritten, removed) = format
                    .remove_keys(&content, path, &keys)
                    .with_context(|| format!("Failed to delete keys from {}", file_path))?;
                if removed > 0 {
                    write_file(path, &rewritten)?;
                }
                tracing::debug!(path = %file_path, removed, "deleted keys");
                Ok(removed)
            }
        }
    }

    pub fn preview_to<W: Write>(&self, writer: &mut W) {
        match self {
            Operation::DeleteKeys { file_path, keys } => {
                let _ = writeln!(writer, "{}", file_path.bold());
                for key in keys {
                    let _ = writeln!(writer, "  {} {}", "-".red(), key);
                }
            }
        }
    }
}
