use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised while loading a source file or a locale dictionary.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8", .path.display())]
    Decode { path: PathBuf },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported dictionary format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl LoadError {
    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Decode { path }
            | Self::Parse { path, .. }
            | Self::UnsupportedFormat { path } => path,
        }
    }
}

/// Read a file as UTF-8, rejecting invalid byte sequences instead of replacing them.
pub fn read_utf8(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| LoadError::Decode {
        path: path.to_path_buf(),
    })
}

/// Write a file, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<(), LoadError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| LoadError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
