//! Loading the profile document.
//!
//! One read, one parse, no retry. A failure at either step is terminal: the
//! caller gets a [`LoadError`] naming the path and carrying the underlying
//! cause, and nothing downstream runs. There is no partial document.

use crate::document::Document;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default document file name, relative to the content directory.
pub const DEFAULT_DATA_FILE: &str = "index.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Read { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}

/// Read and parse the document at `path`.
pub fn load(path: &Path) -> Result<Document, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded profile document");
    Ok(document)
}

/// Parse a document from an in-memory string.
pub fn parse(content: &str) -> Result<Document, serde_json::Error> {
    serde_json::from_str(content)
}
