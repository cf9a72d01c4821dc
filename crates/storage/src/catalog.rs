//! Reading the static card catalog.
//!
//! The catalog is a JSON array of card records:
//! `[{"id": "...", "word": "...", "pos": "n", "definition": "...", "image": "..."}]`.

use std::path::{Path, PathBuf};

use flashcards_core::model::Card;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Decode catalog JSON, keeping the record order as written.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the JSON is malformed or a record is
/// missing a required field.
pub fn parse_catalog(json: &str) -> Result<Vec<Card>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and decode a catalog file.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be read, or
/// `CatalogError::Parse` if its contents are not a valid catalog.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<Card>, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&json)
}
