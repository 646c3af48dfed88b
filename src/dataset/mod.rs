// Dataset module
// Loading and saving the JSON word list, plus output path naming

pub mod record;

#[cfg(test)]
mod tests;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{PrepError, Result};

pub use record::{Flag, Headword, REQUIRED_FIELDS, RawWord, WordRecord};

const JSON_EXTENSION: &str = ".json";
const EMBEDDED_SUFFIX: &str = "-with-embeddings";
const UPDATED_SUFFIX: &str = "-updated";

/// Load a dataset, treating a missing file as an empty dataset.
#[inline]
pub fn load_dataset(path: &Path) -> Result<Vec<WordRecord>> {
    match load_existing_dataset(path) {
        Err(PrepError::NotFound(_)) => {
            warn!(
                "Dataset {} not found, starting with an empty dataset",
                path.display()
            );
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Load a dataset that must already exist.
#[inline]
pub fn load_existing_dataset(path: &Path) -> Result<Vec<WordRecord>> {
    read_json_array(path)
}

/// Load a JSON array of candidate words, e.g. a hand-curated list.
#[inline]
pub fn load_candidates(path: &Path) -> Result<Vec<RawWord>> {
    read_json_array(path)
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PrepError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(PrepError::Io(e)),
    };

    let items: Vec<T> = serde_json::from_str(&content).map_err(|source| PrepError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded {} entries from {}", items.len(), path.display());
    Ok(items)
}

/// Render records the way they are stored on disk: two-space indentation,
/// non-ASCII text left unescaped, no trailing newline.
#[inline]
pub fn to_json_string<T: Serialize>(records: &[T]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| PrepError::Other(e.into()))
}

/// Write records to `path`, creating the parent directory if needed.
#[inline]
pub fn save_dataset<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let content = to_json_string(records)?;

    let persist = |source| PrepError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(persist)?;
    }
    fs::write(path, content).map_err(persist)?;

    info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Output path for a merge run.
///
/// `words-with-embeddings.json` becomes `words.json`; any other name gets an
/// `-updated` suffix before the extension.
#[inline]
pub fn merged_output_path(input: &Path) -> PathBuf {
    let name = file_name(input);

    let output = if name.contains(EMBEDDED_SUFFIX) {
        name.replacen(EMBEDDED_SUFFIX, "", 1)
    } else if let Some(stem) = name.strip_suffix(JSON_EXTENSION) {
        format!("{stem}{UPDATED_SUFFIX}{JSON_EXTENSION}")
    } else {
        format!("{name}{UPDATED_SUFFIX}")
    };

    input.with_file_name(output)
}

/// Output path for an embedding run: `words.json` becomes
/// `words-with-embeddings.json`.
#[inline]
pub fn embedded_output_path(input: &Path) -> PathBuf {
    let name = file_name(input);

    let output = match name.strip_suffix(JSON_EXTENSION) {
        Some(stem) => format!("{stem}{EMBEDDED_SUFFIX}{JSON_EXTENSION}"),
        None => format!("{name}{EMBEDDED_SUFFIX}{JSON_EXTENSION}"),
    };

    input.with_file_name(output)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
