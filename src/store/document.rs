//! JSON array files: the only on-disk format the catalog uses.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read a whole collection from `path`. A missing file is first created
/// containing an empty array, so a fresh data directory bootstraps
/// itself; a present but malformed file is an error.
pub fn load<T: DeserializeOwned + Serialize>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        save::<T>(path, &[])?;
    }
    let content = fs::read_to_string(path)?;
    let records = serde_json::from_str(&content)?;
    Ok(records)
}

/// Overwrite `path` with the full collection. The serialized form goes to
/// a sibling `.tmp` file first and is renamed over the target, so an I/O
/// fault mid-write leaves the previous file untouched.
pub fn save<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let content = serde_json::to_string_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
