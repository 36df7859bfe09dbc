use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Every non-directory entry below `dir`, depth first, siblings in name order.
pub fn walk_path(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    let mut results = Vec::new();
    for path in entries {
        if fs::metadata(&path)?.is_dir() {
            results.extend(walk_path(&path)?);
        } else {
            results.push(path);
        }
    }

    Ok(results)
}
