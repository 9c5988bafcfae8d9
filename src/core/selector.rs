//! File selection: immediate children of the source directories whose name
//! ends with one of the configured suffixes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Expand `~` in a configured path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).as_ref())
}

fn has_suffix(name: &str, suffixes: &[String]) -> bool {
    suffixes
        .iter()
        .any(|suffix| !suffix.is_empty() && name.ends_with(suffix.as_str()))
}

/// List matching files in one directory, non-recursive, sorted by name.
fn select_in_dir(dir: &Path, suffixes: &[String]) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::source_path_not_found(dir.display().to_string(), e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| Error::source_path_not_found(dir.display().to_string(), e.to_string()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if has_suffix(&name, suffixes) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Select candidate files across all directories.
///
/// Every directory is listed before anything is returned, so a missing
/// directory aborts the run before any file has been touched.
pub fn select_files(dirs: &[PathBuf], suffixes: &[String]) -> Result<Vec<PathBuf>> {
    if dirs.is_empty() {
        return Err(Error::validation_missing_argument(vec!["paths".to_string()]));
    }

    let mut files = Vec::new();
    for dir in dirs {
        let dir = expand_path(dir);
        if !dir.is_dir() {
            return Err(Error::source_path_not_found(
                dir.display().to_string(),
                "not a directory",
            ));
        }
        files.extend(select_in_dir(&dir, suffixes)?);
    }

    Ok(files)
}
