//! Input file discovery and key derivation.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{ConversionError, ConversionResult};

/// List regular files directly inside `dir` whose names match `pattern` (e.g. `*.csv`).
///
/// Entries come back in the order the glob walk yields them. Matching is case-sensitive and
/// non-recursive; directories whose names match are skipped. Any other entry is returned, and an
/// entry whose metadata cannot be read (e.g. a dangling symlink) is an error.
pub fn discover_csv_files(dir: impl AsRef<Path>, pattern: &str) -> ConversionResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    // Validate the file pattern on its own so a bad pattern is reported as such.
    Pattern::new(pattern)?;

    let dir_str = dir.to_str().ok_or_else(|| ConversionError::InvalidPath {
        path: dir.to_path_buf(),
    })?;
    let full = format!("{}/{}", Pattern::escape(dir_str), pattern);

    let mut files = Vec::new();
    for entry in glob::glob_with(&full, MatchOptions::new())? {
        let path = entry?;
        if fs::metadata(&path)?.is_dir() {
            continue;
        }
        files.push(path);
    }
    Ok(files)
}

/// Derive the mapping key for `path`: the file name without directory or extension.
///
/// `accounts.csv` -> `accounts`, `a.b.csv` -> `a.b`.
pub fn base_name(path: impl AsRef<Path>) -> ConversionResult<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
        .ok_or_else(|| ConversionError::InvalidPath {
            path: path.to_path_buf(),
        })
}
