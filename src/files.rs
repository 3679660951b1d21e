//! Directory listing for the batch stages.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Files directly inside `dir` whose extension matches `extension` (no dot, case-insensitive),
/// sorted by file name.
pub fn find_files(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "not a directory");
        return Err(Error::from(missing).in_file(dir));
    }

    let mut found = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| Error::from(io::Error::from(e)).in_file(dir))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

/// File stem as a `String`, for naming per-tape outputs.
pub fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
