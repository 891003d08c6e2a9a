//! Filesystem helpers for reading dump files

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Extension of dump files picked up from a directory
pub const DUMP_EXTENSION: &str = "sql";

/// Read a whole dump file into memory.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, since
/// dumps are often exported in a legacy charset.
pub fn read_dump(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::DumpRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Recursively find `.sql` files under a directory, sorted by path
pub fn find_dump_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Not a directory: {}", dir.display()),
        )));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && has_dump_extension(path))
        .collect();

    files.sort();
    Ok(files)
}

fn has_dump_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DUMP_EXTENSION))
}
