// Whole-file writes that readers never observe half done

use crate::error::{DataError, Result};
use std::fs::{self, File};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `path` through a temporary file in the same directory, then rename
/// it over the destination. Any previous file is replaced.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| DataError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
