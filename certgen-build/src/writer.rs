//! Atomic document writer.
//!
//! 1. Normalise line endings to LF.
//! 2. Ensure the parent directory exists.
//! 3. Write to `<path>.certgen.tmp`.
//! 4. Rename to the final path (atomic on POSIX).

use std::path::{Path, PathBuf};

use crate::error::{io_err, BuildError};

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), BuildError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        tracing::debug!("created {}", dir.display());
    }
    Ok(())
}

/// Atomically write a rendered document, replacing any previous version.
pub fn write_document(path: &Path, content: &str) -> Result<PathBuf, BuildError> {
    let tmp = PathBuf::from(format!("{}.certgen.tmp", path.display()));
    write_document_with_tmp(path, content, &tmp)
}

fn write_document_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<PathBuf, BuildError> {
    let normalized = content.replace("\r\n", "\n");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    if let Some(tmp_parent) = tmp.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(tmp_parent)?;
    }
    std::fs::write(tmp, normalized).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(path.to_path_buf())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
