//! Output materialization: resolve the target path and persist image bytes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, ImageFormat, Result};

/// Resolve the target path, defaulting to `mock.<ext>` in the working
/// directory.
fn resolve_path(path: Option<&Path>, format: ImageFormat) -> PathBuf {
    match path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("mock.{}", format.extension())),
    }
}

/// Write image bytes to the resolved output path.
///
/// Existence is checked exactly once, before the write: an existing file is
/// left byte-for-byte untouched unless `force` is set. Returns the resolved
/// path on success.
pub fn write_output(
    bytes: &[u8],
    path: Option<&Path>,
    format: ImageFormat,
    force: bool,
) -> Result<PathBuf> {
    let path = resolve_path(path, format);

    if !force && path.exists() {
        return Err(Error::Conflict(path));
    }

    fs::write(&path, bytes)?;
    Ok(path)
}
