//! Filesystem helpers that map `std::io::Error` into [`CoreError::Filesystem`].

use std::fs;
use std::path::Path;

use crate::error::CoreError;

/// Ensures that `path` exists and is a directory, creating it (and any parents) if needed.
///
/// # Errors
///
/// Returns [`CoreError::Filesystem`] if the path is occupied by something that is not a
/// directory, or if creating the directory fails.
///
/// ```no_run
/// # use lumen_core::utils::fs::ensure_dir_exists;
/// let dir = std::env::temp_dir().join("lumen_example");
/// ensure_dir_exists(&dir).unwrap();
/// assert!(dir.is_dir());
/// ```
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(CoreError::Filesystem {
            message: "Path exists but is not a directory".to_string(),
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "Path exists but is not a directory",
            ),
        });
    }
    fs::create_dir_all(path).map_err(|e| CoreError::Filesystem {
        message: "Failed to create directory".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}
