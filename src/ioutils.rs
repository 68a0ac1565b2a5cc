//! A set of helpers for working with the file system.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    std::fs::create_dir_all(absolute(dest_path.as_ref())).map_err(Error::IoError)
}

/// Writes `content` to `dest_path`, creating missing parents and truncating
/// any previous content.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let abs_path = absolute(dest_path.as_ref());
    if let Some(parent) = abs_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(abs_path, content).map_err(Error::IoError)
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    std::fs::read_to_string(path).map_err(Error::IoError)
}

/// Fails with `Error::PathError` unless `path` is an existing regular file.
pub fn ensure_file<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::PathError {
            path: path.display().to_string(),
            expected: "file".to_string(),
        });
    }
    Ok(path.to_path_buf())
}

/// Fails with `Error::PathError` unless `path` is an existing directory.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Err(Error::PathError {
            path: path.display().to_string(),
            expected: "directory".to_string(),
        });
    }
    Ok(path.to_path_buf())
}
