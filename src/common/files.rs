//! Utilities for file operations with automatic parent directory creation.

use std::fs;
use std::path::Path;

use crate::error::BuildError;

/// Write a file, creating parent directories as needed.
///
/// # Arguments
/// * `path` - Path to the file to write
/// * `content` - Content to write (anything that implements AsRef<[u8]>)
pub fn write_file_with_dirs<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), BuildError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Copy a file, creating the destination's parent directories as needed.
///
/// Permission bits are carried over, so staged scripts stay executable.
/// Fails with [`BuildError::MissingInput`] when the source is not a
/// regular file.
pub fn copy_file(src: &Path, dest: &Path) -> Result<(), BuildError> {
    if !src.is_file() {
        return Err(BuildError::MissingInput {
            path: src.to_path_buf(),
        });
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dest)?;
    Ok(())
}
