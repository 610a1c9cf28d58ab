//! Tar archives via the external `tar` tool.
//!
//! Ownership of every archived entry is normalized to `root:root` so that
//! repeated builds of the same tree are logically identical no matter which
//! user ran them.

use std::path::Path;

use crate::error::BuildError;
use crate::process::Cmd;

/// Create a gzip-compressed tarball of the full contents of `src_dir`.
///
/// The archive holds the directory's contents (`.`), not the directory
/// itself, matching what the downstream unpack step expects.
pub fn create_tar_gz(src_dir: &Path, dest: &Path) -> Result<(), BuildError> {
    if !src_dir.is_dir() {
        return Err(BuildError::MissingInput {
            path: src_dir.to_path_buf(),
        });
    }

    println!("Compressing {} into {}", src_dir.display(), dest.display());

    Cmd::new("tar")
        .arg("cf")
        .arg_path(dest)
        .arg("--gzip")
        .args(["--owner", "root", "--group", "root"])
        .arg("--directory")
        .arg_path(src_dir)
        .arg(".")
        .run()?;

    Ok(())
}

/// Create a plain (uncompressed) tarball of an explicit file list.
///
/// `files` are resolved relative to `src_dir`; entries that do not exist
/// make `tar` fail, so callers filter the list against the disk first.
pub fn create_tar(src_dir: &Path, dest: &Path, files: &[&str]) -> Result<(), BuildError> {
    if !src_dir.is_dir() {
        return Err(BuildError::MissingInput {
            path: src_dir.to_path_buf(),
        });
    }

    println!("Archiving {} entries into {}", files.len(), dest.display());

    Cmd::new("tar")
        .arg("cf")
        .arg_path(dest)
        .args(["--owner", "root", "--group", "root"])
        .arg("-C")
        .arg_path(src_dir)
        .args(files)
        .run()?;

    Ok(())
}
