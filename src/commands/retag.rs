//! Retag command - fix the version inside a generated source file.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use super::project_settings;
use crate::framework;
use crate::retag;

/// Execute the retag command.
pub fn cmd_retag(
    git_root: &Path,
    project: &str,
    new_tag: &str,
    old_tag: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let versioned_file = match file {
        Some(file) => file,
        None => project_settings(git_root, project)?
            .and_then(|settings| settings.version_file)
            .ok_or_else(|| {
                anyhow!("no --file given and no version_file configured for '{project}'")
            })?,
    };

    let old_tag = match old_tag {
        Some(tag) => tag,
        None => framework::latest_tagged_version(git_root, project)
            .context("resolving the latest tagged version")?,
    };

    let path = retag::retag(git_root, &versioned_file, &old_tag, new_tag)?;
    println!("Retagged {} ({} -> {})", path.display(), old_tag, new_tag);
    Ok(())
}
