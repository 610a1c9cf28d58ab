//! Generated-source hook.
//!
//! Projects that need a source file produced at build time ship an
//! executable `setup.sh` in their project directory. The last line of its
//! stdout names the file it generated, which is then staged like any other
//! source.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::build::BuildContext;
use crate::common::copy_file;
use crate::error::BuildError;
use crate::process::Cmd;

/// Script a project ships to generate an extra source file.
pub const SETUP_SCRIPT_NAME: &str = "setup.sh";

/// Run the project's `setup.sh` (if present and executable) and stage the
/// file it reports. Returns the staged path, or `None` when the project has
/// no hook.
pub fn stage_generated_source(ctx: &mut BuildContext) -> Result<Option<PathBuf>, BuildError> {
    let project_dir = ctx.project_dir();
    let script = project_dir.join(SETUP_SCRIPT_NAME);
    if !is_executable_file(&script) {
        return Ok(None);
    }

    println!("Running {}", script.display());
    let result = Cmd::new(script.to_string_lossy())
        .dir(&project_dir)
        .run()?;

    let Some(name) = result.stdout_trimmed().lines().last() else {
        return Ok(None);
    };

    let generated = project_dir.join(name.trim());
    if !generated.is_file() {
        return Err(BuildError::MissingInput { path: generated });
    }

    let target = ctx.dirs.sourcedir.join(name.trim());
    copy_file(&generated, &target)?;
    ctx.add_source(target.clone());
    Ok(Some(target))
}

fn is_executable_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
