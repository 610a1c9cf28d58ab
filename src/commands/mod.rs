//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `build` - Assemble RPM sources (and optionally the SRPM)
//! - `retag` - Rewrite the hard-coded version in a generated source file
//! - `show` - Display information
//! - `clean` - Clean scratch directories
//! - `preflight` - Verify external tools

pub mod build;
pub mod clean;
pub mod preflight;
pub mod retag;
pub mod show;

use std::path::Path;

use anyhow::Result;

use crate::config::{Config, ProjectConfig};
use crate::error::BuildError;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use preflight::cmd_preflight;
pub use retag::cmd_retag;
pub use show::cmd_show;

/// The project's config section, tolerating an absent config file (CLI
/// flags can stand in for everything it provides).
fn project_settings(git_root: &Path, project: &str) -> Result<Option<ProjectConfig>> {
    match Config::from_env(git_root) {
        Ok(config) => Ok(config.project(project)),
        Err(BuildError::MissingInput { .. }) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
