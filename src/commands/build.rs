//! Build command - assembles RPM sources for one project.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use super::project_settings;
use crate::build::{BuildOptions, BuildRequest, Builder};
use crate::cancel::CancelToken;
use crate::framework;
use crate::sources::Flavor;

/// Execute the build command.
pub fn cmd_build(
    git_root: &Path,
    project: &str,
    flavor: Option<Flavor>,
    path: Option<PathBuf>,
    options: &BuildOptions,
) -> Result<()> {
    let settings = project_settings(git_root, project)?;

    let flavor = match flavor {
        Some(flavor) => flavor,
        None => {
            let name = settings
                .as_ref()
                .and_then(|settings| settings.flavor.as_deref())
                .ok_or_else(|| {
                    anyhow!("no --flavor given and none configured for '{project}'")
                })?;
            Flavor::parse(name)
                .ok_or_else(|| anyhow!("unknown flavor '{name}' configured for '{project}'"))?
        }
    };

    let relative_project_dir = path
        .or_else(|| settings.and_then(|settings| settings.path))
        .unwrap_or_else(|| PathBuf::from(project));

    let cancel = CancelToken::new();
    cancel
        .install_signal_handler()
        .context("setting up signal handler")?;

    let mut builder = Builder::new(BuildRequest {
        project_name: project.to_string(),
        git_root: git_root.to_path_buf(),
        relative_project_dir,
        flavor,
        scratch_root: framework::default_scratch_root(),
        cancel,
    });

    let artifacts = builder.run(options)?;

    println!("\nArtifacts:");
    for artifact in &artifacts {
        println!("  {}", artifact.display());
    }
    Ok(())
}
