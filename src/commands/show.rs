//! Show command - display configuration and on-disk state.

use std::path::Path;

use anyhow::Result;

use crate::config::{Config, GeneratedConfigDir};

/// Show target for the show command.
pub enum ShowTarget {
    /// Show the resolved rel-eng configuration
    Config,
    /// Show generated config components on disk
    Status,
}

/// Execute the show command.
pub fn cmd_show(git_root: &Path, target: ShowTarget) -> Result<()> {
    match target {
        ShowTarget::Config => {
            let config = Config::from_env(git_root)?;
            config.print();
        }
        ShowTarget::Status => {
            let generated = GeneratedConfigDir::default_root();
            let components = generated.components()?;
            if components.is_empty() {
                println!("No generated config components.");
            } else {
                println!(
                    "Generated config components ({}):",
                    generated.root().display()
                );
                for component in components {
                    println!("  {component}");
                }
            }
        }
    }
    Ok(())
}
