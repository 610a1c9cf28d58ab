//! Scratch directory cleaning.

use std::fs;

use anyhow::Result;

use crate::config::GeneratedConfigDir;
use crate::framework;

/// Execute the clean command.
pub fn cmd_clean(configs: bool) -> Result<()> {
    let scratch = framework::default_scratch_root();
    if scratch.exists() {
        println!("Removing {}...", scratch.display());
        fs::remove_dir_all(&scratch)?;
    } else {
        println!("No scratch directory to clean.");
    }

    if configs {
        let generated = GeneratedConfigDir::default_root();
        if generated.root().exists() {
            println!("Removing {}...", generated.root().display());
        }
        generated.clean()?;
    }

    println!("Clean complete.");
    Ok(())
}
