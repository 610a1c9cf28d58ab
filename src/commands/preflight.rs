//! Preflight checks - verify external tools before a build.

use anyhow::{bail, Result};

/// Execute the preflight command.
pub fn cmd_preflight(strict: bool) -> Result<()> {
    let required = [
        ("tar", "Required to archive project sources"),
        ("git", "Required for tag lookup and staging"),
    ];
    let optional = [("rpmbuild", "Required for `relpack build --srpm`")];

    let mut missing = 0;
    for (tool, purpose) in required {
        match which::which(tool) {
            Ok(path) => println!("[ OK ] {tool} ({})", path.display()),
            Err(_) => {
                missing += 1;
                println!("[FAIL] {tool} - not found. {purpose}");
            }
        }
    }
    for (tool, purpose) in optional {
        match which::which(tool) {
            Ok(path) => println!("[ OK ] {tool} ({})", path.display()),
            Err(_) => println!("[WARN] {tool} - not found. {purpose}"),
        }
    }

    if missing > 0 {
        if strict {
            bail!("{missing} required tool(s) missing");
        }
        println!("\n{missing} required tool(s) missing.");
    } else {
        println!("\nAll required tools found.");
    }
    Ok(())
}
