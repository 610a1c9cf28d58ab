//! relpack - RPM source assembly for container-image and Helm-chart
//! projects.
//!
//! Replaces the generic "tarball the git tree" step of the release build
//! with a per-flavor source collection step, and writes a minimal spec
//! enumerating the collected sources.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use relpack::build::BuildOptions;
use relpack::commands;
use relpack::framework;
use relpack::sources::Flavor;

#[derive(Parser)]
#[command(name = "relpack")]
#[command(about = "RPM source assembly for container and Helm chart projects")]
#[command(
    after_help = "QUICK START:\n  relpack preflight          Check external tools\n  relpack build app --srpm   Assemble sources and build the SRPM\n  relpack show config        Show the rel-eng configuration"
)]
struct Cli {
    /// Repository root (default: discovered via git)
    #[arg(long, global = true)]
    git_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble RPM sources for a project
    Build {
        /// Project name (also the spec file stem)
        project: String,

        /// Collection flavor: container or chart (default: from config)
        #[arg(long)]
        flavor: Option<String>,

        /// Project directory relative to the repository root
        /// (default: from config, else the project name)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Build the SRPM after assembling sources
        #[arg(long)]
        srpm: bool,

        /// Keep the scratch directories for inspection
        #[arg(long)]
        no_cleanup: bool,
    },

    /// Rewrite the hard-coded version in a generated source file
    Retag {
        /// Project name
        project: String,

        /// New version tag (e.g. v1.3.0)
        #[arg(long)]
        new_tag: String,

        /// Old version tag (default: latest tag for the project)
        #[arg(long)]
        old_tag: Option<String>,

        /// Versioned file relative to the repository root
        /// (default: version_file from config)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },

    /// Clean scratch directories
    Clean {
        /// Also remove generated config trees
        #[arg(long)]
        configs: bool,
    },

    /// Verify external tools before a build
    Preflight {
        /// Fail if any required tool is missing (exit code 1)
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show the resolved rel-eng configuration
    Config,
    /// Show generated config components on disk
    Status,
}

fn main() -> Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            project,
            flavor,
            path,
            srpm,
            no_cleanup,
        } => {
            let git_root = resolve_git_root(cli.git_root)?;
            let flavor = flavor
                .map(|name| {
                    Flavor::parse(&name).ok_or_else(|| anyhow!("unknown flavor '{name}'"))
                })
                .transpose()?;
            let options = BuildOptions { srpm, no_cleanup };
            commands::cmd_build(&git_root, &project, flavor, path, &options)?;
        }

        Commands::Retag {
            project,
            new_tag,
            old_tag,
            file,
        } => {
            let git_root = resolve_git_root(cli.git_root)?;
            commands::cmd_retag(&git_root, &project, &new_tag, old_tag, file)?;
        }

        Commands::Show { what } => {
            let git_root = resolve_git_root(cli.git_root)?;
            let target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Status => commands::show::ShowTarget::Status,
            };
            commands::cmd_show(&git_root, target)?;
        }

        Commands::Clean { configs } => {
            commands::cmd_clean(configs)?;
        }

        Commands::Preflight { strict } => {
            commands::cmd_preflight(strict)?;
        }
    }

    Ok(())
}

fn resolve_git_root(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(root) => Ok(root),
        None => Ok(framework::discover_git_root()?),
    }
}
