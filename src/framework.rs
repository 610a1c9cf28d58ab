//! Interface to the host release-engineering framework.
//!
//! The pipeline leans on the framework for three things: per-run build
//! directories, version-tag metadata lookup, and the generic SRPM build.
//! Each is implemented here just deeply enough to satisfy that contract.

use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::error::BuildError;
use crate::process::{self, Cmd};

/// Per-run build directory layout. Owned exclusively by one run; no other
/// run ever reads or writes into it.
#[derive(Debug, Clone)]
pub struct BuildDirs {
    /// Root of this run's scratch tree.
    pub base: PathBuf,
    /// Staging directory for RPM sources.
    pub sourcedir: PathBuf,
    /// Output directory for built SRPMs.
    pub srpm_dir: PathBuf,
}

impl BuildDirs {
    /// Compute the layout for one run. Nothing is created on disk yet; the
    /// orchestrator's prepare step calls [`BuildDirs::create`].
    pub fn for_run(scratch_root: &Path, build_tag: &str) -> Self {
        let base = scratch_root.join(format!("{build_tag}-{}", std::process::id()));
        BuildDirs {
            sourcedir: base.join("SOURCES"),
            srpm_dir: base.join("SRPMS"),
            base,
        }
    }

    /// Create the directory tree.
    pub fn create(&self) -> Result<(), BuildError> {
        fs::create_dir_all(&self.sourcedir)?;
        fs::create_dir_all(&self.srpm_dir)?;
        Ok(())
    }
}

/// Default scratch root for per-run build trees.
pub fn default_scratch_root() -> PathBuf {
    env::temp_dir().join("relpack")
}

/// Resolve the repository root of the current working directory.
pub fn discover_git_root() -> Result<PathBuf, BuildError> {
    let result = process::run("git", ["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(result.stdout_trimmed()))
}

/// Latest tagged version of a project, from `<project>-<version>-<release>`
/// style git tags, with the project prefix stripped.
pub fn latest_tagged_version(git_root: &Path, project: &str) -> Result<String, BuildError> {
    let pattern = format!("{project}-*");
    let result = process::run_in(
        "git",
        ["describe", "--tags", "--abbrev=0", "--match", &pattern],
        git_root,
    )?;
    let tag = result.stdout_trimmed();
    let prefix = format!("{project}-");
    Ok(tag.strip_prefix(&prefix).unwrap_or(tag).to_string())
}

/// Build the SRPM from a generated spec via `rpmbuild -bs`.
///
/// Returns the path of the written `.src.rpm`, parsed from the tool's
/// `Wrote:` line.
pub fn build_srpm(dirs: &BuildDirs, spec_file: &Path) -> Result<PathBuf, BuildError> {
    let result = Cmd::new("rpmbuild")
        .args(["--define", &format!("_sourcedir {}", dirs.sourcedir.display())])
        .args(["--define", &format!("_srcrpmdir {}", dirs.srpm_dir.display())])
        .arg("-bs")
        .arg_path(spec_file)
        .run()?;

    for line in result.stdout.lines() {
        if let Some(path) = line.trim().strip_prefix("Wrote:") {
            return Ok(PathBuf::from(path.trim()));
        }
    }

    Err(BuildError::ExternalTool {
        program: "rpmbuild".to_string(),
        code: result.code(),
        stderr: "no 'Wrote:' line in rpmbuild output".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_dirs_layout() {
        let tmp = TempDir::new().unwrap();
        let dirs = BuildDirs::for_run(tmp.path(), "app");

        assert!(dirs.base.starts_with(tmp.path()));
        assert_eq!(dirs.sourcedir, dirs.base.join("SOURCES"));
        assert_eq!(dirs.srpm_dir, dirs.base.join("SRPMS"));
        assert!(!dirs.base.exists());

        dirs.create().unwrap();
        assert!(dirs.sourcedir.is_dir());
        assert!(dirs.srpm_dir.is_dir());
    }

    #[test]
    fn test_latest_tagged_version_strips_project_prefix() {
        if !process::exists("git") {
            eprintln!("git not installed, skipping");
            return;
        }

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        process::run_in("git", ["init", "-q"], root).unwrap();
        process::run_in("git", ["config", "user.email", "ci@example.com"], root).unwrap();
        process::run_in("git", ["config", "user.name", "ci"], root).unwrap();
        fs::write(root.join("file"), "x").unwrap();
        process::run_in("git", ["add", "file"], root).unwrap();
        process::run_in("git", ["commit", "-q", "-m", "init"], root).unwrap();
        process::run_in("git", ["tag", "app-1.2.3-1"], root).unwrap();

        let version = latest_tagged_version(root, "app").unwrap();
        assert_eq!(version, "1.2.3-1");
    }
}
