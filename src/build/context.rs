//! Per-run build state.

use std::path::PathBuf;

use crate::cancel::CancelToken;
use crate::framework::BuildDirs;

/// State owned exclusively by one orchestrator run. Nothing here is shared
/// across runs; a new run starts from a fresh context.
#[derive(Debug)]
pub struct BuildContext {
    /// Project being packaged; also the spec file stem.
    pub project_name: String,
    /// Tag the framework reports for this build.
    pub build_tag: String,
    /// Repository root.
    pub git_root: PathBuf,
    /// Project directory relative to the repository root.
    pub relative_project_dir: PathBuf,
    /// This run's build directory tree.
    pub dirs: BuildDirs,
    /// Ordered staged sources; position defines the `SOURCEn` index.
    pub sources: Vec<PathBuf>,
    /// Final output paths of this run. Reset at the start of every run,
    /// never carried over.
    pub artifacts: Vec<PathBuf>,
    /// Set once the framework's tarball stage has been satisfied. The
    /// pipeline never produces a generic project tarball; collection marks
    /// the stage done instead.
    pub tarball_done: bool,
    /// Interrupt flag polled between pipeline steps.
    pub cancel: CancelToken,
}

impl BuildContext {
    /// Absolute path of the project directory.
    pub fn project_dir(&self) -> PathBuf {
        self.git_root.join(&self.relative_project_dir)
    }

    /// Record a staged source as both the next `SOURCEn` entry and an
    /// output artifact.
    pub fn add_source(&mut self, path: PathBuf) {
        self.artifacts.push(path.clone());
        self.sources.push(path);
    }
}
