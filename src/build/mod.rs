//! Pipeline orchestrator.
//!
//! Drives one build end to end: prepare directories, mark the tarball
//! stage, collect sources, generate the spec, optionally build the SRPM.
//! Cleanup of the scratch tree is guaranteed by a drop guard: it runs on
//! success, on fatal errors, and on interrupt, and is skipped only when
//! the caller asked for `no_cleanup`.

mod context;

use std::fs;
use std::path::PathBuf;

use crate::cancel::CancelToken;
use crate::error::BuildError;
use crate::framework::{self, BuildDirs};
use crate::sources::{Flavor, SourceStrategy};
use crate::spec;

pub use context::BuildContext;

/// CLI-level options consumed by one run.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Build the SRPM after assembling sources.
    pub srpm: bool,
    /// Leave the scratch tree behind for inspection.
    pub no_cleanup: bool,
}

/// Everything needed to construct a [`Builder`].
#[derive(Debug)]
pub struct BuildRequest {
    pub project_name: String,
    pub git_root: PathBuf,
    pub relative_project_dir: PathBuf,
    pub flavor: Flavor,
    /// Root under which this run's scratch tree is created.
    pub scratch_root: PathBuf,
    pub cancel: CancelToken,
}

/// Removes this run's scratch tree when dropped, unless disarmed.
///
/// Cleanup failures are reported but never replace the error that is
/// already unwinding through the guard.
struct CleanupGuard {
    dir: PathBuf,
    disarmed: bool,
}

impl CleanupGuard {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            disarmed: false,
        }
    }

    fn disarm(&mut self) {
        self.disarmed = true;
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if self.disarmed || !self.dir.exists() {
            return;
        }
        if let Err(err) = fs::remove_dir_all(&self.dir) {
            eprintln!("[WARN] failed to clean up {}: {err}", self.dir.display());
        }
    }
}

/// Assembles the RPM sources for one project and, optionally, its SRPM.
pub struct Builder {
    ctx: BuildContext,
    strategy: Box<dyn SourceStrategy>,
}

impl Builder {
    pub fn new(request: BuildRequest) -> Self {
        let build_tag = request.project_name.clone();
        let dirs = BuildDirs::for_run(&request.scratch_root, &build_tag);
        let ctx = BuildContext {
            project_name: request.project_name,
            build_tag,
            git_root: request.git_root,
            relative_project_dir: request.relative_project_dir,
            dirs,
            sources: Vec::new(),
            artifacts: Vec::new(),
            tarball_done: false,
            cancel: request.cancel,
        };
        Self {
            ctx,
            strategy: request.flavor.strategy(),
        }
    }

    /// This run's state, mainly for inspection in tests.
    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    /// Run the pipeline. Returns the ordered artifact paths: the full list
    /// on success, the partial list gathered so far on interrupt.
    pub fn run(&mut self, options: &BuildOptions) -> Result<Vec<PathBuf>, BuildError> {
        println!("Building package [{}]", self.ctx.build_tag);

        // Reset per-run state on each call to run().
        self.ctx.artifacts.clear();
        self.ctx.sources.clear();
        self.ctx.tarball_done = false;

        let mut guard = CleanupGuard::new(self.ctx.dirs.base.clone());
        if options.no_cleanup {
            guard.disarm();
        }

        match self.pipeline(options) {
            Err(BuildError::Aborted) => {
                println!("Interrupted, cleaning up...");
                Ok(self.ctx.artifacts.clone())
            }
            Err(err) => Err(err),
            Ok(()) => Ok(self.ctx.artifacts.clone()),
        }
        // guard drops here: the scratch tree goes away on every path.
    }

    fn pipeline(&mut self, options: &BuildOptions) -> Result<(), BuildError> {
        self.ctx.dirs.create()?;
        self.mark_tarball_done();

        self.strategy.collect_sources(&mut self.ctx)?;

        self.ctx.cancel.check()?;
        let generated = spec::generate_spec(
            &self.ctx.dirs.sourcedir,
            &self.ctx.project_name,
            &self.ctx.sources,
        )?;

        if options.srpm {
            // The framework's generic SRPM step expects the tarball stage
            // to have run first.
            debug_assert!(self.ctx.tarball_done);
            let srpm = framework::build_srpm(&self.ctx.dirs, &generated.path)?;
            println!("Wrote SRPM {}", srpm.display());
            self.ctx.artifacts.push(srpm);
        }

        Ok(())
    }

    /// Satisfy the framework's tarball stage. Container and chart sources
    /// are never packed into a generic project tarball; collection stages
    /// them piecewise instead.
    fn mark_tarball_done(&mut self) {
        self.ctx.tarball_done = true;
    }
}
