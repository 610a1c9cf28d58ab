//! Source collection strategies.
//!
//! A strategy decides, for one project directory, which entries become
//! individually copied sources and which are archived. Collection order is
//! the `SOURCEn` order: push script first, then the flavor's archive step,
//! then the copy traversal, then the optional generated-source hook.

mod chart;
mod container;
mod generated;

use std::fmt;
use std::fs;
use std::path::Path;

pub use chart::{ChartStrategy, HELM_CHART_FILES};
pub use container::ContainerStrategy;
pub use generated::{stage_generated_source, SETUP_SCRIPT_NAME};

use crate::build::BuildContext;
use crate::common::copy_file;
use crate::error::BuildError;

/// Name every push script is staged under in the source directory.
pub const PUSH_SCRIPT_NAME: &str = "push.sh";

/// Project flavor selecting a collection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Container,
    Chart,
}

impl Flavor {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "container" => Some(Flavor::Container),
            "chart" => Some(Flavor::Chart),
            _ => None,
        }
    }

    /// The strategy implementing this flavor.
    pub fn strategy(self) -> Box<dyn SourceStrategy> {
        match self {
            Flavor::Container => Box::new(ContainerStrategy),
            Flavor::Chart => Box::new(ChartStrategy),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Container => write!(f, "container"),
            Flavor::Chart => write!(f, "chart"),
        }
    }
}

/// One project-type-specific way of turning a project directory into
/// staged sources.
pub trait SourceStrategy {
    /// Push script for this flavor, relative to `<git_root>/rel-eng/`.
    fn push_script(&self) -> &'static str;

    /// Archive whatever this flavor archives up front. Runs after the push
    /// script is staged and before the copy traversal.
    fn archive_step(&self, ctx: &mut BuildContext) -> Result<(), BuildError>;

    /// Copy eligible project directory entries into the source directory.
    fn copy_step(&self, ctx: &mut BuildContext) -> Result<(), BuildError>;

    /// Full collection for one project directory.
    fn collect_sources(&self, ctx: &mut BuildContext) -> Result<(), BuildError> {
        copy_push_script(ctx, self.push_script())?;
        ctx.cancel.check()?;
        self.archive_step(ctx)?;
        self.copy_step(ctx)?;
        stage_generated_source(ctx)?;
        Ok(())
    }
}

/// Stage `rel-eng/<script>` as `push.sh`, always the first artifact.
fn copy_push_script(ctx: &mut BuildContext, script: &str) -> Result<(), BuildError> {
    let script_path = ctx.git_root.join("rel-eng").join(script);
    let target = ctx.dirs.sourcedir.join(PUSH_SCRIPT_NAME);

    println!("Copying {} to {}", script_path.display(), target.display());
    copy_file(&script_path, &target)?;
    ctx.add_source(target);
    Ok(())
}

/// Project directory entries sorted by file name.
///
/// Raw directory enumeration order is platform-dependent; staging in
/// lexicographic order keeps the `SOURCEn` indices stable across runs and
/// machines.
fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>, BuildError> {
    if !dir.is_dir() {
        return Err(BuildError::MissingInput {
            path: dir.to_path_buf(),
        });
    }
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}
