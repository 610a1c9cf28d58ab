//! Helm-chart-flavored source collection.
//!
//! The canonical chart members travel together in one uncompressed tarball;
//! everything else in the project directory is copied individually.

use super::{sorted_entries, SourceStrategy};
use crate::archive;
use crate::build::BuildContext;
use crate::common::copy_file;
use crate::error::BuildError;

/// Canonical Helm chart members captured by the archive step.
pub const HELM_CHART_FILES: &[&str] = &[
    "values.yaml",
    "values.schema.json",
    "charts",
    "crds",
    "templates",
    "LICENSE",
    "README.md",
];

pub struct ChartStrategy;

impl SourceStrategy for ChartStrategy {
    fn push_script(&self) -> &'static str {
        "chart_push.sh"
    }

    /// One `<project>.tar` holding the subset of the chart allow-list that
    /// exists on disk.
    fn archive_step(&self, ctx: &mut BuildContext) -> Result<(), BuildError> {
        let project_dir = ctx.project_dir();
        if !project_dir.is_dir() {
            return Err(BuildError::MissingInput { path: project_dir });
        }

        let files: Vec<&str> = HELM_CHART_FILES
            .iter()
            .copied()
            .filter(|name| project_dir.join(name).exists())
            .collect();

        let target = ctx.dirs.sourcedir.join(format!("{}.tar", ctx.project_name));
        archive::create_tar(&project_dir, &target, &files)?;
        ctx.add_source(target);
        Ok(())
    }

    /// Same traversal as the container flavor, minus anything the archive
    /// step already captured. Charts have no `root/` special case.
    fn copy_step(&self, ctx: &mut BuildContext) -> Result<(), BuildError> {
        let project_dir = ctx.project_dir();
        for entry in sorted_entries(&project_dir)? {
            ctx.cancel.check()?;

            let name = entry.file_name();
            let path = entry.path();
            println!("Checking file {}", name.to_string_lossy());

            if HELM_CHART_FILES.iter().any(|listed| name == *listed) {
                continue;
            }
            if path.is_file() {
                let target = ctx.dirs.sourcedir.join(&name);
                copy_file(&path, &target)?;
                ctx.add_source(target);
            }
        }
        Ok(())
    }
}
