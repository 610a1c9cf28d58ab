//! Container-flavored source collection.
//!
//! A container project directory holds a container file plus any support
//! files, and optionally a `root/` overlay directory that is shipped as a
//! single `root.tar.gz`.

use super::{sorted_entries, SourceStrategy};
use crate::archive;
use crate::build::BuildContext;
use crate::common::copy_file;
use crate::error::BuildError;

const ROOT_DIR_NAME: &str = "root";
const ROOT_ARCHIVE_NAME: &str = "root.tar.gz";

pub struct ContainerStrategy;

impl SourceStrategy for ContainerStrategy {
    fn push_script(&self) -> &'static str {
        "container_push.sh"
    }

    /// Containers produce no up-front archive; the `root/` overlay is
    /// archived in place during the copy traversal so it keeps its
    /// lexicographic position among the other sources.
    fn archive_step(&self, _ctx: &mut BuildContext) -> Result<(), BuildError> {
        Ok(())
    }

    fn copy_step(&self, ctx: &mut BuildContext) -> Result<(), BuildError> {
        let project_dir = ctx.project_dir();
        for entry in sorted_entries(&project_dir)? {
            ctx.cancel.check()?;

            let name = entry.file_name();
            let path = entry.path();
            println!("Processing {}", name.to_string_lossy());

            if name == ROOT_DIR_NAME && path.is_dir() {
                let target = ctx.dirs.sourcedir.join(ROOT_ARCHIVE_NAME);
                archive::create_tar_gz(&path, &target)?;
                ctx.add_source(target);
            } else if path.is_file() {
                let target = ctx.dirs.sourcedir.join(&name);
                copy_file(&path, &target)?;
                ctx.add_source(target);
            }
            // Other directories are left out of the sources.
        }
        Ok(())
    }
}
