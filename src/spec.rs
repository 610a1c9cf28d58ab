//! Minimal RPM spec generation.
//!
//! The generated spec is not a real packaging descriptor. It exists so the
//! generic SRPM build step can run with correctly indexed sources; the
//! downstream build system supplies the real spec.

use std::path::{Path, PathBuf};

use crate::common::write_file_with_dirs;
use crate::error::BuildError;

/// A rendered spec file and where it was written.
#[derive(Debug, Clone)]
pub struct GeneratedSpec {
    /// Full path of the written `.spec` file.
    pub path: PathBuf,
    /// Rendered spec text.
    pub content: String,
}

/// Render the spec skeleton for `project_name` with one `SOURCEn:` line per
/// staged source, index-aligned to the order sources were collected.
pub fn render_spec(project_name: &str, sources: &[PathBuf]) -> String {
    let source_lines = sources
        .iter()
        .enumerate()
        .map(|(idx, source)| format!("SOURCE{}: {}", idx, source.display()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\
Name:           {project_name}
Version:        0
Release:        0
Summary:        Test
License:        Apache-2.0
{source_lines}

%description
test

%prep
%autosetup

%build

%install

%files

%changelog
"
    )
}

/// Write `<project_name>.spec` into the target source directory.
pub fn generate_spec(
    sourcedir: &Path,
    project_name: &str,
    sources: &[PathBuf],
) -> Result<GeneratedSpec, BuildError> {
    println!("Generating spec with {} sources", sources.len());

    let content = render_spec(project_name, sources);
    let path = sourcedir.join(format!("{project_name}.spec"));
    write_file_with_dirs(&path, &content)?;

    Ok(GeneratedSpec { path, content })
}
