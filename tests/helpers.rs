//! Shared test utilities for relpack tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use relpack::build::{BuildRequest, Builder};
use relpack::cancel::CancelToken;
use relpack::sources::Flavor;

/// Test environment simulating a repository with a `rel-eng/` directory,
/// plus a per-test scratch root for build trees.
pub struct TestEnv {
    /// Temporary directory (kept alive for the lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Simulated repository root
    pub git_root: PathBuf,
    /// Scratch root for per-run build directories
    pub scratch_root: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with both push scripts in place.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let git_root = base.join("repo");
        let scratch_root = base.join("scratch");
        fs::create_dir_all(git_root.join("rel-eng")).expect("Failed to create rel-eng dir");
        fs::create_dir_all(&scratch_root).expect("Failed to create scratch root");

        write_script(
            &git_root.join("rel-eng/container_push.sh"),
            "#!/bin/sh\necho pushing container\n",
        );
        write_script(
            &git_root.join("rel-eng/chart_push.sh"),
            "#!/bin/sh\necho pushing chart\n",
        );

        Self {
            _temp_dir: temp_dir,
            git_root,
            scratch_root,
        }
    }

    /// Create (and return) a project directory under the repository root.
    pub fn project_dir(&self, rel: &str) -> PathBuf {
        let dir = self.git_root.join(rel);
        fs::create_dir_all(&dir).expect("Failed to create project dir");
        dir
    }

    /// Builder for a project in this environment.
    pub fn builder(&self, project: &str, rel: &str, flavor: Flavor) -> Builder {
        self.builder_with_cancel(project, rel, flavor, CancelToken::new())
    }

    /// Builder wired to a caller-controlled cancellation token.
    pub fn builder_with_cancel(
        &self,
        project: &str,
        rel: &str,
        flavor: Flavor,
        cancel: CancelToken,
    ) -> Builder {
        Builder::new(BuildRequest {
            project_name: project.to_string(),
            git_root: self.git_root.clone(),
            relative_project_dir: PathBuf::from(rel),
            flavor,
            scratch_root: self.scratch_root.clone(),
            cancel,
        })
    }
}

/// Write an executable shell script.
pub fn write_script(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir for script");
    }
    fs::write(path, content).expect("Failed to write script");
    let mut perms = fs::metadata(path).expect("Failed to stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("Failed to set script permissions");
}

/// File names (final components) of a list of paths.
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            path.file_name()
                .expect("artifact path has a file name")
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}
