//! Version retagging of generated source files.
//!
//! Some projects hard-code their semantic version in a generated source
//! file that is not rewritten by the framework's normal tagging. This step
//! rewrites the old version triple with the new one and stages the file, so
//! the framework's standard metadata update can commit it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::BuildError;
use crate::process::Cmd;

static VERSION_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+").expect("hard-coded pattern"));

/// First dotted triple of digits inside a version tag.
///
/// Tags like `v1.2.3-rc1` yield `1.2.3`. A tag with no such triple is a
/// fatal [`BuildError::PatternNotFound`].
pub fn version_triple(tag: &str) -> Result<&str, BuildError> {
    VERSION_TRIPLE
        .find(tag)
        .map(|found| found.as_str())
        .ok_or_else(|| BuildError::PatternNotFound {
            tag: tag.to_string(),
        })
}

/// Rewrite every occurrence of the old version triple with the new one in
/// `versioned_file` (relative to `git_root`). Returns the rewritten path.
pub fn rewrite_versions(
    git_root: &Path,
    versioned_file: &Path,
    old_tag: &str,
    new_tag: &str,
) -> Result<PathBuf, BuildError> {
    let old_version = version_triple(old_tag)?;
    let new_version = version_triple(new_tag)?;

    let path = git_root.join(versioned_file);
    if !path.is_file() {
        return Err(BuildError::MissingInput { path });
    }

    println!("Rewriting {old_version} -> {new_version} in {}", path.display());

    let content = fs::read_to_string(&path)?;
    fs::write(&path, content.replace(old_version, new_version))?;

    Ok(path)
}

/// Rewrite the versioned file and stage it for the framework's metadata
/// commit.
pub fn retag(
    git_root: &Path,
    versioned_file: &Path,
    old_tag: &str,
    new_tag: &str,
) -> Result<PathBuf, BuildError> {
    let path = rewrite_versions(git_root, versioned_file, old_tag, new_tag)?;

    Cmd::new("git")
        .arg("add")
        .arg_path(&path)
        .dir(git_root)
        .run()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_triple_extracted_from_release_candidate_tag() {
        assert_eq!(version_triple("v1.2.3-rc1").unwrap(), "1.2.3");
    }

    #[test]
    fn test_triple_extracted_from_prefixed_tag() {
        assert_eq!(version_triple("app-10.0.42-1").unwrap(), "10.0.42");
    }

    #[test]
    fn test_tag_without_triple_is_pattern_not_found() {
        let err = version_triple("latest").unwrap_err();
        match err {
            BuildError::PatternNotFound { tag } => assert_eq!(tag, "latest"),
            other => panic!("expected PatternNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_rewrite_replaces_every_occurrence() {
        let tmp = TempDir::new().unwrap();
        let rel = Path::new("src/version.rs");
        let file = tmp.path().join(rel);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(
            &file,
            "pub const VERSION: &str = \"1.2.3\";\n// shipped as 1.2.3\n",
        )
        .unwrap();

        rewrite_versions(tmp.path(), rel, "v1.2.3-rc1", "v1.3.0").unwrap();

        let content = fs::read_to_string(&file).unwrap();
        assert!(!content.contains("1.2.3"));
        assert_eq!(content.matches("1.3.0").count(), 2);
    }

    #[test]
    fn test_rewrite_missing_file_is_missing_input() {
        let tmp = TempDir::new().unwrap();
        let err =
            rewrite_versions(tmp.path(), Path::new("absent.rs"), "1.0.0", "1.0.1").unwrap_err();
        assert!(matches!(err, BuildError::MissingInput { .. }));
    }

    #[test]
    fn test_rewrite_rejects_bad_new_tag_before_touching_the_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("version.rs");
        fs::write(&file, "1.0.0").unwrap();

        let err = rewrite_versions(tmp.path(), Path::new("version.rs"), "1.0.0", "latest")
            .unwrap_err();
        assert!(matches!(err, BuildError::PatternNotFound { .. }));
        assert_eq!(fs::read_to_string(&file).unwrap(), "1.0.0");
    }
}
