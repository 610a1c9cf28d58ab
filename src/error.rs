//! Error taxonomy for the packaging pipeline.
//!
//! Library code returns `BuildError`; the CLI layer wraps it in `anyhow`
//! for reporting. Only `Aborted` is ever recovered from: the orchestrator
//! turns it into a clean partial result. Everything else is fatal and
//! unwinds through the cleanup guard to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the packaging pipeline and its collaborators.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The operator interrupted an active run.
    #[error("build interrupted")]
    Aborted,

    /// An external tool exited non-zero (or could not be spawned).
    #[error("{}", external_tool_message(.program, .code, .stderr))]
    ExternalTool {
        program: String,
        code: i32,
        stderr: String,
    },

    /// A required file or directory is absent.
    #[error("missing input: {}", .path.display())]
    MissingInput { path: PathBuf },

    /// A version tag does not contain a dotted numeric triple.
    #[error("no version of the form X.Y.Z found in tag '{tag}'")]
    PatternNotFound { tag: String },

    /// The config file exists but is not valid TOML.
    #[error("failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A dotted config lookup hit a missing key.
    #[error("invalid config lookup ({path}): no such key '{segment}'")]
    ConfigLookup { path: String, segment: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn external_tool_message(program: &str, code: &i32, stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("'{program}' failed (exit code {code})")
    } else {
        format!("'{program}' failed (exit code {code}): {stderr}")
    }
}
