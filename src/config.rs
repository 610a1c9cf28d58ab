//! Release-engineering configuration.
//!
//! Reads `config.toml` from `rel-eng/` (or the path in `RELPACK_CONFIG`)
//! into an explicitly constructed, immutable value. There is no process-wide
//! cache: callers that want fresh contents load again.
//!
//! Also manages the generated per-component config trees under the user
//! data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::common::write_file_with_dirs;
use crate::error::BuildError;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "RELPACK_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Per-project settings from the `[projects.<name>]` sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    /// Collection strategy for the project ("container" or "chart").
    pub flavor: Option<String>,
    /// Project directory relative to the git root (default: the project
    /// name).
    pub path: Option<PathBuf>,
    /// Generated source file the version tagger rewrites, relative to the
    /// git root.
    pub version_file: Option<PathBuf>,
    /// Registry image the push script publishes.
    pub image: Option<String>,
}

/// Typed view of the config document.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigDoc {
    #[serde(default)]
    projects: BTreeMap<String, ProjectConfig>,
}

/// Parsed release-engineering configuration.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    doc: toml::Value,
    typed: ConfigDoc,
}

impl Config {
    /// Load configuration from an explicit path.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        if !path.exists() {
            return Err(BuildError::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path)?;
        let doc: toml::Value =
            toml::from_str(&raw).map_err(|source| BuildError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        let typed: ConfigDoc =
            toml::from_str(&raw).map_err(|source| BuildError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            doc,
            typed,
        })
    }

    /// Load from `RELPACK_CONFIG`, falling back to
    /// `<git_root>/rel-eng/config.toml`.
    pub fn from_env(git_root: &Path) -> Result<Self, BuildError> {
        let path = match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => git_root.join("rel-eng").join(CONFIG_FILE_NAME),
        };
        Self::load(&path)
    }

    /// Where this configuration was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Dotted property lookup, e.g. `lookup("projects.app.flavor")`.
    pub fn lookup(&self, property_path: &str) -> Result<&toml::Value, BuildError> {
        let mut current = &self.doc;
        for segment in property_path.split('.') {
            current = current
                .as_table()
                .and_then(|table| table.get(segment))
                .ok_or_else(|| BuildError::ConfigLookup {
                    path: property_path.to_string(),
                    segment: segment.to_string(),
                })?;
        }
        Ok(current)
    }

    /// One `[projects.<name>]` section, if present.
    pub fn project(&self, name: &str) -> Option<ProjectConfig> {
        self.typed.projects.get(name).cloned()
    }

    /// Every `image` key across the project sections.
    pub fn container_image_names(&self) -> Vec<String> {
        self.typed
            .projects
            .values()
            .filter_map(|project| project.image.clone())
            .collect()
    }

    /// Print the resolved configuration.
    pub fn print(&self) {
        println!("Configuration ({}):", self.path.display());
        if self.typed.projects.is_empty() {
            println!("  (no projects configured)");
        } else {
            for (name, project) in &self.typed.projects {
                let flavor = project.flavor.as_deref().unwrap_or("?");
                println!("  {name}: {flavor}");
            }
        }
        for image in self.container_image_names() {
            println!("  image: {image}");
        }
    }
}

/// Root of the generated per-component config trees.
#[derive(Debug, Clone)]
pub struct GeneratedConfigDir {
    root: PathBuf,
}

impl GeneratedConfigDir {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Default root under the user data directory
    /// (`~/.local/share/relpack/`).
    pub fn default_root() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("relpack"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one component's generated config tree.
    pub fn component_dir(&self, component: &str) -> PathBuf {
        self.root.join(component)
    }

    /// Conventional config file location inside a component tree.
    pub fn config_file_path(&self, component: &str) -> PathBuf {
        self.component_dir(component).join("config.yaml")
    }

    /// Copy a component's config sources into the generated tree, replacing
    /// any previous copy.
    pub fn copy_config_sources(&self, source_dir: &Path, component: &str) -> Result<(), BuildError> {
        if !source_dir.is_dir() {
            return Err(BuildError::MissingInput {
                path: source_dir.to_path_buf(),
            });
        }

        let target = self.component_dir(component);
        if target.exists() {
            fs::remove_dir_all(&target)?;
        }

        for entry in WalkDir::new(source_dir) {
            let entry = entry.map_err(std::io::Error::from)?;
            let rel = entry
                .path()
                .strip_prefix(source_dir)
                .expect("walkdir yields paths under its root");
            let dest = target.join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest)?;
            } else {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &dest)?;
            }
        }
        Ok(())
    }

    /// Store configuration content at `rel_path` inside a component tree.
    pub fn write_config(
        &self,
        component: &str,
        rel_path: &str,
        content: &str,
    ) -> Result<PathBuf, BuildError> {
        let path = self.component_dir(component).join(rel_path);
        write_file_with_dirs(&path, content)?;
        Ok(path)
    }

    /// Store a JSON document at `rel_path` inside a component tree.
    pub fn write_config_json(
        &self,
        component: &str,
        rel_path: &str,
        value: &serde_json::Value,
    ) -> Result<PathBuf, BuildError> {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        self.write_config(component, rel_path, &rendered)
    }

    /// Component trees currently on disk.
    pub fn components(&self) -> Result<Vec<String>, BuildError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove every generated component tree.
    pub fn clean(&self) -> Result<(), BuildError> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}
