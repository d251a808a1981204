//! Repository and project settings.
//!
//! A sync config is a small TOML file:
//!
//! ```toml
//! [repo]
//! name = "acme/webapp"
//! branch = "all"
//! diff_point = "heads/main"
//!
//! [project]
//! slug = "webapp"
//! tx_config = "tx.config"
//! ```
//!
//! `tx_config` is resolved relative to the directory holding the sync config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use locsync_types::{ConfigError, ConfigResult, TxConfig};

/// Settings of the source repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Repository name as understood by the repository API (`owner/name`).
    pub name: String,
    /// Branch to watch, or [`RepoConfig::ALL_BRANCHES`].
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Baseline ref for incremental uploads. Diff mode is on when set.
    #[serde(default)]
    pub diff_point: Option<String>,
}

fn default_branch() -> String {
    "master".to_string()
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            branch: default_branch(),
            diff_point: None,
        }
    }
}

impl RepoConfig {
    /// Branch setting that enables per-branch resources.
    pub const ALL_BRANCHES: &'static str = "all";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_diff_point(mut self, diff_point: impl Into<String>) -> Self {
        self.diff_point = Some(diff_point.into());
        self
    }

    /// The configured diff point, ignoring blank values.
    pub fn diff_point(&self) -> Option<&str> {
        self.diff_point
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Whether only changed phrases are uploaded.
    pub fn upload_diffs(&self) -> bool {
        self.diff_point().is_some()
    }

    /// Whether every branch gets its own branch-scoped resource.
    pub fn process_all_branches(&self) -> bool {
        self.branch == Self::ALL_BRANCHES
    }

    pub fn validate(&self) -> ConfigResult<()> {
        require("repo", "name", &self.name)?;
        require("repo", "branch", &self.branch)
    }
}

/// Settings of the translation project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub slug: String,
    /// Path of the INI-style tx config.
    pub tx_config: PathBuf,
}

impl ProjectConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        require("project", "slug", &self.slug)?;
        require("project", "tx_config", &self.tx_config.to_string_lossy())
    }
}

/// A complete sync configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub repo: RepoConfig,
    pub project: ProjectConfig,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl SyncConfig {
    /// Parse and validate config text. Relative paths resolve against the
    /// current directory.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: SyncConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the config file at `path`.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.repo.validate()?;
        self.project.validate()
    }

    /// Absolute-or-relative path of the tx config.
    pub fn tx_config_path(&self) -> PathBuf {
        self.base_dir.join(&self.project.tx_config)
    }

    /// Read and parse the tx config.
    pub fn load_tx_config(&self) -> ConfigResult<TxConfig> {
        let text = std::fs::read_to_string(self.tx_config_path())?;
        TxConfig::parse(&text)
    }
}

fn require(section: &str, field: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField {
            context: format!("[{section}]"),
            field: field.to_string(),
        });
    }
    Ok(())
}
