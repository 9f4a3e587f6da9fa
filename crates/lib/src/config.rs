//! Run configuration and the project configuration file.
//!
//! A run is described by two things:
//! - [`Configuration`]: which build kinds to plan and in which mode, usually
//!   straight from command line flags
//! - [`ProjectConfig`]: the `cartridge.json` file at the project root, holding
//!   naming conventions, resolution knobs, overrides and the merge strategy

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  CONFIG_FILENAME, DEFAULT_MAIN_ENTRY_NAME, DEFAULT_MAIN_FILES, DEFAULT_SEARCH_DIRECTORY, ROOT_ENV_VAR,
};
use crate::descriptor::{BuildKind, Mode};
use crate::error::ConfigurationError;
use crate::merge::{MergeStrategyTable, OverridePartial};
use crate::resolve::NamingConventions;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },
}

/// Which kinds to plan and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
  #[serde(rename = "type")]
  pub mode: Mode,
  pub js: bool,
  pub css: bool,
}

impl Configuration {
  /// Kinds to plan, in priority order. Selecting neither kind selects both.
  pub fn enabled_kinds(&self) -> Vec<BuildKind> {
    if !self.js && !self.css {
      return BuildKind::ALL.to_vec();
    }

    BuildKind::ALL
      .into_iter()
      .filter(|kind| match kind {
        BuildKind::Script => self.js,
        BuildKind::Style => self.css,
      })
      .collect()
  }
}

/// Per-project naming and resolution options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleOptions {
  pub main_files: Vec<String>,
  pub main_entry_name: String,
  /// Alias to path, relative paths resolved against the project root.
  pub aliases: BTreeMap<String, String>,
  pub search_directories: Vec<String>,
  /// Enables the directory-named resolve plugin.
  pub directory_named: bool,
  /// Explicit cartridge order. Discovered from disk when absent.
  pub modules: Option<Vec<String>>,
  pub lint_fix: bool,
}

impl Default for ModuleOptions {
  fn default() -> Self {
    Self {
      main_files: DEFAULT_MAIN_FILES.iter().map(|f| f.to_string()).collect(),
      main_entry_name: DEFAULT_MAIN_ENTRY_NAME.to_string(),
      aliases: BTreeMap::new(),
      search_directories: vec![DEFAULT_SEARCH_DIRECTORY.to_string()],
      directory_named: true,
      modules: None,
      lint_fix: false,
    }
  }
}

impl ModuleOptions {
  pub fn naming(&self) -> NamingConventions {
    NamingConventions {
      main_files: self.main_files.clone(),
      main_entry_name: self.main_entry_name.clone(),
    }
  }
}

/// Contents of `cartridge.json`.
///
/// # Example
///
/// ```json
/// {
///   "main_entry_name": "main",
///   "aliases": { "base": "cartridges/app_storefront_base/cartridge/client/default/js" },
///   "overrides": [{ "name": "style", "source_maps": true }],
///   "merge_strategy": { "transform_rules": "append" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  #[serde(flatten)]
  pub modules: ModuleOptions,
  /// Raw partial descriptors, validated by [`ProjectConfig::override_partials`].
  pub overrides: Vec<serde_json::Value>,
  pub merge_strategy: MergeStrategyTable,
}

impl ProjectConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Loads `cartridge.json` from `root`, falling back to defaults when absent.
  pub fn load_from_root(root: &Path) -> Result<Self, ConfigError> {
    let path = root.join(CONFIG_FILENAME);
    if !path.exists() {
      debug!(path = ?path, "no project config, using defaults");
      return Ok(Self::default());
    }
    Self::load(&path)
  }

  pub fn override_partials(&self) -> Result<Vec<OverridePartial>, ConfigurationError> {
    self.overrides.iter().map(OverridePartial::from_value).collect()
  }
}

/// Project root: explicit path, else `CARTRIDGE_ROOT`, else the working directory.
pub fn project_root(explicit: Option<&Path>) -> PathBuf {
  if let Some(path) = explicit {
    return path.to_path_buf();
  }

  if let Ok(root) = std::env::var(ROOT_ENV_VAR)
    && !root.is_empty()
  {
    return PathBuf::from(root);
  }

  std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
