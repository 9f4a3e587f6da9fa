//! Path resolution collaborators.
//!
//! The planner never looks at the disk directly. Everything it needs to know
//! about a cartridge (which entry points exist, where output goes, which
//! aliases and search directories apply) comes through the traits defined
//! here, which keeps the descriptor builder a pure function of its inputs.
//!
//! # Submodules
//!
//! - [`fs`] - Conventional `cartridges/<name>/cartridge/client` layout on disk

pub mod fs;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAIN_ENTRY_NAME, DEFAULT_MAIN_FILES};
use crate::descriptor::{BuildKind, EntryMap};

pub use fs::FsWorkspace;

/// How entry files are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConventions {
  /// File names recognized as a locale's main entry point.
  pub main_files: Vec<String>,
  /// Entry name given to a recognized main file.
  pub main_entry_name: String,
}

impl Default for NamingConventions {
  fn default() -> Self {
    Self {
      main_files: DEFAULT_MAIN_FILES.iter().map(|f| f.to_string()).collect(),
      main_entry_name: DEFAULT_MAIN_ENTRY_NAME.to_string(),
    }
  }
}

impl NamingConventions {
  pub fn is_main_file(&self, file_name: &str) -> bool {
    self.main_files.iter().any(|f| f == file_name)
  }
}

/// Ordered module search directories for one build kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchDirectories {
  pub directories: Vec<String>,
  /// Whether `dir/` imports may also resolve to `dir/<dir>.<ext>`.
  pub auxiliary_search: bool,
}

/// Maps a cartridge and build kind to the paths a descriptor needs.
pub trait PathResolver {
  /// Entry name to source files. Empty when the cartridge has nothing to build.
  fn resolve_entries(&self, module: &str, kind: BuildKind, naming: &NamingConventions) -> EntryMap;

  fn resolve_output_path(&self, module: &str, kind: BuildKind) -> PathBuf;

  fn resolve_aliases(&self, kind: BuildKind) -> BTreeMap<String, String>;

  fn resolve_search_directories(&self, kind: BuildKind) -> SearchDirectories;
}

/// Lists the cartridges taking part in a run.
pub trait ModuleDiscovery {
  /// Module identifiers in build order. `scope` holds the enabled kinds.
  fn list_modules(&self, scope: &[BuildKind]) -> Vec<String>;
}
