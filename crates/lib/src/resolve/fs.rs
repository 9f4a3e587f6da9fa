//! Filesystem-backed resolver for the conventional cartridge layout.
//!
//! ```text
//! <root>/cartridges/<module>/cartridge/client/<locale>/js/*.js
//! <root>/cartridges/<module>/cartridge/client/<locale>/scss/*.scss
//! <root>/cartridges/<module>/cartridge/static/{js,css}
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::{ModuleDiscovery, NamingConventions, PathResolver, SearchDirectories};
use crate::config::ModuleOptions;
use crate::consts::{CARTRIDGES_DIR, DEFAULT_LOCALE};
use crate::descriptor::{BuildKind, EntryMap};

/// A project root laid out as a set of cartridges.
#[derive(Debug, Clone)]
pub struct FsWorkspace {
  root: PathBuf,
  aliases: BTreeMap<String, String>,
  search_directories: Vec<String>,
  directory_named: bool,
  modules: Option<Vec<String>>,
}

impl FsWorkspace {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    let root = dunce::canonicalize(&root).unwrap_or(root);
    Self {
      root,
      aliases: BTreeMap::new(),
      search_directories: Vec::new(),
      directory_named: false,
      modules: None,
    }
  }

  pub fn from_options(root: impl Into<PathBuf>, options: &ModuleOptions) -> Self {
    let mut workspace = Self::new(root);
    workspace.aliases = options.aliases.clone();
    workspace.search_directories = options.search_directories.clone();
    workspace.directory_named = options.directory_named;
    workspace.modules = options.modules.clone();
    workspace
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn cartridge_dir(&self, module: &str) -> PathBuf {
    self.root.join(CARTRIDGES_DIR).join(module).join("cartridge")
  }

  /// Every directory under `cartridges/`, sorted by name.
  pub fn cartridge_names(&self) -> Vec<String> {
    let dir = self.root.join(CARTRIDGES_DIR);
    let Ok(entries) = fs::read_dir(&dir) else {
      debug!(path = ?dir, "no cartridges directory");
      return Vec::new();
    };

    let mut names: Vec<String> = entries
      .flatten()
      .filter(|e| e.path().is_dir())
      .filter_map(|e| e.file_name().to_str().map(str::to_string))
      .collect();
    names.sort();
    names
  }

  /// `(locale, locale_dir)` pairs of a cartridge's client sources, sorted by locale.
  fn locales(&self, module: &str) -> Vec<(String, PathBuf)> {
    let client = self.cartridge_dir(module).join("client");
    let Ok(entries) = fs::read_dir(&client) else {
      return Vec::new();
    };

    let mut locales: Vec<(String, PathBuf)> = entries
      .flatten()
      .filter(|e| e.path().is_dir())
      .filter_map(|e| e.file_name().to_str().map(|name| (name.to_string(), e.path())))
      .collect();
    locales.sort();
    locales
  }

  fn has_sources(&self, module: &str, kind: BuildKind) -> bool {
    self
      .locales(module)
      .iter()
      .any(|(_, dir)| dir.join(kind.source_dir()).is_dir())
  }

  fn resolve_against_root(&self, path: &str) -> String {
    self.root.join(path).to_string_lossy().to_string()
  }
}

fn is_entry_file(path: &Path, kind: BuildKind) -> bool {
  let partial = path
    .file_name()
    .and_then(|n| n.to_str())
    .map(|n| n.starts_with('_'))
    .unwrap_or(true);
  let extension_matches = path
    .extension()
    .and_then(|e| e.to_str())
    .map(|e| kind.source_extensions().contains(&e))
    .unwrap_or(false);
  !partial && extension_matches
}

impl PathResolver for FsWorkspace {
  fn resolve_entries(&self, module: &str, kind: BuildKind, naming: &NamingConventions) -> EntryMap {
    let mut entries = EntryMap::new();

    for (locale, locale_dir) in self.locales(module) {
      let source_dir = locale_dir.join(kind.source_dir());
      if !source_dir.is_dir() {
        continue;
      }

      let walker = WalkDir::new(&source_dir).min_depth(1).max_depth(1).sort_by_file_name();
      for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_entry_file(path, kind) {
          continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let entry_name = if naming.is_main_file(&file_name) {
          format!("{}/{}", locale, naming.main_entry_name)
        } else {
          let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
          format!("{}/{}", locale, stem)
        };

        entries.entry(entry_name).or_default().push(path.to_path_buf());
      }
    }

    debug!(module = %module, kind = %kind, count = entries.len(), "resolved entries");
    entries
  }

  fn resolve_output_path(&self, module: &str, kind: BuildKind) -> PathBuf {
    self.cartridge_dir(module).join("static").join(kind.output_dir())
  }

  fn resolve_aliases(&self, kind: BuildKind) -> BTreeMap<String, String> {
    let mut aliases = BTreeMap::new();

    for module in self.cartridge_names() {
      let source_dir = self
        .cartridge_dir(&module)
        .join("client")
        .join(DEFAULT_LOCALE)
        .join(kind.source_dir());
      aliases.insert(module, source_dir.to_string_lossy().to_string());
    }

    // Configured aliases win over the per-cartridge defaults.
    for (alias, target) in &self.aliases {
      aliases.insert(alias.clone(), self.resolve_against_root(target));
    }

    aliases
  }

  fn resolve_search_directories(&self, _kind: BuildKind) -> SearchDirectories {
    SearchDirectories {
      directories: self
        .search_directories
        .iter()
        .map(|d| self.resolve_against_root(d))
        .collect(),
      auxiliary_search: self.directory_named,
    }
  }
}

impl ModuleDiscovery for FsWorkspace {
  fn list_modules(&self, scope: &[BuildKind]) -> Vec<String> {
    if let Some(modules) = &self.modules {
      return modules.clone();
    }

    self
      .cartridge_names()
      .into_iter()
      .filter(|module| scope.iter().any(|kind| self.has_sources(module, *kind)))
      .collect()
  }
}
