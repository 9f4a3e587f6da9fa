//! Shared fixtures for library integration tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cartridge_lib::cleanup::{CleanupError, OutputCleaner};
use cartridge_lib::descriptor::{BuildKind, EntryMap};
use cartridge_lib::resolve::{ModuleDiscovery, NamingConventions, PathResolver, SearchDirectories};

/// In-memory project: module order plus the entry files of each module.
#[derive(Default)]
pub struct MapProject {
  pub modules: Vec<String>,
  pub entries: BTreeMap<(String, BuildKind), EntryMap>,
  pub aliases: BTreeMap<String, String>,
  pub search_directories: Vec<String>,
}

impl MapProject {
  pub fn new(modules: &[&str]) -> Self {
    Self {
      modules: modules.iter().map(|m| m.to_string()).collect(),
      entries: BTreeMap::new(),
      aliases: BTreeMap::new(),
      search_directories: Vec::new(),
    }
  }

  pub fn alias(mut self, alias: &str, target: &str) -> Self {
    self.aliases.insert(alias.to_string(), target.to_string());
    self
  }

  pub fn search_directory(mut self, directory: &str) -> Self {
    self.search_directories.push(directory.to_string());
    self
  }

  pub fn entry(mut self, module: &str, kind: BuildKind, name: &str) -> Self {
    let source = format!("/project/{}/{}.{}", module, name, kind.source_extensions()[0]);
    self
      .entries
      .entry((module.to_string(), kind))
      .or_default()
      .insert(name.to_string(), vec![PathBuf::from(source)]);
    self
  }
}

impl PathResolver for MapProject {
  fn resolve_entries(&self, module: &str, kind: BuildKind, _naming: &NamingConventions) -> EntryMap {
    self
      .entries
      .get(&(module.to_string(), kind))
      .cloned()
      .unwrap_or_default()
  }

  fn resolve_output_path(&self, module: &str, kind: BuildKind) -> PathBuf {
    std::env::temp_dir().join(module).join(kind.output_dir())
  }

  fn resolve_aliases(&self, _kind: BuildKind) -> BTreeMap<String, String> {
    self.aliases.clone()
  }

  fn resolve_search_directories(&self, _kind: BuildKind) -> SearchDirectories {
    SearchDirectories {
      directories: self.search_directories.clone(),
      auxiliary_search: false,
    }
  }
}

impl ModuleDiscovery for MapProject {
  fn list_modules(&self, _scope: &[BuildKind]) -> Vec<String> {
    self.modules.clone()
  }
}

/// Cleaner that never touches the filesystem.
pub struct NoopCleaner;

impl OutputCleaner for NoopCleaner {
  fn clean(&self, _path: &Path) -> Result<(), CleanupError> {
    Ok(())
  }
}

/// Create `relative` under `root` with empty content.
pub fn touch(root: &Path, relative: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, "").unwrap();
}
