use std::collections::BTreeMap;

use crate::config::{Configuration, ModuleOptions};
use crate::descriptor::{BuildKind, Mode, ResolutionConfig};
use crate::resolve::{NamingConventions, PathResolver};

/// Options shared by every descriptor of one run, resolved once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedOptions {
  pub mode: Mode,
  pub naming: NamingConventions,
  pub lint_fix: bool,
  resolution: BTreeMap<BuildKind, ResolutionConfig>,
}

impl SharedOptions {
  pub fn compute(configuration: &Configuration, options: &ModuleOptions, resolver: &dyn PathResolver) -> Self {
    let resolution = configuration
      .enabled_kinds()
      .into_iter()
      .map(|kind| {
        let search = resolver.resolve_search_directories(kind);
        let config = ResolutionConfig {
          alias_table: resolver.resolve_aliases(kind),
          search_directories: search.directories,
          auxiliary_directory_search: search.auxiliary_search,
          plugins: Vec::new(),
        };
        (kind, config)
      })
      .collect();

    Self {
      mode: configuration.mode,
      naming: options.naming(),
      lint_fix: options.lint_fix,
      resolution,
    }
  }

  /// Resolution settings for `kind`, empty if the kind was not resolved.
  pub fn resolution(&self, kind: BuildKind) -> ResolutionConfig {
    self.resolution.get(&kind).cloned().unwrap_or_default()
  }

  /// Include paths handed to the style preprocessor.
  pub fn include_paths(&self) -> Vec<String> {
    self.resolution(BuildKind::Style).search_directories
  }
}
