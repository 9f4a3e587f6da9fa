use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::shared::SharedOptions;
use super::types::{BuildDescriptor, BuildKind, Loader, Plugin, ResolvePlugin, TransformRule};
use crate::cleanup::OutputCleaner;
use crate::error::PlanWarning;
use crate::resolve::PathResolver;

const SCRIPT_TEST: &str = r"\.(js|jsx|mjs)$";
const STYLE_TEST: &str = r"\.(sa|sc|c)ss$";
const DEPENDENCY_DIR: &str = "node_modules";
const SCRIPT_PRESETS: &[&str] = &["@babel/preset-env"];
const POST_PROCESS_PLUGINS: &[&str] = &["autoprefixer"];
const STYLE_LINT_FILES: &str = "**/*.s?(a|c)ss";

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

/// Turns resolver output into complete descriptors for one module and kind.
pub struct DescriptorBuilder<'a> {
  resolver: &'a dyn PathResolver,
  cleaner: &'a dyn OutputCleaner,
}

impl<'a> DescriptorBuilder<'a> {
  pub fn new(resolver: &'a dyn PathResolver, cleaner: &'a dyn OutputCleaner) -> Self {
    Self { resolver, cleaner }
  }

  /// Builds the descriptor for `module` and `kind`.
  ///
  /// Returns `None` when the module has no entries of that kind. Problems with
  /// the resolved paths or the output cleanup are pushed to `warnings` and do
  /// not prevent the descriptor from being returned.
  pub fn build(
    &self,
    module: &str,
    kind: BuildKind,
    shared: &SharedOptions,
    warnings: &mut Vec<PlanWarning>,
  ) -> Option<BuildDescriptor> {
    let entry_map = self.resolver.resolve_entries(module, kind, &shared.naming);
    if entry_map.is_empty() {
      debug!(module = %module, kind = %kind, "no entries, skipping");
      return None;
    }

    let mut resolution = shared.resolution(kind);
    if resolution.auxiliary_directory_search {
      resolution.plugins.push(ResolvePlugin::DirectoryNamed { honor_index: true });
    }

    let descriptor = BuildDescriptor {
      name: kind.descriptor_name(module),
      kind,
      module: module.to_string(),
      mode: shared.mode,
      entry_map,
      output_path: self.resolver.resolve_output_path(module, kind),
      output_filename: kind.output_filename().to_string(),
      source_maps: shared.mode.is_development(),
      transform_rules: transform_rules(kind, shared),
      plugins: plugins(kind, shared),
      resolution,
    };

    inspect_paths(&descriptor, warnings);

    if kind == BuildKind::Script
      && let Err(e) = self.cleaner.clean(&descriptor.output_path)
    {
      record(
        warnings,
        PlanWarning::CleanupFailed {
          descriptor: descriptor.name.clone(),
          path: descriptor.output_path.clone(),
          message: e.to_string(),
        },
      );
    }

    debug!(name = %descriptor.name, entries = descriptor.entry_count(), "built descriptor");
    Some(descriptor)
  }
}

fn transform_rules(kind: BuildKind, shared: &SharedOptions) -> Vec<TransformRule> {
  match kind {
    BuildKind::Script => vec![TransformRule {
      test: SCRIPT_TEST.to_string(),
      exclude: vec![DEPENDENCY_DIR.to_string()],
      loaders: vec![Loader::Transpile {
        presets: strings(SCRIPT_PRESETS),
      }],
    }],
    BuildKind::Style => vec![TransformRule {
      test: STYLE_TEST.to_string(),
      exclude: vec![],
      loaders: vec![
        Loader::Extract,
        Loader::Raw {
          url: false,
          source_map: false,
        },
        Loader::PostProcess {
          plugins: strings(POST_PROCESS_PLUGINS),
        },
        Loader::Preprocess {
          include_paths: shared.include_paths(),
        },
      ],
    }],
  }
}

fn plugins(kind: BuildKind, shared: &SharedOptions) -> Vec<Plugin> {
  match kind {
    BuildKind::Script => vec![Plugin::ScriptLint {
      extensions: strings(BuildKind::Script.source_extensions()),
      fix: shared.lint_fix,
    }],
    BuildKind::Style => vec![
      Plugin::StyleOnlyEntryFix {
        extensions: strings(BuildKind::Style.source_extensions()),
      },
      Plugin::ExtractStyles {
        filename: BuildKind::Style.output_filename().to_string(),
      },
      Plugin::StyleLint {
        files: vec![STYLE_LINT_FILES.to_string()],
        fix: shared.lint_fix,
      },
    ],
  }
}

fn record(warnings: &mut Vec<PlanWarning>, warning: PlanWarning) {
  warn!(descriptor = %warning.descriptor(), "{}", warning);
  warnings.push(warning);
}

fn inspect_paths(descriptor: &BuildDescriptor, warnings: &mut Vec<PlanWarning>) {
  for dir in &descriptor.resolution.search_directories {
    if !Path::new(dir).is_dir() {
      record(
        warnings,
        PlanWarning::MissingSearchDirectory {
          descriptor: descriptor.name.clone(),
          path: dir.clone(),
        },
      );
    }
  }

  if !is_writable(&descriptor.output_path) {
    record(
      warnings,
      PlanWarning::UnwritableOutput {
        descriptor: descriptor.name.clone(),
        path: descriptor.output_path.clone(),
      },
    );
  }
}

/// Whether `path`, or the closest ancestor that exists, accepts writes.
///
/// Only the permission bits are consulted: a directory counts as writable
/// unless every write bit is clear. Ownership is not checked, so a directory
/// writable only by its owner passes for every user, and a directory with no
/// write bits is reported even to a superuser who could write to it anyway.
fn is_writable(path: &Path) -> bool {
  path
    .ancestors()
    .find_map(|p| fs::metadata(p).ok())
    .map(|m| !m.permissions().readonly())
    .unwrap_or(false)
}
