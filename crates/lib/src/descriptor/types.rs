use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::hash::Hashable;

/// The two kinds of build a cartridge can contribute to.
///
/// Declaration order is the aggregation priority: scripts are planned before
/// styles for every module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
  Script,
  Style,
}

impl BuildKind {
  pub const ALL: [BuildKind; 2] = [BuildKind::Script, BuildKind::Style];

  /// Tag used as the prefix of descriptor names.
  pub fn as_str(self) -> &'static str {
    match self {
      BuildKind::Script => "script",
      BuildKind::Style => "style",
    }
  }

  /// Directory holding the kind's sources inside a cartridge locale.
  pub fn source_dir(self) -> &'static str {
    match self {
      BuildKind::Script => "js",
      BuildKind::Style => "scss",
    }
  }

  /// Directory under `static/` receiving the kind's compiled output.
  pub fn output_dir(self) -> &'static str {
    match self {
      BuildKind::Script => "js",
      BuildKind::Style => "css",
    }
  }

  pub fn source_extensions(self) -> &'static [&'static str] {
    match self {
      BuildKind::Script => &["js", "jsx", "mjs"],
      BuildKind::Style => &["scss", "sass", "css"],
    }
  }

  pub fn output_filename(self) -> &'static str {
    match self {
      BuildKind::Script => "[name].js",
      BuildKind::Style => "[name].css",
    }
  }

  /// Descriptor name for this kind and module: `<kind>-<module>`.
  pub fn descriptor_name(self, module: &str) -> String {
    format!("{}-{}", self.as_str(), module)
  }
}

impl fmt::Display for BuildKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  Development,
  #[default]
  Production,
}

impl Mode {
  pub fn as_str(self) -> &'static str {
    match self {
      Mode::Development => "development",
      Mode::Production => "production",
    }
  }

  pub fn is_development(self) -> bool {
    matches!(self, Mode::Development)
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Mode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "development" | "dev" => Ok(Mode::Development),
      "production" | "prod" => Ok(Mode::Production),
      other => Err(format!("unknown build type '{}', expected development or production", other)),
    }
  }
}

/// Entry name to the source files compiled into it.
pub type EntryMap = BTreeMap<String, Vec<PathBuf>>;

/// One step of a transform chain applied to matching source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "loader", rename_all = "snake_case")]
pub enum Loader {
  /// Script transpilation.
  Transpile { presets: Vec<String> },
  /// Pulls compiled styles out of the script bundle into their own files.
  Extract,
  /// Raw stylesheet loading.
  Raw { url: bool, source_map: bool },
  /// Stylesheet post-processing (vendor prefixes and the like).
  PostProcess { plugins: Vec<String> },
  /// Style preprocessing with an include path list for `@import` lookups.
  Preprocess { include_paths: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformRule {
  /// Pattern matched against source file paths.
  pub test: String,
  #[serde(default)]
  pub exclude: Vec<String>,
  /// Loaders in application order.
  pub loaders: Vec<Loader>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "snake_case")]
pub enum Plugin {
  /// Static analysis of script sources.
  ScriptLint { extensions: Vec<String>, fix: bool },
  /// Drops the empty script chunks emitted for style-only entries.
  StyleOnlyEntryFix { extensions: Vec<String> },
  /// Writes extracted styles to their own files.
  ExtractStyles { filename: String },
  StyleLint { files: Vec<String>, fix: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "snake_case")]
pub enum ResolvePlugin {
  /// Resolves `dir/` imports to `dir/<dir>.js` before falling back to the index file.
  DirectoryNamed { honor_index: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionConfig {
  pub alias_table: BTreeMap<String, String>,
  pub search_directories: Vec<String>,
  pub auxiliary_directory_search: bool,
  #[serde(default)]
  pub plugins: Vec<ResolvePlugin>,
}

/// A complete, self-contained plan for compiling one kind of one cartridge.
///
/// Descriptors are produced by [`DescriptorBuilder`](super::DescriptorBuilder),
/// collected by [`aggregate`](crate::aggregate::aggregate) and refined in place
/// by [`merge_overrides`](crate::merge::merge_overrides).
///
/// # Example
///
/// ```json
/// {
///   "name": "script-app_storefront",
///   "kind": "script",
///   "module": "app_storefront",
///   "mode": "production",
///   "entry_map": { "default/main": ["/project/cartridges/app_storefront/cartridge/client/default/js/main.js"] },
///   "output_path": "/project/cartridges/app_storefront/cartridge/static/js",
///   "output_filename": "[name].js",
///   ...
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildDescriptor {
  pub name: String,
  pub kind: BuildKind,
  pub module: String,
  pub mode: Mode,
  pub entry_map: EntryMap,
  pub output_path: PathBuf,
  pub output_filename: String,
  pub source_maps: bool,
  pub transform_rules: Vec<TransformRule>,
  pub plugins: Vec<Plugin>,
  pub resolution: ResolutionConfig,
}

impl Hashable for BuildDescriptor {}

impl BuildDescriptor {
  /// Adds a plugin unless an equal one is already present.
  pub fn insert_plugin(&mut self, plugin: Plugin) -> bool {
    if self.plugins.contains(&plugin) {
      return false;
    }
    self.plugins.push(plugin);
    true
  }

  /// Drops repeated plugins, keeping the first occurrence of each.
  pub fn dedup_plugins(&mut self) -> usize {
    let before = self.plugins.len();
    for plugin in std::mem::take(&mut self.plugins) {
      self.insert_plugin(plugin);
    }
    before - self.plugins.len()
  }

  pub fn entry_count(&self) -> usize {
    self.entry_map.len()
  }
}
