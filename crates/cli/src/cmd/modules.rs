use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use cartridge_lib::config::{Configuration, ProjectConfig, project_root};
use cartridge_lib::resolve::{FsWorkspace, ModuleDiscovery};

use crate::output::{OutputFormat, print_info, print_json, symbols};

pub fn cmd_modules(root: Option<&Path>, configuration: Configuration, format: OutputFormat) -> Result<()> {
  let root = project_root(root);
  let project = ProjectConfig::load_from_root(&root).context("Failed to load project config")?;

  let workspace = FsWorkspace::from_options(&root, &project.modules);
  let modules = workspace.list_modules(&configuration.enabled_kinds());
  debug!(root = ?workspace.root(), count = modules.len(), "discovered modules");

  if format.is_json() {
    return print_json(&modules);
  }

  if modules.is_empty() {
    print_info(&format!("No cartridges found under {}", workspace.root().display()));
    return Ok(());
  }

  for module in &modules {
    println!("  {} {}", symbols::INFO, module);
  }

  Ok(())
}
