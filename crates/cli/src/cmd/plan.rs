//! Implementation of the `cartridge plan` command.
//!
//! Runs the planning pipeline over the project root and reports the resulting
//! descriptors. The plan can also be written to a JSON file for the build
//! engine to pick up.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use cartridge_lib::cleanup::{DryRunCleaner, FsCleaner, OutputCleaner};
use cartridge_lib::config::{Configuration, ProjectConfig, project_root};
use cartridge_lib::plan_workspace;

use crate::output::{OutputFormat, plural, print_info, print_json, print_stat, print_success, print_warning, symbols};

pub struct PlanOptions {
  pub root: Option<PathBuf>,
  pub configuration: Configuration,
  pub dry_run: bool,
  pub output: Option<PathBuf>,
  pub format: OutputFormat,
}

pub fn cmd_plan(options: PlanOptions) -> Result<()> {
  let root = project_root(options.root.as_deref());
  let project = ProjectConfig::load_from_root(&root).context("Failed to load project config")?;
  debug!(root = ?root, overrides = project.overrides.len(), dry_run = options.dry_run, "loaded project");

  let cleaner: &dyn OutputCleaner = if options.dry_run { &DryRunCleaner } else { &FsCleaner };
  let plan = plan_workspace(&root, &options.configuration, &project, cleaner)
    .with_context(|| format!("Failed to plan builds under {}", root.display()))?;
  let hash = plan.compute_hash().context("Failed to compute plan hash")?;

  if let Some(path) = &options.output {
    let plan_json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
    fs::write(path, plan_json).with_context(|| format!("Failed to write plan: {}", path.display()))?;
  }

  if options.format.is_json() {
    return print_json(&json!({
      "hash": hash.0,
      "mode": options.configuration.mode,
      "descriptors": plan.descriptors,
      "warnings": plan.warnings,
    }));
  }

  println!("Plan: {}", hash);
  print_stat("Mode", options.configuration.mode.as_str());
  print_stat("Descriptors", &plan.descriptors.len().to_string());

  if plan.descriptors.is_empty() {
    print_info("No cartridge has sources to build");
  } else {
    println!();
    for descriptor in &plan.descriptors {
      println!(
        "  {} {} ({}) {} {}",
        symbols::INFO,
        descriptor.name,
        plural(descriptor.entry_count(), "entry", "entries"),
        symbols::ARROW,
        descriptor.output_path.display()
      );
    }
  }

  if !plan.warnings.is_empty() {
    println!();
    for warning in &plan.warnings {
      print_warning(&warning.to_string());
    }
  }

  if options.dry_run {
    print_info("Dry run: output directories were left untouched");
  }

  if let Some(path) = &options.output {
    print_success(&format!("Wrote plan to {}", path.display()));
  }

  Ok(())
}
