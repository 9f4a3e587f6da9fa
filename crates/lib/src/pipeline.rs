//! Planning pipeline.
//!
//! The pipeline wires the collaborators together for one run:
//!
//! 1. resolve [`SharedOptions`] once for the enabled kinds
//! 2. list the participating modules
//! 3. [`aggregate`] one descriptor per module per kind
//! 4. apply overrides with [`merge_overrides`], if any were supplied
//!
//! A run owns everything it creates; nothing is cached between runs.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::aggregate::{Aggregated, aggregate};
use crate::cleanup::OutputCleaner;
use crate::config::{Configuration, ModuleOptions, ProjectConfig};
use crate::descriptor::{BuildDescriptor, DescriptorBuilder, SharedOptions};
use crate::error::{ConfigurationError, PlanWarning};
use crate::merge::{MergeStrategyTable, OverridePartial, merge_overrides};
use crate::resolve::{FsWorkspace, ModuleDiscovery, PathResolver};
use crate::util::hash::{HashError, Hashable, ObjectHash};

/// Result of a planning run, handed to the build engine.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Plan {
  /// Descriptors in build order.
  pub descriptors: Vec<BuildDescriptor>,
  pub warnings: Vec<PlanWarning>,
}

impl Plan {
  pub fn names(&self) -> Vec<&str> {
    self.descriptors.iter().map(|d| d.name.as_str()).collect()
  }

  pub fn get(&self, name: &str) -> Option<&BuildDescriptor> {
    self.descriptors.iter().find(|d| d.name == name)
  }

  /// Content hash of the descriptors. Warnings do not contribute.
  pub fn compute_hash(&self) -> Result<ObjectHash, HashError> {
    self.descriptors.as_slice().compute_hash()
  }
}

pub struct Pipeline<'a> {
  resolver: &'a dyn PathResolver,
  discovery: &'a dyn ModuleDiscovery,
  cleaner: &'a dyn OutputCleaner,
}

impl<'a> Pipeline<'a> {
  pub fn new(
    resolver: &'a dyn PathResolver,
    discovery: &'a dyn ModuleDiscovery,
    cleaner: &'a dyn OutputCleaner,
  ) -> Self {
    Self {
      resolver,
      discovery,
      cleaner,
    }
  }

  pub fn run(
    &self,
    configuration: &Configuration,
    options: &ModuleOptions,
    overrides: &[OverridePartial],
    strategy: &MergeStrategyTable,
  ) -> Result<Plan, ConfigurationError> {
    let kinds = configuration.enabled_kinds();
    let shared = SharedOptions::compute(configuration, options, self.resolver);
    let modules = self.discovery.list_modules(&kinds);

    info!(
      mode = %configuration.mode,
      kinds = ?kinds,
      modules = modules.len(),
      "planning cartridge builds"
    );

    let builder = DescriptorBuilder::new(self.resolver, self.cleaner);
    let Aggregated {
      mut descriptors,
      warnings,
    } = aggregate(&modules, &kinds, &shared, &builder)?;

    if !overrides.is_empty() {
      merge_overrides(&mut descriptors, overrides, strategy)?;
    }

    info!(
      descriptors = descriptors.len(),
      warnings = warnings.len(),
      "plan complete"
    );
    Ok(Plan { descriptors, warnings })
  }
}

/// Plans the cartridge tree under `root` using its project configuration.
pub fn plan_workspace(
  root: &Path,
  configuration: &Configuration,
  project: &ProjectConfig,
  cleaner: &dyn OutputCleaner,
) -> Result<Plan, ConfigurationError> {
  let workspace = FsWorkspace::from_options(root, &project.modules);
  let overrides = project.override_partials()?;

  Pipeline::new(&workspace, &workspace, cleaner).run(
    configuration,
    &project.modules,
    &overrides,
    &project.merge_strategy,
  )
}
