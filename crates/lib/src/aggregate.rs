//! Aggregation of per-module descriptors into the ordered plan.

use std::collections::HashSet;

use tracing::debug;

use crate::descriptor::{BuildDescriptor, BuildKind, DescriptorBuilder, SharedOptions};
use crate::error::{ConfigurationError, PlanWarning};

/// Descriptors in build order plus the warnings raised while building them.
#[derive(Debug, Default)]
pub struct Aggregated {
  pub descriptors: Vec<BuildDescriptor>,
  pub warnings: Vec<PlanWarning>,
}

/// Builds one descriptor per module per kind, skipping empty combinations.
///
/// Modules are visited in list order and kinds in priority order (scripts
/// before styles), so the result is reproducible for the same module list.
/// Two descriptors with the same name are a configuration error.
pub fn aggregate(
  modules: &[String],
  kinds: &[BuildKind],
  shared: &SharedOptions,
  builder: &DescriptorBuilder<'_>,
) -> Result<Aggregated, ConfigurationError> {
  let mut kinds = kinds.to_vec();
  kinds.sort();
  kinds.dedup();

  let mut result = Aggregated::default();
  let mut seen = HashSet::new();

  for module in modules {
    for kind in &kinds {
      let Some(descriptor) = builder.build(module, *kind, shared, &mut result.warnings) else {
        continue;
      };

      if !seen.insert(descriptor.name.clone()) {
        return Err(ConfigurationError::DuplicateDescriptor { name: descriptor.name });
      }
      result.descriptors.push(descriptor);
    }
  }

  debug!(
    modules = modules.len(),
    descriptors = result.descriptors.len(),
    "aggregated descriptors"
  );
  Ok(result)
}
