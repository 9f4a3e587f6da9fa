//! Error and warning types for planning.
//!
//! Planning distinguishes two severities:
//! - [`ConfigurationError`]: fatal, aborts the run and is returned to the caller
//! - [`PlanWarning`]: recorded on the [`Plan`](crate::pipeline::Plan) and
//!   logged, the affected descriptor is still produced

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::merge::MergeOperator;

#[derive(Debug, Error)]
pub enum ConfigurationError {
  /// Two modules produced the same `<kind>-<module>` name.
  #[error("duplicate descriptor name '{name}'")]
  DuplicateDescriptor { name: String },

  #[error("override must be a JSON object, got {found}")]
  OverrideNotObject { found: String },

  #[error("override is missing a non-empty 'name'")]
  MissingOverrideName,

  /// An operator was configured for a field whose values it cannot combine.
  #[error("override '{name}': cannot {operator} field '{field}', expected {expected}")]
  StrategyMismatch {
    name: String,
    field: String,
    operator: MergeOperator,
    expected: &'static str,
  },

  /// Merging left the descriptor in a shape that no longer deserializes.
  #[error("override '{name}' produced an invalid descriptor '{descriptor}': {source}")]
  InvalidMergeResult {
    name: String,
    descriptor: String,
    source: serde_json::Error,
  },

  /// `kind` and `module` identify a descriptor together with its name.
  #[error("override '{name}' cannot change '{field}' of descriptor '{descriptor}'")]
  IdentityChanged {
    name: String,
    descriptor: String,
    field: &'static str,
  },

  #[error("override '{name}' left descriptor '{descriptor}' without entries")]
  EmptyEntryMap { name: String, descriptor: String },

  #[error("failed to serialize descriptor '{descriptor}': {source}")]
  Serialize {
    descriptor: String,
    source: serde_json::Error,
  },
}

/// Non-fatal problem found while planning.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum PlanWarning {
  #[error("{descriptor}: output path {} is not writable", path.display())]
  UnwritableOutput { descriptor: String, path: PathBuf },

  #[error("{descriptor}: search directory {path} does not exist")]
  MissingSearchDirectory { descriptor: String, path: String },

  /// Stale output may remain; the build engine overwrites what it emits.
  #[error("{descriptor}: failed to clean {}: {message}", path.display())]
  CleanupFailed {
    descriptor: String,
    path: PathBuf,
    message: String,
  },
}

impl PlanWarning {
  /// Name of the descriptor the warning concerns.
  pub fn descriptor(&self) -> &str {
    match self {
      PlanWarning::UnwritableOutput { descriptor, .. }
      | PlanWarning::MissingSearchDirectory { descriptor, .. }
      | PlanWarning::CleanupFailed { descriptor, .. } => descriptor,
    }
  }
}
