//! Override merging.
//!
//! Callers refine the generated descriptors with partial descriptors
//! ("overrides"). Each override carries a `name` and any subset of descriptor
//! fields.
//!
//! # Matching
//!
//! An override applies to every descriptor whose name **contains** the
//! override's name. `"style"` therefore targets every style descriptor, while
//! `"script-app"` targets a single one. Overrides that match nothing are
//! skipped silently. When several overrides match the same descriptor they
//! are applied one after another in list order, so later ones win.
//!
//! # Field strategy
//!
//! Fields are merged according to a [`MergeStrategyTable`]. Without an entry,
//! scalars and arrays are **replaced wholesale** and objects are merged key by
//! key. Changing one transform rule therefore means supplying the whole
//! `transform_rules` list, or configuring `append`/`prepend` for it.
//!
//! Unknown fields are rejected, `kind` and `module` cannot change, and the
//! plugin list is made duplicate-free again after every merge.
//!
//! # Submodules
//!
//! - [`strategy`] - Merge operators and the field strategy table
//! - [`value`] - Field-level merge over serialized descriptors

pub mod strategy;
pub mod value;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::descriptor::BuildDescriptor;
use crate::error::ConfigurationError;

pub use strategy::{MergeOperator, MergeStrategyTable};
pub use value::merge_value;

/// A partial descriptor applied on top of matching descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct OverridePartial {
  /// Substring matched against descriptor names. Never merged itself.
  pub name: String,
  pub fields: Map<String, Value>,
}

impl OverridePartial {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      fields: Map::new(),
    }
  }

  pub fn with_field(mut self, field: &str, value: Value) -> Self {
    self.fields.insert(field.to_string(), value);
    self
  }

  /// Parses an override from a JSON object with a non-empty `name` key.
  pub fn from_value(value: &Value) -> Result<Self, ConfigurationError> {
    let Value::Object(map) = value else {
      return Err(ConfigurationError::OverrideNotObject {
        found: json_type(value).to_string(),
      });
    };

    let mut fields = map.clone();
    let name = match fields.remove("name") {
      Some(Value::String(name)) if !name.is_empty() => name,
      _ => return Err(ConfigurationError::MissingOverrideName),
    };

    Ok(Self { name, fields })
  }

  pub fn matches(&self, descriptor_name: &str) -> bool {
    descriptor_name.contains(&self.name)
  }

  /// Merges this override into one descriptor in place.
  ///
  /// The descriptor is left untouched when merging fails.
  pub fn apply(&self, descriptor: &mut BuildDescriptor, table: &MergeStrategyTable) -> Result<(), ConfigurationError> {
    let mut target: Map<String, Value> = serde_json::to_value(&*descriptor)
      .and_then(serde_json::from_value)
      .map_err(|source| ConfigurationError::Serialize {
        descriptor: descriptor.name.clone(),
        source,
      })?;

    merge_value(&mut target, &self.fields, "", table, &self.name)?;

    let mut merged: BuildDescriptor =
      serde_json::from_value(Value::Object(target)).map_err(|source| ConfigurationError::InvalidMergeResult {
        name: self.name.clone(),
        descriptor: descriptor.name.clone(),
        source,
      })?;

    if merged.kind != descriptor.kind {
      return Err(self.identity_changed(descriptor, "kind"));
    }
    if merged.module != descriptor.module {
      return Err(self.identity_changed(descriptor, "module"));
    }

    if merged.entry_map.is_empty() {
      return Err(ConfigurationError::EmptyEntryMap {
        name: self.name.clone(),
        descriptor: descriptor.name.clone(),
      });
    }

    let dropped = merged.dedup_plugins();
    if dropped > 0 {
      debug!(name = %self.name, descriptor = %descriptor.name, dropped, "dropped repeated plugins");
    }

    merged.name = descriptor.name.clone();
    *descriptor = merged;
    Ok(())
  }

  fn identity_changed(&self, descriptor: &BuildDescriptor, field: &'static str) -> ConfigurationError {
    ConfigurationError::IdentityChanged {
      name: self.name.clone(),
      descriptor: descriptor.name.clone(),
      field,
    }
  }
}

fn json_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// Applies `overrides` in order to every descriptor whose name contains theirs.
///
/// Descriptors are neither added nor removed.
pub fn merge_overrides(
  descriptors: &mut [BuildDescriptor],
  overrides: &[OverridePartial],
  table: &MergeStrategyTable,
) -> Result<(), ConfigurationError> {
  warn_unknown_paths(descriptors, table)?;

  for partial in overrides {
    let mut matched = 0;

    for descriptor in descriptors.iter_mut().filter(|d| partial.matches(&d.name)) {
      partial.apply(descriptor, table)?;
      matched += 1;
    }

    if matched == 0 {
      debug!(name = %partial.name, "override matched no descriptor");
    } else {
      debug!(name = %partial.name, matched, "applied override");
    }
  }

  Ok(())
}

/// Logs strategy entries whose path names no field of any descriptor.
fn warn_unknown_paths(descriptors: &[BuildDescriptor], table: &MergeStrategyTable) -> Result<(), ConfigurationError> {
  if table.is_empty() || descriptors.is_empty() {
    return Ok(());
  }

  let serialized = descriptors
    .iter()
    .map(|d| {
      serde_json::to_value(d).map_err(|source| ConfigurationError::Serialize {
        descriptor: d.name.clone(),
        source,
      })
    })
    .collect::<Result<Vec<_>, _>>()?;

  for (path, operator) in table.iter() {
    if !serialized.iter().any(|value| has_path(value, path)) {
      warn!(path = %path, operator = %operator, "merge strategy path matches no descriptor field");
    }
  }
  Ok(())
}

fn has_path(value: &Value, path: &str) -> bool {
  path
    .split('.')
    .try_fold(value, |current, segment| current.get(segment))
    .is_some()
}
