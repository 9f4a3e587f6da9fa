use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an override value is combined with the descriptor's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeOperator {
  /// Override value replaces the current value wholesale.
  Replace,
  /// Override array is added after the current items.
  Append,
  /// Override array is added before the current items.
  Prepend,
  /// Override object is merged key by key, recursively.
  Merge,
}

impl MergeOperator {
  /// Operator used for a field with no table entry: objects merge when both
  /// sides are objects, everything else is replaced.
  pub fn default_for(current: Option<&Value>, incoming: &Value) -> Self {
    match (current, incoming) {
      (Some(Value::Object(_)), Value::Object(_)) => MergeOperator::Merge,
      _ => MergeOperator::Replace,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      MergeOperator::Replace => "replace",
      MergeOperator::Append => "append",
      MergeOperator::Prepend => "prepend",
      MergeOperator::Merge => "merge",
    }
  }
}

impl fmt::Display for MergeOperator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for MergeOperator {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "replace" => Ok(MergeOperator::Replace),
      "append" => Ok(MergeOperator::Append),
      "prepend" => Ok(MergeOperator::Prepend),
      "merge" => Ok(MergeOperator::Merge),
      other => Err(format!("unknown merge operator '{}'", other)),
    }
  }
}

/// Field path to merge operator.
///
/// Field paths are the serialized descriptor field names joined with dots,
/// e.g. `transform_rules` or `resolution.search_directories`. Paths without an
/// entry fall back to [`MergeOperator::default_for`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeStrategyTable(BTreeMap<String, MergeOperator>);

impl MergeStrategyTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, path: &str, operator: MergeOperator) -> Self {
    self.insert(path, operator);
    self
  }

  pub fn insert(&mut self, path: &str, operator: MergeOperator) {
    self.0.insert(path.to_string(), operator);
  }

  pub fn get(&self, path: &str) -> Option<MergeOperator> {
    self.0.get(path).copied()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, MergeOperator)> {
    self.0.iter().map(|(path, op)| (path.as_str(), *op))
  }
}

impl FromIterator<(String, MergeOperator)> for MergeStrategyTable {
  fn from_iter<I: IntoIterator<Item = (String, MergeOperator)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
