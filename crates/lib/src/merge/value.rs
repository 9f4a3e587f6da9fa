use serde_json::{Map, Value};

use super::strategy::{MergeOperator, MergeStrategyTable};
use crate::error::ConfigurationError;

/// Merges `patch` into `target` field by field.
///
/// `prefix` is the field path of `target` inside the descriptor (empty at the
/// top level). `name` is the override name, used for error reporting only.
pub fn merge_value(
  target: &mut Map<String, Value>,
  patch: &Map<String, Value>,
  prefix: &str,
  table: &MergeStrategyTable,
  name: &str,
) -> Result<(), ConfigurationError> {
  for (key, incoming) in patch {
    let path = if prefix.is_empty() {
      key.clone()
    } else {
      format!("{}.{}", prefix, key)
    };
    let operator = table
      .get(&path)
      .unwrap_or_else(|| MergeOperator::default_for(target.get(key), incoming));

    let mismatch = |expected: &'static str| ConfigurationError::StrategyMismatch {
      name: name.to_string(),
      field: path.clone(),
      operator,
      expected,
    };

    match operator {
      MergeOperator::Replace => {
        target.insert(key.clone(), incoming.clone());
      }
      MergeOperator::Append | MergeOperator::Prepend => {
        let Value::Array(items) = incoming else {
          return Err(mismatch("an array"));
        };
        match target.get_mut(key) {
          Some(Value::Array(existing)) => {
            if operator == MergeOperator::Append {
              existing.extend(items.iter().cloned());
            } else {
              existing.splice(0..0, items.iter().cloned());
            }
          }
          None | Some(Value::Null) => {
            target.insert(key.clone(), incoming.clone());
          }
          Some(_) => return Err(mismatch("an array")),
        }
      }
      MergeOperator::Merge => {
        let Value::Object(fields) = incoming else {
          return Err(mismatch("an object"));
        };
        match target.get_mut(key) {
          Some(Value::Object(existing)) => merge_value(existing, fields, &path, table, name)?,
          None | Some(Value::Null) => {
            target.insert(key.clone(), incoming.clone());
          }
          Some(_) => return Err(mismatch("an object")),
        }
      }
    }
  }

  Ok(())
}
