//! Modules command integration tests.

use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::TestEnv;

fn modules_json(env: &TestEnv, args: &[&str]) -> Value {
  let output = env
    .cartridge_cmd()
    .args(["modules", "--format", "json"])
    .args(args)
    .output()
    .unwrap();
  assert!(output.status.success());
  serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn lists_cartridges_with_sources_in_name_order() {
  let env = TestEnv::storefront();
  env.mkdir("cartridges/empty/cartridge");

  assert_eq!(modules_json(&env, &[]), json!(["app", "lib"]));
}

#[test]
fn scope_flags_filter_by_source_kind() {
  let env = TestEnv::storefront();

  assert_eq!(modules_json(&env, &["--css"]), json!(["app"]));
  assert_eq!(modules_json(&env, &["--js"]), json!(["app", "lib"]));
}

#[test]
fn explicit_module_list_wins() {
  let env = TestEnv::storefront();
  env.write_config(&json!({ "modules": ["lib", "app"] }));

  assert_eq!(modules_json(&env, &[]), json!(["lib", "app"]));
}

#[test]
fn text_output_lists_each_module() {
  let env = TestEnv::storefront();

  env
    .cartridge_cmd()
    .arg("modules")
    .assert()
    .success()
    .stdout(predicate::str::contains("• app"))
    .stdout(predicate::str::contains("• lib"));
}
