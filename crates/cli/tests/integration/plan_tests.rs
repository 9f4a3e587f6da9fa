//! Plan command integration tests.

use predicates::prelude::*;
use serde_json::json;

use super::common::{TestEnv, descriptor, descriptor_names};

#[test]
fn plan_lists_descriptors_for_cartridges_with_entries() {
  let env = TestEnv::storefront();

  env
    .cartridge_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("script-app"))
    .stdout(predicate::str::contains("style-app"))
    .stdout(predicate::str::contains("Descriptors: 2"))
    .stdout(predicate::str::contains("script-lib").not());
}

#[test]
fn json_plan_orders_scripts_before_styles() {
  let env = TestEnv::storefront();

  let plan = env.plan_json(&[]);

  assert_eq!(descriptor_names(&plan), vec!["script-app", "style-app"]);
  assert_eq!(plan["hash"].as_str().unwrap().len(), 20);
  assert_eq!(plan["warnings"], json!([]));
}

#[test]
fn json_plan_names_main_entries_per_locale() {
  let env = TestEnv::storefront();
  env.write_file("cartridges/app/cartridge/client/fr_FR/js/main.js", "");
  env.write_file("cartridges/app/cartridge/client/default/js/checkout.js", "");

  let plan = env.plan_json(&[]);

  let entries = descriptor(&plan, "script-app")["entry_map"].as_object().unwrap();
  let names: Vec<&str> = entries.keys().map(String::as_str).collect();
  assert_eq!(names, vec!["default/checkout", "default/main", "fr_FR/main"]);
}

#[test]
fn js_flag_limits_plan_to_scripts() {
  let env = TestEnv::storefront();

  let plan = env.plan_json(&["--js"]);

  assert_eq!(descriptor_names(&plan), vec!["script-app"]);
}

#[test]
fn css_flag_limits_plan_to_styles() {
  let env = TestEnv::storefront();

  let plan = env.plan_json(&["--css"]);

  assert_eq!(descriptor_names(&plan), vec!["style-app"]);
}

#[test]
fn development_mode_enables_source_maps() {
  let env = TestEnv::storefront();

  let dev = env.plan_json(&["--type", "development"]);
  let prod = env.plan_json(&[]);

  assert_eq!(dev["mode"], "development");
  assert_eq!(descriptor(&dev, "script-app")["source_maps"], true);
  assert_eq!(descriptor(&prod, "script-app")["source_maps"], false);
  assert_ne!(dev["hash"], prod["hash"]);
}

#[test]
fn repeated_plans_share_a_hash() {
  let env = TestEnv::storefront();

  let first = env.plan_json(&["--dry-run"]);
  let second = env.plan_json(&["--dry-run"]);

  assert_eq!(first["hash"], second["hash"]);
  assert_eq!(first["descriptors"], second["descriptors"]);
}

#[test]
fn overrides_from_project_config_are_applied() {
  let env = TestEnv::storefront();
  env.write_config(&json!({
    "overrides": [{ "name": "style", "output_filename": "[name].min.css" }]
  }));

  let plan = env.plan_json(&[]);

  assert_eq!(descriptor(&plan, "style-app")["output_filename"], "[name].min.css");
  assert_eq!(descriptor(&plan, "script-app")["output_filename"], "[name].js");
}

#[test]
fn merge_strategy_appends_transform_rules() {
  let env = TestEnv::storefront();
  env.write_config(&json!({
    "overrides": [{
      "name": "script",
      "transform_rules": [{ "test": "\\.ts$", "loaders": [{ "loader": "transpile", "presets": ["typescript"] }] }]
    }],
    "merge_strategy": { "transform_rules": "append" }
  }));

  let plan = env.plan_json(&["--js"]);

  let rules = descriptor(&plan, "script-app")["transform_rules"].as_array().unwrap();
  assert_eq!(rules.len(), 2);
  assert_eq!(rules[0]["test"], "\\.(js|jsx|mjs)$");
  assert_eq!(rules[1]["test"], "\\.ts$");
}

#[test]
fn override_replaces_plugin_list_by_default() {
  let env = TestEnv::storefront();
  env.write_config(&json!({
    "overrides": [{ "name": "style-app", "plugins": [{ "plugin": "extract_styles", "filename": "[name].bundle.css" }] }]
  }));

  let plan = env.plan_json(&["--css"]);

  assert_eq!(
    descriptor(&plan, "style-app")["plugins"],
    json!([{ "plugin": "extract_styles", "filename": "[name].bundle.css" }])
  );
}

#[test]
fn configured_aliases_are_resolved_against_the_root() {
  let env = TestEnv::storefront();
  env.write_config(&json!({ "aliases": { "vendor": "vendor/js" } }));

  let plan = env.plan_json(&["--js"]);

  let aliases = &descriptor(&plan, "script-app")["resolution"]["alias_table"];
  assert_eq!(aliases["vendor"], env.path("vendor/js").to_string_lossy().as_ref());
  assert_eq!(
    aliases["lib"],
    env
      .path("cartridges/lib/cartridge/client/default/js")
      .to_string_lossy()
      .as_ref()
  );
}

#[test]
fn override_without_name_fails() {
  let env = TestEnv::storefront();
  env.write_config(&json!({ "overrides": [{ "source_maps": true }] }));

  env
    .cartridge_cmd()
    .arg("plan")
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing a non-empty 'name'"));
}

#[test]
fn mismatched_merge_strategy_fails() {
  let env = TestEnv::storefront();
  env.write_config(&json!({
    "overrides": [{ "name": "script", "output_filename": "[name].min.js" }],
    "merge_strategy": { "output_filename": "append" }
  }));

  env
    .cartridge_cmd()
    .arg("plan")
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot append field 'output_filename'"));
}

#[test]
fn malformed_project_config_fails() {
  let env = TestEnv::storefront();
  env.write_file("cartridge.json", "{ not json");

  env
    .cartridge_cmd()
    .arg("plan")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load project config"));
}

#[test]
fn missing_search_directory_is_a_warning() {
  let env = TestEnv::storefront();
  std::fs::remove_dir(env.path("node_modules")).unwrap();

  let plan = env.plan_json(&["--js"]);

  assert_eq!(descriptor_names(&plan), vec!["script-app"]);
  let warnings = plan["warnings"].as_array().unwrap();
  assert_eq!(warnings.len(), 1);
  assert_eq!(warnings[0]["warning"], "missing_search_directory");
  assert_eq!(warnings[0]["descriptor"], "script-app");
}

#[test]
fn plan_cleans_script_output() {
  let env = TestEnv::storefront();
  env.write_file("cartridges/app/cartridge/static/js/stale.js", "");
  env.write_file("cartridges/app/cartridge/static/css/kept.css", "");

  env.cartridge_cmd().arg("plan").assert().success();

  assert!(!env.path("cartridges/app/cartridge/static/js").exists());
  assert!(env.path("cartridges/app/cartridge/static/css/kept.css").exists());
}

#[test]
fn dry_run_leaves_output_untouched() {
  let env = TestEnv::storefront();
  env.write_file("cartridges/app/cartridge/static/js/stale.js", "");

  env
    .cartridge_cmd()
    .args(["plan", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"));

  assert!(env.path("cartridges/app/cartridge/static/js/stale.js").exists());
}

#[test]
fn output_flag_writes_plan_file() {
  let env = TestEnv::storefront();
  let target = env.path("plan.json");

  env
    .cartridge_cmd()
    .args(["plan", "--dry-run", "--output"])
    .arg(&target)
    .assert()
    .success()
    .stdout(predicate::str::contains("Wrote plan to"));

  let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
  assert_eq!(descriptor_names(&written), vec!["script-app", "style-app"]);
}

#[test]
fn explicit_module_list_sets_plan_order() {
  let env = TestEnv::storefront();
  env.write_file("cartridges/base/cartridge/client/default/js/main.js", "");
  env.write_config(&json!({ "modules": ["app", "base"] }));

  let plan = env.plan_json(&["--js"]);

  assert_eq!(descriptor_names(&plan), vec!["script-app", "script-base"]);
}
