//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

/// Isolated project root.
///
/// Each test gets its own temporary directory holding a `cartridges/` tree
/// and, optionally, a `cartridge.json`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty project.
  ///
  /// Use this when you need to lay out the cartridges manually.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// A storefront with an `app` cartridge (script and style entries) and a
  /// `lib` cartridge holding only partials.
  ///
  /// `node_modules` exists so the default search directory resolves.
  pub fn storefront() -> Self {
    let env = Self::empty();
    env.write_file("cartridges/app/cartridge/client/default/js/main.js", "import 'lib';");
    env.write_file("cartridges/app/cartridge/client/default/scss/main.scss", "body {}");
    env.write_file("cartridges/lib/cartridge/client/default/js/_helpers.js", "");
    env.mkdir("node_modules");
    env
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn mkdir(&self, relative_path: &str) {
    std::fs::create_dir_all(self.temp.path().join(relative_path)).unwrap();
  }

  /// Write `cartridge.json` at the project root.
  pub fn write_config(&self, config: &Value) {
    self.write_file("cartridge.json", &serde_json::to_string_pretty(config).unwrap());
  }

  /// Project root, canonicalized the way the planner sees it.
  pub fn root_path(&self) -> PathBuf {
    let p = self.temp.path().to_path_buf();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.root_path().join(relative_path)
  }

  /// Get a Command for the cartridge binary rooted at this project.
  ///
  /// `CARTRIDGE_ROOT` points at the temp directory so tests never plan the
  /// working directory by accident.
  pub fn cartridge_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("cartridge");
    cmd.env("CARTRIDGE_ROOT", self.root_path());
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Run `plan --format json` with extra arguments and parse stdout.
  pub fn plan_json(&self, args: &[&str]) -> Value {
    let output = self
      .cartridge_cmd()
      .arg("plan")
      .args(["--format", "json"])
      .args(args)
      .output()
      .unwrap();
    assert!(
      output.status.success(),
      "plan failed: {}",
      String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
  }
}

/// Descriptor names from a JSON plan, in order.
pub fn descriptor_names(plan: &Value) -> Vec<String> {
  plan["descriptors"]
    .as_array()
    .unwrap()
    .iter()
    .map(|d| d["name"].as_str().unwrap().to_string())
    .collect()
}

/// The descriptor called `name` in a JSON plan.
pub fn descriptor<'a>(plan: &'a Value, name: &str) -> &'a Value {
  plan["descriptors"]
    .as_array()
    .unwrap()
    .iter()
    .find(|d| d["name"] == name)
    .unwrap_or_else(|| panic!("no descriptor named {}", name))
}
