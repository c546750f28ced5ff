//! Tests for `plugbuild build --install`.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn install_merges_output_into_plugins() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");
  env.write_file("ida/plugins/other.so", "keep me");

  env
    .build_cmd()
    .arg("--install")
    .arg("--ida-path")
    .arg(env.ida_path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed"));

  let plugins = env.ida_path().join("plugins");
  assert_eq!(std::fs::read_to_string(plugins.join("plugin.so")).unwrap(), "plugin\n");
  assert_eq!(std::fs::read_to_string(plugins.join("other.so")).unwrap(), "keep me");
}

#[test]
fn install_creates_missing_plugins_dir() {
  let env = TestEnv::with_sdk("allmake_7_5.mak");

  env
    .build_cmd()
    .arg("--install")
    .arg("--ida-path")
    .arg(env.ida_path())
    .assert()
    .success();

  assert!(env.ida_path().join("plugins").join("plugin.so").is_file());
}

#[test]
fn install_without_ida_path_is_skipped() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env
    .build_cmd()
    .arg("--install")
    .assert()
    .success()
    .stderr(predicate::str::contains("skipping installation"))
    .stdout(predicate::str::contains("Installed").not());

  assert_eq!(env.cmake_calls().len(), 2);
  assert!(!env.ida_path().exists());
}

#[test]
fn failed_build_installs_nothing() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env
    .build_cmd()
    .arg("--install")
    .arg("--ida-path")
    .arg(env.ida_path())
    .env("FAKE_CMAKE_FAIL_BUILD", "1")
    .assert()
    .failure();

  assert!(!env.ida_path().join("plugins").exists());
}
