//! Tests for `plugbuild build` and `plugbuild plan`.

use predicates::prelude::*;

use super::common::{TestEnv, env_tag};

#[test]
fn builds_every_word_size_of_an_old_sdk() {
  let env = TestEnv::with_sdk("allmake_7_5.mak");

  env.build_cmd().assert().success().stdout(predicate::str::contains("Done!"));

  let tag = env_tag();
  let calls = env.cmake_calls();
  assert_eq!(calls.len(), 4, "calls: {:?}", calls);

  let build_32 = format!("build-7.5-{}-Debug-32", tag);
  let build_64 = format!("build-7.5-{}-Debug-64", tag);
  assert!(calls[0].starts_with(&format!("{}|-DIDA_SDK=", build_32)));
  assert!(calls[0].contains("-DIDA_BINARY_64=ON"));
  assert!(!calls[0].contains("-DIDA_EA_64=TRUE"));
  assert!(calls[0].ends_with(" .."));
  assert_eq!(calls[1], format!("{}|--build . --target install", build_32));
  assert!(calls[2].starts_with(&format!("{}|", build_64)));
  assert!(calls[2].contains("-DIDA_EA_64=TRUE"));
  assert_eq!(calls[3], format!("{}|--build . --target install", build_64));

  let output = env.root_path().join(format!("output-7.5-{}-Debug", tag));
  assert!(output.join("plugin.so").is_file());
  assert!(env.root_path().join(&build_32).is_dir());
  assert!(env.root_path().join(&build_64).is_dir());
}

#[test]
fn new_sdk_builds_only_64bit() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env.build_cmd().assert().success();

  let calls = env.cmake_calls();
  assert_eq!(calls.len(), 2, "calls: {:?}", calls);
  assert!(calls[0].starts_with(&format!("build-9.0-{}-Debug-64|", env_tag())));
}

#[test]
fn release_uses_relwithdebinfo() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env.build_cmd().arg("--release").assert().success();

  let calls = env.cmake_calls();
  let build_dir = format!("build-9.0-{}-Release-64", env_tag());
  assert!(calls[0].starts_with(&format!("{}|", build_dir)));
  assert!(calls[0].contains("-DCMAKE_BUILD_TYPE=RelWithDebInfo"));
  assert_eq!(
    calls[1],
    format!("{}|--build . --target install --config RelWithDebInfo", build_dir)
  );
}

#[test]
fn configure_failure_stops_the_run() {
  let env = TestEnv::with_sdk("allmake_7_5.mak");

  env
    .build_cmd()
    .env("FAKE_CMAKE_FAIL_CONFIGURE", "1")
    .assert()
    .failure()
    .stderr(predicate::str::contains("CMake configure failed"))
    .stderr(predicate::str::contains("exit code 2"));

  assert_eq!(env.cmake_calls().len(), 1);
  let build_64 = env.root_path().join(format!("build-7.5-{}-Debug-64", env_tag()));
  assert!(!build_64.exists());
}

#[test]
fn build_failure_stops_the_run() {
  let env = TestEnv::with_sdk("allmake_7_5.mak");

  env
    .build_cmd()
    .env("FAKE_CMAKE_FAIL_BUILD", "1")
    .assert()
    .failure()
    .stderr(predicate::str::contains("build failed for"));

  let calls = env.cmake_calls();
  assert_eq!(calls.len(), 2, "calls: {:?}", calls);
  assert!(calls[1].contains("--build"));
}

#[test]
fn trailing_args_are_forwarded_to_configure() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env.build_cmd().args(["--", "-DFOO=bar", "-Wdev"]).assert().success();

  let calls = env.cmake_calls();
  assert!(calls[0].ends_with("-DFOO=bar -Wdev .."), "call: {}", calls[0]);
  assert!(!calls[1].contains("-DFOO=bar"));
}

#[test]
fn known_flags_after_cmake_args_still_apply() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env.build_cmd().args(["-DFOO=bar", "--release"]).assert().success();

  let calls = env.cmake_calls();
  let build_dir = format!("build-9.0-{}-Release-64", env_tag());
  assert!(calls[0].starts_with(&format!("{}|", build_dir)), "call: {}", calls[0]);
  assert!(calls[0].contains("-DCMAKE_BUILD_TYPE=RelWithDebInfo"));
  assert!(calls[0].ends_with("-DFOO=bar .."), "call: {}", calls[0]);
  assert!(!calls[0].contains("--release"));
  assert_eq!(
    calls[1],
    format!("{}|--build . --target install --config RelWithDebInfo", build_dir)
  );
}

#[test]
fn unrecognized_options_are_forwarded_in_order() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env
    .build_cmd()
    .args(["-G", "Ninja", "--ea", "64", "-DFOO=bar"])
    .assert()
    .success();

  let calls = env.cmake_calls();
  assert_eq!(calls.len(), 2);
  assert!(calls[0].ends_with("-G Ninja -DFOO=bar .."), "call: {}", calls[0]);
}

#[test]
fn custom_generator_replaces_the_default() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env.build_cmd().args(["--gen", "Ninja"]).assert().success();

  let calls = env.cmake_calls();
  assert!(calls[0].contains("-G Ninja"));
  assert!(!calls[0].contains("Unix Makefiles"));
}

#[test]
fn default_generator_is_unix_makefiles() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env.build_cmd().assert().success();

  assert!(env.cmake_calls()[0].contains("-G Unix Makefiles"));
}

#[test]
fn ida_path_is_passed_to_cmake() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");
  std::fs::create_dir_all(env.ida_path()).unwrap();

  env.build_cmd().arg("--ida-path").arg(env.ida_path()).assert().success();

  assert!(env.cmake_calls()[0].contains("-DIDA_INSTALL_DIR="));
  assert!(!env.ida_path().join("plugins").exists());
}

#[test]
fn rerun_reuses_existing_directories() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env.build_cmd().assert().success();
  env.build_cmd().assert().success();

  let calls = env.cmake_calls();
  assert_eq!(calls.len(), 4);
  assert_eq!(calls[0], calls[2]);
  assert_eq!(calls[1], calls[3]);
}

#[test]
fn explicit_version_overrides_detection() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env.build_cmd().args(["-t", "6.8", "--ea", "32"]).assert().success();

  let calls = env.cmake_calls();
  assert_eq!(calls.len(), 2);
  assert!(calls[0].starts_with(&format!("build-6.8-{}-Debug-32|", env_tag())));
  assert!(calls[0].contains("-DIDA_BINARY_64=OFF"));
}

#[test]
fn pinned_32bit_on_new_sdk_is_rejected() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env
    .build_cmd()
    .args(["--ea", "32"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("32-bit builds are not supported by SDK 9.0"));

  assert!(env.cmake_calls().is_empty());
}

#[test]
fn invalid_version_fails_before_creating_directories() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env
    .build_cmd()
    .args(["-t", "seven"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid version format"));

  assert_eq!(std::fs::read_dir(env.root_path()).unwrap().count(), 0);
}

#[test]
fn missing_cmake_is_reported() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env
    .build_cmd()
    .env("PLUGBUILD_CMAKE", env.temp.path().join("no-such-cmake"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("unable to find cmake binary"));
}

#[test]
fn dry_run_creates_nothing() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env
    .build_cmd()
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("build-9.0-{}-Debug-64", env_tag())))
    .stdout(predicate::str::contains("--build . --target install"));

  assert!(env.cmake_calls().is_empty());
  assert_eq!(std::fs::read_dir(env.root_path()).unwrap().count(), 0);
}

#[test]
fn plan_works_without_cmake() {
  let env = TestEnv::with_sdk("allmake_9_0.mak");

  env
    .plugbuild_cmd()
    .env("PLUGBUILD_CMAKE", env.temp.path().join("no-such-cmake"))
    .arg("plan")
    .arg("-i")
    .arg(env.sdk_path())
    .args(["--arch", "x86_64"])
    .assert()
    .success()
    .stdout(predicate::str::contains("no-such-cmake -DIDA_SDK="))
    .stderr(predicate::str::contains("CMake not found"));

  assert_eq!(std::fs::read_dir(env.root_path()).unwrap().count(), 0);
}

#[test]
fn plan_json_lists_every_cell() {
  let env = TestEnv::with_sdk("allmake_7_5.mak");

  let output = env
    .plugbuild_cmd()
    .arg("plan")
    .arg("-i")
    .arg(env.sdk_path())
    .args(["--arch", "x86_64", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let steps = json["steps"].as_array().unwrap();
  assert_eq!(steps.len(), 2);
  assert_eq!(steps[0]["cell"]["word_size"], "32");
  assert_eq!(steps[1]["cell"]["word_size"], "64");
  assert_eq!(steps[0]["build"]["args"][0], "--build");
  assert!(json["install_to"].is_null());
  assert!(env.cmake_calls().is_empty());
}
