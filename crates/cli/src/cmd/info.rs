use std::path::Path;

use anyhow::Result;

use plugbuild_lib::config;
use plugbuild_lib::platform::PlatformInfo;
use plugbuild_lib::tool::{self, cmake::CMAKE};
use plugbuild_lib::version;

use crate::output::{OutputFormat, print_json, print_stat, print_warning};

pub fn cmd_info(sdk: Option<&Path>, format: OutputFormat) -> Result<()> {
  let platform = PlatformInfo::detect()?;
  let cmake = tool::locate(CMAKE, config::cmake_override().as_deref()).ok();
  let sdk_version = sdk.map(version::detect).transpose()?;

  if format.is_json() {
    let json_output = serde_json::json!({
      "platform": platform,
      "cmake": cmake,
      "sdk_version": sdk_version,
    });
    return print_json(&json_output);
  }

  println!("System:");
  print_stat("Platform", &platform.to_string());
  match &cmake {
    Some(path) => print_stat("CMake", &path.display().to_string()),
    None => print_warning("CMake not found on PATH"),
  }
  if let Some(sdk_version) = sdk_version {
    print_stat("SDK version", &sdk_version.to_string());
  }

  Ok(())
}
