//! CMake generator/toolchain selection.

use crate::platform::{OsFamily, PlatformInfo};
use crate::version::SdkVersion;

/// Generator used on POSIX hosts when the user does not pick one.
pub const DEFAULT_POSIX_GENERATOR: &str = "Unix Makefiles";

/// Returns the CMake arguments that select the generator or toolchain.
///
/// A non-blank override is passed through as `-G <override>`. Otherwise POSIX
/// hosts get Unix Makefiles and Windows picks the Visual Studio platform
/// matching the host binary's address width.
pub fn generator_args(platform: &PlatformInfo, version: SdkVersion, custom: Option<&str>) -> Vec<String> {
  if let Some(custom) = custom.map(str::trim).filter(|g| !g.is_empty()) {
    return vec!["-G".to_string(), custom.to_string()];
  }

  match platform.family() {
    OsFamily::Posix => vec!["-G".to_string(), DEFAULT_POSIX_GENERATOR.to_string()],
    OsFamily::Windows => {
      let toolchain = if version.has_64bit_binary() { "x64" } else { "Win32" };
      vec!["-A".to_string(), toolchain.to_string()]
    }
  }
}
