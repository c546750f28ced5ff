//! Environment-driven settings.
//!
//! Command-line flags take precedence; these variables only supply defaults.

use std::io;
use std::path::{Path, PathBuf};

use crate::consts::{BUILD_ROOT_ENV, CMAKE_ENV};

fn env_path(name: &str) -> Option<PathBuf> {
  std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// CMake binary set through `PLUGBUILD_CMAKE`, if any.
pub fn cmake_override() -> Option<PathBuf> {
  env_path(CMAKE_ENV)
}

/// Directory under which build and output directories are created.
///
/// Precedence: explicit path, then `PLUGBUILD_BUILD_ROOT`, then the current
/// directory. The result is absolute and must already exist.
pub fn build_root(explicit: Option<&Path>) -> io::Result<PathBuf> {
  let root = match explicit.map(Path::to_path_buf).or_else(|| env_path(BUILD_ROOT_ENV)) {
    Some(root) => root,
    None => std::env::current_dir()?,
  };
  absolute(&root)
}

/// Canonical absolute form of an existing path, without `\\?\` prefixes on Windows.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
  dunce::canonicalize(path)
}
