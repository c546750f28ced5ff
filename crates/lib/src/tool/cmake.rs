//! CMake command lines for the configure and build phases.

use std::path::{Path, PathBuf};

use super::Invocation;
use crate::matrix::{BuildCell, BuildType, WordSize};
use crate::version::SdkVersion;

pub const CMAKE: &str = "cmake";

/// Settings shared by every cell of a run.
#[derive(Debug, Clone)]
pub struct CmakeConfig {
  pub program: PathBuf,
  pub sdk: PathBuf,
  pub version: SdkVersion,
  /// Output of [`crate::generator::generator_args`].
  pub generator: Vec<String>,
  /// Host application directory, handed to the plugin's CMake scripts.
  pub install_dir: Option<PathBuf>,
  /// Plugin source directory, relative to the build directory or absolute.
  pub source_dir: PathBuf,
  /// Forwarded verbatim after every generated definition.
  pub extra_args: Vec<String>,
}

fn define(name: &str, value: impl AsRef<str>) -> String {
  format!("-D{}={}", name, value.as_ref())
}

fn path_str(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}

/// Generate step for one cell, run inside `build_dir`.
pub fn configure(config: &CmakeConfig, cell: &BuildCell, build_dir: &Path, output_dir: &Path) -> Invocation {
  let mut args = vec![define("IDA_SDK", path_str(&config.sdk))];
  args.extend(config.generator.iter().cloned());
  args.push(define(
    "IDA_BINARY_64",
    if config.version.has_64bit_binary() { "ON" } else { "OFF" },
  ));
  args.push(define("CMAKE_INSTALL_PREFIX", path_str(output_dir)));
  args.push(define("CMAKE_BUILD_TYPE", cell.build_type.cmake_config()));

  if let Some(install_dir) = &config.install_dir {
    args.push(define("IDA_INSTALL_DIR", path_str(install_dir)));
  }

  if cell.word_size == WordSize::W64 {
    args.push(define("IDA_EA_64", "TRUE"));
  }

  if let Some(arch) = cell.arch {
    args.push(define("IDA_CURRENT_PROCESSOR", arch.as_str()));
  }

  args.extend(config.extra_args.iter().cloned());
  args.push(path_str(&config.source_dir));

  Invocation::new(&config.program, build_dir).args(args)
}

/// Build-and-install step for one cell, run inside `build_dir`.
pub fn build(config: &CmakeConfig, cell: &BuildCell, build_dir: &Path) -> Invocation {
  let invocation = Invocation::new(&config.program, build_dir).args(["--build", ".", "--target", "install"]);

  match cell.build_type {
    BuildType::Release => invocation.args(["--config", BuildType::Release.cmake_config()]),
    BuildType::Debug => invocation,
  }
}
