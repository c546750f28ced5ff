//! End-to-end build driver.
//!
//! [`prepare`] turns a [`BuildRequest`] into a [`PreparedBuild`]: the SDK
//! version is resolved, CMake located, the install target validated and the
//! plan enumerated, all before the filesystem is touched. [`PreparedBuild::run`]
//! then executes the plan and performs the optional installation.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config;
use crate::generator::generator_args;
use crate::install::{self, InstallError, InstallSummary};
use crate::matrix::{self, BuildPlan, BuildType, Layout, MatrixConstraints, MatrixError, WordSize};
use crate::platform::{Arch, PlatformInfo};
use crate::run::{self, BuildContext, CellSteps, RunError, RunReport};
use crate::tool::cmake::{CMAKE, CmakeConfig};
use crate::tool::{self, ToolError, ToolRunner};
use crate::version::{self, SdkVersion, VersionError};

#[derive(Debug, Error)]
pub enum DriverError {
  #[error(transparent)]
  Version(#[from] VersionError),

  #[error(transparent)]
  Tool(#[from] ToolError),

  #[error(transparent)]
  Matrix(#[from] MatrixError),

  #[error(transparent)]
  Run(#[from] RunError),

  #[error(transparent)]
  Install(#[from] InstallError),

  #[error("invalid {what} {}: {source}", .path.display())]
  Path {
    what: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// What the user asked for.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
  pub sdk: PathBuf,
  /// `"MAJOR.MINOR"`; detected from the SDK when absent.
  pub target_version: Option<String>,
  /// Host application directory: install destination and `IDA_INSTALL_DIR`.
  pub install_dir: Option<PathBuf>,
  pub word_size: Option<WordSize>,
  pub build_type: BuildType,
  pub arch: Option<Arch>,
  pub generator: Option<String>,
  pub install: bool,
  /// Nothing will be spawned, so a missing CMake is not fatal.
  pub dry_run: bool,
  /// Plugin source directory; `..` relative to each build directory when absent.
  pub source_dir: Option<PathBuf>,
  pub build_root: Option<PathBuf>,
  /// CMake binary override (name or path).
  pub cmake: Option<PathBuf>,
  /// Forwarded verbatim to the configure step.
  pub extra_args: Vec<String>,
}

/// A validated, fully enumerated build.
#[derive(Debug, Clone)]
pub struct PreparedBuild {
  pub platform: PlatformInfo,
  pub version: SdkVersion,
  pub plan: BuildPlan,
  pub context: BuildContext,
  /// Install destination, when installation was requested.
  pub install_to: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct BuildOutcome {
  pub report: RunReport,
  pub installed: Option<InstallSummary>,
}

fn resolve_path(
  what: &'static str,
  path: &Path,
  resolve: impl Fn(&Path) -> io::Result<PathBuf>,
) -> Result<PathBuf, DriverError> {
  resolve(path).map_err(|source| DriverError::Path {
    what,
    path: path.to_path_buf(),
    source,
  })
}

/// Validate a request and enumerate its plan.
pub fn prepare(request: &BuildRequest, platform: PlatformInfo) -> Result<PreparedBuild, DriverError> {
  let version = version::resolve(request.target_version.as_deref(), &request.sdk)?;
  info!(version = %version, platform = %platform, "resolved target");

  let program = match tool::locate(CMAKE, request.cmake.as_deref()) {
    Ok(program) => program,
    Err(err) if request.dry_run => {
      warn!(error = %err, "CMake not found, showing commands with the unresolved name");
      request.cmake.clone().unwrap_or_else(|| PathBuf::from(CMAKE))
    }
    Err(err) => return Err(err.into()),
  };

  let install_dir = match &request.install_dir {
    Some(dir) => Some(resolve_path("install directory", dir, |p| std::path::absolute(p))?),
    None => None,
  };

  let install_to = match (&install_dir, request.install) {
    (Some(dir), true) => {
      install::check_target(&platform, request.arch)?;
      Some(dir.clone())
    }
    (None, true) => {
      warn!("install requested without an install directory, skipping installation");
      None
    }
    (_, false) => None,
  };

  let constraints = MatrixConstraints {
    arch: request.arch,
    word_size: request.word_size,
    build_type: request.build_type,
  };
  let plan = matrix::enumerate(&platform, version, &constraints)?;

  let sdk = resolve_path("SDK path", &request.sdk, config::absolute)?;
  let root_arg = request.build_root.as_deref();
  let root = config::build_root(root_arg).map_err(|source| DriverError::Path {
    what: "build root",
    path: root_arg.map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    source,
  })?;
  let source_dir = match &request.source_dir {
    Some(dir) => resolve_path("source directory", dir, config::absolute)?,
    None => PathBuf::from(".."),
  };

  let cmake = CmakeConfig {
    program,
    sdk,
    version,
    generator: generator_args(&platform, version, request.generator.as_deref()),
    install_dir,
    source_dir,
    extra_args: request.extra_args.clone(),
  };

  Ok(PreparedBuild {
    platform,
    version,
    plan,
    context: BuildContext {
      layout: Layout::new(root, version),
      cmake,
    },
    install_to,
  })
}

impl PreparedBuild {
  /// Directories and commands of every cell, for dry runs.
  pub fn steps(&self) -> Vec<CellSteps> {
    run::steps(&self.plan, &self.context)
  }

  /// Build every cell, then install the last output directory if requested.
  pub fn run<R: ToolRunner>(&self, runner: &mut R) -> Result<BuildOutcome, DriverError> {
    let report = run::execute(&self.plan, &self.context, runner)?;

    let installed = match &self.install_to {
      Some(destination) => {
        let output_dir = report.last_output_dir().ok_or(InstallError::NoOutput)?;
        Some(install::install(output_dir, destination)?)
      }
      None => None,
    };

    Ok(BuildOutcome { report, installed })
  }
}
