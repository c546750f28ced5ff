//! Sequential execution of a build plan.
//!
//! Each cell gets its output and build directories created, then runs the
//! CMake configure step followed by the build-and-install step. The first
//! failing phase stops the run; later cells are never started and directories
//! that were already created stay in place for the next attempt.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::matrix::layout::ensure_dir;
use crate::matrix::{BuildCell, BuildPlan, Layout};
use crate::tool::cmake::{self, CmakeConfig};
use crate::tool::{Invocation, ToolError, ToolRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
  Configure,
  Build,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Phase::Configure => write!(f, "configure"),
      Phase::Build => write!(f, "build"),
    }
  }
}

#[derive(Debug, Error)]
pub enum RunError {
  #[error("failed to create directory {}: {source}", .path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("CMake configure failed for {cell} (exit code {}), giving up", exit_code(.code))]
  ConfigureFailed { cell: BuildCell, code: Option<i32> },

  #[error("build failed for {cell} (exit code {}), giving up", exit_code(.code))]
  BuildFailed { cell: BuildCell, code: Option<i32> },

  #[error("{phase} step for {cell} could not run: {source}")]
  Tool {
    cell: BuildCell,
    phase: Phase,
    #[source]
    source: ToolError,
  },
}

fn exit_code(code: &Option<i32>) -> String {
  code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl RunError {
  /// The cell whose step failed, if the failure belongs to one.
  pub fn cell(&self) -> Option<&BuildCell> {
    match self {
      RunError::ConfigureFailed { cell, .. } | RunError::BuildFailed { cell, .. } | RunError::Tool { cell, .. } => {
        Some(cell)
      }
      RunError::CreateDir { .. } => None,
    }
  }
}

/// Everything a run needs besides the plan itself.
#[derive(Debug, Clone)]
pub struct BuildContext {
  pub layout: Layout,
  pub cmake: CmakeConfig,
}

/// The directories and commands of one cell.
#[derive(Debug, Clone, Serialize)]
pub struct CellSteps {
  pub cell: BuildCell,
  pub build_dir: PathBuf,
  pub output_dir: PathBuf,
  pub configure: Invocation,
  pub build: Invocation,
}

impl CellSteps {
  pub fn new(cell: &BuildCell, ctx: &BuildContext) -> Self {
    let build_dir = ctx.layout.build_dir(cell);
    let output_dir = ctx.layout.output_dir(cell);
    let configure = cmake::configure(&ctx.cmake, cell, &build_dir, &output_dir);
    let build = cmake::build(&ctx.cmake, cell, &build_dir);

    Self {
      cell: *cell,
      build_dir,
      output_dir,
      configure,
      build,
    }
  }
}

/// Describe every cell without touching the filesystem.
pub fn steps(plan: &BuildPlan, ctx: &BuildContext) -> Vec<CellSteps> {
  plan.iter().map(|cell| CellSteps::new(cell, ctx)).collect()
}

/// A cell that configured and built successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellReport {
  pub cell: BuildCell,
  pub build_dir: PathBuf,
  pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
  pub cells: Vec<CellReport>,
}

impl RunReport {
  /// Output directory of the most recently built cell.
  pub fn last_output_dir(&self) -> Option<&Path> {
    self.cells.last().map(|c| c.output_dir.as_path())
  }
}

/// Run every cell in plan order, stopping at the first failure.
pub fn execute<R: ToolRunner>(plan: &BuildPlan, ctx: &BuildContext, runner: &mut R) -> Result<RunReport, RunError> {
  plan.iter().try_fold(RunReport::default(), |mut report, cell| {
    report.cells.push(run_cell(cell, ctx, runner)?);
    Ok(report)
  })
}

fn run_cell<R: ToolRunner>(cell: &BuildCell, ctx: &BuildContext, runner: &mut R) -> Result<CellReport, RunError> {
  let steps = CellSteps::new(cell, ctx);

  for dir in [&steps.output_dir, &steps.build_dir] {
    ensure_dir(dir).map_err(|source| RunError::CreateDir {
      path: dir.clone(),
      source,
    })?;
  }

  info!(cell = %cell, dir = %steps.build_dir.display(), "configuring");
  info!("CMake command: {}", steps.configure);
  run_phase(runner, cell, Phase::Configure, &steps.configure)?;

  info!(cell = %cell, "building");
  debug!(command = %steps.build, "build command");
  run_phase(runner, cell, Phase::Build, &steps.build)?;

  Ok(CellReport {
    cell: *cell,
    build_dir: steps.build_dir,
    output_dir: steps.output_dir,
  })
}

fn run_phase<R: ToolRunner>(
  runner: &mut R,
  cell: &BuildCell,
  phase: Phase,
  invocation: &Invocation,
) -> Result<(), RunError> {
  let completion = runner.run(invocation).map_err(|source| RunError::Tool {
    cell: *cell,
    phase,
    source,
  })?;

  if completion.is_success() {
    return Ok(());
  }

  Err(match phase {
    Phase::Configure => RunError::ConfigureFailed {
      cell: *cell,
      code: completion.code,
    },
    Phase::Build => RunError::BuildFailed {
      cell: *cell,
      code: completion.code,
    },
  })
}
