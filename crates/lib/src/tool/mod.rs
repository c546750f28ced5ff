//! External build tool plumbing.
//!
//! Every process the driver starts is described by an [`Invocation`] and run
//! through a [`ToolRunner`]. The real runner blocks until the child exits;
//! tests substitute a scripted one.

pub mod cmake;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ToolError {
  /// The tool binary could not be located.
  #[error("unable to find {name} binary: {source}")]
  NotFound {
    name: String,
    #[source]
    source: which::Error,
  },

  /// The process could not be started.
  #[error("failed to spawn {}: {source}", .program.display())]
  Spawn {
    program: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A single external process: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  pub program: PathBuf,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl Invocation {
  pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: cwd.into(),
    }
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// The command line as a user would type it; arguments with spaces are quoted.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.to_string_lossy().into_owned())
      .chain(self.args.iter().cloned())
      .map(|arg| if arg.contains(' ') { format!("'{}'", arg) } else { arg })
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.command_line())
  }
}

/// How a finished process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
  /// Exit code, `None` when the process was killed by a signal.
  pub code: Option<i32>,
}

impl Completion {
  pub fn success() -> Self {
    Self { code: Some(0) }
  }

  pub fn failure(code: i32) -> Self {
    Self { code: Some(code) }
  }

  pub fn is_success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Runs external processes to completion.
pub trait ToolRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<Completion, ToolError>;
}

/// Runs invocations as child processes that inherit stdio.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<Completion, ToolError> {
    debug!(program = %invocation.program.display(), cwd = %invocation.cwd.display(), "spawning process");

    let status = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .status()
      .map_err(|source| ToolError::Spawn {
        program: invocation.program.clone(),
        source,
      })?;

    Ok(Completion { code: status.code() })
  }
}

/// Locate a tool binary, preferring an explicit override.
///
/// The override may be a bare name looked up on `PATH` or a path to the binary.
pub fn locate(name: &str, override_path: Option<&Path>) -> Result<PathBuf, ToolError> {
  let found = match override_path {
    Some(path) => which::which(path),
    None => which::which(name),
  };

  found.map_err(|source| ToolError::NotFound {
    name: name.to_string(),
    source,
  })
}
