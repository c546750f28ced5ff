//! Test utilities for plugbuild-lib.
//!
//! Cross-platform helpers for tests that run real processes, and a scripted
//! [`ToolRunner`] for tests that must not.

use crate::tool::{Completion, Invocation, ToolError, ToolRunner};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  // Use PowerShell to create an empty file - more reliable than cmd.exe approaches
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// Records every invocation and succeeds, except for one optional call.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
  pub calls: Vec<Invocation>,
  /// Zero-based call index and the exit code it returns.
  pub fail_at: Option<(usize, i32)>,
}

impl ScriptedRunner {
  pub fn failing_at(call: usize, code: i32) -> Self {
    Self {
      calls: Vec::new(),
      fail_at: Some((call, code)),
    }
  }
}

impl ToolRunner for ScriptedRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<Completion, ToolError> {
    let index = self.calls.len();
    self.calls.push(invocation.clone());

    match self.fail_at {
      Some((call, code)) if call == index => Ok(Completion::failure(code)),
      _ => Ok(Completion::success()),
    }
  }
}
