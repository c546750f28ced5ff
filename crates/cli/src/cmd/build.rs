//! Implementation of the `plugbuild build` command.
//!
//! Resolves the target, runs CMake for every cell of the matrix and installs
//! the last output directory when asked to.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use plugbuild_lib::driver::prepare;
use plugbuild_lib::platform::PlatformInfo;
use plugbuild_lib::tool::ProcessRunner;

use crate::args::TargetArgs;
use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success};

pub fn cmd_build(target: &TargetArgs, install: bool, format: OutputFormat) -> Result<()> {
  let started = Instant::now();

  let platform = PlatformInfo::detect()?;
  let request = target.to_request(install, false);
  let prepared = prepare(&request, platform)?;

  info!(cells = prepared.plan.cells().len(), "starting build");
  let outcome = prepared
    .run(&mut ProcessRunner)
    .with_context(|| format!("Build for SDK {} aborted", prepared.version))?;

  if format.is_json() {
    let json_output = serde_json::json!({
      "version": prepared.version,
      "platform": prepared.platform,
      "cells": outcome.report.cells,
      "installed": outcome.installed,
    });
    return print_json(&json_output);
  }

  for cell in &outcome.report.cells {
    print_success(&format!("Built {}", cell.cell));
  }

  if let Some(installed) = &outcome.installed {
    print_info("Installed");
    print_stat("Target", &installed.target.display().to_string());
    print_stat("Files", &installed.files.to_string());
  }

  print_success(&format!("Done! ({})", format_duration(started.elapsed())));
  Ok(())
}
