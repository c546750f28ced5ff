//! Implementation of the `plugbuild plan` command and `build --dry-run`.
//!
//! Prints every cell with its directories and CMake commands. Nothing is
//! created and no process is started.

use anyhow::Result;

use plugbuild_lib::driver::prepare;
use plugbuild_lib::install::plugins_dir;
use plugbuild_lib::platform::PlatformInfo;

use crate::args::TargetArgs;
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_step};

pub fn cmd_plan(target: &TargetArgs, install: bool, format: OutputFormat) -> Result<()> {
  let platform = PlatformInfo::detect()?;
  let request = target.to_request(install, true);
  let prepared = prepare(&request, platform)?;
  let steps = prepared.steps();

  if format.is_json() {
    let json_output = serde_json::json!({
      "version": prepared.version,
      "platform": prepared.platform,
      "steps": steps,
      "install_to": prepared.install_to,
    });
    return print_json(&json_output);
  }

  print_info(&format!(
    "SDK {} on {}: {} cell(s)",
    prepared.version,
    prepared.platform,
    steps.len()
  ));

  for step in &steps {
    println!();
    println!("{}", step.cell);
    print_stat("Build dir", &step.build_dir.display().to_string());
    print_stat("Output dir", &step.output_dir.display().to_string());
    print_step(&step.configure.command_line());
    print_step(&step.build.command_line());
  }

  if let Some(destination) = &prepared.install_to {
    println!();
    print_stat("Install to", &plugins_dir(destination).display().to_string());
  }

  Ok(())
}
