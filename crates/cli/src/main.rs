use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod output;

use args::TargetArgs;
use output::{OutputFormat, print_error};

/// plugbuild - compile and install an IDA plugin across the SDK build matrix
#[derive(Parser)]
#[command(name = "plugbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure and build every cell of the matrix, optionally installing the result
  Build {
    #[command(flatten)]
    target: TargetArgs,

    /// Install the build output into <IDA_PATH>/plugins
    #[arg(long)]
    install: bool,

    /// Print the plan without creating directories or running CMake
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show the cells and CMake commands a build would run
  Plan {
    #[command(flatten)]
    target: TargetArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show platform, CMake and SDK information
  Info {
    /// Path to the IDA SDK whose version should be detected
    #[arg(long = "ida-sdk", short = 'i')]
    ida_sdk: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() {
  let cli = Cli::parse_from(args::hoist_cmake_args(&Cli::command(), std::env::args_os()));
  init_logging(cli.verbose);

  let result = match cli.command {
    Commands::Build {
      target,
      install,
      dry_run,
      format,
    } => {
      if dry_run {
        cmd::cmd_plan(&target, install, format)
      } else {
        cmd::cmd_build(&target, install, format)
      }
    }
    Commands::Plan { target, format } => cmd::cmd_plan(&target, false, format),
    Commands::Info { ida_sdk, format } => cmd::cmd_info(ida_sdk.as_deref(), format),
  };

  if let Err(err) = result {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
