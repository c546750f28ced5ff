//! Command-line arguments shared by the `build` and `plan` commands.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, Args, Command, ValueEnum};

use plugbuild_lib::config;
use plugbuild_lib::driver::BuildRequest;
use plugbuild_lib::matrix::{BuildType, WordSize};
use plugbuild_lib::platform::Arch;

/// Id of the positional that collects forwarded CMake arguments.
const CMAKE_ARGS_ID: &str = "cmake_args";

/// The IDA variant (ida/ida64, sizeof(ea_t) == 4/8).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EaArg {
  #[value(name = "32")]
  Ea32,
  #[value(name = "64")]
  Ea64,
}

impl From<EaArg> for WordSize {
  fn from(ea: EaArg) -> Self {
    match ea {
      EaArg::Ea32 => WordSize::W32,
      EaArg::Ea64 => WordSize::W64,
    }
  }
}

#[derive(Debug, Args)]
pub struct TargetArgs {
  /// Path to the IDA SDK
  #[arg(long = "ida-sdk", short = 'i')]
  pub ida_sdk: PathBuf,

  /// IDA version to build for (e.g. 6.9). Auto-detected from the SDK if omitted
  #[arg(long, short = 't')]
  pub target_version: Option<String>,

  /// Path of the IDA installation, used for installing the plugin.
  /// On unix-like platforms also required for linkage
  #[arg(long)]
  pub ida_path: Option<PathBuf>,

  /// The IDA variant to build for. If omitted, build every variant the SDK supports
  #[arg(long, value_enum)]
  pub ea: Option<EaArg>,

  /// Do a release build
  #[arg(long)]
  pub release: bool,

  /// Architecture to build on macOS (x86_64 or arm64). Defaults to building both
  #[arg(long, value_name = "ARCH")]
  pub arch: Option<Arch>,

  /// Custom generator for CMake (e.g. Ninja)
  #[arg(long = "gen", default_value = "")]
  pub generator: String,

  /// Plugin source directory. Defaults to the parent of each build directory
  #[arg(long)]
  pub source: Option<PathBuf>,

  /// Directory receiving the build and output directories [env: PLUGBUILD_BUILD_ROOT]
  #[arg(long)]
  pub build_root: Option<PathBuf>,

  /// Extra arguments forwarded verbatim to the CMake configure step.
  /// Unrecognized options anywhere on the command line end up here too
  #[arg(last = true, value_name = "CMAKE_ARGS")]
  pub cmake_args: Vec<String>,
}

impl TargetArgs {
  pub fn to_request(&self, install: bool, dry_run: bool) -> BuildRequest {
    BuildRequest {
      sdk: self.ida_sdk.clone(),
      target_version: self.target_version.clone(),
      install_dir: self.ida_path.clone(),
      word_size: self.ea.map(Into::into),
      build_type: BuildType::from_release_flag(self.release),
      arch: self.arch,
      generator: Some(self.generator.clone()).filter(|g| !g.trim().is_empty()),
      install,
      dry_run,
      source_dir: self.source.clone(),
      build_root: self.build_root.clone(),
      cmake: config::cmake_override(),
      extra_args: self.cmake_args.clone(),
    }
  }
}

/// Move unrecognized arguments behind `--` so they reach `CMAKE_ARGS`.
///
/// Only subcommands with a `CMAKE_ARGS` positional are rewritten. After the
/// subcommand, tokens naming one of its options (or a global one) stay in
/// place together with their value; every other token keeps its relative
/// order and is forwarded. An explicit `--` forwards everything after it.
pub fn hoist_cmake_args<I, T>(cli: &Command, argv: I) -> Vec<OsString>
where
  I: IntoIterator<Item = T>,
  T: Into<OsString>,
{
  let mut cli = cli.clone();
  cli.build();

  let mut tokens = argv.into_iter().map(Into::into);
  let mut known: Vec<OsString> = tokens.next().into_iter().collect();

  let mut subcommand = None;
  for token in tokens.by_ref() {
    let found = token.to_str().and_then(|name| cli.find_subcommand(name));
    known.push(token);
    if found.is_some() {
      subcommand = found;
      break;
    }
  }

  let Some(sub) = subcommand.filter(|sub| sub.get_arguments().any(|a| a.get_id().as_str() == CMAKE_ARGS_ID)) else {
    known.extend(tokens);
    return known;
  };
  let globals: Vec<&Arg> = cli.get_arguments().filter(|a| a.is_global_set()).collect();

  let mut forwarded = Vec::new();
  while let Some(token) = tokens.next() {
    let Some(text) = token.to_str() else {
      forwarded.push(token);
      continue;
    };
    if text == "--" {
      forwarded.extend(tokens.by_ref());
      break;
    }

    match find_option(sub, &globals, text) {
      Some(arg) => {
        let takes_next = arg.get_action().takes_values() && !has_inline_value(text);
        known.push(token);
        if takes_next {
          known.extend(tokens.next());
        }
      }
      None => forwarded.push(token),
    }
  }

  if !forwarded.is_empty() {
    known.push(OsString::from("--"));
    known.extend(forwarded);
  }
  known
}

fn find_option<'a>(sub: &'a Command, globals: &[&'a Arg], token: &str) -> Option<&'a Arg> {
  let mut candidates = sub.get_arguments().chain(globals.iter().copied());

  if let Some(long) = token.strip_prefix("--") {
    let name = long.split_once('=').map_or(long, |(name, _)| name);
    return candidates.find(|a| a.get_long() == Some(name));
  }

  let short = token.strip_prefix('-')?.chars().next()?;
  candidates.find(|a| a.get_short() == Some(short))
}

// `--name=value` or `-xvalue`.
fn has_inline_value(token: &str) -> bool {
  match token.strip_prefix("--") {
    Some(long) => long.contains('='),
    None => token.chars().count() > 2,
  }
}
