//! Installing build output into the host application's plugin directory.
//!
//! The output tree is merged into `<destination>/plugins`: directories are
//! created as needed, files with the same relative path are overwritten and
//! everything else already in the destination is left alone.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::consts::PLUGINS_DIR;
use crate::platform::{Arch, PlatformInfo};

#[derive(Debug, Error)]
pub enum InstallError {
  /// Several architectures were built and none was chosen for installation.
  #[error("you should specify --arch when installing on macOS")]
  AmbiguousTarget,

  #[error("nothing to install: no output directory was produced")]
  NoOutput,

  #[error("failed to read {}: {source}", .path.display())]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("failed to create directory {}: {source}", .path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallSummary {
  pub target: PathBuf,
  pub files: usize,
}

/// Refuse to install when the run covers more than one architecture.
pub fn check_target(platform: &PlatformInfo, pinned_arch: Option<Arch>) -> Result<(), InstallError> {
  if platform.has_arch_dimension() && pinned_arch.is_none() {
    return Err(InstallError::AmbiguousTarget);
  }
  Ok(())
}

/// Directory that receives the installed files.
pub fn plugins_dir(destination: &Path) -> PathBuf {
  destination.join(PLUGINS_DIR)
}

/// Merge `output_dir` into `<destination>/plugins`.
pub fn install(output_dir: &Path, destination: &Path) -> Result<InstallSummary, InstallError> {
  let target = plugins_dir(destination);
  info!(from = %output_dir.display(), to = %target.display(), "installing");

  let files = merge_tree(output_dir, &target)?;
  Ok(InstallSummary { target, files })
}

/// Copy every file under `source` to the same relative path under `target`.
///
/// Returns the number of files copied. Symlinks are followed.
pub fn merge_tree(source: &Path, target: &Path) -> Result<usize, InstallError> {
  let mut files = 0;

  for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
    let entry = entry.map_err(|source_err| InstallError::Walk {
      path: source.to_path_buf(),
      source: source_err,
    })?;

    let rel_path = entry.path().strip_prefix(source).unwrap_or(entry.path());
    let dest = target.join(rel_path);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&dest).map_err(|e| InstallError::CreateDir {
        path: dest.clone(),
        source: e,
      })?;
    } else if entry.file_type().is_file() {
      debug!(file = %rel_path.display(), "copying");
      fs::copy(entry.path(), &dest).map_err(|e| InstallError::Copy {
        from: entry.path().to_path_buf(),
        to: dest.clone(),
        source: e,
      })?;
      files += 1;
    }
  }

  Ok(files)
}
