//! Build and output directory naming.
//!
//! Names are pure functions of a cell and the SDK version, so a repeated run
//! with the same inputs lands in the same directories and reuses their CMake
//! caches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::BuildCell;
use crate::platform::Os;
use crate::version::SdkVersion;

/// Platform part of a directory name: `win`, `linux` or `macos-<arch>`.
pub fn env_tag(cell: &BuildCell) -> String {
  let os = match cell.os {
    Os::Windows => "win",
    Os::MacOs => "macos",
    Os::Linux => "linux",
  };
  match cell.arch {
    Some(arch) => format!("{}-{}", os, arch),
    None => os.to_string(),
  }
}

/// `<major>.<minor>-<env>-<BuildType>`, shared by build and output directories.
pub fn triple(cell: &BuildCell, version: SdkVersion) -> String {
  format!("{}-{}-{}", version, env_tag(cell), cell.build_type.as_str())
}

/// Output (install prefix) directory name. Shared across word sizes.
pub fn output_dir_name(cell: &BuildCell, version: SdkVersion) -> String {
  format!("output-{}", triple(cell, version))
}

/// Per-cell CMake working directory name.
pub fn build_dir_name(cell: &BuildCell, version: SdkVersion) -> String {
  format!("build-{}-{}", triple(cell, version), cell.word_size)
}

/// Resolves directory names against the build root.
#[derive(Debug, Clone)]
pub struct Layout {
  root: PathBuf,
  version: SdkVersion,
}

impl Layout {
  pub fn new(root: impl Into<PathBuf>, version: SdkVersion) -> Self {
    Self {
      root: root.into(),
      version,
    }
  }

  pub fn build_dir(&self, cell: &BuildCell) -> PathBuf {
    self.root.join(build_dir_name(cell, self.version))
  }

  pub fn output_dir(&self, cell: &BuildCell) -> PathBuf {
    self.root.join(output_dir_name(cell, self.version))
  }
}

/// Create a single directory, treating an existing directory as success.
///
/// The parent must exist. A non-directory entry at `path` is an error.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
  match fs::create_dir(path) {
    Ok(()) => {
      debug!(path = %path.display(), "created directory");
      Ok(())
    }
    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
      if path.is_dir() {
        debug!(path = %path.display(), "reusing directory");
        Ok(())
      } else {
        Err(io::Error::new(
          io::ErrorKind::AlreadyExists,
          format!("{} exists and is not a directory", path.display()),
        ))
      }
    }
    Err(e) => Err(e),
  }
}
