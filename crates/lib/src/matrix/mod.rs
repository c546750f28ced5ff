//! Build matrix enumeration.
//!
//! A run builds one [`BuildCell`] per (architecture, word size) combination
//! that applies to the host platform and SDK version. The plan is computed
//! up front and never modified while it executes.

pub mod layout;

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::platform::{Arch, Os, PlatformInfo};
use crate::version::SdkVersion;

pub use layout::Layout;

#[derive(Debug, Error)]
pub enum MatrixError {
  #[error("{word_size}-bit builds are not supported by SDK {version}")]
  UnsupportedWordSize { word_size: WordSize, version: SdkVersion },
}

/// Address width of the target (`sizeof(ea_t)` of 4 or 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WordSize {
  #[serde(rename = "32")]
  W32,
  #[serde(rename = "64")]
  W64,
}

impl WordSize {
  pub fn bits(&self) -> u8 {
    match self {
      Self::W32 => 32,
      Self::W64 => 64,
    }
  }
}

impl fmt::Display for WordSize {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.bits())
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
  #[default]
  Debug,
  Release,
}

impl BuildType {
  pub fn from_release_flag(release: bool) -> Self {
    if release { Self::Release } else { Self::Debug }
  }

  /// Name used in directory names.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
    }
  }

  /// CMake configuration name. Release builds keep debug info.
  pub fn cmake_config(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "RelWithDebInfo",
    }
  }
}

/// One point of the build matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BuildCell {
  pub os: Os,
  /// Only set on macOS.
  pub arch: Option<Arch>,
  pub word_size: WordSize,
  pub build_type: BuildType,
}

impl fmt::Display for BuildCell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.arch {
      Some(arch) => write!(f, "{}-{}", self.os, arch)?,
      None => write!(f, "{}", self.os)?,
    }
    write!(f, " ea{} {}", self.word_size, self.build_type.as_str().to_lowercase())
  }
}

/// What the user pinned on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixConstraints {
  pub arch: Option<Arch>,
  pub word_size: Option<WordSize>,
  pub build_type: BuildType,
}

/// Ordered list of cells, architecture-major and word-size-minor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildPlan {
  cells: Vec<BuildCell>,
}

impl BuildPlan {
  pub fn cells(&self) -> &[BuildCell] {
    &self.cells
  }

  pub fn iter(&self) -> std::slice::Iter<'_, BuildCell> {
    self.cells.iter()
  }
}

impl<'a> IntoIterator for &'a BuildPlan {
  type Item = &'a BuildCell;
  type IntoIter = std::slice::Iter<'a, BuildCell>;

  fn into_iter(self) -> Self::IntoIter {
    self.cells.iter()
  }
}

/// Enumerate the cells to build.
pub fn enumerate(
  platform: &PlatformInfo,
  version: SdkVersion,
  constraints: &MatrixConstraints,
) -> Result<BuildPlan, MatrixError> {
  let arches = arch_dimension(platform, constraints.arch);
  let word_sizes = word_sizes(version, constraints.word_size)?;

  let cells = arches
    .iter()
    .flat_map(|&arch| {
      word_sizes.iter().map(move |&word_size| BuildCell {
        os: platform.os,
        arch,
        word_size,
        build_type: constraints.build_type,
      })
    })
    .collect();

  Ok(BuildPlan { cells })
}

/// Architectures to iterate. `[None]` stands for "no architecture dimension".
pub fn arch_dimension(platform: &PlatformInfo, pinned: Option<Arch>) -> Vec<Option<Arch>> {
  if !platform.has_arch_dimension() {
    if let Some(arch) = pinned {
      warn!(arch = %arch, os = %platform.os, "architecture pin ignored on this platform");
    }
    return vec![None];
  }

  match pinned {
    Some(arch) => vec![Some(arch)],
    None => platform.default_arches().iter().copied().map(Some).collect(),
  }
}

/// Word sizes to iterate for the given SDK.
pub fn word_sizes(version: SdkVersion, pinned: Option<WordSize>) -> Result<Vec<WordSize>, MatrixError> {
  match pinned {
    Some(WordSize::W32) if !version.supports_32bit() => Err(MatrixError::UnsupportedWordSize {
      word_size: WordSize::W32,
      version,
    }),
    Some(word_size) => Ok(vec![word_size]),
    None if version.supports_32bit() => Ok(vec![WordSize::W32, WordSize::W64]),
    None => Ok(vec![WordSize::W64]),
  }
}
