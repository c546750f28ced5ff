//! Host platform description.
//!
//! Orchestration never inspects the environment directly; it receives a
//! [`PlatformInfo`] so every platform's behaviour can be exercised from tests
//! on any host.

pub mod arch;
pub mod os;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub use arch::Arch;
pub use os::{Os, OsFamily};

#[derive(Debug, Error)]
pub enum PlatformError {
  #[error("unsupported platform: {os} ({arch})")]
  Unsupported { os: String, arch: String },
}

/// The platform a run builds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
  pub os: Os,
  /// Architecture of the running host, when it is one we know.
  pub native_arch: Option<Arch>,
}

impl PlatformInfo {
  pub fn new(os: Os) -> Self {
    Self { os, native_arch: None }
  }

  /// Describe the host this process runs on.
  pub fn detect() -> Result<Self, PlatformError> {
    let os = Os::current().ok_or_else(|| PlatformError::Unsupported {
      os: std::env::consts::OS.to_string(),
      arch: std::env::consts::ARCH.to_string(),
    })?;
    Ok(Self {
      os,
      native_arch: Arch::current(),
    })
  }

  pub fn family(&self) -> OsFamily {
    self.os.family()
  }

  /// Architectures built when the user does not pin one.
  ///
  /// Empty means the platform has no architecture dimension.
  pub fn default_arches(&self) -> &'static [Arch] {
    match self.os {
      Os::MacOs => &Arch::ALL,
      Os::Windows | Os::Linux => &[],
    }
  }

  /// Whether builds on this platform carry an explicit architecture.
  pub fn has_arch_dimension(&self) -> bool {
    !self.default_arches().is_empty()
  }
}

impl fmt::Display for PlatformInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.native_arch {
      Some(arch) => write!(f, "{}-{}", self.os, arch),
      None => write!(f, "{}", self.os),
    }
  }
}
