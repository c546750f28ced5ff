use std::fmt;

use serde::Serialize;

/// Operating systems the plugin can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Windows,
  MacOs,
  Linux,
}

/// Toolchain families; each has its own default generator behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
  Posix,
  Windows,
}

impl Os {
  /// The OS this binary was compiled for, if plugbuild supports it.
  pub fn current() -> Option<Self> {
    Self::from_target(std::env::consts::OS)
  }

  /// Map a Rust target OS name (`std::env::consts::OS`) to a supported OS.
  pub fn from_target(name: &str) -> Option<Self> {
    match name {
      "windows" => Some(Self::Windows),
      "macos" => Some(Self::MacOs),
      "linux" => Some(Self::Linux),
      _ => None,
    }
  }

  /// Name used in logs and JSON output.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::MacOs => "macos",
      Self::Linux => "linux",
    }
  }

  pub fn family(&self) -> OsFamily {
    match self {
      Self::Windows => OsFamily::Windows,
      Self::MacOs | Self::Linux => OsFamily::Posix,
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
