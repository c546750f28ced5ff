use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// CPU architectures a macOS build can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arch {
  #[serde(rename = "x86_64")]
  X86_64,
  #[serde(rename = "arm64")]
  Arm64,
}

impl Arch {
  /// Every architecture, in build order.
  pub const ALL: [Arch; 2] = [Arch::X86_64, Arch::Arm64];

  /// Architecture of the running host. `None` for anything but x86_64 and aarch64.
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86_64" => Some(Self::X86_64),
      "aarch64" => Some(Self::Arm64),
      _ => None,
    }
  }

  /// Returns the identifier the SDK's CMake scripts expect (`IDA_CURRENT_PROCESSOR`)
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Arm64 => "arm64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Arch {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "x86_64" => Ok(Self::X86_64),
      "arm64" | "aarch64" => Ok(Self::Arm64),
      other => Err(format!("unknown architecture '{}', expected x86_64 or arm64", other)),
    }
  }
}
