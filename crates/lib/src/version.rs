//! SDK version resolution.
//!
//! The version is either supplied by the user as `"MAJOR.MINOR"` or read from
//! the SDK's `allmake.mak`. It is resolved once per run and never changes.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{FIRST_64BIT_BINARY_MAJOR, LAST_32BIT_MAJOR_EXCLUSIVE, SDK_MAJOR_KEY, SDK_METADATA_FILE, SDK_MINOR_KEY};

#[derive(Debug, Error)]
pub enum VersionError {
  /// The user-supplied version string is not `MAJOR.MINOR`.
  #[error("invalid version format '{input}', expected something like \"6.5\"")]
  InvalidFormat { input: String },

  /// The SDK metadata could not be read or did not contain the version.
  #[error("failed to detect SDK version from {}: {reason}; please specify --target-version manually", .path.display())]
  DetectionFailure { path: PathBuf, reason: String },
}

/// The SDK version a run builds against.
///
/// Ordering is by major, then minor, so `version >= SdkVersion::new(7, 0)`
/// reads the way the SDK release notes do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SdkVersion {
  pub major: u32,
  pub minor: u32,
}

impl SdkVersion {
  pub fn new(major: u32, minor: u32) -> Self {
    Self { major, minor }
  }

  /// Whether this SDK still supports 32-bit address builds.
  pub fn supports_32bit(&self) -> bool {
    self.major < LAST_32BIT_MAJOR_EXCLUSIVE
  }

  /// Whether the host application for this SDK is a 64-bit binary.
  pub fn has_64bit_binary(&self) -> bool {
    *self >= SdkVersion::new(FIRST_64BIT_BINARY_MAJOR, 0)
  }
}

impl fmt::Display for SdkVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.major, self.minor)
  }
}

impl FromStr for SdkVersion {
  type Err = VersionError;

  /// Parse `"MAJOR.MINOR"`. Components may be padded with whitespace; anything
  /// after the second one is ignored.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || VersionError::InvalidFormat { input: s.to_string() };

    let mut parts = s.split('.').map(str::trim);
    let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let minor = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;

    Ok(Self { major, minor })
  }
}

/// Resolve the target version, preferring an explicit string over detection.
pub fn resolve(explicit: Option<&str>, sdk_root: &Path) -> Result<SdkVersion, VersionError> {
  match explicit {
    Some(input) => input.parse(),
    None => detect(sdk_root),
  }
}

/// Read the version declared in `<sdk_root>/allmake.mak`.
pub fn detect(sdk_root: &Path) -> Result<SdkVersion, VersionError> {
  let path = sdk_root.join(SDK_METADATA_FILE);
  debug!(path = %path.display(), "detecting SDK version");

  let content = fs::read_to_string(&path).map_err(|e| VersionError::DetectionFailure {
    path: path.clone(),
    reason: e.to_string(),
  })?;

  parse_metadata(&content).ok_or_else(|| VersionError::DetectionFailure {
    path,
    reason: format!("no {} / {} declarations found", SDK_MAJOR_KEY, SDK_MINOR_KEY),
  })
}

/// Extract the major/minor declarations from metadata file content.
pub fn parse_metadata(content: &str) -> Option<SdkVersion> {
  let major = find_declaration(content, SDK_MAJOR_KEY)?;
  let minor = find_declaration(content, SDK_MINOR_KEY)?;
  Some(SdkVersion { major, minor })
}

fn find_declaration(content: &str, key: &str) -> Option<u32> {
  // Whole-line `KEY:=123`, tolerating CRLF files.
  let pattern = format!(r"(?m)^{}:=(\d+)\r?$", regex::escape(key));
  let re = Regex::new(&pattern).ok()?;
  re.captures(content)?.get(1)?.as_str().parse().ok()
}
