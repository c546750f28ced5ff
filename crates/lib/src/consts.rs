//! Names and thresholds shared across the crate.

/// Version metadata file, relative to the SDK root.
pub const SDK_METADATA_FILE: &str = "allmake.mak";

/// Declaration holding the SDK major version inside [`SDK_METADATA_FILE`].
pub const SDK_MAJOR_KEY: &str = "IDAVER_MAJOR";

/// Declaration holding the SDK minor version inside [`SDK_METADATA_FILE`].
pub const SDK_MINOR_KEY: &str = "IDAVER_MINOR";

/// First SDK major version that no longer ships 32-bit address builds.
pub const LAST_32BIT_MAJOR_EXCLUSIVE: u32 = 9;

/// First SDK major version whose host binary is 64-bit.
pub const FIRST_64BIT_BINARY_MAJOR: u32 = 7;

/// Subdirectory of the install destination that receives plugin files.
pub const PLUGINS_DIR: &str = "plugins";

/// Environment variable overriding the CMake binary location.
pub const CMAKE_ENV: &str = "PLUGBUILD_CMAKE";

/// Environment variable setting the default build root.
pub const BUILD_ROOT_ENV: &str = "PLUGBUILD_BUILD_ROOT";
