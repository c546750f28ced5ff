//! plugbuild-lib: build-matrix resolution and orchestration for SDK plugins
//!
//! This crate holds every decision the `plugbuild` CLI makes:
//! - `version`: which SDK version to build against
//! - `platform`: the host platform, injected rather than sniffed mid-run
//! - `matrix`: the (architecture, word size) cells to build and their directories
//! - `tool`: CMake command lines and the process runner
//! - `run`: sequential execution with stop-on-first-failure
//! - `install`: merging build output into the host's plugin directory
//! - `driver`: the above wired together

pub mod config;
pub mod consts;
pub mod driver;
pub mod generator;
pub mod install;
pub mod matrix;
pub mod platform;
pub mod run;
pub mod tool;
pub mod util;
pub mod version;
