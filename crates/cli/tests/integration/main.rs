//! Integration tests for the plugbuild CLI.
//!
//! A shell script stands in for cmake, so these only run on unix hosts.

#![cfg(unix)]

mod build_tests;
mod install_tests;
