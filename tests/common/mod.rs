//! Common test utilities for stackdev integration tests.
//!
//! This module provides:
//! - Fakes for the build and deploy ports, driven through the public API
//! - `TestEnv`: an isolated project directory for CLI tests
//! - Fixtures: assembly writers and shell scripts

#![allow(dead_code)]

pub mod env;
pub mod fakes;
pub mod fixtures;

pub use env::*;
pub use fakes::*;
pub use fixtures::*;
