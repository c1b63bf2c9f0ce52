// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # flashgesture-observability
//!
//! Logging setup shared by the flashgesture binaries.
//!
//! Every crate logs through `tracing` macros; this crate installs the
//! subscriber and turns `--debug-<crate>` flags into an `EnvFilter`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "flashgesture-config",
    "flashgesture-vision",
    "flashgesture-actuator",
    "flashgesture-core",
    "flashgesture-runner",
];
