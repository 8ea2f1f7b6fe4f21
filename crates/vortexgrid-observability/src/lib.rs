// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # vortexgrid-observability
//!
//! Logging setup for VortexGrid binaries and tests.
//!
//! Library crates only emit `tracing` events with an explicit `target:` naming
//! the crate; this crate decides where those events go and at what level,
//! with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files in timestamped run folders with retention cleanup

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use init::*;

/// Known VortexGrid log targets for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "vortexgrid-structures",
    "vortexgrid-serialization",
    "generate_bricks",
];
