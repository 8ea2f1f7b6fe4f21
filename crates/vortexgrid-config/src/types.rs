// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `vortexgrid_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VortexGridConfig {
    pub grid: GridConfig,
    pub decimation: DecimationConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Uniform grid shape
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    /// Requested number of grid points; actual capacity is derived from the box shape
    pub approx_points: usize,
    /// Round each axis's cell count to a power of two
    pub power_of_two_cells: bool,
    pub min_corner: [f32; 3],
    pub max_corner: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            approx_points: 4096,
            power_of_two_cells: false,
            min_corner: [-1.0, -1.0, -1.0],
            max_corner: [1.0, 1.0, 1.0],
        }
    }
}

/// Level-of-detail coarsening
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecimationConfig {
    pub factor: usize,
    /// "unpopulated" or "nearest_sample"
    pub policy: String,
}

impl Default for DecimationConfig {
    fn default() -> Self {
        Self {
            factor: 2,
            policy: "unpopulated".to_string(),
        }
    }
}

/// Brick-of-bytes export
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for `.dat` bricks
    pub output_dir: PathBuf,
    /// Directory for the `<file_base>.ogle` script
    pub script_dir: PathBuf,
    pub file_base: String,
    pub symmetric_range: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Vols"),
            script_dir: PathBuf::from("."),
            file_base: "vort".to_string(),
            symmetric_range: true,
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error"
    pub level: String,
    pub log_dir: PathBuf,
    /// Run folders older than this are removed
    pub retention_days: u64,
    /// Most recent run folders kept regardless of age
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: PathBuf::from("./logs"),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
