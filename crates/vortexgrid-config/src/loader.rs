// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, VortexGridConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "vortexgrid_configuration.toml";

/// Find the VortexGrid configuration file
///
/// Search order:
/// 1. `VORTEXGRID_CONFIG_PATH` environment variable
/// 2. Current working directory: `./vortexgrid_configuration.toml`
/// 3. Parent directories (searches up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("VORTEXGRID_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by VORTEXGRID_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "VortexGrid configuration file '{}' not found in any of these locations:\n{}\n\nSet VORTEXGRID_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Returns
///
/// Complete `VortexGridConfig` with all overrides applied
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<VortexGridConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: VortexGridConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Like [`load_config`], but starts from defaults when no file is found
///
/// An explicitly given `config_path` that does not exist is still an error.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<VortexGridConfig> {
    match load_config(config_path, cli_args) {
        Err(ConfigError::FileNotFound(_)) if config_path.is_none() => {
            let mut config = VortexGridConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            Ok(config)
        }
        other => other,
    }
}

fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `VORTEXGRID_APPROX_POINTS` -> `grid.approx_points`
/// - `VORTEXGRID_POWER_OF_TWO_CELLS` -> `grid.power_of_two_cells`
/// - `VORTEXGRID_DECIMATION_FACTOR` -> `decimation.factor`
/// - `VORTEXGRID_EXPORT_DIR` -> `export.output_dir`
/// - `VORTEXGRID_SCRIPT_DIR` -> `export.script_dir`
/// - `VORTEXGRID_FILE_BASE` -> `export.file_base`
/// - `VORTEXGRID_SYMMETRIC_RANGE` -> `export.symmetric_range`
/// - `VORTEXGRID_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut VortexGridConfig) {
    // Grid settings
    if let Ok(value) = env::var("VORTEXGRID_APPROX_POINTS") {
        if let Ok(points) = value.parse::<usize>() {
            config.grid.approx_points = points;
        }
    }
    if let Ok(value) = env::var("VORTEXGRID_POWER_OF_TWO_CELLS") {
        config.grid.power_of_two_cells = parse_bool(&value);
    }
    if let Ok(value) = env::var("VORTEXGRID_DECIMATION_FACTOR") {
        if let Ok(factor) = value.parse::<usize>() {
            config.decimation.factor = factor;
        }
    }

    // Export settings
    if let Ok(value) = env::var("VORTEXGRID_EXPORT_DIR") {
        config.export.output_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("VORTEXGRID_SCRIPT_DIR") {
        config.export.script_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("VORTEXGRID_FILE_BASE") {
        config.export.file_base = value;
    }
    if let Ok(value) = env::var("VORTEXGRID_SYMMETRIC_RANGE") {
        config.export.symmetric_range = parse_bool(&value);
    }

    if let Ok(value) = env::var("VORTEXGRID_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"approx_points": "32768", "file_base": "vel"}`)
pub fn apply_cli_overrides(config: &mut VortexGridConfig, cli_args: &HashMap<String, String>) {
    // Grid settings
    if let Some(value) = cli_args.get("approx_points") {
        if let Ok(points) = value.parse::<usize>() {
            config.grid.approx_points = points;
        }
    }
    if let Some(value) = cli_args.get("power_of_two_cells") {
        config.grid.power_of_two_cells = parse_bool(value);
    }
    if let Some(value) = cli_args.get("decimation_factor") {
        if let Ok(factor) = value.parse::<usize>() {
            config.decimation.factor = factor;
        }
    }
    if let Some(value) = cli_args.get("decimation_policy") {
        config.decimation.policy = value.clone();
    }

    // Export settings
    if let Some(value) = cli_args.get("output_dir") {
        config.export.output_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("script_dir") {
        config.export.script_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("file_base") {
        config.export.file_base = value.clone();
    }
    if let Some(value) = cli_args.get("symmetric_range") {
        config.export.symmetric_range = parse_bool(value);
    }

    // Logging settings
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_dir") {
        config.logging.log_dir = PathBuf::from(value);
    }
}
