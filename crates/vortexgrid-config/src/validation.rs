// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges before a grid is built from them.

use crate::{ConfigError, ConfigResult, VortexGridConfig};

/// Smallest grid the loader accepts: two points along each axis
pub const MIN_APPROX_POINTS: usize = 8;

/// Accepted `decimation.policy` values
pub const DECIMATION_POLICIES: [&str; 2] = ["unpopulated", "nearest_sample"];

/// Accepted `logging.level` values
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - A usable grid (enough points, finite and ordered corners)
/// - A positive decimation factor and a known policy
/// - A file base that is a plain file name prefix
/// - A known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &VortexGridConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_grid(config, &mut errors);
    validate_decimation(config, &mut errors);
    validate_export(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_grid(config: &VortexGridConfig, errors: &mut Vec<ConfigValidationError>) {
    let grid = &config.grid;
    if grid.approx_points < MIN_APPROX_POINTS {
        errors.push(ConfigValidationError::InvalidValue {
            field: "grid.approx_points".to_string(),
            reason: format!("must be at least {}", MIN_APPROX_POINTS),
        });
    }

    let corners = [("grid.min_corner", grid.min_corner), ("grid.max_corner", grid.max_corner)];
    for (field, corner) in corners {
        if corner.iter().any(|c| !c.is_finite()) {
            errors.push(ConfigValidationError::InvalidValue {
                field: field.to_string(),
                reason: "all components must be finite".to_string(),
            });
        }
    }

    const AXES: [&str; 3] = ["x", "y", "z"];
    for axis in 0..3 {
        if grid.max_corner[axis] < grid.min_corner[axis] {
            errors.push(ConfigValidationError::InvalidValue {
                field: "grid.max_corner".to_string(),
                reason: format!(
                    "{} = {} lies below grid.min_corner {} = {}",
                    AXES[axis], grid.max_corner[axis], AXES[axis], grid.min_corner[axis]
                ),
            });
        }
    }
}

fn validate_decimation(config: &VortexGridConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.decimation.factor == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "decimation.factor".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let policy = config.decimation.policy.to_lowercase();
    if !DECIMATION_POLICIES.contains(&policy.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "decimation.policy".to_string(),
            reason: format!("must be one of {}", DECIMATION_POLICIES.join(", ")),
        });
    }
}

fn validate_export(config: &VortexGridConfig, errors: &mut Vec<ConfigValidationError>) {
    let file_base = &config.export.file_base;
    if file_base.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "export.file_base".to_string(),
        });
    } else if file_base.contains(|c| c == '/' || c == '\\') {
        errors.push(ConfigValidationError::InvalidValue {
            field: "export.file_base".to_string(),
            reason: "must not contain path separators".to_string(),
        });
    }
}

fn validate_logging(config: &VortexGridConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
    if config.logging.retention_runs == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.retention_runs".to_string(),
            reason: "must be at least 1 to keep the current run".to_string(),
        });
    }
}
