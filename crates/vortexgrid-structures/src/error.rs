// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use glam::Vec3;

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while building, reshaping or viewing a uniform grid.
///
/// # Examples
/// ```
/// use vortexgrid_structures::{GridError, GridGeometry, Vec3};
///
/// let inverted = GridGeometry::new(Vec3::ONE, Vec3::ZERO, 64, false);
/// assert!(matches!(inverted, Err(GridError::InvalidBounds { .. })));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Invalid bounds: min {min} max {max} ({reason})")]
    InvalidBounds {
        min: Vec3,
        max: Vec3,
        reason: String,
    },

    #[error("Invalid point count: {0}")]
    InvalidPointCount(String),

    #[error("Invalid decimation factor: {0} (must be at least 1)")]
    InvalidDecimationFactor(usize),

    #[error("Offset {offset} out of range for grid of capacity {capacity}")]
    OffsetOutOfRange { offset: usize, capacity: usize },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Unknown decimation policy: {0}")]
    UnknownPolicy(String),
}
