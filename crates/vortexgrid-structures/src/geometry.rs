// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Uniform grid geometry.
//!
//! A [`GridGeometry`] describes a point-sampled (vertex-centered) lattice over an
//! axis-aligned bounding box. Values live at the grid points, so every axis has
//! one fewer cell than it has points:
//!
//! ```text
//!  min_corner                                  max_corner
//!      o---------o---------o---------o---------o      num_points = 5
//!      |  cell 0 |  cell 1 |  cell 2 |  cell 3 |      num_cells  = 4
//!      |<------->|
//!     cell_spacing = extent / (num_points - 1)
//! ```
//!
//! Offsets flatten indices with X varying fastest, then Y, then Z:
//! `offset = ix + nx * (iy + ny * iz)`.

use glam::Vec3;
use tracing::{debug, warn};

use crate::error::{GridError, GridResult};

/// Per-axis grid point indices `[ix, iy, iz]`.
pub type GridIndices = [usize; 3];

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// Shape of a dense uniform grid: bounding box, point counts and cell spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    min_corner: Vec3,
    max_corner: Vec3,
    num_points: [usize; 3],
    cell_spacing: Vec3,
}

impl GridGeometry {
    //region Constructors

    /// Derives a grid shape that covers `[min_corner, max_corner]` with roughly
    /// `approx_points` grid points.
    ///
    /// Points are distributed so that cells are as close to cubic as integer
    /// counts permit; the longest axis receives proportionally more points.
    /// Every axis receives at least 2 points. An axis with zero extent is
    /// collapsed to a single cell of zero spacing instead of dividing by its extent.
    /// Axes held at 2 points give half the budget back to the others, so thin
    /// boxes still land near `approx_points` in total.
    ///
    /// When `power_of_two_cells` is set, each axis's cell count is rounded to the
    /// nearest power of two so the grid can be decimated by 2 repeatedly.
    ///
    /// # Errors
    /// * [`GridError::InvalidBounds`] if a corner is not finite or the box is inverted.
    /// * [`GridError::InvalidPointCount`] if `approx_points` is zero.
    ///
    /// # Examples
    /// ```
    /// use vortexgrid_structures::{GridGeometry, Vec3};
    ///
    /// let geometry = GridGeometry::new(Vec3::ZERO, Vec3::splat(3.0), 64, false).unwrap();
    /// assert_eq!(geometry.num_points(), [4, 4, 4]);
    /// assert_eq!(geometry.cell_spacing(), Vec3::ONE);
    /// ```
    pub fn new(
        min_corner: Vec3,
        max_corner: Vec3,
        approx_points: usize,
        power_of_two_cells: bool,
    ) -> GridResult<Self> {
        validate_bounds(min_corner, max_corner)?;
        if approx_points == 0 {
            return Err(GridError::InvalidPointCount(
                "requested point count must be greater than zero".into(),
            ));
        }

        let extent = max_corner - min_corner;
        let mut num_cells = distribute_cells(extent, approx_points as f64);

        if power_of_two_cells {
            num_cells = num_cells.map(nearest_power_of_two);
        }

        let geometry = Self::from_parts(min_corner, max_corner, num_cells.map(|cells| cells + 1));
        debug!(
            target: "vortexgrid-structures",
            "Derived grid {:?} points (capacity {}, requested {}) spacing {}",
            geometry.num_points,
            geometry.capacity(),
            approx_points,
            geometry.cell_spacing
        );
        Ok(geometry)
    }

    /// Builds a grid with exactly `num_points` points per axis.
    ///
    /// # Errors
    /// * [`GridError::InvalidBounds`] if a corner is not finite or the box is inverted.
    /// * [`GridError::InvalidPointCount`] if any axis has fewer than 2 points.
    pub fn with_num_points(
        min_corner: Vec3,
        max_corner: Vec3,
        num_points: [usize; 3],
    ) -> GridResult<Self> {
        validate_bounds(min_corner, max_corner)?;
        if let Some(axis) = num_points.iter().position(|&points| points < 2) {
            return Err(GridError::InvalidPointCount(format!(
                "axis {} has {} points, every axis needs at least 2",
                AXIS_NAMES[axis], num_points[axis]
            )));
        }
        Ok(Self::from_parts(min_corner, max_corner, num_points))
    }

    /// Assembles a geometry from already-validated parts and precomputes spacing.
    pub(crate) fn from_parts(min_corner: Vec3, max_corner: Vec3, num_points: [usize; 3]) -> Self {
        let extent = max_corner - min_corner;
        let mut cell_spacing = Vec3::ZERO;
        for axis in 0..3 {
            cell_spacing[axis] = extent[axis] / (num_points[axis] - 1) as f32;
        }
        Self {
            min_corner,
            max_corner,
            num_points,
            cell_spacing,
        }
    }

    //endregion

    //region Accessors

    pub fn min_corner(&self) -> Vec3 {
        self.min_corner
    }

    pub fn max_corner(&self) -> Vec3 {
        self.max_corner
    }

    /// Size of the bounding box along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max_corner - self.min_corner
    }

    pub fn num_points(&self) -> [usize; 3] {
        self.num_points
    }

    /// Number of cells along each axis, always one less than the point count.
    pub fn num_cells(&self) -> [usize; 3] {
        self.num_points.map(|points| points - 1)
    }

    pub fn cell_spacing(&self) -> Vec3 {
        self.cell_spacing
    }

    /// Total number of grid points, i.e. the number of stored values.
    pub fn capacity(&self) -> usize {
        self.num_points[0] * self.num_points[1] * self.num_points[2]
    }

    /// Whether `position` lies inside the closed bounding box.
    pub fn contains_position(&self, position: Vec3) -> bool {
        position.cmpge(self.min_corner).all() && position.cmple(self.max_corner).all()
    }

    //endregion

    //region Index Algebra

    /// Indices of the cell containing `position`.
    ///
    /// Each axis is clamped to `[0, num_points - 1]`, so positions on (or
    /// slightly past) the far boundary land on the last grid point rather than
    /// outside storage.
    pub fn indices_of_position(&self, position: Vec3) -> GridIndices {
        let relative = position - self.min_corner;
        let mut indices = [0usize; 3];
        for axis in 0..3 {
            let spacing = self.cell_spacing[axis];
            if spacing > 0.0 {
                let last = (self.num_points[axis] - 1) as f32;
                indices[axis] = (relative[axis] / spacing).floor().clamp(0.0, last) as usize;
            }
        }
        indices
    }

    /// Flattens per-axis indices into a storage offset.
    pub fn offset_from_indices(&self, indices: GridIndices) -> usize {
        debug_assert!(
            indices.iter().zip(self.num_points.iter()).all(|(&i, &n)| i < n),
            "indices {:?} outside grid {:?}",
            indices,
            self.num_points
        );
        indices[0] + self.num_points[0] * (indices[1] + self.num_points[1] * indices[2])
    }

    /// Inverse of [`offset_from_indices`](Self::offset_from_indices).
    pub fn indices_from_offset(&self, offset: usize) -> GridIndices {
        debug_assert!(
            offset < self.capacity(),
            "offset {} outside grid of capacity {}",
            offset,
            self.capacity()
        );
        let num_xy = self.num_points[0] * self.num_points[1];
        let iz = offset / num_xy;
        let remainder = offset - iz * num_xy;
        let iy = remainder / self.num_points[0];
        let ix = remainder - iy * self.num_points[0];
        [ix, iy, iz]
    }

    pub fn offset_of_position(&self, position: Vec3) -> usize {
        self.offset_from_indices(self.indices_of_position(position))
    }

    /// Position of the grid point at `offset`, which is the minimum corner of its cell.
    pub fn position_from_offset(&self, offset: usize) -> Vec3 {
        let [ix, iy, iz] = self.indices_from_offset(offset);
        self.min_corner + Vec3::new(ix as f32, iy as f32, iz as f32) * self.cell_spacing
    }

    /// Center of the cell whose minimum corner is the grid point at `offset`.
    pub fn cell_center(&self, offset: usize) -> Vec3 {
        self.position_from_offset(offset) + 0.5 * self.cell_spacing
    }

    //endregion
}

fn validate_bounds(min_corner: Vec3, max_corner: Vec3) -> GridResult<()> {
    if !min_corner.is_finite() || !max_corner.is_finite() {
        return Err(GridError::InvalidBounds {
            min: min_corner,
            max: max_corner,
            reason: "corners must be finite".into(),
        });
    }
    if max_corner.cmplt(min_corner).any() {
        return Err(GridError::InvalidBounds {
            min: min_corner,
            max: max_corner,
            reason: "max corner lies below min corner".into(),
        });
    }
    Ok(())
}

/// Splits a point budget across the axes so cells come out near-cubic.
///
/// An axis that would receive fewer than 2 points (zero or tiny extent) is
/// pinned at 2 points, its share of the budget is handed back by halving it,
/// and the remaining axes are redistributed.
fn distribute_cells(extent: Vec3, approx_points: f64) -> [usize; 3] {
    let mut num_points = [2usize; 3];
    let mut active = [true; 3];
    let mut budget = approx_points;

    for axis in 0..3 {
        if extent[axis] <= 0.0 {
            warn!(
                target: "vortexgrid-structures",
                "Grid bounding box has zero extent along {}; using a single cell on that axis",
                AXIS_NAMES[axis]
            );
            active[axis] = false;
            budget /= 2.0;
        }
    }

    loop {
        let axes: Vec<usize> = (0..3).filter(|&axis| active[axis]).collect();
        if axes.is_empty() {
            break;
        }
        let volume: f64 = axes.iter().map(|&axis| f64::from(extent[axis])).product();
        let points_per_unit_length = (budget / volume).powf(1.0 / axes.len() as f64);

        let mut pinned = false;
        for &axis in &axes {
            let points = (f64::from(extent[axis]) * points_per_unit_length).round() as usize;
            if points < 2 {
                active[axis] = false;
                budget /= 2.0;
                pinned = true;
            } else {
                num_points[axis] = points;
            }
        }
        if !pinned {
            break;
        }
    }

    num_points.map(|points| points - 1)
}

/// Rounds a positive count to the nearest power of two, ties rounding up.
fn nearest_power_of_two(value: usize) -> usize {
    let upper = value.max(1).next_power_of_two();
    let lower = upper / 2;
    if upper == value || lower == 0 {
        return upper;
    }
    if value - lower < upper - value {
        lower
    } else {
        upper
    }
}
