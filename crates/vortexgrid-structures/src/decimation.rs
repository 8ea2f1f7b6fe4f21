// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Coarsening a grid by an integer factor per axis.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{GridError, GridResult};
use crate::geometry::GridGeometry;
use crate::uniform_grid::UniformGrid;

/// How a decimated grid's values are derived from the source grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimationPolicy {
    /// Coarse values are left at `T::default()` for the caller to populate.
    #[default]
    Unpopulated,
    /// Each coarse vertex copies the source vertex at `index * factor`,
    /// clamped to the last source point.
    NearestSample,
}

impl DecimationPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            DecimationPolicy::Unpopulated => "unpopulated",
            DecimationPolicy::NearestSample => "nearest_sample",
        }
    }
}

impl fmt::Display for DecimationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecimationPolicy {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpopulated" => Ok(DecimationPolicy::Unpopulated),
            "nearest_sample" | "nearest-sample" => Ok(DecimationPolicy::NearestSample),
            other => Err(GridError::UnknownPolicy(other.to_string())),
        }
    }
}

impl GridGeometry {
    /// Geometry over the same bounding box with `num_cells / factor` cells per axis.
    ///
    /// A factor that does not divide an axis's cell count truncates, and every
    /// axis keeps at least one cell.
    ///
    /// # Errors
    /// [`GridError::InvalidDecimationFactor`] if `factor` is zero.
    ///
    /// # Examples
    /// ```
    /// use vortexgrid_structures::{GridGeometry, Vec3};
    ///
    /// let fine = GridGeometry::with_num_points(Vec3::ZERO, Vec3::ONE, [9, 5, 17]).unwrap();
    /// let coarse = fine.decimated(2).unwrap();
    /// assert_eq!(coarse.num_cells(), [4, 2, 8]);
    /// assert_eq!(coarse.min_corner(), fine.min_corner());
    /// ```
    pub fn decimated(&self, factor: usize) -> GridResult<GridGeometry> {
        if factor == 0 {
            return Err(GridError::InvalidDecimationFactor(factor));
        }
        let source_cells = self.num_cells();
        if source_cells.iter().any(|cells| cells % factor != 0) {
            warn!(
                target: "vortexgrid-structures",
                "Decimation factor {} does not divide cell counts {:?}; truncating",
                factor,
                source_cells
            );
        }
        let num_points = source_cells.map(|cells| (cells / factor).max(1) + 1);
        Ok(GridGeometry::from_parts(
            self.min_corner(),
            self.max_corner(),
            num_points,
        ))
    }
}

impl<T: Clone + Default> UniformGrid<T> {
    /// Coarser grid whose values are left at `T::default()`.
    pub fn decimated(&self, factor: usize) -> GridResult<UniformGrid<T>> {
        self.decimated_with(factor, DecimationPolicy::Unpopulated)
    }

    /// Coarser grid whose values are derived according to `policy`.
    pub fn decimated_with(
        &self,
        factor: usize,
        policy: DecimationPolicy,
    ) -> GridResult<UniformGrid<T>> {
        let geometry = self.geometry().decimated(factor)?;
        let mut coarse = UniformGrid::new(geometry);

        if policy == DecimationPolicy::NearestSample {
            let source_geometry = self.geometry();
            let source_points = source_geometry.num_points();
            for offset in 0..coarse.len() {
                let coarse_indices = coarse.geometry().indices_from_offset(offset);
                let mut source_indices = [0usize; 3];
                for axis in 0..3 {
                    source_indices[axis] =
                        (coarse_indices[axis] * factor).min(source_points[axis] - 1);
                }
                coarse[offset] = self[source_geometry.offset_from_indices(source_indices)].clone();
            }
        }

        debug!(
            target: "vortexgrid-structures",
            "Decimated grid {:?} -> {:?} (factor {}, policy {})",
            self.geometry().num_points(),
            coarse.geometry().num_points(),
            factor,
            policy
        );
        Ok(coarse)
    }
}
