// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-component minimum / maximum reduction over grid contents.
//!
//! Every value type that can be summarized implements [`Reducible`], which
//! supplies the identity elements of the fold and a component-wise combine.
//! The traversal itself lives once in [`UniformGrid::compute_statistics`].

use glam::Vec3;

use crate::uniform_grid::UniformGrid;
use crate::values::Vorton;

/// A value whose components can be folded into running minima and maxima.
pub trait Reducible: Copy {
    /// Starting point of a running minimum (every component at +∞).
    fn min_identity() -> Self;

    /// Starting point of a running maximum (every component at -∞).
    fn max_identity() -> Self;

    fn component_min(self, other: Self) -> Self;

    fn component_max(self, other: Self) -> Self;
}

impl Reducible for f32 {
    fn min_identity() -> Self {
        f32::INFINITY
    }

    fn max_identity() -> Self {
        f32::NEG_INFINITY
    }

    fn component_min(self, other: Self) -> Self {
        self.min(other)
    }

    fn component_max(self, other: Self) -> Self {
        self.max(other)
    }
}

impl Reducible for u32 {
    fn min_identity() -> Self {
        u32::MAX
    }

    fn max_identity() -> Self {
        u32::MIN
    }

    fn component_min(self, other: Self) -> Self {
        self.min(other)
    }

    fn component_max(self, other: Self) -> Self {
        self.max(other)
    }
}

impl Reducible for Vec3 {
    fn min_identity() -> Self {
        Vec3::INFINITY
    }

    fn max_identity() -> Self {
        Vec3::NEG_INFINITY
    }

    fn component_min(self, other: Self) -> Self {
        self.min(other)
    }

    fn component_max(self, other: Self) -> Self {
        self.max(other)
    }
}

// Position and vorticity are reduced independently of each other.
impl Reducible for Vorton {
    fn min_identity() -> Self {
        Vorton::new(Vec3::INFINITY, Vec3::INFINITY)
    }

    fn max_identity() -> Self {
        Vorton::new(Vec3::NEG_INFINITY, Vec3::NEG_INFINITY)
    }

    fn component_min(self, other: Self) -> Self {
        Vorton::new(
            self.position.min(other.position),
            self.vorticity.min(other.vorticity),
        )
    }

    fn component_max(self, other: Self) -> Self {
        Vorton::new(
            self.position.max(other.position),
            self.vorticity.max(other.vorticity),
        )
    }
}

/// Component-wise range of a set of values, shaped like the values themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics<T> {
    pub min: T,
    pub max: T,
}

impl<T: Reducible> Statistics<T> {
    /// The empty range `(+∞, -∞)`; folding any value into it yields that value.
    pub fn identity() -> Self {
        Self {
            min: T::min_identity(),
            max: T::max_identity(),
        }
    }

    pub fn include(&mut self, value: T) {
        self.min = self.min.component_min(value);
        self.max = self.max.component_max(value);
    }

    /// Combines two partial reductions, e.g. from different halves of a grid.
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.component_min(other.min),
            max: self.max.component_max(other.max),
        }
    }

    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().fold(Self::identity(), |mut stats, &value| {
            stats.include(value);
            stats
        })
    }
}

impl<T: Reducible> UniformGrid<T> {
    /// Minimum and maximum of every component over all stored values.
    ///
    /// Visits each grid point exactly once and never mutates storage.
    ///
    /// # Examples
    /// ```
    /// use vortexgrid_structures::{GridGeometry, UniformGrid, Vec3};
    ///
    /// let geometry = GridGeometry::with_num_points(Vec3::ZERO, Vec3::ONE, [2, 2, 2]).unwrap();
    /// let mut grid = UniformGrid::<f32>::new(geometry);
    /// grid[3] = -2.0;
    /// grid[5] = 7.5;
    /// let stats = grid.compute_statistics();
    /// assert_eq!((stats.min, stats.max), (-2.0, 7.5));
    /// ```
    pub fn compute_statistics(&self) -> Statistics<T> {
        let stats = Statistics::from_values(self.as_slice());
        tracing::trace!(target: "vortexgrid-structures", "Reduced {} grid values", self.len());
        stats
    }
}
