// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dense storage paired with a [`GridGeometry`].

use std::ops::{Index, IndexMut};

use glam::Vec3;
use ndarray::{ArrayView3, ArrayViewMut3};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{GridError, GridResult};
use crate::geometry::GridGeometry;

/// A dense, vertex-centered grid holding one `T` per grid point.
///
/// Values are addressed by flat offset (see [`GridGeometry::offset_from_indices`])
/// or by world-space position. Storage is a single contiguous buffer laid out
/// X-fastest, then Y, then Z.
///
/// WARNING: Position access clamps to the grid. Writing through a position
/// outside the bounding box lands on the nearest boundary point, so callers
/// inserting particles are expected to keep them inside the box.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformGrid<T> {
    geometry: GridGeometry,
    contents: Vec<T>,
}

impl<T: Clone + Default> UniformGrid<T> {
    /// Allocates a grid filled with `T::default()`.
    pub fn new(geometry: GridGeometry) -> Self {
        let contents = vec![T::default(); geometry.capacity()];
        Self { geometry, contents }
    }

    /// Allocates a grid with the same shape as `other`, possibly of a different value type.
    ///
    /// Useful for auxiliary arrays such as an index map over a grid of particles.
    pub fn with_shape_of<U>(other: &UniformGrid<U>) -> Self {
        Self::new(other.geometry.clone())
    }

    /// Replaces the geometry and reallocates storage. Previous contents are discarded.
    pub fn resize(&mut self, geometry: GridGeometry) {
        self.contents.clear();
        self.contents.resize(geometry.capacity(), T::default());
        self.geometry = geometry;
    }

    pub fn fill(&mut self, value: T) {
        self.contents.fill(value);
    }
}

impl<T> UniformGrid<T> {
    /// Wraps existing values, which must already be in flat offset order.
    ///
    /// # Errors
    /// Returns [`GridError::ShapeMismatch`] if `contents` does not hold exactly
    /// one value per grid point.
    pub fn from_vec(geometry: GridGeometry, contents: Vec<T>) -> GridResult<Self> {
        if contents.len() != geometry.capacity() {
            return Err(GridError::ShapeMismatch(format!(
                "grid {:?} needs {} values but {} were provided",
                geometry.num_points(),
                geometry.capacity(),
                contents.len()
            )));
        }
        Ok(Self { geometry, contents })
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Number of stored values, equal to the geometry's capacity.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn get(&self, offset: usize) -> Option<&T> {
        self.contents.get(offset)
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.contents.get_mut(offset)
    }

    /// Checked offset access reporting the grid capacity on failure.
    pub fn try_get(&self, offset: usize) -> GridResult<&T> {
        let capacity = self.len();
        self.contents
            .get(offset)
            .ok_or(GridError::OffsetOutOfRange { offset, capacity })
    }

    /// Value stored at the grid point owning `position`.
    pub fn at_position(&self, position: Vec3) -> &T {
        &self.contents[self.geometry.offset_of_position(position)]
    }

    pub fn at_position_mut(&mut self, position: Vec3) -> &mut T {
        let offset = self.geometry.offset_of_position(position);
        &mut self.contents[offset]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.contents
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.contents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.contents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.contents.iter_mut()
    }

    /// Consumes the grid, returning its geometry and flat storage.
    pub fn into_parts(self) -> (GridGeometry, Vec<T>) {
        (self.geometry, self.contents)
    }

    /// Borrows storage as a 3D array indexed `[iz, iy, ix]`.
    pub fn view(&self) -> GridResult<ArrayView3<'_, T>> {
        let [nx, ny, nz] = self.geometry.num_points();
        ArrayView3::from_shape((nz, ny, nx), &self.contents)
            .map_err(|e| GridError::ShapeMismatch(e.to_string()))
    }

    /// Mutably borrows storage as a 3D array indexed `[iz, iy, ix]`.
    pub fn view_mut(&mut self) -> GridResult<ArrayViewMut3<'_, T>> {
        let [nx, ny, nz] = self.geometry.num_points();
        ArrayViewMut3::from_shape((nz, ny, nx), &mut self.contents)
            .map_err(|e| GridError::ShapeMismatch(e.to_string()))
    }
}

#[cfg(feature = "parallel")]
impl<T: Send> UniformGrid<T> {
    /// Splits storage into disjoint XY slabs, one per Z index, for concurrent population.
    ///
    /// Each item is `(iz, slab)` where `slab[ix + nx * iy]` is the value at `(ix, iy, iz)`.
    pub fn par_z_slabs_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = (usize, &mut [T])> + '_ {
        let [nx, ny, _] = self.geometry.num_points();
        self.contents.par_chunks_mut(nx * ny).enumerate()
    }
}

impl<T> Index<usize> for UniformGrid<T> {
    type Output = T;

    fn index(&self, offset: usize) -> &T {
        &self.contents[offset]
    }
}

impl<T> IndexMut<usize> for UniformGrid<T> {
    fn index_mut(&mut self, offset: usize) -> &mut T {
        &mut self.contents[offset]
    }
}

impl<T> Index<Vec3> for UniformGrid<T> {
    type Output = T;

    fn index(&self, position: Vec3) -> &T {
        self.at_position(position)
    }
}

impl<T> IndexMut<Vec3> for UniformGrid<T> {
    fn index_mut(&mut self, position: Vec3) -> &mut T {
        self.at_position_mut(position)
    }
}

impl<'a, T> IntoIterator for &'a UniformGrid<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter()
    }
}
