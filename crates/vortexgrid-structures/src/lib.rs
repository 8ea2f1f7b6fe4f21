//! The core crate for VortexGrid. Defines the dense, vertex-centered uniform grid
//! used to accumulate vortex particles and sample fields over 3D space, along
//! with its index algebra, per-component statistics and decimation.

mod decimation;
mod error;
mod geometry;
mod statistics;
mod uniform_grid;
mod values;

pub use decimation::DecimationPolicy;
pub use error::{GridError, GridResult};
pub use geometry::{GridGeometry, GridIndices};
pub use statistics::{Reducible, Statistics};
pub use uniform_grid::UniformGrid;
pub use values::Vorton;

// Vector type used for positions and vector-valued cells
pub use glam::Vec3;
