// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # VortexGrid - uniform grids for vortex particle fluid simulation
//!
//! VortexGrid provides the dense, vertex-centered 3D grid used to accumulate
//! vortex particles and sample fields, plus a brick-of-bytes exporter for
//! volume viewers. This crate re-exports the workspace members.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! vortexgrid = "0.0.1-beta.18"
//! ```
//!
//! ```rust,no_run
//! use vortexgrid::prelude::*;
//!
//! // A grid of roughly 4096 points over [-1, 1]^3
//! let geometry = GridGeometry::new(Vec3::splat(-1.0), Vec3::ONE, 4096, false)?;
//! let mut vorticity = UniformGrid::<Vec3>::new(geometry);
//!
//! // Deposit a value at the cell containing a position
//! *vorticity.at_position_mut(Vec3::new(0.1, 0.2, 0.3)) += Vec3::Z;
//!
//! let stats = vorticity.compute_statistics();
//! println!("z range [{}, {}]", stats.min.z, stats.max.z);
//!
//! // Export X, Y, Z and magnitude bricks plus a vort.ogle script entry
//! let writer = BrickOfBytesWriter::new(ExportOptions::default());
//! let export = writer.write_vector(&vorticity, "vort", 0)?;
//! println!("{}", export.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: vortexgrid-config, vortexgrid-observability│
//! │  (TOML configuration, logging setup)                    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Structures: vortexgrid-structures                      │
//! │  (GridGeometry, UniformGrid, Statistics, decimation)    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Serialization: vortexgrid-serialization                │
//! │  (brick-of-bytes volumes, OGLE scripts, manifests)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use vortexgrid_config as config;
pub use vortexgrid_observability as observability;
pub use vortexgrid_serialization as serialization;
pub use vortexgrid_structures as structures;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::structures::{
        DecimationPolicy, GridError, GridGeometry, GridIndices, GridResult, Reducible,
        Statistics, UniformGrid, Vec3, Vorton,
    };

    pub use crate::serialization::{
        BrickExport, BrickOfBytesWriter, ChannelKind, ChannelRange, ExportError, ExportOptions,
        ExportResult, VectorChannels,
    };

    pub use crate::config::{load_config_or_default, validate_config, VortexGridConfig};
}
