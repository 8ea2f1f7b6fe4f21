//! # VortexGrid Serialization
//!
//! Exports uniform grids as brick-of-bytes volumes: raw 8-bit channels, each
//! quantized linearly over the channel's value range and terminated with a
//! `MIN <g> MAX <g>` footer so viewers can recover physical values. Every
//! export also appends to a `<base>.ogle` script indexing the written files.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use vortexgrid_serialization::{BrickOfBytesWriter, ExportOptions};
//! use vortexgrid_structures::{GridGeometry, UniformGrid, Vec3};
//!
//! let geometry = GridGeometry::new(Vec3::splat(-1.0), Vec3::ONE, 4096, false).unwrap();
//! let density = UniformGrid::<f32>::new(geometry);
//!
//! let writer = BrickOfBytesWriter::new(ExportOptions::default());
//! let export = writer.write_scalar(&density, "density", 0).unwrap();
//! println!("{}", export.to_json().unwrap());
//! ```

mod brick_of_bytes;
mod error;
mod manifest;
mod printf;
mod quantize;
mod script;

pub use brick_of_bytes::{BrickOfBytesWriter, ExportOptions, VectorChannels};
pub use error::{ExportError, ExportResult};
pub use manifest::{BrickExport, ChannelExport, ChannelKind};
pub use printf::{format_g, format_g_padded};
pub use quantize::{ChannelRange, ALMOST_256};
pub use script::script_path;
