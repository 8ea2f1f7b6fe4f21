// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Brick-of-bytes volume export.
//!
//! A brick is a headerless run of `nx * ny * nz` bytes, X varying fastest,
//! followed by a single `MIN <g> MAX <g>` text line giving the value range the
//! bytes were quantized over. Scalar grids produce one brick; vector-valued
//! grids produce one brick per component plus one for the magnitude.
//!
//! ```text
//! <output_dir>/<base><frame:05>-<nx>x<ny>x<nz>.dat          scalar
//! <output_dir>/<base>{X,Y,Z,M}<frame:05>-<nx>x<ny>x<nz>.dat vector
//! <script_dir>/<base>.ogle                                 appended index
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use vortexgrid_config::ExportConfig;
use vortexgrid_structures::{Reducible, UniformGrid, Vec3, Vorton};

use crate::error::{ExportError, ExportResult};
use crate::manifest::{BrickExport, ChannelExport, ChannelKind};
use crate::printf::format_g;
use crate::quantize::ChannelRange;
use crate::script;

/// A grid value that exports as three signed components plus a magnitude.
pub trait VectorChannels: Reducible {
    /// The 3-vector whose components and length are quantized.
    fn channels(&self) -> Vec3;
}

impl VectorChannels for Vec3 {
    fn channels(&self) -> Vec3 {
        *self
    }
}

impl VectorChannels for Vorton {
    fn channels(&self) -> Vec3 {
        self.vorticity
    }
}

/// Where bricks go and how their ranges are chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Directory receiving `.dat` files. Paths are recorded in the script as given.
    pub output_dir: PathBuf,
    /// Directory holding `<base>.ogle`.
    pub script_dir: PathBuf,
    /// Widen every channel range to `[-m, m]` so zero lands on the middle byte.
    pub symmetric_range: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Vols"),
            script_dir: PathBuf::from("."),
            symmetric_range: true,
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            script_dir: config.script_dir.clone(),
            symmetric_range: config.symmetric_range,
        }
    }
}

/// Writes grids as brick-of-bytes files and indexes them in an OGLE script.
#[derive(Debug, Clone, Default)]
pub struct BrickOfBytesWriter {
    options: ExportOptions,
}

impl BrickOfBytesWriter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn script_path(&self, file_base: &str) -> PathBuf {
        script::script_path(&self.options.script_dir, file_base)
    }

    /// Exports a scalar grid as a single brick.
    ///
    /// # Errors
    /// * [`ExportError::InvalidFilenameBase`] if `file_base` is empty or contains a path separator.
    /// * [`ExportError::Io`] if the output directory, data file or script cannot be written.
    pub fn write_scalar(
        &self,
        grid: &UniformGrid<f32>,
        file_base: &str,
        frame: u32,
    ) -> ExportResult<BrickExport> {
        validate_file_base(file_base)?;
        let dimensions = grid.geometry().num_points();

        let stats = grid.compute_statistics();
        let mut range = ChannelRange::new(stats.min, stats.max);
        if self.options.symmetric_range {
            range = range.symmetric();
        }
        debug!(
            target: "vortexgrid-serialization",
            "Scalar brick {} range [{}, {}]", file_base, range.min, range.max
        );

        let path = self.data_path(file_base, ChannelKind::Scalar, frame, dimensions);
        let mut sink = self.open_data_files(&[path.as_path()])?;

        let script_path = self.script_path(file_base);
        script::append_lines(
            &script_path,
            &[
                script::scalar_range_comment(file_base, range.min, range.max),
                script::data_line(dimensions, &[path.as_path()]),
            ],
        )?;

        let bytes: Vec<u8> = grid.iter().map(|&value| range.quantize(value)).collect();
        write_brick(&mut sink[0], &path, &bytes, range)?;

        info!(
            target: "vortexgrid-serialization",
            "Exported scalar brick {} ({}x{}x{})",
            path.display(),
            dimensions[0],
            dimensions[1],
            dimensions[2]
        );

        Ok(BrickExport {
            file_base: file_base.to_string(),
            frame,
            dimensions,
            symmetric_range: self.options.symmetric_range,
            script_path,
            channels: vec![ChannelExport {
                kind: ChannelKind::Scalar,
                path,
                range,
                listed_in_script: true,
            }],
        })
    }

    /// Exports a vector-valued grid as X, Y, Z and magnitude bricks.
    ///
    /// The magnitude range is `[0, |e|]` where `e` is the component-wise
    /// `max(-min, max)` vector, which bounds every cell's length without a
    /// second pass. Only the X, Y and Z files are named in the script.
    ///
    /// # Errors
    /// Same as [`write_scalar`](Self::write_scalar).
    pub fn write_vector<T: VectorChannels>(
        &self,
        grid: &UniformGrid<T>,
        file_base: &str,
        frame: u32,
    ) -> ExportResult<BrickExport> {
        validate_file_base(file_base)?;
        let dimensions = grid.geometry().num_points();

        let stats = grid.compute_statistics();
        let mut min = stats.min.channels();
        let mut max = stats.max.channels();
        let extreme = (-min).max(max);
        let magnitude_max = extreme.length();
        if self.options.symmetric_range {
            max = extreme;
            min = -extreme;
        }
        let ranges = [
            ChannelRange::new(min.x, max.x),
            ChannelRange::new(min.y, max.y),
            ChannelRange::new(min.z, max.z),
            ChannelRange::new(0.0, magnitude_max),
        ];
        debug!(
            target: "vortexgrid-serialization",
            "Vector brick {} range {} to {} (|max| {})", file_base, min, max, magnitude_max
        );

        let paths: Vec<PathBuf> = ChannelKind::VECTOR
            .iter()
            .map(|&kind| self.data_path(file_base, kind, frame, dimensions))
            .collect();
        let path_refs: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
        let mut sinks = self.open_data_files(&path_refs)?;

        let script_path = self.script_path(file_base);
        script::append_lines(
            &script_path,
            &[
                script::vector_range_comment(file_base, min, max),
                script::data_line(dimensions, &path_refs[..3]),
            ],
        )?;

        let mut bricks: [Vec<u8>; 4] = std::array::from_fn(|_| Vec::with_capacity(grid.len()));
        for value in grid.iter() {
            let vector = value.channels();
            bricks[0].push(ranges[0].quantize(vector.x));
            bricks[1].push(ranges[1].quantize(vector.y));
            bricks[2].push(ranges[2].quantize(vector.z));
            bricks[3].push(ranges[3].quantize(vector.length()));
        }
        for ((sink, path), (bytes, range)) in sinks
            .iter_mut()
            .zip(&paths)
            .zip(bricks.iter().zip(ranges))
        {
            write_brick(sink, path, bytes, range)?;
        }

        info!(
            target: "vortexgrid-serialization",
            "Exported vector bricks {}[XYZM]{:05} ({}x{}x{}) to {}",
            file_base,
            frame,
            dimensions[0],
            dimensions[1],
            dimensions[2],
            self.options.output_dir.display()
        );

        let channels = ChannelKind::VECTOR
            .iter()
            .zip(paths)
            .zip(ranges)
            .map(|((&kind, path), range)| ChannelExport {
                kind,
                path,
                range,
                listed_in_script: kind != ChannelKind::Magnitude,
            })
            .collect();

        Ok(BrickExport {
            file_base: file_base.to_string(),
            frame,
            dimensions,
            symmetric_range: self.options.symmetric_range,
            script_path,
            channels,
        })
    }

    fn data_path(
        &self,
        file_base: &str,
        kind: ChannelKind,
        frame: u32,
        dimensions: [usize; 3],
    ) -> PathBuf {
        let [nx, ny, nz] = dimensions;
        self.options.output_dir.join(format!(
            "{}{}{:05}-{}x{}x{}.dat",
            file_base,
            kind.suffix(),
            frame,
            nx,
            ny,
            nz
        ))
    }

    /// Opens every data file up front so a failure leaves the script untouched.
    fn open_data_files(&self, paths: &[&Path]) -> ExportResult<Vec<BufWriter<File>>> {
        fs::create_dir_all(&self.options.output_dir)
            .map_err(|e| ExportError::io(&self.options.output_dir, e))?;
        paths
            .iter()
            .map(|path| {
                File::create(path)
                    .map(BufWriter::new)
                    .map_err(|e| ExportError::io(*path, e))
            })
            .collect()
    }
}

fn write_brick(
    sink: &mut BufWriter<File>,
    path: &Path,
    bytes: &[u8],
    range: ChannelRange,
) -> ExportResult<()> {
    let footer = format!(
        "MIN {} MAX {}\n",
        format_g(f64::from(range.min), 6),
        format_g(f64::from(range.max), 6)
    );
    sink.write_all(bytes)
        .and_then(|_| sink.write_all(footer.as_bytes()))
        .and_then(|_| sink.flush())
        .map_err(|e| ExportError::io(path, e))
}

fn validate_file_base(file_base: &str) -> ExportResult<()> {
    if file_base.is_empty() || file_base.contains(|c| c == '/' || c == '\\') {
        return Err(ExportError::InvalidFilenameBase(file_base.to_string()));
    }
    Ok(())
}
