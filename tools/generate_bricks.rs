// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synthetic brick generator.
//!
//! Seeds a vortex ring into a uniform grid, derives its induced velocity and
//! vorticity magnitude, and exports every field (plus a decimated velocity
//! field) as brick-of-bytes volumes for each frame.
//!
//! Per-crate debug flags (`--debug-<crate>`, `--debug-all`) are accepted in
//! addition to the options below.

use std::collections::HashMap;
use std::env;
use std::f32::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::{debug, info};

use vortexgrid::config::{load_config_or_default, validate_config, VortexGridConfig};
use vortexgrid::observability::{
    debug_flags_help, init_console_logging, CrateDebugFlags, LoggingGuard,
};
use vortexgrid::serialization::{BrickExport, BrickOfBytesWriter, ExportOptions};
use vortexgrid::structures::{DecimationPolicy, GridGeometry, UniformGrid, Vec3, Vorton};

/// Smoothing radius of the Biot-Savart kernel, in units of cell spacing
const CORE_RADIUS_CELLS: f32 = 1.5;

/// Export a synthetic vortex ring as brick-of-bytes volumes
#[derive(Parser, Debug)]
#[command(name = "generate_bricks", version, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Path to the configuration file (searched for when omitted, defaults when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to export
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Vortons seeded around the ring
    #[arg(long, default_value_t = 2048)]
    vortons: usize,

    /// Ring radius as a fraction of the smallest half-extent of the domain
    #[arg(long, default_value_t = 0.5)]
    ring_radius: f32,

    /// Distance the ring travels along +Z per frame, as a fraction of the Z extent
    #[arg(long, default_value_t = 0.02)]
    advance: f32,

    /// Override grid.approx_points
    #[arg(long)]
    approx_points: Option<usize>,

    /// Override export.output_dir
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Override export.file_base
    #[arg(long)]
    file_base: Option<String>,

    /// Override decimation.factor
    #[arg(long)]
    decimation_factor: Option<usize>,

    /// Override decimation.policy (unpopulated, nearest_sample)
    #[arg(long)]
    decimation_policy: Option<String>,

    /// Write a JSON manifest next to each exported brick set
    #[arg(long, default_value_t = false)]
    manifest: bool,

    /// Log to the console only, without per-run log files
    #[arg(long, default_value_t = false)]
    console_only: bool,
}

impl Args {
    fn cli_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(points) = self.approx_points {
            overrides.insert("approx_points".to_string(), points.to_string());
        }
        if let Some(dir) = &self.output_dir {
            overrides.insert("output_dir".to_string(), dir.display().to_string());
        }
        if let Some(base) = &self.file_base {
            overrides.insert("file_base".to_string(), base.clone());
        }
        if let Some(factor) = self.decimation_factor {
            overrides.insert("decimation_factor".to_string(), factor.to_string());
        }
        if let Some(policy) = &self.decimation_policy {
            overrides.insert("decimation_policy".to_string(), policy.clone());
        }
        overrides
    }
}

fn main() -> Result<()> {
    // Debug flags are not clap options; split them off before parsing
    let (debug_args, clap_args): (Vec<String>, Vec<String>) =
        env::args().partition(|arg| arg.starts_with("--debug-"));
    let mut debug_flags = CrateDebugFlags::from_args(debug_args);
    if let Ok(value) = env::var("VORTEXGRID_DEBUG") {
        debug_flags.apply_env_value(&value);
    }
    let args = Args::parse_from(clap_args);

    let config = load_config_or_default(args.config.as_deref(), Some(&args.cli_overrides()))
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    let _logging_guard = init_logging(&debug_flags, &config, args.console_only)?;
    info!(
        target: "generate_bricks",
        "generate_bricks {} ({} frames, {} vortons)",
        vortexgrid::observability::VERSION,
        args.frames,
        args.vortons
    );

    let policy: DecimationPolicy = config.decimation.policy.parse()?;
    let geometry = GridGeometry::new(
        Vec3::from(config.grid.min_corner),
        Vec3::from(config.grid.max_corner),
        config.grid.approx_points,
        config.grid.power_of_two_cells,
    )
    .context("Failed to derive grid geometry")?;
    info!(
        target: "generate_bricks",
        "Grid {:?} points, spacing {}",
        geometry.num_points(),
        geometry.cell_spacing()
    );

    let writer = BrickOfBytesWriter::new(ExportOptions::from_config(&config.export));
    let base = config.export.file_base.as_str();
    let velocity_base = format!("{}_vel", base);
    let magnitude_base = format!("{}_mag", base);
    let decimated_base = format!("{}_vel_dec", base);

    for frame in 0..args.frames {
        let ring = vortex_ring(&geometry, &args, frame);
        let vortons = deposit_vortons(&geometry, &ring);
        let velocity = induced_velocity(&geometry, &ring);
        let magnitude = vorticity_magnitude(&vortons)?;
        let decimated = velocity
            .decimated_with(config.decimation.factor, policy)
            .context("Failed to decimate velocity grid")?;

        let exports = [
            writer.write_vector(&vortons, base, frame)?,
            writer.write_vector(&velocity, &velocity_base, frame)?,
            writer.write_scalar(&magnitude, &magnitude_base, frame)?,
            writer.write_vector(&decimated, &decimated_base, frame)?,
        ];

        if args.manifest {
            for export in &exports {
                write_manifest(&config, export)?;
            }
        }
        info!(target: "generate_bricks", "Frame {} exported", frame);
    }

    for script_base in [base, velocity_base.as_str(), magnitude_base.as_str(), decimated_base.as_str()] {
        info!(
            target: "generate_bricks",
            "Script: {}",
            writer.script_path(script_base).display()
        );
    }
    Ok(())
}

fn init_logging(
    debug_flags: &CrateDebugFlags,
    config: &VortexGridConfig,
    console_only: bool,
) -> Result<Option<LoggingGuard>> {
    if console_only {
        init_console_logging(debug_flags, &config.logging.level)?;
        return Ok(None);
    }
    let guard = vortexgrid::observability::init_logging(
        debug_flags,
        &config.logging.level,
        Some(config.logging.log_dir.clone()),
        Some(config.logging.retention_days),
        Some(config.logging.retention_runs),
    )?;
    Ok(Some(guard))
}

/// Vortons spaced evenly around a ring in the XY plane, vorticity tangent to the ring.
fn vortex_ring(geometry: &GridGeometry, args: &Args, frame: u32) -> Vec<Vorton> {
    let center = (geometry.min_corner() + geometry.max_corner()) * 0.5;
    let half_extent = geometry.extent() * 0.5;
    let radius = args.ring_radius * half_extent.x.min(half_extent.y);
    let z = center.z - 0.5 * half_extent.z + args.advance * geometry.extent().z * frame as f32;
    let count = args.vortons.max(1);
    let strength = TAU * radius / count as f32;

    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            let (sin, cos) = angle.sin_cos();
            let position = Vec3::new(center.x + radius * cos, center.y + radius * sin, z);
            let tangent = Vec3::new(-sin, cos, 0.0);
            Vorton::new(position, tangent * strength)
        })
        .collect()
}

/// Accumulates vorticity into the cell containing each vorton.
fn deposit_vortons(geometry: &GridGeometry, ring: &[Vorton]) -> UniformGrid<Vorton> {
    let mut grid = UniformGrid::<Vorton>::new(geometry.clone());
    for vorton in ring {
        let offset = geometry.offset_of_position(vorton.position);
        let cell = &mut grid[offset];
        cell.position = geometry.position_from_offset(offset);
        cell.vorticity += vorton.vorticity;
    }
    debug!(target: "generate_bricks", "Deposited {} vortons", ring.len());
    grid
}

/// Evaluates the regularized Biot-Savart velocity of the ring at every grid point.
fn induced_velocity(geometry: &GridGeometry, ring: &[Vorton]) -> UniformGrid<Vec3> {
    let mut grid = UniformGrid::<Vec3>::new(geometry.clone());
    let [nx, ny, _] = geometry.num_points();
    let core = CORE_RADIUS_CELLS * geometry.cell_spacing().max_element().max(f32::EPSILON);
    let core_squared = core * core;
    let one_over_four_pi = 1.0 / (2.0 * TAU);

    grid.par_z_slabs_mut().for_each(|(iz, slab)| {
        for iy in 0..ny {
            for ix in 0..nx {
                let point = geometry.position_from_offset(geometry.offset_from_indices([ix, iy, iz]));
                let mut velocity = Vec3::ZERO;
                for vorton in ring {
                    let separation = point - vorton.position;
                    let distance_squared = separation.length_squared() + core_squared;
                    let falloff = distance_squared * distance_squared.sqrt();
                    velocity += vorton.vorticity.cross(separation) / falloff;
                }
                slab[ix + nx * iy] = velocity * one_over_four_pi;
            }
        }
    });
    grid
}

fn vorticity_magnitude(vortons: &UniformGrid<Vorton>) -> Result<UniformGrid<f32>> {
    let magnitudes = vortons.iter().map(|v| v.vorticity.length()).collect();
    Ok(UniformGrid::from_vec(vortons.geometry().clone(), magnitudes)?)
}

fn write_manifest(config: &VortexGridConfig, export: &BrickExport) -> Result<()> {
    let path = manifest_path(&config.export.output_dir, export);
    let json = export.to_json()?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write manifest {}", path.display()))?;
    debug!(target: "generate_bricks", "Manifest written to {}", path.display());
    Ok(())
}

fn manifest_path(output_dir: &Path, export: &BrickExport) -> PathBuf {
    output_dir.join(format!("{}{:05}.json", export.file_base, export.frame))
}
