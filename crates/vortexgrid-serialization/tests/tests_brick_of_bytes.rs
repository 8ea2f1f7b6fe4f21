//! Tests for brick-of-bytes export
//!
//! Exercises the files an export call leaves on disk: byte bodies, footers and
//! the appended OGLE script, for scalar, vector and vorton grids.

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use vortexgrid_serialization::*;
use vortexgrid_structures::{GridGeometry, UniformGrid, Vec3, Vorton};

fn writer_in(dir: &Path, symmetric_range: bool) -> BrickOfBytesWriter {
    BrickOfBytesWriter::new(ExportOptions {
        output_dir: dir.join("Vols"),
        script_dir: dir.to_path_buf(),
        symmetric_range,
    })
}

/// Splits a brick into its byte body and footer line.
fn read_brick(path: &Path, capacity: usize) -> (Vec<u8>, String) {
    let mut bytes = fs::read(path).unwrap();
    let footer = String::from_utf8(bytes.split_off(capacity)).unwrap();
    (bytes, footer)
}

fn offset_valued_cube() -> UniformGrid<f32> {
    let geometry = GridGeometry::new(Vec3::ZERO, Vec3::splat(3.0), 64, false).unwrap();
    let mut grid = UniformGrid::<f32>::new(geometry);
    for (offset, value) in grid.iter_mut().enumerate() {
        *value = offset as f32;
    }
    grid
}

#[cfg(test)]
mod test_scalar_export {
    use super::*;

    #[test]
    fn test_offset_valued_cube_symmetric_export() {
        let dir = tempfile::tempdir().unwrap();
        let grid = offset_valued_cube();
        assert_eq!(grid.geometry().num_points(), [4, 4, 4]);

        let stats = grid.compute_statistics();
        assert_eq!((stats.min, stats.max), (0.0, 63.0));

        let export = writer_in(dir.path(), true)
            .write_scalar(&grid, "cube", 0)
            .unwrap();
        let channel = &export.channels[0];
        assert_eq!(channel.kind, ChannelKind::Scalar);
        assert!(channel.path.ends_with("Vols/cube00000-4x4x4.dat"));

        let (bytes, footer) = read_brick(&channel.path, 64);
        assert_eq!(footer, "MIN -63 MAX 63\n");
        // Non-negative data occupies the upper half of the byte range
        assert_eq!(bytes[0], 127);
        assert_eq!(bytes[63], 255);
        assert!(bytes.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_script_accumulates_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path(), true);
        let grid = offset_valued_cube();
        writer.write_scalar(&grid, "cube", 0).unwrap();
        writer.write_scalar(&grid, "cube", 1).unwrap();

        let script = fs::read_to_string(writer.script_path("cube")).unwrap();
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "# cube ranges:       -63 to        63");
        let frame0 = dir.path().join("Vols").join("cube00000-4x4x4.dat");
        assert_eq!(lines[1], format!("4x4x4 {}", frame0.display()));
        assert!(lines[3].ends_with("cube00001-4x4x4.dat"));
    }

    #[test]
    fn test_constant_grid_maps_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let geometry = GridGeometry::with_num_points(Vec3::ZERO, Vec3::ONE, [3, 3, 3]).unwrap();
        let mut grid = UniformGrid::<f32>::new(geometry);
        grid.fill(4.5);

        let export = writer_in(dir.path(), false)
            .write_scalar(&grid, "flat", 2)
            .unwrap();
        let (bytes, footer) = read_brick(&export.channels[0].path, 27);
        assert!(bytes.iter().all(|&b| b == 0));
        assert_eq!(footer, "MIN 4.5 MAX 4.5\n");
    }

    #[test]
    fn test_unwritable_output_fails_without_touching_script() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let writer = BrickOfBytesWriter::new(ExportOptions {
            output_dir: blocker.join("Vols"),
            script_dir: dir.path().to_path_buf(),
            symmetric_range: true,
        });

        let result = writer.write_scalar(&offset_valued_cube(), "cube", 0);
        assert!(matches!(result, Err(ExportError::Io { .. })));
        assert!(!writer.script_path("cube").exists());
    }
}

#[cfg(test)]
mod test_vector_export {
    use super::*;

    fn swirl() -> UniformGrid<Vec3> {
        let geometry =
            GridGeometry::with_num_points(Vec3::splat(-1.0), Vec3::ONE, [5, 5, 5]).unwrap();
        let mut grid = UniformGrid::<Vec3>::new(geometry.clone());
        for offset in 0..grid.len() {
            let p = geometry.position_from_offset(offset);
            grid[offset] = Vec3::new(-p.y, p.x, 0.25 * p.z);
        }
        grid
    }

    #[test]
    fn test_vector_export_writes_four_bricks() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path(), true);
        let grid = swirl();
        let export = writer.write_vector(&grid, "vel", 3).unwrap();

        assert_eq!(export.channels.len(), 4);
        for channel in &export.channels {
            let (bytes, _) = read_brick(&channel.path, grid.len());
            assert_eq!(bytes.len(), 125);
        }

        let (_, x_footer) = read_brick(&export.channel(ChannelKind::X).unwrap().path, 125);
        assert_eq!(x_footer, "MIN -1 MAX 1\n");
        let (_, z_footer) = read_brick(&export.channel(ChannelKind::Z).unwrap().path, 125);
        assert_eq!(z_footer, "MIN -0.25 MAX 0.25\n");
        let (_, m_footer) = read_brick(&export.channel(ChannelKind::Magnitude).unwrap().path, 125);
        assert_eq!(m_footer, "MIN 0 MAX 1.43614\n");
    }

    #[test]
    fn test_script_lists_components_but_not_magnitude() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path(), true);
        let export = writer.write_vector(&swirl(), "vel", 3).unwrap();

        let script = fs::read_to_string(&export.script_path).unwrap();
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "# vel ranges: {       -1,       -1,    -0.25} to {        1,        1,     0.25}"
        );
        let fields: Vec<&str> = lines[1].split(' ').collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], "5x5x5");
        assert!(fields[1].ends_with("velX00003-5x5x5.dat"));
        assert!(fields[2].ends_with("velY00003-5x5x5.dat"));
        assert!(fields[3].ends_with("velZ00003-5x5x5.dat"));
        assert!(!lines[1].contains("velM"));
    }

    #[test]
    fn test_vorton_export_uses_vorticity_range() {
        let dir = tempfile::tempdir().unwrap();
        let geometry = GridGeometry::with_num_points(Vec3::ZERO, Vec3::ONE, [2, 2, 2]).unwrap();
        let mut grid = UniformGrid::<Vorton>::new(geometry);
        grid[1] = Vorton::new(Vec3::splat(50.0), Vec3::new(0.0, 2.0, 0.0));
        grid[6] = Vorton::new(Vec3::splat(-50.0), Vec3::new(0.0, -0.5, 0.0));

        let export = writer_in(dir.path(), true)
            .write_vector(&grid, "vort", 0)
            .unwrap();
        let y = export.channel(ChannelKind::Y).unwrap();
        assert_eq!(y.range, ChannelRange::new(-2.0, 2.0));
        let (bytes, _) = read_brick(&y.path, 8);
        assert_eq!(bytes[1], 255);
        assert!(bytes[6] < 127);
        assert_eq!(bytes[0], 127);
    }
}

#[cfg(test)]
mod test_quantization_properties {
    use super::*;

    proptest! {
        #[test]
        fn bytes_span_the_channel_range(values in prop::collection::vec(-1000.0f32..1000.0, 8)) {
            let dir = tempfile::tempdir().unwrap();
            let geometry = GridGeometry::with_num_points(Vec3::ZERO, Vec3::ONE, [2, 2, 2]).unwrap();
            let grid = UniformGrid::from_vec(geometry, values.clone()).unwrap();
            let export = writer_in(dir.path(), false).write_scalar(&grid, "p", 0).unwrap();
            let (bytes, _) = read_brick(&export.channels[0].path, 8);

            let stats = grid.compute_statistics();
            for (value, byte) in values.iter().zip(&bytes) {
                if *value == stats.min {
                    prop_assert_eq!(*byte, 0);
                }
                if *value == stats.max && stats.max > stats.min {
                    prop_assert_eq!(*byte, 255);
                }
            }
        }

        #[test]
        fn symmetric_range_preserves_sign(values in prop::collection::vec(-10.0f32..10.0, 1..64)) {
            let range = values
                .iter()
                .fold(ChannelRange::new(f32::INFINITY, f32::NEG_INFINITY), |r, &v| {
                    ChannelRange::new(r.min.min(v), r.max.max(v))
                })
                .symmetric();
            for value in values {
                let byte = range.quantize(value);
                if value < 0.0 {
                    prop_assert!(byte <= 127, "{} -> {}", value, byte);
                }
                if value > 0.0 {
                    prop_assert!(byte >= 127, "{} -> {}", value, byte);
                }
                if value == 0.0 && range.max > 0.0 {
                    prop_assert!((127..=128).contains(&byte));
                }
            }
        }
    }
}
