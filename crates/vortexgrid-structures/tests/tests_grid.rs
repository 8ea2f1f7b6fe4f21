//! Property tests for grid geometry and storage
//!
//! Covers the index algebra (offset bijection, position round-trips), the
//! spacing derivation and decimation ratios over randomly shaped grids.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vortexgrid_structures::{DecimationPolicy, GridGeometry, UniformGrid, Vec3, Vorton};

fn arb_corners() -> impl Strategy<Value = (Vec3, Vec3)> {
    (
        -50.0f32..50.0,
        -50.0f32..50.0,
        -50.0f32..50.0,
        0.5f32..20.0,
        0.5f32..20.0,
        0.5f32..20.0,
    )
        .prop_map(|(x, y, z, dx, dy, dz)| {
            let min = Vec3::new(x, y, z);
            (min, min + Vec3::new(dx, dy, dz))
        })
}

fn arb_geometry() -> impl Strategy<Value = GridGeometry> {
    (arb_corners(), 2usize..12, 2usize..12, 2usize..12).prop_map(|((min, max), nx, ny, nz)| {
        GridGeometry::with_num_points(min, max, [nx, ny, nz]).unwrap()
    })
}

#[cfg(test)]
mod test_index_algebra {
    use super::*;

    proptest! {
        #[test]
        fn offset_indices_bijection(geometry in arb_geometry()) {
            for offset in 0..geometry.capacity() {
                let indices = geometry.indices_from_offset(offset);
                prop_assert_eq!(geometry.offset_from_indices(indices), offset);
            }
            let [nx, ny, nz] = geometry.num_points();
            for iz in 0..nz {
                for iy in 0..ny {
                    for ix in 0..nx {
                        let offset = geometry.offset_from_indices([ix, iy, iz]);
                        prop_assert!(offset < geometry.capacity());
                        prop_assert_eq!(geometry.indices_from_offset(offset), [ix, iy, iz]);
                    }
                }
            }
        }

        #[test]
        fn cell_center_round_trip(geometry in arb_geometry()) {
            let [nx, ny, nz] = geometry.num_points();
            for offset in 0..geometry.capacity() {
                let [ix, iy, iz] = geometry.indices_from_offset(offset);
                // The far boundary points own no cell of their own
                if ix + 1 == nx || iy + 1 == ny || iz + 1 == nz {
                    continue;
                }
                let center = geometry.cell_center(offset);
                prop_assert_eq!(geometry.offset_of_position(center), offset);
            }
        }

        #[test]
        fn nudged_cell_corners_round_trip(geometry in arb_geometry()) {
            let [nx, ny, nz] = geometry.num_points();
            let spacing = geometry.cell_spacing();
            // Relative to the coordinate magnitude so the nudge survives f32 rounding
            let scale = geometry.min_corner().abs().max(geometry.max_corner().abs());
            let nudge = 8.0 * f32::EPSILON * scale.max(geometry.extent());
            for offset in 0..geometry.capacity() {
                let [ix, iy, iz] = geometry.indices_from_offset(offset);
                if ix + 1 == nx || iy + 1 == ny || iz + 1 == nz {
                    continue;
                }
                let corner = geometry.position_from_offset(offset);
                prop_assert_eq!(geometry.offset_of_position(corner + nudge), offset);
                prop_assert_eq!(geometry.offset_of_position(corner + spacing - nudge), offset);
            }
        }

        #[test]
        fn spacing_spans_the_box(
            (min, max) in arb_corners(),
            approx_points in 8usize..20_000,
            power_of_two in any::<bool>(),
        ) {
            let geometry = GridGeometry::new(min, max, approx_points, power_of_two).unwrap();
            let cells = geometry.num_cells();
            for axis in 0..3 {
                prop_assert!(geometry.num_points()[axis] >= 2);
                let expected = (max[axis] - min[axis]) / cells[axis] as f32;
                prop_assert!((geometry.cell_spacing()[axis] - expected).abs() <= 1e-5 * expected.max(1.0));
                if power_of_two {
                    prop_assert!(cells[axis].is_power_of_two());
                }
            }
        }

        #[test]
        fn positions_inside_box_stay_in_storage(
            geometry in arb_geometry(),
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
            fz in 0.0f32..=1.0,
        ) {
            let position = geometry.min_corner() + Vec3::new(fx, fy, fz) * geometry.extent();
            prop_assert!(geometry.offset_of_position(position) < geometry.capacity());
        }

        #[test]
        fn decimation_ratio_for_dividing_factors(
            (min, max) in arb_corners(),
            factor in 1usize..5,
            cx in 1usize..6,
            cy in 1usize..6,
            cz in 1usize..6,
        ) {
            let fine = GridGeometry::with_num_points(
                min,
                max,
                [cx * factor + 1, cy * factor + 1, cz * factor + 1],
            )
            .unwrap();
            let coarse = fine.decimated(factor).unwrap();
            prop_assert_eq!(coarse.num_cells(), [cx, cy, cz]);
            prop_assert_eq!(coarse.min_corner(), fine.min_corner());
            prop_assert_eq!(coarse.max_corner(), fine.max_corner());
        }
    }
}

#[cfg(test)]
mod test_storage {
    use super::*;

    #[test]
    fn test_random_vortons_land_in_owning_cells() {
        let geometry = GridGeometry::new(Vec3::splat(-1.0), Vec3::ONE, 512, true).unwrap();
        let mut grid = UniformGrid::<Vorton>::new(geometry.clone());
        let mut counts = UniformGrid::<u32>::with_shape_of(&grid);

        // Seeded so failures reproduce
        let mut rng = StdRng::seed_from_u64(0x2545_f491);
        for _ in 0..1000 {
            let position = Vec3::new(
                rng.gen_range(-1.0f32..1.0),
                rng.gen_range(-1.0f32..1.0),
                rng.gen_range(-1.0f32..1.0),
            );
            let vorton = Vorton::new(position, Vec3::new(0.0, 0.0, position.x));
            grid[position] = vorton;
            counts[position] += 1;

            let [ix, iy, iz] = geometry.indices_of_position(position);
            let corner = geometry.position_from_offset(geometry.offset_of_position(position));
            let spacing = geometry.cell_spacing();
            assert!(position.cmpge(corner - 1e-5).all(), "{position} below {corner}");
            assert!(
                position.cmple(corner + spacing + 1e-5).all(),
                "{position} past cell [{ix},{iy},{iz}]"
            );
        }
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 1000);

        let stats = grid.compute_statistics();
        assert!(stats.min.position.cmpge(Vec3::splat(-1.0)).all());
        assert!(stats.max.position.cmple(Vec3::ONE).all());
    }

    #[test]
    fn test_power_of_two_grid_decimates_repeatedly() {
        let geometry = GridGeometry::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 4.0), 4096, true).unwrap();
        let mut grid = UniformGrid::<f32>::new(geometry);
        for (offset, value) in grid.iter_mut().enumerate() {
            *value = offset as f32;
        }
        let half = grid
            .decimated_with(2, DecimationPolicy::NearestSample)
            .unwrap();
        let quarter = half
            .decimated_with(2, DecimationPolicy::NearestSample)
            .unwrap();
        for axis in 0..3 {
            assert_eq!(
                half.geometry().num_cells()[axis] * 2,
                grid.geometry().num_cells()[axis]
            );
        }
        assert_eq!(quarter[0], grid[0]);
        let last = quarter.len() - 1;
        assert_eq!(quarter[last], grid[grid.len() - 1]);
    }
}
