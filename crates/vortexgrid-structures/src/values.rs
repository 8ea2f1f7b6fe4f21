// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Value types stored in grid cells beyond plain scalars and vectors.

use glam::Vec3;

/// Vortex particle accumulated into a grid cell: where it sits and how it spins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vorton {
    pub position: Vec3,
    pub vorticity: Vec3,
}

impl Vorton {
    pub fn new(position: Vec3, vorticity: Vec3) -> Self {
        Self {
            position,
            vorticity,
        }
    }
}
