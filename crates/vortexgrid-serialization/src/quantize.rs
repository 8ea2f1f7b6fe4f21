// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Linear quantization of floating-point channels to bytes.

use serde::{Deserialize, Serialize};

/// Just under 256, so that the channel maximum truncates to 255 instead of wrapping.
pub const ALMOST_256: f32 = 256.0 * (1.0 - f32::EPSILON);

/// Inclusive value range a channel is quantized over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: f32,
    pub max: f32,
}

impl ChannelRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Widens the range to `[-m, m]` with `m = max(-min, max)`, centering zero.
    pub fn symmetric(self) -> Self {
        let extreme = (-self.min).max(self.max);
        Self {
            min: -extreme,
            max: extreme,
        }
    }

    /// Width used as the divisor, floored so a constant channel maps to 0
    /// instead of dividing by zero.
    pub fn span(&self) -> f32 {
        (self.max - self.min).max(f32::MIN_POSITIVE)
    }

    /// Maps `value` in `[min, max]` to `[0, 255]` by truncation.
    pub fn quantize(&self, value: f32) -> u8 {
        let normalized = (value - self.min) / self.span();
        debug_assert!(
            (0.0..=1.0).contains(&normalized),
            "value {} outside channel range [{}, {}]",
            value,
            self.min,
            self.max
        );
        let scaled = normalized * ALMOST_256;
        debug_assert!((0.0..256.0).contains(&scaled));
        scaled as u8
    }
}
