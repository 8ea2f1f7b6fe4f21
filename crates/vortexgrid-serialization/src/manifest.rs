// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Record of what a single export call wrote.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::quantize::ChannelRange;

/// One byte stream of a brick export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Scalar,
    X,
    Y,
    Z,
    Magnitude,
}

impl ChannelKind {
    /// Vector channels in file-writing order.
    pub const VECTOR: [ChannelKind; 4] = [
        ChannelKind::X,
        ChannelKind::Y,
        ChannelKind::Z,
        ChannelKind::Magnitude,
    ];

    /// Letter inserted after the file base in data file names.
    pub fn suffix(&self) -> &'static str {
        match self {
            ChannelKind::Scalar => "",
            ChannelKind::X => "X",
            ChannelKind::Y => "Y",
            ChannelKind::Z => "Z",
            ChannelKind::Magnitude => "M",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelExport {
    pub kind: ChannelKind,
    pub path: PathBuf,
    /// Range written to the file footer, before quantization.
    pub range: ChannelRange,
    /// Whether the script's data line names this file.
    pub listed_in_script: bool,
}

/// Files, dimensions and ranges produced by one export call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickExport {
    pub file_base: String,
    pub frame: u32,
    pub dimensions: [usize; 3],
    pub symmetric_range: bool,
    pub script_path: PathBuf,
    pub channels: Vec<ChannelExport>,
}

impl BrickExport {
    pub fn channel(&self, kind: ChannelKind) -> Option<&ChannelExport> {
        self.channels.iter().find(|channel| channel.kind == kind)
    }

    pub fn to_json(&self) -> ExportResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Manifest(e.to_string()))
    }

    pub fn from_json(json: &str) -> ExportResult<Self> {
        serde_json::from_str(json).map_err(|e| ExportError::Manifest(e.to_string()))
    }
}
