// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Brick-of-bytes export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A data or script file could not be opened or written. Fatal for the export call.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file name base {0:?}: must be non-empty and contain no path separators")]
    InvalidFilenameBase(String),

    #[error("Manifest serialization error: {0}")]
    Manifest(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}
