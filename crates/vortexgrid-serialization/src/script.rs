// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Append-only OGLE script that indexes exported bricks.
//!
//! Every export call appends two lines: a comment with the value ranges and a
//! data line with the grid dimensions followed by the data file paths.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use vortexgrid_structures::Vec3;

use crate::error::{ExportError, ExportResult};
use crate::printf::format_g_padded;

const RANGE_WIDTH: usize = 9;
const RANGE_PRECISION: usize = 7;

fn range_number(value: f32) -> String {
    format_g_padded(f64::from(value), RANGE_WIDTH, RANGE_PRECISION)
}

pub(crate) fn scalar_range_comment(file_base: &str, min: f32, max: f32) -> String {
    format!(
        "# {} ranges: {} to {}",
        file_base,
        range_number(min),
        range_number(max)
    )
}

pub(crate) fn vector_range_comment(file_base: &str, min: Vec3, max: Vec3) -> String {
    format!(
        "# {} ranges: {{{},{},{}}} to {{{},{},{}}}",
        file_base,
        range_number(min.x),
        range_number(min.y),
        range_number(min.z),
        range_number(max.x),
        range_number(max.y),
        range_number(max.z)
    )
}

pub(crate) fn data_line(dimensions: [usize; 3], files: &[&Path]) -> String {
    let [nx, ny, nz] = dimensions;
    let mut line = format!("{}x{}x{}", nx, ny, nz);
    for file in files {
        line.push(' ');
        line.push_str(&file.display().to_string());
    }
    line
}

/// Path of the script shared by every export with this file base.
pub fn script_path(script_dir: &Path, file_base: &str) -> PathBuf {
    script_dir.join(format!("{}.ogle", file_base))
}

/// Appends `lines` to the script, creating it on first use.
pub(crate) fn append_lines(path: &Path, lines: &[String]) -> ExportResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ExportError::io(path, e))?;
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    file.write_all(text.as_bytes())
        .map_err(|e| ExportError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_comment_format() {
        assert_eq!(
            scalar_range_comment("vort", -63.0, 63.0),
            "# vort ranges:       -63 to        63"
        );
    }

    #[test]
    fn test_vector_comment_format() {
        let line = vector_range_comment(
            "vel",
            Vec3::new(-1.0, -0.5, 0.0),
            Vec3::new(1.0, 0.5, 0.25),
        );
        assert_eq!(
            line,
            "# vel ranges: {       -1,     -0.5,        0} to {        1,      0.5,     0.25}"
        );
    }

    #[test]
    fn test_data_line_lists_files_in_order() {
        let line = data_line(
            [4, 5, 6],
            &[Path::new("Vols/aX00001-4x5x6.dat"), Path::new("Vols/aY00001-4x5x6.dat")],
        );
        assert_eq!(line, "4x5x6 Vols/aX00001-4x5x6.dat Vols/aY00001-4x5x6.dat");
    }

    #[test]
    fn test_append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = script_path(dir.path(), "vort");
        append_lines(&path, &["first".to_string()]).unwrap();
        append_lines(&path, &["second".to_string(), "third".to_string()]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\nthird\n");
    }
}
