// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! `%g`-style number formatting.
//!
//! Footers and script comments are read by external volume viewers that expect
//! C `printf` output, which Rust's `{}` and `{:e}` do not reproduce
//! (`1e-5` vs `1e-05`, `63.0` vs `63`).

/// Formats `value` like C's `%.<precision>g`.
///
/// # Examples
/// ```
/// use vortexgrid_serialization::format_g;
///
/// assert_eq!(format_g(63.0, 6), "63");
/// assert_eq!(format_g(0.00001, 6), "1e-05");
/// assert_eq!(format_g(1234567.0, 6), "1.23457e+06");
/// ```
pub fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let precision = precision.max(1);
    // The exponent decides the style, measured after rounding to `precision` digits
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Formats `value` like C's `%<width>.<precision>g`, right-aligned.
pub fn format_g_padded(value: f64, width: usize, precision: usize) -> String {
    format!("{:>width$}", format_g(value, precision), width = width)
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
