// Numeric-to-display conversions.

/// Maximum Shannon entropy of a byte distribution, in bits.
pub const MAX_ENTROPY: f64 = 8.0;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable file size, e.g. `"1.5 KB"`.
///
/// Uses 1024-based units up to GB and rounds to two decimals, dropping
/// trailing zeros (`1 MB`, not `1.00 MB`). Sizes past 1024 GB stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit_index = 0;
    while unit_index + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(unit_index as u32 + 1) {
        unit_index += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit_index as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit_index])
}

/// Width of the entropy bar as a percentage, always within [0, 100].
pub fn entropy_fill_percent(entropy: f64) -> f64 {
    let percent = entropy / MAX_ENTROPY * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Confidence as a whole percentage, rounded half away from zero.
pub fn confidence_percent(confidence: f64) -> u8 {
    let percent = (confidence * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u8
}

/// Sweep of the confidence ring in degrees, within [0, 360].
pub fn confidence_arc_degrees(confidence: f64) -> f64 {
    let degrees = confidence * 360.0;
    if degrees.is_nan() {
        return 0.0;
    }
    degrees.clamp(0.0, 360.0)
}

/// Entropy with two decimals, as shown next to the bar.
pub fn format_entropy(entropy: f64) -> String {
    format!("{entropy:.2}")
}
