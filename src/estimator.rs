// Closed-form GIF size estimation. Pure arithmetic, no I/O, no dependency on
// any actual image data. The constants are empirical calibration values and
// carry no correctness guarantee relative to real encoder output.

use crate::catalog;

/// Assumed bytes per pixel before compression (RGB).
pub const BYTES_PER_PIXEL: f64 = 3.0;

/// Average compression ratio observed for GIF output.
pub const COMPRESSION_FACTOR: f64 = 0.30;

/// Resolution substituted when a label is not in the catalog. The HTTP
/// endpoint validates labels strictly before calling in, so this fallback is
/// only reachable through direct internal use.
pub const DEFAULT_RESOLUTION: u32 = 720;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Estimated output size in MB, rounded to two decimals, for a square image
/// of the given side length.
pub fn estimate_size_mb(resolution: u32) -> f64 {
    let pixels = resolution as f64 * resolution as f64;
    let estimated_bytes = pixels * BYTES_PER_PIXEL * COMPRESSION_FACTOR;
    round2(estimated_bytes / BYTES_PER_MIB)
}

/// Estimate for a quality label, substituting [`DEFAULT_RESOLUTION`] when the
/// label is unknown.
pub fn estimate_for_label(label: &str) -> f64 {
    estimate_size_mb(catalog::resolution_for(label).unwrap_or(DEFAULT_RESOLUTION))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RESOLUTIONS;

    fn reference_estimate(resolution: u32) -> f64 {
        let bytes = resolution as f64 * resolution as f64 * 3.0 * 0.30;
        (bytes / 1_048_576.0 * 100.0).round() / 100.0
    }

    #[test]
    fn test_estimate_matches_closed_form_for_all_labels() {
        for (label, resolution) in RESOLUTIONS {
            let estimate = estimate_for_label(label);
            assert_eq!(estimate, reference_estimate(resolution), "label {label}");
            assert!(estimate >= 0.0);
        }
    }

    #[test]
    fn test_estimate_is_deterministic() {
        assert_eq!(estimate_for_label("1080p"), estimate_for_label("1080p"));
    }

    #[test]
    fn test_unknown_label_falls_back_to_720() {
        assert_eq!(estimate_for_label("potato"), estimate_size_mb(720));
        assert_eq!(estimate_for_label(""), estimate_size_mb(720));
    }

    #[test]
    fn test_known_values() {
        // 720² × 3 × 0.30 / 1_048_576 = 0.4449... → 0.44
        assert_eq!(estimate_size_mb(720), 0.44);
        // 2160² × 3 × 0.30 / 1_048_576 = 4.0045... → 4.0
        assert_eq!(estimate_size_mb(2160), 4.0);
    }
}
