// The resolution catalog shared by the upload path and the size estimator.
// Built once at compile time and never mutated, so it needs no synchronization.

/// Quality labels accepted by the API, paired with the square pixel dimension
/// each one maps to. `1440p` is 2K, `2160p` is 4K.
pub const RESOLUTIONS: [(&str, u32); 6] = [
    ("360p", 360),
    ("480p", 480),
    ("720p", 720),
    ("1080p", 1080),
    ("1440p", 1440),
    ("2160p", 2160),
];

/// Looks up the pixel dimension for a quality label. Returns `None` for any
/// label outside the catalog; callers on the upload path must reject those
/// before touching any image data.
pub fn resolution_for(label: &str) -> Option<u32> {
    RESOLUTIONS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, resolution)| *resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_labels_resolve() {
        assert_eq!(resolution_for("360p"), Some(360));
        assert_eq!(resolution_for("480p"), Some(480));
        assert_eq!(resolution_for("720p"), Some(720));
        assert_eq!(resolution_for("1080p"), Some(1080));
        assert_eq!(resolution_for("1440p"), Some(1440));
        assert_eq!(resolution_for("2160p"), Some(2160));
    }

    #[test]
    fn test_unknown_labels_rejected() {
        assert_eq!(resolution_for("4k"), None);
        assert_eq!(resolution_for("720"), None);
        assert_eq!(resolution_for(""), None);
        assert_eq!(resolution_for("720P"), None);
    }

    #[test]
    fn test_catalog_has_six_entries() {
        assert_eq!(RESOLUTIONS.len(), 6);
    }
}
