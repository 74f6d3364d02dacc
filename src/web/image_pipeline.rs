// Image intake and normalization: decode each uploaded buffer, flatten it to
// plain RGB and stretch it to the requested square resolution. A single bad
// upload must not abort the batch, so each buffer yields an explicit outcome
// instead of raising.

use std::collections::BTreeMap;

use axum::body::Bytes;
use image::{RgbImage, imageops::FilterType};

/// Outcome of normalizing one uploaded buffer.
pub enum FrameOutcome {
    /// Decoded, converted to RGB and resized to the target square.
    Frame(RgbImage),
    /// The buffer was unusable; the batch continues without it.
    Skipped { field: String, reason: String },
}

/// Normalizes every buffer in field-name order. The map's lexicographic key
/// order determines frame order in the final GIF.
pub fn normalize_frames(images: &BTreeMap<String, Bytes>, resolution: u32) -> Vec<FrameOutcome> {
    images
        .iter()
        .map(|(field, data)| normalize_frame(field, data, resolution))
        .collect()
}

fn normalize_frame(field: &str, data: &[u8], resolution: u32) -> FrameOutcome {
    if data.is_empty() {
        return FrameOutcome::Skipped {
            field: field.to_string(),
            reason: "empty upload".to_string(),
        };
    }

    let decoded = match image::load_from_memory(data) {
        Ok(img) => img,
        Err(e) => {
            return FrameOutcome::Skipped {
                field: field.to_string(),
                reason: format!("decode failed: {e}"),
            };
        }
    };

    // Flattens alpha and palette modes to 3-channel RGB; transparency is
    // discarded with whatever the conversion default produces.
    let rgb = decoded.to_rgb8();

    // Stretched to a square unconditionally; aspect ratio is not preserved.
    let frame = image::imageops::resize(&rgb, resolution, resolution, FilterType::Lanczos3);

    FrameOutcome::Frame(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, pixel: [u8; 4]) -> Bytes {
        let img = RgbaImage::from_pixel(width, height, Rgba(pixel));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }

    fn fields(entries: Vec<(&str, Bytes)>) -> BTreeMap<String, Bytes> {
        entries
            .into_iter()
            .map(|(name, data)| (name.to_string(), data))
            .collect()
    }

    #[test]
    fn test_resizes_to_square_ignoring_aspect_ratio() {
        let images = fields(vec![("image_0", png_bytes(100, 40, [10, 20, 30, 255]))]);

        let outcomes = normalize_frames(&images, 64);
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            FrameOutcome::Frame(frame) => {
                assert_eq!(frame.width(), 64);
                assert_eq!(frame.height(), 64);
            }
            FrameOutcome::Skipped { reason, .. } => panic!("unexpected skip: {reason}"),
        }
    }

    #[test]
    fn test_alpha_input_is_flattened_to_rgb() {
        let images = fields(vec![("image_0", png_bytes(8, 8, [200, 100, 50, 128]))]);

        let outcomes = normalize_frames(&images, 8);
        match &outcomes[0] {
            // RgbImage has exactly three channels per pixel.
            FrameOutcome::Frame(frame) => assert_eq!(frame.as_raw().len(), 8 * 8 * 3),
            FrameOutcome::Skipped { reason, .. } => panic!("unexpected skip: {reason}"),
        }
    }

    #[test]
    fn test_empty_buffer_is_skipped() {
        let images = fields(vec![("image_0", Bytes::new())]);

        let outcomes = normalize_frames(&images, 16);
        match &outcomes[0] {
            FrameOutcome::Skipped { field, reason } => {
                assert_eq!(field, "image_0");
                assert_eq!(reason, "empty upload");
            }
            FrameOutcome::Frame(_) => panic!("empty buffer must be skipped"),
        }
    }

    #[test]
    fn test_undecodable_buffer_is_skipped_without_aborting_batch() {
        let images = fields(vec![
            ("image_a", Bytes::from_static(b"not an image at all")),
            ("image_b", png_bytes(4, 4, [1, 2, 3, 255])),
        ]);

        let outcomes = normalize_frames(&images, 16);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], FrameOutcome::Skipped { .. }));
        assert!(matches!(outcomes[1], FrameOutcome::Frame(_)));
    }

    #[test]
    fn test_outcomes_follow_field_name_order() {
        // BTreeMap iteration is lexicographic regardless of insertion order.
        let images = fields(vec![
            ("image_c", png_bytes(4, 4, [0, 0, 255, 255])),
            ("image_a", png_bytes(4, 4, [255, 0, 0, 255])),
            ("image_b", png_bytes(4, 4, [0, 255, 0, 255])),
        ]);

        let outcomes = normalize_frames(&images, 4);
        let first_pixels: Vec<[u8; 3]> = outcomes
            .iter()
            .map(|outcome| match outcome {
                FrameOutcome::Frame(frame) => frame.get_pixel(0, 0).0,
                FrameOutcome::Skipped { reason, .. } => panic!("unexpected skip: {reason}"),
            })
            .collect();

        assert_eq!(
            first_pixels,
            vec![[255, 0, 0], [0, 255, 0], [0, 0, 255]],
            "frames must come out in image_a, image_b, image_c order"
        );
    }
}
