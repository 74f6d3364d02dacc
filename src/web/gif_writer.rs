// Animated GIF assembly: encodes an ordered frame sequence into a single
// looping GIF and writes it into the output directory under a fresh name.

use std::path::Path;

use image::{
    Delay, DynamicImage, Frame, RgbImage,
    codecs::gif::{GifEncoder, Repeat},
};
use tracing::debug;
use uuid::Uuid;

use super::error::ApiError;

/// How long each frame is displayed, in milliseconds.
pub const FRAME_DELAY_MS: u32 = 500;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// A freshly written GIF on disk.
pub struct GifArtifact {
    /// Bare file name inside the output directory, `gif_<8 hex>.gif`.
    pub file_name: String,
    /// Encoded size in MB, rounded to two decimals.
    pub size_mb: f64,
}

/// Encodes `frames` into one infinitely looping GIF and writes it to
/// `output_dir`. The caller is responsible for rejecting an empty batch
/// before calling in; an empty sequence here is still reported as a
/// validation error, not a fault.
pub fn write_gif(frames: Vec<RgbImage>, output_dir: &Path) -> Result<GifArtifact, ApiError> {
    if frames.is_empty() {
        return Err(ApiError::BadRequest(
            "No valid images were provided".to_string(),
        ));
    }

    let file_name = generate_file_name();
    let path = output_dir.join(&file_name);

    let mut encoded = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut encoded);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ApiError::InternalServerError(format!("GIF encoding failed: {e}")))?;

        for rgb in frames {
            let rgba = DynamicImage::ImageRgb8(rgb).into_rgba8();
            let frame = Frame::from_parts(rgba, 0, 0, Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1));
            encoder
                .encode_frame(frame)
                .map_err(|e| ApiError::InternalServerError(format!("GIF encoding failed: {e}")))?;
        }
    }

    std::fs::write(&path, &encoded).map_err(|e| {
        ApiError::InternalServerError(format!("Failed to write GIF to disk: {e}"))
    })?;

    debug!("Wrote {} ({} bytes)", path.display(), encoded.len());

    Ok(GifArtifact {
        file_name,
        size_mb: round2(encoded.len() as f64 / BYTES_PER_MIB),
    })
}

// The externally visible name keeps the short token shape; the token itself
// is sliced from a full random v4 UUID.
fn generate_file_name() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("gif_{}.gif", &token[..8])
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
