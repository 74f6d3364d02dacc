use std::collections::BTreeMap;

use axum::{body::Bytes, extract::Multipart};
use tracing::debug;

use super::error::ApiError;

/// Prefix an upload field name must carry to be treated as a frame source.
pub const IMAGE_FIELD_PREFIX: &str = "image_";

/// The parsed contents of a `POST /create_gif` multipart body.
pub struct GifRequest {
    /// The `quality` text field, if one was present.
    pub quality: Option<String>,
    /// Raw image buffers keyed by field name. A `BTreeMap` so that iteration
    /// yields fields in lexicographic name order, which fixes frame order.
    pub images: BTreeMap<String, Bytes>,
}

/// Walks the multipart body, collecting the `quality` field and every
/// `image_`-prefixed file field. Other fields are ignored.
pub async fn extract_gif_request(mut multipart: Multipart) -> Result<GifRequest, ApiError> {
    let mut quality: Option<String> = None;
    let mut images: BTreeMap<String, Bytes> = BTreeMap::new();
    let mut ignored_fields = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to process multipart field: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "quality" {
            let value = field.text().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read quality field: {e}"))
            })?;
            quality = Some(value);
        } else if field_name.starts_with(IMAGE_FIELD_PREFIX) {
            let data = field.bytes().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read image field '{field_name}': {e}"))
            })?;
            debug!("Received image field '{}' ({} bytes)", field_name, data.len());
            images.insert(field_name, data);
        } else {
            debug!("Ignoring multipart field: {}", field_name);
            ignored_fields += 1;
        }
    }

    if ignored_fields > 0 {
        debug!("Ignored {} unrecognized multipart fields", ignored_fields);
    }

    Ok(GifRequest { quality, images })
}
