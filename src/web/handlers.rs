// API handlers for the web server

use super::{
    SharedState,
    error::ApiError,
    extract_request_data::extract_gif_request,
    gif_writer,
    image_pipeline::{self, FrameOutcome},
    models::*,
};
use crate::{catalog, estimator};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

// --- POST /create_gif ---
// Builds an animated GIF from the uploaded image fields. The preflight
// OPTIONS request is answered by the permissive CORS layer.
pub async fn create_gif(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<CreateGifResponse>, ApiError> {
    let request = extract_gif_request(multipart).await?;

    let quality = request
        .quality
        .ok_or_else(|| ApiError::BadRequest("Quality not specified".to_string()))?;
    let resolution = catalog::resolution_for(&quality)
        .ok_or_else(|| ApiError::BadRequest("Invalid quality".to_string()))?;

    if request.images.is_empty() {
        return Err(ApiError::BadRequest("No images provided".to_string()));
    }

    info!(
        "GIF request: quality={}, resolution={}, images={}",
        quality,
        resolution,
        request.images.len()
    );

    // Decode, resize and encode are all CPU-bound; keep them off the async
    // workers.
    let output_dir = state.output_dir.clone();
    let artifact = tokio::task::spawn_blocking(move || {
        let mut frames = Vec::new();
        for outcome in image_pipeline::normalize_frames(&request.images, resolution) {
            match outcome {
                FrameOutcome::Frame(frame) => frames.push(frame),
                FrameOutcome::Skipped { field, reason } => {
                    warn!("Skipping image field '{}': {}", field, reason);
                }
            }
        }

        if frames.is_empty() {
            return Err(ApiError::BadRequest(
                "No valid images were provided".to_string(),
            ));
        }

        gif_writer::write_gif(frames, &output_dir)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("GIF encoding task failed: {e}")))??;

    info!("GIF created: {} ({} MB)", artifact.file_name, artifact.size_mb);

    Ok(Json(CreateGifResponse {
        message: "GIF created successfully".to_string(),
        size: artifact.size_mb,
        path: format!("/output/{}", artifact.file_name),
    }))
}

// --- GET /preview_size?quality=<label> ---
// Pure arithmetic estimate; touches no image data. Unknown labels are
// rejected here even though the underlying computation has a fallback.
pub async fn preview_size(
    Query(params): Query<PreviewSizeQuery>,
) -> Result<Json<PreviewSizeResponse>, ApiError> {
    let quality = params.quality.unwrap_or_default();
    catalog::resolution_for(&quality)
        .ok_or_else(|| ApiError::BadRequest("Invalid quality".to_string()))?;

    Ok(Json(PreviewSizeResponse {
        size: estimator::estimate_for_label(&quality),
    }))
}

// --- GET /output/{filename} ---
// Serves a previously generated artifact as a download.
pub async fn get_artifact(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    // Only bare file names are valid artifact names; anything that would
    // escape the output directory is treated as absent.
    if filename.is_empty()
        || filename == ".."
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(ApiError::NotFound("GIF not found".to_string()));
    }

    let path = state.output_dir.join(&filename);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound("GIF not found".to_string())
        } else {
            ApiError::InternalServerError(format!("Failed to read GIF: {e}"))
        }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/gif".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response())
}
