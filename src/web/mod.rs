// Web server module.
// Handles HTTP endpoints for GIF assembly, size preview and artifact download.

mod app;
mod error;
mod extract_request_data;
mod gif_writer;
mod handlers;
mod image_pipeline;
mod listeners;
mod models;

pub use app::create_app;
pub use listeners::create_listener;

use std::path::PathBuf;
use std::sync::Arc;

// Maximum allowed size for a multipart upload request. Fixed at an explicit
// round number rather than a derived expression.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024; // 32 MiB

/// Read-only state shared by all request handlers. Nothing here is mutated
/// after startup; requests only ever write uniquely-named files into
/// `output_dir`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory generated GIFs are written to and served from.
    pub output_dir: PathBuf,
}

pub type SharedState = Arc<AppState>;
