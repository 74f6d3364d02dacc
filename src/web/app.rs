use super::{MAX_UPLOAD_BYTES, SharedState, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

pub fn create_app(state: SharedState) -> Router {
    // Configure the router with all API endpoints
    Router::new()
        // GIF assembly
        .route("/create_gif", post(handlers::create_gif))
        // Closed-form size preview
        .route("/preview_size", get(handlers::preview_size))
        // Generated artifact download
        .route("/output/{filename}", get(handlers::get_artifact))
        // Apply a layer to limit the maximum size of request bodies
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Add CORS layer for broader client compatibility (also answers the
        // OPTIONS preflight on /create_gif)
        .layer(CorsLayer::permissive())
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        // Provide the shared state
        .with_state(state)
}
