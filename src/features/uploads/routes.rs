use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;

use crate::features::uploads::handlers::upload_photo;
use crate::features::uploads::services::IntakeService;
use crate::shared::constants::CAPTURED_IMAGES_PATH;

/// Create routes for the uploads feature
pub fn routes(intake_service: Arc<IntakeService>) -> Router {
    let max_upload_size = intake_service.config().max_upload_size;

    Router::new()
        .route("/upload", post(upload_photo))
        // Oversized bodies are rejected here with 413 before the handler runs
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_size))
        .with_state(intake_service)
}

/// Serve stored photos by name. No access control.
pub fn captured_images_routes(upload_dir: &Path) -> Router {
    Router::new().nest_service(CAPTURED_IMAGES_PATH, ServeDir::new(upload_dir))
}
