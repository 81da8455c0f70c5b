use axum::{routing::get, Router};
use std::sync::Arc;

use crate::core::config::IntakeConfig;
use crate::features::landing::handlers::index;

/// Create routes for the landing page
pub fn routes(config: Arc<IntakeConfig>) -> Router {
    Router::new().route("/", get(index)).with_state(config)
}
