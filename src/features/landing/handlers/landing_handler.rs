use axum::{extract::State, response::Html};
use minijinja::context;
use std::sync::Arc;

use crate::core::config::IntakeConfig;
use crate::core::error::AppError;
use crate::shared::templates::{render_template, INDEX_TEMPLATE};

/// Landing page with the photo capture form
pub async fn index(State(config): State<Arc<IntakeConfig>>) -> Result<Html<String>, AppError> {
    let accept = config
        .allowed_extensions
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");

    let allowed_extensions = if config.enforce_extensions {
        config.allowed_extensions.join(", ")
    } else {
        "any file type".to_string()
    };

    let html = render_template(
        INDEX_TEMPLATE,
        context! {
            accept => if config.enforce_extensions { accept } else { "image/*".to_string() },
            allowed_extensions => allowed_extensions,
            max_upload_mb => config.max_upload_size / 1024 / 1024,
        },
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Html(html))
}
