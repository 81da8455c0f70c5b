//! HTML page rendering using Jinja2 syntax.
//!
//! Templates are compiled into the binary from `templates/` so the service
//! does not depend on its working directory to render pages.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Landing page with the capture form
pub const INDEX_TEMPLATE: &str = "index.html.jinja";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    if let Err(e) = env.add_template(
        INDEX_TEMPLATE,
        include_str!("../../templates/index.html.jinja"),
    ) {
        tracing::warn!("Failed to load template {}: {}", INDEX_TEMPLATE, e);
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context
pub fn render_template(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
