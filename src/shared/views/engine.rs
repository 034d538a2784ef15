//! Template engine for the server-rendered admin pages.
//!
//! Templates live in `templates/admin/` and are compiled into the binary, so
//! rendering never depends on the working directory.

use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

use crate::shared::constants::{MISSING_RELATION_LABEL, UNCATEGORIZED_LABEL};

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const TEMPLATES: &[(&str, &str)] = &[
    (
        "layout.html",
        include_str!("../../../templates/admin/layout.html"),
    ),
    (
        "macros.html",
        include_str!("../../../templates/admin/macros.html"),
    ),
    (
        "dashboard.html",
        include_str!("../../../templates/admin/dashboard.html"),
    ),
    (
        "courses/index.html",
        include_str!("../../../templates/admin/courses/index.html"),
    ),
    (
        "courses/show.html",
        include_str!("../../../templates/admin/courses/show.html"),
    ),
    (
        "lessons/show.html",
        include_str!("../../../templates/admin/lessons/show.html"),
    ),
    (
        "enrollments/index.html",
        include_str!("../../../templates/admin/enrollments/index.html"),
    ),
];

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
    env.add_global("missing_label", MISSING_RELATION_LABEL);
    env.add_global("uncategorized_label", UNCATEGORIZED_LABEL);

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render an admin page with a serializable context.
///
/// `.html` templates are auto-escaped; lesson content is marked `|safe` in the
/// template itself.
pub fn render_page<S: Serialize>(template_name: &str, ctx: S) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
