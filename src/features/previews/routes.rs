use axum::{routing::get, Router};

use crate::features::previews::handlers;

/// Create routes for form preview helpers
pub fn routes() -> Router {
    Router::new()
        .route("/api/slugs/preview", get(handlers::preview_slug))
        .route("/api/videos/resolve", get(handlers::resolve_video_url))
}
