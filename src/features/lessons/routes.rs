use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::lessons::handlers;
use crate::features::lessons::services::LessonService;

/// Create routes for lessons and course position helpers
pub fn routes(service: Arc<LessonService>) -> Router {
    Router::new()
        .route(
            "/api/lessons",
            get(handlers::list_lessons).post(handlers::create_lesson),
        )
        .route(
            "/api/lessons/{id}",
            get(handlers::get_lesson)
                .put(handlers::update_lesson)
                .delete(handlers::delete_lesson),
        )
        .route("/api/lessons/{id}/move", post(handlers::move_lesson))
        .route(
            "/api/courses/{id}/positions",
            get(handlers::get_course_positions),
        )
        .with_state(service)
}
