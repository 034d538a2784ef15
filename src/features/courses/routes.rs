use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::courses::handlers;
use crate::features::courses::services::CourseService;

/// Create routes for the courses feature
pub fn routes(service: Arc<CourseService>) -> Router {
    Router::new()
        .route(
            "/api/courses",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/api/courses/{id}",
            get(handlers::get_course)
                .put(handlers::update_course)
                .delete(handlers::delete_course),
        )
        .with_state(service)
}
