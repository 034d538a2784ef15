use axum::{routing::get, Router};

use crate::features::pages::handlers::{self, PagesState};

/// Create routes for the HTML admin
pub fn routes(state: PagesState) -> Router {
    Router::new()
        .route("/admin", get(handlers::dashboard_page))
        .route("/admin/courses", get(handlers::courses_page))
        .route("/admin/courses/{id}", get(handlers::course_page))
        .route("/admin/lessons/{id}", get(handlers::lesson_page))
        .route("/admin/enrollments", get(handlers::enrollments_page))
        .with_state(state)
}
