use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::enrollments::handlers;
use crate::features::enrollments::services::EnrollmentService;

/// Create routes for the enrollments feature
pub fn routes(service: Arc<EnrollmentService>) -> Router {
    Router::new()
        .route(
            "/api/enrollments",
            get(handlers::list_enrollments).post(handlers::create_enrollment),
        )
        .route("/api/enrollments/exists", get(handlers::enrollment_exists))
        .route(
            "/api/enrollments/{id}",
            get(handlers::get_enrollment)
                .put(handlers::update_enrollment)
                .delete(handlers::delete_enrollment),
        )
        .with_state(service)
}
