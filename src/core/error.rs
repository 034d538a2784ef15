use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::features::lessons::sequencer::PositionError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error(transparent)]
    Position(#[from] PositionError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Single-field validation failure, reported as `field: message`
    pub fn field(field: &str, message: &str) -> Self {
        AppError::Validation(format!("{}: {}", field, message))
    }
}

/// Flatten validator errors into `field: message` lines, sorted by field
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();
    messages
}

/// Convert database error to a more specific AppError with user-friendly messages
pub fn map_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            let message = match db_err.constraint() {
                Some("users_email_unique") => "A user with this email already exists",
                Some("categories_slug_unique") => "A category with this slug already exists",
                Some("courses_slug_unique") => "A course with this slug already exists",
                _ => "A record with these values already exists",
            };
            return AppError::Conflict(message.to_string());
        }

        // Foreign key violation (PostgreSQL error code 23503)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::BadRequest("Referenced record does not exist.".to_string());
        }
    }

    tracing::error!("Database error: {:?}", e);
    AppError::Database(e)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::InvalidFields(ref errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(field_messages(errors)),
            ),
            AppError::Position(ref err) => {
                let status = match err {
                    PositionError::Collision { .. } => {
                        tracing::error!("Lesson position collision: {}", err);
                        StatusCode::CONFLICT
                    }
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, err.to_string(), None)
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_field_messages_are_per_field_and_sorted() {
        let form = Form {
            title: String::new(),
            email: "nope".to_string(),
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(
            field_messages(&errors),
            vec!["email: email".to_string(), "title: Title is required".to_string()]
        );
    }

    #[test]
    fn test_position_errors_map_to_statuses() {
        let first = AppError::from(PositionError::AlreadyFirst).into_response();
        assert_eq!(first.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let last = AppError::from(PositionError::AlreadyLast).into_response();
        assert_eq!(last.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let collision = AppError::from(PositionError::Collision { position: 3 }).into_response();
        assert_eq!(collision.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_field_helper_formats_message() {
        match AppError::field("slug", "could not be derived") {
            AppError::Validation(msg) => assert_eq!(msg, "slug: could not be derived"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
