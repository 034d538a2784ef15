use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::enrollments::dtos::{
    CreateEnrollmentDto, EnrollmentExistsDto, EnrollmentExistsQuery, EnrollmentQuery,
    EnrollmentResponseDto, UpdateEnrollmentDto,
};
use crate::features::enrollments::services::EnrollmentService;
use crate::shared::types::ApiResponse;

/// List enrollments
#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(EnrollmentQuery),
    responses(
        (status = 200, description = "List of enrollments", body = ApiResponse<Vec<EnrollmentResponseDto>>),
    ),
    tag = "enrollments"
)]
pub async fn list_enrollments(
    State(service): State<Arc<EnrollmentService>>,
    AppQuery(query): AppQuery<EnrollmentQuery>,
) -> Result<Json<ApiResponse<Vec<EnrollmentResponseDto>>>> {
    let (enrollments, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(enrollments),
        None,
        Some(query.pagination().meta(total)),
    )))
}

/// Check whether a user is already enrolled in a course
#[utoipa::path(
    get,
    path = "/api/enrollments/exists",
    params(EnrollmentExistsQuery),
    responses(
        (status = 200, description = "Duplicate check result", body = ApiResponse<EnrollmentExistsDto>),
        (status = 400, description = "Missing user_id or course_id")
    ),
    tag = "enrollments"
)]
pub async fn enrollment_exists(
    State(service): State<Arc<EnrollmentService>>,
    AppQuery(query): AppQuery<EnrollmentExistsQuery>,
) -> Result<Json<ApiResponse<EnrollmentExistsDto>>> {
    let exists = service
        .exists(query.user_id, query.course_id, query.exclude_id)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(EnrollmentExistsDto { exists }),
        None,
        None,
    )))
}

/// Get enrollment by id
#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(
        ("id" = i64, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 200, description = "Enrollment found", body = ApiResponse<EnrollmentResponseDto>),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "enrollments"
)]
pub async fn get_enrollment(
    State(service): State<Arc<EnrollmentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EnrollmentResponseDto>>> {
    let enrollment = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(enrollment), None, None)))
}

/// Enroll a user in a course
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = ApiResponse<EnrollmentResponseDto>),
        (status = 400, description = "Validation error or unknown user/course"),
        (status = 409, description = "Already enrolled and not confirmed")
    ),
    tag = "enrollments"
)]
pub async fn create_enrollment(
    State(service): State<Arc<EnrollmentService>>,
    AppJson(dto): AppJson<CreateEnrollmentDto>,
) -> Result<(StatusCode, Json<ApiResponse<EnrollmentResponseDto>>)> {
    dto.validate()?;

    let enrollment = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(enrollment),
            Some("Enrollment created".to_string()),
            None,
        )),
    ))
}

/// Update an enrollment
#[utoipa::path(
    put,
    path = "/api/enrollments/{id}",
    params(
        ("id" = i64, Path, description = "Enrollment ID")
    ),
    request_body = UpdateEnrollmentDto,
    responses(
        (status = 200, description = "Enrollment updated", body = ApiResponse<EnrollmentResponseDto>),
        (status = 400, description = "Validation error or unknown user/course"),
        (status = 404, description = "Enrollment not found"),
        (status = 409, description = "Already enrolled and not confirmed")
    ),
    tag = "enrollments"
)]
pub async fn update_enrollment(
    State(service): State<Arc<EnrollmentService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateEnrollmentDto>,
) -> Result<Json<ApiResponse<EnrollmentResponseDto>>> {
    dto.validate()?;

    let enrollment = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(enrollment),
        Some("Enrollment updated".to_string()),
        None,
    )))
}

/// Soft-delete an enrollment
#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(
        ("id" = i64, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 200, description = "Enrollment deleted"),
        (status = 404, description = "Enrollment not found")
    ),
    tag = "enrollments"
)]
pub async fn delete_enrollment(
    State(service): State<Arc<EnrollmentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Enrollment deleted".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::enrollments::{routes, EnrollmentService};
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;

    fn server() -> TestServer {
        let service = Arc::new(EnrollmentService::new(lazy_pool()));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_exists_requires_both_ids() {
        let response = server().get("/api/enrollments/exists?user_id=1").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_requires_user_and_course() {
        let response = server()
            .post("/api/enrollments")
            .json(&json!({ "course_id": 3 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
