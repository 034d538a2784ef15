use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::courses::dtos::{
    CourseQuery, CourseResponseDto, CreateCourseDto, UpdateCourseDto,
};
use crate::features::courses::services::CourseService;
use crate::shared::types::ApiResponse;

/// List courses
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "List of courses", body = ApiResponse<Vec<CourseResponseDto>>),
    ),
    tag = "courses"
)]
pub async fn list_courses(
    State(service): State<Arc<CourseService>>,
    AppQuery(query): AppQuery<CourseQuery>,
) -> Result<Json<ApiResponse<Vec<CourseResponseDto>>>> {
    let (courses, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(courses),
        None,
        Some(query.pagination().meta(total)),
    )))
}

/// Get course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = ApiResponse<CourseResponseDto>),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CourseResponseDto>>> {
    let course = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(course), None, None)))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<CourseResponseDto>),
        (status = 400, description = "Validation error or unknown category/instructor"),
        (status = 409, description = "Slug already taken")
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(service): State<Arc<CourseService>>,
    AppJson(dto): AppJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<ApiResponse<CourseResponseDto>>)> {
    dto.validate()?;

    let course = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(course),
            Some("Course created".to_string()),
            None,
        )),
    ))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<CourseResponseDto>),
        (status = 400, description = "Validation error or unknown category/instructor"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Slug already taken")
    ),
    tag = "courses"
)]
pub async fn update_course(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCourseDto>,
) -> Result<Json<ApiResponse<CourseResponseDto>>> {
    dto.validate()?;

    let course = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(course),
        Some("Course updated".to_string()),
        None,
    )))
}

/// Delete a course and its lessons
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 404, description = "Course not found")
    ),
    tag = "courses"
)]
pub async fn delete_course(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Course deleted".to_string()),
        None,
    )))
}
