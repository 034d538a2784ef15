use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::lessons::dtos::{
    CoursePositionsDto, CreateLessonDto, LessonPositionDto, LessonQuery, LessonResponseDto,
    MoveLessonDto, UpdateLessonDto,
};
use crate::features::lessons::services::LessonService;
use crate::shared::types::ApiResponse;

/// List lessons
#[utoipa::path(
    get,
    path = "/api/lessons",
    params(LessonQuery),
    responses(
        (status = 200, description = "Lessons ordered by course and position", body = ApiResponse<Vec<LessonResponseDto>>),
    ),
    tag = "lessons"
)]
pub async fn list_lessons(
    State(service): State<Arc<LessonService>>,
    AppQuery(query): AppQuery<LessonQuery>,
) -> Result<Json<ApiResponse<Vec<LessonResponseDto>>>> {
    let (lessons, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(lessons),
        None,
        Some(query.pagination().meta(total)),
    )))
}

/// Get lesson by id
#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(
        ("id" = i64, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson found", body = ApiResponse<LessonResponseDto>),
        (status = 404, description = "Lesson not found")
    ),
    tag = "lessons"
)]
pub async fn get_lesson(
    State(service): State<Arc<LessonService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LessonResponseDto>>> {
    let lesson = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(lesson), None, None)))
}

/// Create a lesson
#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = ApiResponse<LessonResponseDto>),
        (status = 400, description = "Validation error or unknown course"),
        (status = 409, description = "Position already taken")
    ),
    tag = "lessons"
)]
pub async fn create_lesson(
    State(service): State<Arc<LessonService>>,
    AppJson(dto): AppJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<ApiResponse<LessonResponseDto>>)> {
    dto.validate()?;

    let lesson = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(lesson),
            Some("Lesson created".to_string()),
            None,
        )),
    ))
}

/// Update a lesson
#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(
        ("id" = i64, Path, description = "Lesson ID")
    ),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = ApiResponse<LessonResponseDto>),
        (status = 400, description = "Validation error or unknown course"),
        (status = 404, description = "Lesson not found"),
        (status = 409, description = "Position already taken")
    ),
    tag = "lessons"
)]
pub async fn update_lesson(
    State(service): State<Arc<LessonService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateLessonDto>,
) -> Result<Json<ApiResponse<LessonResponseDto>>> {
    dto.validate()?;

    let lesson = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(lesson),
        Some("Lesson updated".to_string()),
        None,
    )))
}

/// Delete a lesson
#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(
        ("id" = i64, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson deleted"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "lessons"
)]
pub async fn delete_lesson(
    State(service): State<Arc<LessonService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Lesson deleted".to_string()),
        None,
    )))
}

/// Move a lesson one step up or down within its course
#[utoipa::path(
    post,
    path = "/api/lessons/{id}/move",
    params(
        ("id" = i64, Path, description = "Lesson ID")
    ),
    request_body = MoveLessonDto,
    responses(
        (status = 200, description = "Positions after the move", body = ApiResponse<Vec<LessonPositionDto>>),
        (status = 404, description = "Lesson not found"),
        (status = 409, description = "Two lessons share a position"),
        (status = 422, description = "Already first or last")
    ),
    tag = "lessons"
)]
pub async fn move_lesson(
    State(service): State<Arc<LessonService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<MoveLessonDto>,
) -> Result<Json<ApiResponse<Vec<LessonPositionDto>>>> {
    let positions = service.move_lesson(id, dto.direction).await?;
    Ok(Json(ApiResponse::success(
        Some(positions),
        Some("Lesson moved".to_string()),
        None,
    )))
}

/// Positions used within a course, with the next free suggestions
#[utoipa::path(
    get,
    path = "/api/courses/{id}/positions",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Position summary", body = ApiResponse<CoursePositionsDto>),
        (status = 404, description = "Course not found")
    ),
    tag = "lessons"
)]
pub async fn get_course_positions(
    State(service): State<Arc<LessonService>>,
    Path(course_id): Path<i64>,
) -> Result<Json<ApiResponse<CoursePositionsDto>>> {
    let positions = service.course_positions(course_id).await?;
    Ok(Json(ApiResponse::success(Some(positions), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::features::lessons::{routes, LessonService};
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server() -> TestServer {
        let service = Arc::new(LessonService::new(lazy_pool()));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_title_content_and_positive_position() {
        let response = server()
            .post("/api/lessons")
            .json(&json!({ "course_id": 1, "title": "", "content": " ", "position": 0 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        let errors: Vec<String> = serde_json::from_value(body["errors"].clone()).unwrap();
        assert_eq!(
            errors,
            vec![
                "content: This field is required".to_string(),
                "position: Position must be at least 1".to_string(),
                "title: This field is required".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_move_rejects_unknown_direction() {
        let response = server()
            .post("/api/lessons/1/move")
            .json(&json!({ "direction": "sideways" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
