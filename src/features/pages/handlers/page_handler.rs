use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
};
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::courses::dtos::CourseQuery;
use crate::features::courses::CourseService;
use crate::features::dashboard::DashboardService;
use crate::features::enrollments::dtos::EnrollmentQuery;
use crate::features::enrollments::EnrollmentService;
use crate::features::lessons::LessonService;
use crate::shared::views::render_page;

/// Services the admin pages read from
#[derive(Clone)]
pub struct PagesState {
    pub dashboard: Arc<DashboardService>,
    pub courses: Arc<CourseService>,
    pub lessons: Arc<LessonService>,
    pub enrollments: Arc<EnrollmentService>,
}

pub async fn dashboard_page(State(state): State<PagesState>) -> Result<Html<String>> {
    let stats = state.dashboard.stats().await?;
    Ok(Html(render_page("dashboard.html", context! { stats })?))
}

pub async fn courses_page(
    State(state): State<PagesState>,
    AppQuery(query): AppQuery<CourseQuery>,
) -> Result<Html<String>> {
    let (courses, total) = state.courses.list(&query).await?;
    let meta = query.pagination().meta(total);
    Ok(Html(render_page(
        "courses/index.html",
        context! { courses, meta },
    )?))
}

pub async fn course_page(
    State(state): State<PagesState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let course = state.courses.get(id).await?;
    let lessons = state.lessons.list_for_course(id).await?;
    let next_position = state.lessons.append_position(id).await?;
    Ok(Html(render_page(
        "courses/show.html",
        context! { course, lessons, next_position },
    )?))
}

pub async fn lesson_page(
    State(state): State<PagesState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let lesson = state.lessons.get(id).await?;
    Ok(Html(render_page("lessons/show.html", context! { lesson })?))
}

pub async fn enrollments_page(
    State(state): State<PagesState>,
    AppQuery(query): AppQuery<EnrollmentQuery>,
) -> Result<Html<String>> {
    let (enrollments, total) = state.enrollments.list(&query).await?;
    let meta = query.pagination().meta(total);
    Ok(Html(render_page(
        "enrollments/index.html",
        context! { enrollments, meta },
    )?))
}
