use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::courses::{
    dtos as courses_dtos, handlers as courses_handlers, models as courses_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::enrollments::{dtos as enrollments_dtos, handlers as enrollments_handlers};
use crate::features::lessons::{
    dtos as lessons_dtos, handlers as lessons_handlers, sequencer as lessons_sequencer,
};
use crate::features::previews::{dtos as previews_dtos, handlers as previews_handlers};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::video::VideoRef;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::get_category_by_slug,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Courses
        courses_handlers::list_courses,
        courses_handlers::get_course,
        courses_handlers::create_course,
        courses_handlers::update_course,
        courses_handlers::delete_course,
        // Lessons
        lessons_handlers::list_lessons,
        lessons_handlers::get_lesson,
        lessons_handlers::create_lesson,
        lessons_handlers::update_lesson,
        lessons_handlers::delete_lesson,
        lessons_handlers::move_lesson,
        lessons_handlers::get_course_positions,
        // Enrollments
        enrollments_handlers::list_enrollments,
        enrollments_handlers::enrollment_exists,
        enrollments_handlers::get_enrollment,
        enrollments_handlers::create_enrollment,
        enrollments_handlers::update_enrollment,
        enrollments_handlers::delete_enrollment,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Previews
        previews_handlers::preview_slug,
        previews_handlers::resolve_video_url,
        // Dashboard
        dashboard_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            VideoRef,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategorySummaryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Courses
            courses_models::CourseLevel,
            courses_dtos::CreateCourseDto,
            courses_dtos::UpdateCourseDto,
            courses_dtos::CourseResponseDto,
            courses_dtos::CourseSummaryDto,
            ApiResponse<courses_dtos::CourseResponseDto>,
            ApiResponse<Vec<courses_dtos::CourseResponseDto>>,
            // Lessons
            lessons_sequencer::MoveDirection,
            lessons_dtos::CreateLessonDto,
            lessons_dtos::UpdateLessonDto,
            lessons_dtos::MoveLessonDto,
            lessons_dtos::LessonResponseDto,
            lessons_dtos::LessonPositionDto,
            lessons_dtos::CoursePositionsDto,
            ApiResponse<lessons_dtos::LessonResponseDto>,
            ApiResponse<Vec<lessons_dtos::LessonResponseDto>>,
            ApiResponse<Vec<lessons_dtos::LessonPositionDto>>,
            ApiResponse<lessons_dtos::CoursePositionsDto>,
            // Enrollments
            enrollments_dtos::CreateEnrollmentDto,
            enrollments_dtos::UpdateEnrollmentDto,
            enrollments_dtos::EnrollmentResponseDto,
            enrollments_dtos::EnrollmentExistsDto,
            ApiResponse<enrollments_dtos::EnrollmentResponseDto>,
            ApiResponse<Vec<enrollments_dtos::EnrollmentResponseDto>>,
            ApiResponse<enrollments_dtos::EnrollmentExistsDto>,
            // Users
            users_models::UserRole,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserResponseDto,
            users_dtos::UserSummaryDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Previews
            previews_dtos::SlugPreviewDto,
            previews_dtos::VideoPreviewDto,
            ApiResponse<previews_dtos::SlugPreviewDto>,
            ApiResponse<previews_dtos::VideoPreviewDto>,
            // Dashboard
            dashboard_dtos::DashboardStatsDto,
            dashboard_dtos::CourseStatsDto,
            dashboard_dtos::LessonStatsDto,
            dashboard_dtos::EnrollmentStatsDto,
            dashboard_dtos::RoleCountDto,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
        )
    ),
    tags(
        (name = "categories", description = "Course categories"),
        (name = "courses", description = "Courses with category, instructor and price"),
        (name = "lessons", description = "Lessons and their ordering within a course"),
        (name = "enrollments", description = "Enrollments and the duplicate check"),
        (name = "users", description = "Admin-managed user accounts"),
        (name = "previews", description = "Slug and video previews for admin forms"),
        (name = "dashboard", description = "Dashboard statistics"),
    ),
    info(
        title = "Coursedesk API",
        version = "0.1.0",
        description = "Admin API for categories, courses, lessons, enrollments and users",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_helper_endpoints() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/lessons/{id}/move",
            "/api/courses/{id}/positions",
            "/api/enrollments/exists",
            "/api/slugs/preview",
            "/api/videos/resolve",
            "/api/dashboard/stats",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Staging".to_string(),
            version: "9.9.9".to_string(),
            description: "staging build".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Staging");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
