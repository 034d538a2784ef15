use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseStatsDto {
    pub total: i64,
    pub published: i64,
    pub free: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonStatsDto {
    pub total: i64,
    pub published: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentStatsDto {
    /// Non-deleted enrollments
    pub total: i64,
    pub active: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleCountDto {
    pub role: UserRole,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStatsDto {
    pub categories: i64,
    pub courses: CourseStatsDto,
    pub lessons: LessonStatsDto,
    pub enrollments: EnrollmentStatsDto,
    /// Every role, including those with no users
    pub users_by_role: Vec<RoleCountDto>,
}
