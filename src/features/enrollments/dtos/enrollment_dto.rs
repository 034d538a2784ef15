use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::courses::dtos::CourseSummaryDto;
use crate::features::enrollments::models::EnrollmentRow;
use crate::features::users::dtos::UserSummaryDto;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

/// Query params for the enrollment index
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EnrollmentQuery {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub user_id: Option<i64>,
    pub course_id: Option<i64>,
    pub is_active: Option<bool>,

    /// Also list soft-deleted enrollments
    #[serde(default)]
    pub include_deleted: bool,
}

impl EnrollmentQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Query params for the duplicate check
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct EnrollmentExistsQuery {
    pub user_id: i64,
    pub course_id: i64,
    /// Enrollment being edited, left out of the check
    pub exclude_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentExistsDto {
    pub exists: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEnrollmentDto {
    pub user_id: i64,

    pub course_id: i64,

    /// Defaults to now
    pub enrolled_at: Option<DateTime<Utc>>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    /// Proceed even if the user is already enrolled in the course
    #[serde(default)]
    pub confirm_duplicate: bool,
}

/// Edit request. Absent fields are kept; blank notes are cleared.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEnrollmentDto {
    pub user_id: Option<i64>,

    pub course_id: Option<i64>,

    pub enrolled_at: Option<DateTime<Utc>>,

    pub is_active: Option<bool>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    #[serde(default)]
    pub confirm_duplicate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponseDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub course_id: Option<i64>,
    /// Absent when the user was deleted
    pub user: Option<UserSummaryDto>,
    /// Absent when the course was deleted
    pub course: Option<CourseSummaryDto>,
    pub enrolled_at: DateTime<Utc>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for EnrollmentResponseDto {
    fn from(row: EnrollmentRow) -> Self {
        let user = match (row.user_id, row.user_name, row.user_email) {
            (Some(id), Some(name), Some(email)) => Some(UserSummaryDto { id, name, email }),
            _ => None,
        };
        let course = match (row.course_id, row.course_title, row.course_slug) {
            (Some(id), Some(title), Some(slug)) => Some(CourseSummaryDto { id, title, slug }),
            _ => None,
        };

        Self {
            id: row.id,
            user_id: row.user_id,
            course_id: row.course_id,
            user,
            course,
            enrolled_at: row.enrolled_at,
            is_active: row.is_active,
            notes: row.notes,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
