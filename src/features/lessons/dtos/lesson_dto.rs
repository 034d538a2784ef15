use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::courses::dtos::CourseSummaryDto;
use crate::features::lessons::models::LessonRow;
use crate::features::lessons::sequencer::{LessonPosition, MoveDirection};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::validate_not_blank;
use crate::shared::video::{resolve_video, VideoRef};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query params for the lesson index
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LessonQuery {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub course_id: Option<i64>,
    pub is_published: Option<bool>,
}

impl LessonQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Create request. Without a position the lesson goes to the end of the course.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    pub course_id: i64,

    #[validate(
        length(max = 255, message = "Title must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    /// HTML body
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,

    #[validate(range(min = 1, message = "Position must be at least 1"))]
    pub position: Option<i32>,

    pub video_url: Option<String>,

    #[serde(default)]
    pub is_published: bool,
}

/// Edit request. Absent fields are kept; a blank video URL clears it.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonDto {
    /// Moving to another course without a position appends the lesson there
    pub course_id: Option<i64>,

    #[validate(
        length(max = 255, message = "Title must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(custom(function = "validate_not_blank"))]
    pub content: Option<String>,

    #[validate(range(min = 1, message = "Position must be at least 1"))]
    pub position: Option<i32>,

    pub video_url: Option<String>,

    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct MoveLessonDto {
    pub direction: MoveDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LessonResponseDto {
    pub id: i64,
    pub course: CourseSummaryDto,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub video_url: Option<String>,
    /// Resolved provider reference for `video_url`
    pub video: Option<VideoRef>,
    /// Player URL for YouTube, Vimeo and direct files
    pub video_embed_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LessonRow> for LessonResponseDto {
    fn from(row: LessonRow) -> Self {
        let video = row.video_url.as_deref().map(resolve_video);
        let video_embed_url = video.as_ref().and_then(VideoRef::embed_url);

        Self {
            id: row.id,
            course: CourseSummaryDto {
                id: row.course_id,
                title: row.course_title,
                slug: row.course_slug,
            },
            title: row.title,
            content: row.content,
            position: row.position,
            video_url: row.video_url,
            video,
            video_embed_url,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LessonPositionDto {
    pub id: i64,
    pub position: i32,
}

impl From<LessonPosition> for LessonPositionDto {
    fn from(p: LessonPosition) -> Self {
        Self {
            id: p.id,
            position: p.position,
        }
    }
}

/// Positions in use within a course, for "position already taken" hints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoursePositionsDto {
    pub course_id: i64,
    /// Ascending
    pub positions: Vec<i32>,
    /// One past the lesson count; may be taken after a delete
    pub next_available: i32,
    pub first_unused: i32,
    /// Where a lesson created without a position will go
    pub append_at: i32,
}
