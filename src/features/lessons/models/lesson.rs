use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Lesson joined with its course's title and slug
#[derive(Debug, Clone, FromRow)]
pub struct LessonRow {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub content: String,
    pub position: i32,
    pub video_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub course_title: String,
    pub course_slug: String,
}
