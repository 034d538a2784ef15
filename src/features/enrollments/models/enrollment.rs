use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Enrollment joined with its user and course, both of which may be gone
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub course_id: Option<i64>,
    pub enrolled_at: DateTime<Utc>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub course_title: Option<String>,
    pub course_slug: Option<String>,
}
