use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "course_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseLevel::Beginner => write!(f, "beginner"),
            CourseLevel::Intermediate => write!(f, "intermediate"),
            CourseLevel::Advanced => write!(f, "advanced"),
        }
    }
}

/// Course joined with its (optional) category and instructor plus counts.
///
/// The joined columns are all nullable: the references are `ON DELETE SET NULL`.
#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub instructor_id: Option<i64>,
    pub price: Decimal,
    pub level: CourseLevel,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub category_color: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: Option<String>,

    pub lesson_count: i64,
    pub enrollment_count: i64,
}
