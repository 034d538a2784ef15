use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::dtos::CategorySummaryDto;
use crate::features::courses::models::{CourseLevel, CourseRow};
use crate::features::users::dtos::UserSummaryDto;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::price::PriceLabel;
use crate::shared::types::{deserialize_some, PaginationQuery};
use crate::shared::validation::{validate_not_blank, validate_price, validate_slug};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query params for the course index
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CourseQuery {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub category_id: Option<i64>,
    pub instructor_id: Option<i64>,
    pub level: Option<CourseLevel>,
    pub is_published: Option<bool>,

    /// Case-insensitive match on title or slug
    pub search: Option<String>,
}

impl CourseQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Create request. A blank slug is derived from the title.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(
        length(max = 255, message = "Title must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    pub category_id: Option<i64>,

    pub instructor_id: Option<i64>,

    /// Zero means free
    #[serde(default)]
    #[schema(value_type = String, example = "49.99")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[serde(default)]
    pub level: CourseLevel,

    #[serde(default)]
    pub is_published: bool,
}

/// Edit request. Absent fields are kept; `null` clears a category or instructor.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(
        length(max = 255, message = "Title must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<i64>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub instructor_id: Option<Option<i64>>,

    #[schema(value_type = Option<String>, example = "49.99")]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,

    pub level: Option<CourseLevel>,

    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponseDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<CategorySummaryDto>,
    pub instructor: Option<UserSummaryDto>,
    #[schema(value_type = String, example = "49.99")]
    pub price: Decimal,
    /// `Free` or the formatted price, e.g. `$49.99`
    pub price_label: String,
    pub is_free: bool,
    pub level: CourseLevel,
    pub is_published: bool,
    pub lesson_count: i64,
    pub enrollment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseRow> for CourseResponseDto {
    fn from(row: CourseRow) -> Self {
        // A reference whose target row is gone reads as absent
        let category = match (row.category_id, row.category_name, row.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(CategorySummaryDto {
                id,
                name,
                slug,
                color: row.category_color,
            }),
            _ => None,
        };
        let instructor = match (row.instructor_id, row.instructor_name, row.instructor_email) {
            (Some(id), Some(name), Some(email)) => Some(UserSummaryDto { id, name, email }),
            _ => None,
        };
        let label = PriceLabel::from(row.price);

        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            category,
            instructor,
            price: row.price,
            price_label: label.to_string(),
            is_free: label.is_free(),
            level: row.level,
            is_published: row.is_published,
            lesson_count: row.lesson_count,
            enrollment_count: row.enrollment_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Compact course reference embedded in lesson and enrollment responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseSummaryDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
}
