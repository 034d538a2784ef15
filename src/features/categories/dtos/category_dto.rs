use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::categories::models::CategoryWithCount;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{validate_color, validate_not_blank, validate_slug};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query params for the category index
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CategoryQuery {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Case-insensitive match on name or slug
    pub search: Option<String>,
}

impl CategoryQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Create request. A blank slug is derived from the name.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    /// Icon identifier, e.g. `fa-code`
    #[validate(length(max = 100))]
    pub icon: Option<String>,

    /// Hex colour such as `#1a2b3c`
    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
}

/// Edit request. Absent fields are kept; blank text fields are cleared.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,

    #[validate(length(max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub course_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryWithCount> for CategoryResponseDto {
    fn from(row: CategoryWithCount) -> Self {
        let c = row.category;
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            icon: c.icon,
            color: c.color,
            course_count: row.course_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Compact category reference embedded in course responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name_and_checks_formats() {
        let dto = CreateCategoryDto {
            name: "   ".to_string(),
            slug: Some("Bad Slug".to_string()),
            description: None,
            icon: None,
            color: Some("blue".to_string()),
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("slug"));
        assert!(fields.contains_key("color"));
    }

    #[test]
    fn test_create_accepts_blank_optional_fields() {
        let dto = CreateCategoryDto {
            name: "Web Development".to_string(),
            slug: Some(String::new()),
            description: None,
            icon: Some("fa-code".to_string()),
            color: Some(String::new()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_with_nothing_is_valid() {
        assert!(UpdateCategoryDto::default().validate().is_ok());
    }
}
