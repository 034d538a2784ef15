use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::features::users::models::{User, UserRole};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MIN_PASSWORD_LENGTH};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::validate_not_blank;

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query params for the user index
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UserQuery {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub role: Option<UserRole>,

    /// Case-insensitive match on name or email
    pub search: Option<String>,
}

impl UserQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(max = 255), custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(email(message = "Email must be a valid address"), length(max = 255))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: UserRole,

    /// Mark the address as verified right away
    #[serde(default)]
    pub email_verified: bool,
}

/// Edit request. Absent fields are kept; a blank password keeps the current one.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(email(message = "Email must be a valid address"), length(max = 255))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_new_password"))]
    pub password: Option<String>,

    pub role: Option<UserRole>,

    /// `true` stamps the verification time (if unset), `false` clears it
    pub email_verified: Option<bool>,
}

/// Blank means "unchanged"; anything else must meet the minimum length
fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() || password.chars().count() as u64 >= MIN_PASSWORD_LENGTH {
        return Ok(());
    }
    let mut err = ValidationError::new("length");
    err.message = Some("Password must be at least 8 characters".into());
    Err(err)
}

impl UpdateUserDto {
    /// New password to hash, if one was actually entered
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            is_verified: u.email_verified_at.is_some(),
            email_verified_at: u.email_verified_at,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Compact user reference embedded in course and enrollment responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let dto = CreateUserDto {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            role: UserRole::Instructor,
            email_verified: false,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn test_role_defaults_to_student() {
        let dto: CreateUserDto = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.com","password":"correct horse"}"#,
        )
        .unwrap();
        assert_eq!(dto.role, UserRole::Student);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_blank_password_on_update_keeps_current() {
        let dto = UpdateUserDto {
            password: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(dto.new_password(), None);
        assert!(dto.validate().is_ok());

        let short = UpdateUserDto {
            password: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_response_never_contains_password_hash() {
        let now = Utc::now();
        let dto = UserResponseDto::from(User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: UserRole::Admin,
            email_verified_at: Some(now),
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("argon2"));
        assert!(dto.is_verified);
    }
}
