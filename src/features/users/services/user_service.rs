use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserQuery, UserResponseDto};
use crate::features::users::models::User;
use crate::features::users::services::hash_password;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, email_verified_at, created_at, updated_at";

/// Service for user administration
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated index, newest first
    pub async fn list(&self, query: &UserQuery) -> Result<(Vec<UserResponseDto>, i64)> {
        let pagination = query.pagination();

        let mut count_qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })?;

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM users", USER_COLUMNS));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let users: Vec<User> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((users.into_iter().map(Into::into).collect(), total))
    }

    async fn find(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    pub async fn get(&self, id: i64) -> Result<UserResponseDto> {
        self.find(id).await.map(Into::into)
    }

    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let password_hash = hash_password(&dto.password)?;
        let verified_at = dto.email_verified.then(Utc::now);

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, role, email_verified_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(dto.name.trim())
        .bind(dto.email.trim().to_lowercase())
        .bind(password_hash)
        .bind(dto.role)
        .bind(verified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        tracing::info!("User {} created with role {}", user.id, user.role);
        Ok(user.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateUserDto) -> Result<UserResponseDto> {
        let current = self.find(id).await?;

        let password_hash = match dto.new_password() {
            Some(password) => hash_password(password)?,
            None => current.password_hash,
        };
        let email_verified_at = match dto.email_verified {
            None => current.email_verified_at,
            Some(true) => current.email_verified_at.or_else(|| Some(Utc::now())),
            Some(false) => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = $1, email = $2, password_hash = $3, role = $4,
                email_verified_at = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(dto.name.as_deref().map(str::trim).unwrap_or(&current.name))
        .bind(
            dto.email
                .as_deref()
                .map(|e| e.trim().to_lowercase())
                .unwrap_or(current.email),
        )
        .bind(password_hash)
        .bind(dto.role.unwrap_or(current.role))
        .bind(email_verified_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        Ok(user.into())
    }

    /// Delete a user. Taught courses lose their instructor; enrollments keep a dangling reference.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        tracing::info!("User {} deleted", id);
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &UserQuery) {
    let mut prefix = " WHERE ";
    if let Some(role) = query.role {
        qb.push(prefix).push("role = ").push_bind(role);
        prefix = " AND ";
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", term);
        qb.push(prefix)
            .push("(name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
