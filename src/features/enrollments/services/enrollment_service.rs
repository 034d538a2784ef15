use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::enrollments::dtos::{
    CreateEnrollmentDto, EnrollmentQuery, EnrollmentResponseDto, UpdateEnrollmentDto,
};
use crate::features::enrollments::models::EnrollmentRow;
use crate::shared::forms::{merge_text, non_blank};

const SELECT_ENROLLMENT: &str = r#"
    SELECT e.id, e.user_id, e.course_id, e.enrolled_at, e.is_active, e.notes, e.deleted_at,
           e.created_at, e.updated_at,
           u.name AS user_name, u.email AS user_email,
           co.title AS course_title, co.slug AS course_slug
    FROM enrollments e
    LEFT JOIN users u ON u.id = e.user_id
    LEFT JOIN courses co ON co.id = e.course_id
"#;

/// Service for enrollment operations
pub struct EnrollmentService {
    pool: PgPool,
}

impl EnrollmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Paginated index, most recent enrollment first
    pub async fn list(&self, query: &EnrollmentQuery) -> Result<(Vec<EnrollmentResponseDto>, i64)> {
        let pagination = query.pagination();

        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM enrollments e");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count enrollments: {:?}", e);
                AppError::Database(e)
            })?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_ENROLLMENT);
        push_filters(&mut qb, query);
        qb.push(" ORDER BY e.enrolled_at DESC, e.id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<EnrollmentRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list enrollments: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn find(&self, id: i64) -> Result<EnrollmentRow> {
        let query = format!("{} WHERE e.id = $1 AND e.deleted_at IS NULL", SELECT_ENROLLMENT);
        sqlx::query_as::<_, EnrollmentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get enrollment {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Enrollment with id {} not found", id)))
    }

    pub async fn get(&self, id: i64) -> Result<EnrollmentResponseDto> {
        self.find(id).await.map(Into::into)
    }

    /// Whether a non-deleted enrollment (active or not) exists for the pair,
    /// ignoring `exclude_id`
    pub async fn exists(&self, user_id: i64, course_id: i64, exclude_id: Option<i64>) -> Result<bool> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM enrollments
                WHERE user_id = $1 AND course_id = $2 AND deleted_at IS NULL
                  AND ($3::BIGINT IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check enrollment duplicate: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn reject_unconfirmed_duplicate(
        &self,
        user_id: i64,
        course_id: i64,
        exclude_id: Option<i64>,
        confirmed: bool,
    ) -> Result<()> {
        if !self.exists(user_id, course_id, exclude_id).await? {
            return Ok(());
        }
        if confirmed {
            tracing::info!(
                "Duplicate enrollment of user {} in course {} confirmed",
                user_id,
                course_id
            );
            return Ok(());
        }
        Err(AppError::Conflict(
            "This user is already enrolled in this course; resubmit with confirm_duplicate to proceed"
                .to_string(),
        ))
    }

    pub async fn create(&self, dto: CreateEnrollmentDto) -> Result<EnrollmentResponseDto> {
        self.reject_unconfirmed_duplicate(dto.user_id, dto.course_id, None, dto.confirm_duplicate)
            .await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO enrollments (user_id, course_id, enrolled_at, is_active, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(dto.user_id)
        .bind(dto.course_id)
        .bind(dto.enrolled_at.unwrap_or_else(Utc::now))
        .bind(dto.is_active)
        .bind(non_blank(dto.notes))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        tracing::info!(
            "Enrollment {} created: user {} in course {}",
            id,
            dto.user_id,
            dto.course_id
        );
        self.get(id).await
    }

    /// Partial update. Re-pointing at a pair that is already enrolled needs confirmation.
    pub async fn update(&self, id: i64, dto: UpdateEnrollmentDto) -> Result<EnrollmentResponseDto> {
        let current = self.find(id).await?;

        let user_id = dto.user_id.or(current.user_id);
        let course_id = dto.course_id.or(current.course_id);
        if let (Some(user_id), Some(course_id)) = (user_id, course_id) {
            self.reject_unconfirmed_duplicate(user_id, course_id, Some(id), dto.confirm_duplicate)
                .await?;
        }

        let result = sqlx::query(
            r#"
            UPDATE enrollments
            SET user_id = $1, course_id = $2, enrolled_at = $3, is_active = $4, notes = $5,
                updated_at = NOW()
            WHERE id = $6 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(dto.enrolled_at.unwrap_or(current.enrolled_at))
        .bind(dto.is_active.unwrap_or(current.is_active))
        .bind(merge_text(current.notes, dto.notes))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Enrollment with id {} not found", id)));
        }

        self.get(id).await
    }

    /// Soft delete: the row stays for history, deactivated
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE enrollments
            SET deleted_at = NOW(), is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Enrollment with id {} not found", id)));
        }

        tracing::info!("Enrollment {} deleted", id);
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &EnrollmentQuery) {
    let mut prefix = " WHERE ";
    if !query.include_deleted {
        qb.push(prefix).push("e.deleted_at IS NULL");
        prefix = " AND ";
    }
    if let Some(user_id) = query.user_id {
        qb.push(prefix).push("e.user_id = ").push_bind(user_id);
        prefix = " AND ";
    }
    if let Some(course_id) = query.course_id {
        qb.push(prefix).push("e.course_id = ").push_bind(course_id);
        prefix = " AND ";
    }
    if let Some(active) = query.is_active {
        qb.push(prefix).push("e.is_active = ").push_bind(active);
    }
}
